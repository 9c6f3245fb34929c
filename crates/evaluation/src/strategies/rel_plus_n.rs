//! Rank each relevant test item together with `n` random items.
//!
//! The random items are drawn from the catalog (training and test items)
//! among those the user has rated nowhere, so they are assumed
//! non-relevant. Sampling is seeded per user: the candidates of a user do
//! not depend on the order in which users are asked for.

use crate::traits::{EvaluationStrategy, StrategyBase};
use data_loader::{ItemId, UserId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

/// Number of random items added when no other value is configured
pub const DEFAULT_N: usize = 100;

pub struct RelPlusN {
    base: StrategyBase,
    n: usize,
    seed: u64,
}

impl RelPlusN {
    pub fn new(base: StrategyBase, n: usize, seed: u64) -> Self {
        Self { base, n, seed }
    }
}

impl EvaluationStrategy for RelPlusN {
    fn name(&self) -> &str {
        "RelPlusN"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn candidate_items(&self, user: UserId) -> BTreeSet<ItemId> {
        let relevant = self.base.relevant_items(user);
        if relevant.is_empty() {
            return BTreeSet::new();
        }

        let mut pool: Vec<ItemId> = self
            .base
            .training
            .item_set()
            .union(self.base.test.item_set())
            .copied()
            .filter(|&item| {
                self.base.training.preference(user, item).is_none()
                    && self.base.test.preference(user, item).is_none()
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed ^ user);
        pool.shuffle(&mut rng);
        pool.truncate(self.n);

        relevant.into_keys().chain(pool).collect()
    }
}
