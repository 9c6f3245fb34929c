//! Rank every item that appears in the test set, minus the user's own
//! training items.

use crate::traits::{EvaluationStrategy, StrategyBase};
use data_loader::{ItemId, UserId};
use std::collections::BTreeSet;

pub struct TestItems {
    base: StrategyBase,
}

impl TestItems {
    pub fn new(base: StrategyBase) -> Self {
        Self { base }
    }
}

impl EvaluationStrategy for TestItems {
    fn name(&self) -> &str {
        "TestItems"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn candidate_items(&self, user: UserId) -> BTreeSet<ItemId> {
        self.base.unrated_in_training(user, self.base.test.items())
    }
}
