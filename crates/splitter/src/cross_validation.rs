//! k-fold cross validation.
//!
//! ## Algorithm
//! Per-user policy:
//! 1. Visit users in ascending id order
//! 2. Shuffle each user's rated items with the seeded RNG
//! 3. Deal the shuffled items round-robin over the folds: the item at
//!    position `n` of the whole walk goes to the test set of fold
//!    `n % folds` and to the training set of every other fold
//!
//! The position keeps counting across users, so test set sizes differ by at
//! most one between folds.
//!
//! Global policy: every (user, item) pair is shuffled once as a whole and the
//! pair at position `n` is assigned to fold `n % folds` the same way.
//!
//! Each pair therefore appears in exactly one test set, and never in the
//! training set of the fold it is tested in.

use crate::Splitter;
use data_loader::{DataModel, ItemId, Split, UserId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Seeded k-fold splitter
#[derive(Debug, Clone, Copy)]
pub struct CrossValidationSplitter {
    folds: usize,
    per_user: bool,
    seed: u64,
}

impl CrossValidationSplitter {
    /// Create a splitter producing `folds` train/test pairs.
    ///
    /// `per_user` spreads each user's ratings over the folds; otherwise all
    /// ratings are shuffled together.
    pub fn new(folds: usize, per_user: bool, seed: u64) -> Self {
        Self {
            folds,
            per_user,
            seed,
        }
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Assign `pair` to fold `test_fold`: test there, training everywhere else
    fn assign(&self, splits: &mut [Split], data: &DataModel, (user, item): (UserId, ItemId), test_fold: usize) {
        for (fold, split) in splits.iter_mut().enumerate() {
            let target = if fold == test_fold {
                &mut split.test
            } else {
                &mut split.training
            };
            target.copy_pair_from(data, user, item);
        }
    }
}

impl Splitter for CrossValidationSplitter {
    #[instrument(skip(self, data), fields(folds = self.folds, per_user = self.per_user))]
    fn split(&self, data: &DataModel) -> Vec<Split> {
        if self.folds == 0 {
            return Vec::new();
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut splits: Vec<Split> = (0..self.folds).map(|_| Split::new()).collect();

        if self.per_user {
            let mut position = 0;
            for user in data.users() {
                let mut items: Vec<ItemId> = data.user_items(user).collect();
                items.shuffle(&mut rng);
                for item in items {
                    self.assign(&mut splits, data, (user, item), position % self.folds);
                    position += 1;
                }
            }
        } else {
            let mut pairs: Vec<(UserId, ItemId)> = data
                .users()
                .flat_map(|user| data.user_items(user).map(move |item| (user, item)))
                .collect();
            pairs.shuffle(&mut rng);
            for (n, pair) in pairs.into_iter().enumerate() {
                self.assign(&mut splits, data, pair, n % self.folds);
            }
        }

        for (fold, split) in splits.iter().enumerate() {
            debug!(
                "Fold {}: {} training / {} test preferences",
                fold,
                split.training.num_preferences(),
                split.test.num_preferences()
            );
        }
        splits
    }
}
