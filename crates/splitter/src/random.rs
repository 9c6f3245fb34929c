//! Single holdout split.
//!
//! Shuffles ratings with a seeded RNG and keeps the first
//! `round(percentage_training * n)` of them for training. With `per_user`
//! the cut is made inside each user's ratings, so every user keeps roughly
//! the same share in both halves.

use crate::Splitter;
use data_loader::{DataModel, ItemId, Split, UserId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Seeded train/test holdout splitter
#[derive(Debug, Clone, Copy)]
pub struct RandomSplitter {
    percentage_training: f64,
    per_user: bool,
    seed: u64,
}

impl RandomSplitter {
    /// `percentage_training` is clamped to `[0.0, 1.0]`
    pub fn new(percentage_training: f64, per_user: bool, seed: u64) -> Self {
        Self {
            percentage_training: percentage_training.clamp(0.0, 1.0),
            per_user,
            seed,
        }
    }

    fn training_len(&self, n: usize) -> usize {
        (self.percentage_training * n as f64).round() as usize
    }

    fn distribute(&self, split: &mut Split, data: &DataModel, pairs: Vec<(UserId, ItemId)>) {
        let cut = self.training_len(pairs.len());
        for (n, (user, item)) in pairs.into_iter().enumerate() {
            let target = if n < cut {
                &mut split.training
            } else {
                &mut split.test
            };
            target.copy_pair_from(data, user, item);
        }
    }
}

impl Splitter for RandomSplitter {
    fn split(&self, data: &DataModel) -> Vec<Split> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut split = Split::new();

        if self.per_user {
            for user in data.users() {
                let mut pairs: Vec<(UserId, ItemId)> =
                    data.user_items(user).map(|item| (user, item)).collect();
                pairs.shuffle(&mut rng);
                self.distribute(&mut split, data, pairs);
            }
        } else {
            let mut pairs: Vec<(UserId, ItemId)> = data
                .users()
                .flat_map(|user| data.user_items(user).map(move |item| (user, item)))
                .collect();
            pairs.shuffle(&mut rng);
            self.distribute(&mut split, data, pairs);
        }

        debug!(
            "Holdout split: {} training / {} test preferences",
            split.training.num_preferences(),
            split.test.num_preferences()
        );
        vec![split]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Preference;

    fn dataset() -> DataModel {
        DataModel::from_preferences(
            (1..=4u64).flat_map(|u| (1..=10u64).map(move |i| Preference::new(u, i, 3.0))),
        )
    }

    #[test]
    fn test_per_user_share() {
        let splits = RandomSplitter::new(0.8, true, 11).split(&dataset());
        assert_eq!(splits.len(), 1);

        let split = &splits[0];
        for user in 1..=4u64 {
            assert_eq!(split.training.user_items(user).count(), 8);
            assert_eq!(split.test.user_items(user).count(), 2);
        }
    }

    #[test]
    fn test_global_share_and_disjointness() {
        let splits = RandomSplitter::new(0.25, false, 11).split(&dataset());
        let split = &splits[0];

        assert_eq!(split.training.num_preferences(), 10);
        assert_eq!(split.test.num_preferences(), 30);
        for user in split.test.users() {
            for item in split.test.user_items(user) {
                assert!(split.training.preference(user, item).is_none());
            }
        }
    }

    #[test]
    fn test_percentage_is_clamped() {
        let splits = RandomSplitter::new(1.5, false, 1).split(&dataset());
        assert!(splits[0].test.is_empty());
    }
}
