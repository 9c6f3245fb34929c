//! Core traits for evaluation strategies.
//!
//! An evaluation strategy decides, per user, which items are eligible to be
//! scored against the ground truth. Strategies are built from a fold's
//! training and test models and a relevance threshold.

use data_loader::{DataModel, ItemId, UserId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Data every strategy is built from
#[derive(Debug, Clone)]
pub struct StrategyBase {
    pub training: Arc<DataModel>,
    pub test: Arc<DataModel>,
    /// Test preferences at or above this value are relevant
    pub threshold: f64,
}

impl StrategyBase {
    pub fn new(training: Arc<DataModel>, test: Arc<DataModel>, threshold: f64) -> Self {
        Self {
            training,
            test,
            threshold,
        }
    }

    /// Keep the items `user` has no training preference for
    pub fn unrated_in_training(
        &self,
        user: UserId,
        items: impl Iterator<Item = ItemId>,
    ) -> BTreeSet<ItemId> {
        items
            .filter(|&item| self.training.preference(user, item).is_none())
            .collect()
    }

    /// Relevant test items of `user` with their test preference
    pub fn relevant_items(&self, user: UserId) -> BTreeMap<ItemId, f64> {
        self.test
            .user_preferences(user)
            .map(|prefs| {
                prefs
                    .iter()
                    .filter(|&(_, &value)| value >= self.threshold)
                    .map(|(&item, &value)| (item, value))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Core trait for candidate selection.
///
/// `Send + Sync` allows strategies to be shared across threads.
pub trait EvaluationStrategy: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &str;

    /// The data this strategy was built from
    fn base(&self) -> &StrategyBase;

    /// Items that may be ranked for `user`
    fn candidate_items(&self, user: UserId) -> BTreeSet<ItemId>;

    /// Ground truth for `user`: relevant test items and their preference
    fn true_relevance(&self, user: UserId) -> BTreeMap<ItemId, f64> {
        self.base().relevant_items(user)
    }
}
