//! Rank only the items the user has in the test set.
//!
//! This is the most optimistic strategy: every candidate has a known test
//! preference, so error metrics see the whole candidate list.

use crate::traits::{EvaluationStrategy, StrategyBase};
use data_loader::{ItemId, UserId};
use std::collections::BTreeSet;

pub struct UserTest {
    base: StrategyBase,
}

impl UserTest {
    pub fn new(base: StrategyBase) -> Self {
        Self { base }
    }
}

impl EvaluationStrategy for UserTest {
    fn name(&self) -> &str {
        "UserTest"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn candidate_items(&self, user: UserId) -> BTreeSet<ItemId> {
        self.base.test.user_items(user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataModel, Preference};
    use std::sync::Arc;

    #[test]
    fn test_candidates_are_user_test_items() {
        let training = Arc::new(DataModel::from_preferences(vec![Preference::new(1, 1, 5.0)]));
        let test = Arc::new(DataModel::from_preferences(vec![
            Preference::new(1, 2, 4.0),
            Preference::new(1, 3, 1.0),
            Preference::new(2, 4, 5.0),
        ]));
        let strategy = UserTest::new(StrategyBase::new(training, test, 3.0));

        assert_eq!(strategy.candidate_items(1), BTreeSet::from([2, 3]));
        assert!(strategy.candidate_items(9).is_empty());

        let relevance = strategy.true_relevance(1);
        assert_eq!(relevance.len(), 1);
        assert_eq!(relevance.get(&2), Some(&4.0));
    }
}
