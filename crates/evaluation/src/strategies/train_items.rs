//! Rank every item of the training set the user has not rated there.

use crate::traits::{EvaluationStrategy, StrategyBase};
use data_loader::{ItemId, UserId};
use std::collections::BTreeSet;

pub struct TrainItems {
    base: StrategyBase,
}

impl TrainItems {
    pub fn new(base: StrategyBase) -> Self {
        Self { base }
    }
}

impl EvaluationStrategy for TrainItems {
    fn name(&self) -> &str {
        "TrainItems"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn candidate_items(&self, user: UserId) -> BTreeSet<ItemId> {
        self.base.unrated_in_training(user, self.base.training.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataModel, Preference};
    use std::sync::Arc;

    #[test]
    fn test_training_catalog_minus_rated() {
        let training = Arc::new(DataModel::from_preferences(vec![
            Preference::new(1, 1, 5.0),
            Preference::new(2, 2, 5.0),
            Preference::new(2, 3, 5.0),
        ]));
        let test = Arc::new(DataModel::from_preferences(vec![Preference::new(1, 9, 4.0)]));
        let strategy = TrainItems::new(StrategyBase::new(training, test, 3.0));

        // Item 9 only appears in the test set
        assert_eq!(strategy.candidate_items(1), BTreeSet::from([2, 3]));
    }
}
