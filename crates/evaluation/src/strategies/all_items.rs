//! Rank the whole catalog (training and test items) minus the user's own
//! training items. The most pessimistic strategy.

use crate::traits::{EvaluationStrategy, StrategyBase};
use data_loader::{ItemId, UserId};
use std::collections::BTreeSet;

pub struct AllItems {
    base: StrategyBase,
}

impl AllItems {
    pub fn new(base: StrategyBase) -> Self {
        Self { base }
    }
}

impl EvaluationStrategy for AllItems {
    fn name(&self) -> &str {
        "AllItems"
    }

    fn base(&self) -> &StrategyBase {
        &self.base
    }

    fn candidate_items(&self, user: UserId) -> BTreeSet<ItemId> {
        let catalog = self.base.training.items().chain(self.base.test.items());
        self.base.unrated_in_training(user, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataModel, Preference};
    use std::sync::Arc;

    #[test]
    fn test_union_of_catalogs() {
        let training = Arc::new(DataModel::from_preferences(vec![
            Preference::new(1, 1, 5.0),
            Preference::new(2, 2, 5.0),
        ]));
        let test = Arc::new(DataModel::from_preferences(vec![Preference::new(3, 7, 4.0)]));
        let strategy = AllItems::new(StrategyBase::new(training, test, 3.0));

        assert_eq!(strategy.candidate_items(1), BTreeSet::from([2, 7]));
        assert_eq!(strategy.candidate_items(3), BTreeSet::from([1, 2, 7]));
    }
}
