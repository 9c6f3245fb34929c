//! Strategy selection and application.
//!
//! [`StrategyKind`] is the configuration key naming one of the built-in
//! strategies. [`filter_recommendations`] applies a built strategy to a
//! recommendation model, keeping only the recommended items that are
//! candidates for their user.

use crate::error::EvaluationError;
use crate::strategies::{rel_plus_n, AllItems, RelPlusN, TestItems, TrainItems, UserTest};
use crate::traits::{EvaluationStrategy, StrategyBase};
use data_loader::DataModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Closed set of evaluation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    UserTest,
    TestItems,
    TrainItems,
    AllItems,
    RelPlusN,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::UserTest,
        StrategyKind::TestItems,
        StrategyKind::TrainItems,
        StrategyKind::AllItems,
        StrategyKind::RelPlusN,
    ];

    /// Build the strategy for one fold.
    ///
    /// `seed` is only used by strategies that sample.
    pub fn build(
        &self,
        training: Arc<DataModel>,
        test: Arc<DataModel>,
        threshold: f64,
        seed: u64,
    ) -> Box<dyn EvaluationStrategy> {
        let base = StrategyBase::new(training, test, threshold);
        match self {
            StrategyKind::UserTest => Box::new(UserTest::new(base)),
            StrategyKind::TestItems => Box::new(TestItems::new(base)),
            StrategyKind::TrainItems => Box::new(TrainItems::new(base)),
            StrategyKind::AllItems => Box::new(AllItems::new(base)),
            StrategyKind::RelPlusN => Box::new(RelPlusN::new(base, rel_plus_n::DEFAULT_N, seed)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::UserTest => "user-test",
            StrategyKind::TestItems => "test-items",
            StrategyKind::TrainItems => "train-items",
            StrategyKind::AllItems => "all-items",
            StrategyKind::RelPlusN => "rel-plus-n",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| EvaluationError::UnknownStrategy(s.to_string()))
    }
}

/// Keep the recommendations whose item is a candidate for its user.
///
/// Scores are copied unchanged from `recommendations`.
pub fn filter_recommendations(
    strategy: &dyn EvaluationStrategy,
    recommendations: &DataModel,
) -> DataModel {
    let mut filtered = DataModel::new();
    for user in recommendations.users() {
        for item in strategy.candidate_items(user) {
            if let Some(score) = recommendations.preference(user, item) {
                filtered.add_preference(user, item, score);
            }
        }
    }
    debug!(
        "{} kept {} of {} recommendations",
        strategy.name(),
        filtered.num_preferences(),
        recommendations.num_preferences()
    );
    filtered
}
