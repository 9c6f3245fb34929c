//! Ranking and error metrics.
//!
//! Ranking metrics ([`Ndcg`], [`Precision`], [`Recall`]) are computed per test
//! user at one or more cutoffs and averaged over all test users. A test user
//! without predictions scores 0. Error metrics ([`Rmse`], [`Mae`]) compare
//! predicted and actual values over the (user, item) pairs present in both
//! models.
//!
//! Undefined aggregates (no test users, no overlapping pairs) are `NaN`.

pub mod rating_error;
pub mod ndcg;
pub mod precision;
pub mod recall;

pub use rating_error::{Mae, Rmse};
pub use ndcg::{GainType, Ndcg};
pub use precision::Precision;
pub use recall::Recall;

use data_loader::{DataModel, ItemId, UserId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregate value plus the per-user values it was averaged from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub value: f64,
    pub per_user: BTreeMap<UserId, f64>,
}

impl MetricResult {
    fn from_per_user(per_user: BTreeMap<UserId, f64>) -> Self {
        let value = if per_user.is_empty() {
            f64::NAN
        } else {
            per_user.values().sum::<f64>() / per_user.len() as f64
        };
        Self { value, per_user }
    }
}

/// Results of a ranking metric, one per cutoff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub at: BTreeMap<usize, MetricResult>,
}

impl RankingResult {
    /// Aggregate value at cutoff `at`, if that cutoff was computed
    pub fn value_at(&self, at: usize) -> Option<f64> {
        self.at.get(&at).map(|result| result.value)
    }
}

/// A user's predictions sorted by score DESC, ties by item id ASC
pub fn ranked_items(predictions: &DataModel, user: UserId) -> Vec<(ItemId, f64)> {
    let mut ranked: Vec<(ItemId, f64)> = predictions
        .user_preferences(user)
        .map(|prefs| prefs.iter().map(|(&item, &score)| (item, score)).collect())
        .unwrap_or_default();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

/// Metrics computed on the ranked list of each test user
pub trait RankingMetric: Send + Sync {
    fn name(&self) -> &str;

    fn cutoffs(&self) -> &[usize];

    /// Value for one user: `ranked` is the user's ranked predictions,
    /// `truth` the user's test preferences
    fn user_value(&self, ranked: &[(ItemId, f64)], truth: &BTreeMap<ItemId, f64>, at: usize) -> f64;

    /// Compute the metric at every cutoff over all test users
    fn compute(&self, predictions: &DataModel, test: &DataModel) -> RankingResult {
        let mut per_cutoff: BTreeMap<usize, BTreeMap<UserId, f64>> = self
            .cutoffs()
            .iter()
            .map(|&at| (at, BTreeMap::new()))
            .collect();

        for user in test.users() {
            let Some(truth) = test.user_preferences(user) else {
                continue;
            };
            let ranked = ranked_items(predictions, user);
            for (&at, values) in per_cutoff.iter_mut() {
                values.insert(user, self.user_value(&ranked, truth, at));
            }
        }

        let result = RankingResult {
            at: per_cutoff
                .into_iter()
                .map(|(at, values)| (at, MetricResult::from_per_user(values)))
                .collect(),
        };
        debug!("{} computed at cutoffs {:?}", self.name(), self.cutoffs());
        result
    }
}

/// Metrics comparing predicted values with test values
pub trait ErrorMetric: Send + Sync {
    fn name(&self) -> &str;

    /// Aggregate the per-pair errors of one user or of the whole model
    fn aggregate(&self, errors: &[f64]) -> f64;

    fn compute(&self, predictions: &DataModel, test: &DataModel) -> MetricResult {
        let mut all_errors = Vec::new();
        let mut per_user = BTreeMap::new();

        for user in test.users() {
            let Some(truth) = test.user_preferences(user) else {
                continue;
            };
            let errors: Vec<f64> = truth
                .iter()
                .filter_map(|(&item, &actual)| {
                    predictions.preference(user, item).map(|predicted| predicted - actual)
                })
                .collect();
            if errors.is_empty() {
                continue;
            }
            per_user.insert(user, self.aggregate(&errors));
            all_errors.extend(errors);
        }

        let value = if all_errors.is_empty() {
            f64::NAN
        } else {
            self.aggregate(&all_errors)
        };
        debug!("{} over {} pairs: {}", self.name(), all_errors.len(), value);
        MetricResult { value, per_user }
    }
}
