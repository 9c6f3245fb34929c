//! Precision at k: the share of the top k recommendations that are relevant.
//!
//! An item is relevant when its test preference is at or above the
//! threshold. The denominator is always k, even when fewer than k items
//! were recommended.

use super::RankingMetric;
use data_loader::ItemId;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Precision {
    cutoffs: Vec<usize>,
    threshold: f64,
}

impl Precision {
    pub fn new(cutoffs: &[usize], threshold: f64) -> Self {
        Self {
            cutoffs: cutoffs.to_vec(),
            threshold,
        }
    }
}

/// Number of relevant items among the first `at` ranked items
pub(crate) fn hits_at(
    ranked: &[(ItemId, f64)],
    truth: &BTreeMap<ItemId, f64>,
    threshold: f64,
    at: usize,
) -> usize {
    ranked
        .iter()
        .take(at)
        .filter(|(item, _)| truth.get(item).is_some_and(|&value| value >= threshold))
        .count()
}

impl RankingMetric for Precision {
    fn name(&self) -> &str {
        "Precision"
    }

    fn cutoffs(&self) -> &[usize] {
        &self.cutoffs
    }

    fn user_value(&self, ranked: &[(ItemId, f64)], truth: &BTreeMap<ItemId, f64>, at: usize) -> f64 {
        if at == 0 {
            return 0.0;
        }
        hits_at(ranked, truth, self.threshold, at) as f64 / at as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataModel, Preference};

    #[test]
    fn test_precision_uses_threshold() {
        let truth: BTreeMap<ItemId, f64> = [(1, 5.0), (2, 2.0), (3, 3.0)].into_iter().collect();
        let ranked = vec![(1, 4.0), (2, 3.5), (3, 3.0), (4, 2.0)];
        let precision = Precision::new(&[2, 4], 3.0);

        assert_eq!(precision.user_value(&ranked, &truth, 2), 0.5);
        assert_eq!(precision.user_value(&ranked, &truth, 4), 0.5);
    }

    #[test]
    fn test_short_list_still_divides_by_k() {
        let truth: BTreeMap<ItemId, f64> = [(1, 5.0)].into_iter().collect();
        let ranked = vec![(1, 4.0)];
        assert_eq!(Precision::new(&[10], 3.0).user_value(&ranked, &truth, 10), 0.1);
    }

    #[test]
    fn test_compute_averages_users() {
        let test = DataModel::from_preferences(vec![
            Preference::new(1, 1, 5.0),
            Preference::new(2, 2, 5.0),
        ]);
        let predictions = DataModel::from_preferences(vec![
            Preference::new(1, 1, 4.0),
            Preference::new(2, 3, 4.0),
        ]);
        let result = Precision::new(&[1], 3.0).compute(&predictions, &test);
        assert_eq!(result.value_at(1), Some(0.5));
    }
}
