//! Recall at k: the share of the user's relevant test items found in the
//! top k recommendations. Users without relevant items score 0.

use super::RankingMetric;
use super::precision::hits_at;
use data_loader::ItemId;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Recall {
    cutoffs: Vec<usize>,
    threshold: f64,
}

impl Recall {
    pub fn new(cutoffs: &[usize], threshold: f64) -> Self {
        Self {
            cutoffs: cutoffs.to_vec(),
            threshold,
        }
    }
}

impl RankingMetric for Recall {
    fn name(&self) -> &str {
        "Recall"
    }

    fn cutoffs(&self) -> &[usize] {
        &self.cutoffs
    }

    fn user_value(&self, ranked: &[(ItemId, f64)], truth: &BTreeMap<ItemId, f64>, at: usize) -> f64 {
        let relevant = truth.values().filter(|&&value| value >= self.threshold).count();
        if relevant == 0 {
            return 0.0;
        }
        hits_at(ranked, truth, self.threshold, at) as f64 / relevant as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recall() {
        let truth: BTreeMap<ItemId, f64> =
            [(1, 5.0), (2, 4.0), (3, 1.0), (4, 4.0)].into_iter().collect();
        let ranked = vec![(9, 5.0), (1, 4.0), (3, 3.0), (2, 2.0)];
        let recall = Recall::new(&[2, 4], 4.0);

        assert!((recall.user_value(&ranked, &truth, 2) - 1.0 / 3.0).abs() < 1e-12);
        assert!((recall.user_value(&ranked, &truth, 4) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_relevant_items() {
        let truth: BTreeMap<ItemId, f64> = [(1, 1.0)].into_iter().collect();
        assert_eq!(Recall::new(&[5], 4.0).user_value(&[(1, 5.0)], &truth, 5), 0.0);
    }
}
