//! Normalised discounted cumulative gain.
//!
//! The test preference of an item is its graded relevance; items missing
//! from the test set have relevance 0. `NDCG@k = DCG@k / IDCG@k`, where the
//! ideal ranking sorts the user's test preferences descending. A user whose
//! ideal DCG is 0 scores 0.

use super::RankingMetric;
use data_loader::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How relevance and rank turn into gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GainType {
    /// `(2^rel - 1) / log2(rank + 1)`
    #[default]
    Exponential,
    /// `rel` at rank 1, then `rel / log2(rank)`
    Linear,
    /// `rel / log2(rank + 1)`, as trec_eval computes it
    TrecEval,
}

impl GainType {
    /// Discounted gain of relevance `rel` at 1-based `rank`
    fn gain(&self, rel: f64, rank: usize) -> f64 {
        let rank = rank as f64;
        match self {
            GainType::Exponential => (2f64.powf(rel) - 1.0) / (rank + 1.0).log2(),
            GainType::Linear if rank <= 1.0 => rel,
            GainType::Linear => rel / rank.log2(),
            GainType::TrecEval => rel / (rank + 1.0).log2(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ndcg {
    cutoffs: Vec<usize>,
    gain: GainType,
}

impl Ndcg {
    pub fn new(cutoffs: &[usize]) -> Self {
        Self::with_gain(cutoffs, GainType::default())
    }

    pub fn with_gain(cutoffs: &[usize], gain: GainType) -> Self {
        Self {
            cutoffs: cutoffs.to_vec(),
            gain,
        }
    }

    fn dcg(&self, relevances: impl Iterator<Item = f64>) -> f64 {
        relevances
            .enumerate()
            .map(|(idx, rel)| self.gain.gain(rel, idx + 1))
            .sum()
    }
}

impl RankingMetric for Ndcg {
    fn name(&self) -> &str {
        "NDCG"
    }

    fn cutoffs(&self) -> &[usize] {
        &self.cutoffs
    }

    fn user_value(&self, ranked: &[(ItemId, f64)], truth: &BTreeMap<ItemId, f64>, at: usize) -> f64 {
        let mut ideal: Vec<f64> = truth.values().copied().collect();
        ideal.sort_by(|a, b| b.total_cmp(a));
        let idcg = self.dcg(ideal.into_iter().take(at));
        if idcg <= 0.0 {
            return 0.0;
        }

        let dcg = self.dcg(
            ranked
                .iter()
                .take(at)
                .map(|(item, _)| truth.get(item).copied().unwrap_or(0.0)),
        );
        dcg / idcg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{DataModel, Preference};

    fn truth(pairs: &[(ItemId, f64)]) -> BTreeMap<ItemId, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_perfect_ranking_scores_one() {
        let ndcg = Ndcg::new(&[10]);
        let t = truth(&[(1, 5.0), (2, 3.0)]);
        let ranked = vec![(1, 4.9), (2, 3.1), (3, 1.0)];
        assert!((ndcg.user_value(&ranked, &t, 10) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_swapped_ranking_exponential() {
        let ndcg = Ndcg::new(&[2]);
        let t = truth(&[(1, 2.0), (2, 1.0)]);
        let ranked = vec![(2, 5.0), (1, 4.0)];

        // DCG = 1/1 + 3/log2(3); IDCG = 3/1 + 1/log2(3)
        let expected = (1.0 + 3.0 / 3f64.log2()) / (3.0 + 1.0 / 3f64.log2());
        assert!((ndcg.user_value(&ranked, &t, 2) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_linear_gain_first_rank_undiscounted() {
        let ndcg = Ndcg::with_gain(&[2], GainType::Linear);
        let t = truth(&[(1, 2.0), (2, 4.0)]);
        let ranked = vec![(1, 5.0), (2, 4.0)];

        // DCG = 2 + 4/1; IDCG = 4 + 2/1
        assert!((ndcg.user_value(&ranked, &t, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_user_without_predictions_scores_zero() {
        let test = DataModel::from_preferences(vec![
            Preference::new(1, 1, 5.0),
            Preference::new(2, 1, 5.0),
        ]);
        let predictions = DataModel::from_preferences(vec![Preference::new(1, 1, 4.0)]);

        let result = Ndcg::new(&[10]).compute(&predictions, &test);
        assert_eq!(result.at[&10].per_user[&2], 0.0);
        assert!((result.value_at(10).unwrap() - 0.5).abs() < 1e-12);
        assert!(result.value_at(5).is_none());
    }
}
