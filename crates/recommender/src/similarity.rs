//! User-user similarity measures.
//!
//! All measures only look at co-rated items, the items both users have a
//! preference for. A similarity that cannot be computed (no overlap, zero
//! variance) is `f64::NAN` and callers must skip it.

use crate::error::RecommenderError;
use data_loader::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of supported similarity measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Similarity {
    /// Pearson correlation, centred on the means of the co-rated items
    #[default]
    Pearson,
    /// Uncentred cosine of the co-rated preference vectors
    Cosine,
    /// `1 / (1 + d / sqrt(n))` where `d` is the Euclidean distance over `n`
    /// co-rated items
    Euclidean,
}

/// Running sums over co-rated items
#[derive(Debug, Default)]
struct CoRatings {
    n: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_x2: f64,
    sum_y2: f64,
    sum_diff2: f64,
}

impl CoRatings {
    fn collect(a: &BTreeMap<ItemId, f64>, b: &BTreeMap<ItemId, f64>) -> Self {
        // Walk the smaller map, look up in the larger one
        let (small, large, swapped) = if a.len() <= b.len() {
            (a, b, false)
        } else {
            (b, a, true)
        };

        let mut sums = CoRatings::default();
        for (item, &first) in small {
            let Some(&second) = large.get(item) else {
                continue;
            };
            let (x, y) = if swapped { (second, first) } else { (first, second) };
            sums.n += 1;
            sums.sum_x += x;
            sums.sum_y += y;
            sums.sum_xy += x * y;
            sums.sum_x2 += x * x;
            sums.sum_y2 += y * y;
            sums.sum_diff2 += (x - y) * (x - y);
        }
        sums
    }
}

impl Similarity {
    /// Similarity between two users' preference maps
    pub fn user_similarity(&self, a: &BTreeMap<ItemId, f64>, b: &BTreeMap<ItemId, f64>) -> f64 {
        let s = CoRatings::collect(a, b);
        if s.n == 0 {
            return f64::NAN;
        }
        let n = s.n as f64;

        let value = match self {
            Similarity::Pearson => {
                let numerator = s.sum_xy - s.sum_x * s.sum_y / n;
                let denominator =
                    ((s.sum_x2 - s.sum_x * s.sum_x / n) * (s.sum_y2 - s.sum_y * s.sum_y / n)).sqrt();
                if denominator == 0.0 {
                    return f64::NAN;
                }
                numerator / denominator
            }
            Similarity::Cosine => {
                let denominator = (s.sum_x2 * s.sum_y2).sqrt();
                if denominator == 0.0 {
                    return f64::NAN;
                }
                s.sum_xy / denominator
            }
            Similarity::Euclidean => 1.0 / (1.0 + s.sum_diff2.sqrt() / n.sqrt()),
        };
        // Rounding can push correlations slightly outside [-1, 1]
        value.clamp(-1.0, 1.0)
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Similarity::Pearson => "pearson",
            Similarity::Cosine => "cosine",
            Similarity::Euclidean => "euclidean",
        };
        f.write_str(name)
    }
}

impl FromStr for Similarity {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pearson" => Ok(Similarity::Pearson),
            "cosine" => Ok(Similarity::Cosine),
            "euclidean" => Ok(Similarity::Euclidean),
            _ => Err(RecommenderError::UnknownSimilarity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(pairs: &[(ItemId, f64)]) -> BTreeMap<ItemId, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let a = prefs(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        let b = prefs(&[(1, 2.0), (2, 4.0), (3, 6.0), (4, 1.0)]);
        let sim = Similarity::Pearson.user_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_anti_correlation_is_symmetric() {
        let a = prefs(&[(1, 1.0), (2, 3.0), (3, 5.0)]);
        let b = prefs(&[(1, 5.0), (2, 3.0), (3, 1.0)]);
        let ab = Similarity::Pearson.user_similarity(&a, &b);
        let ba = Similarity::Pearson.user_similarity(&b, &a);
        assert!((ab + 1.0).abs() < 1e-9);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_pearson_undefined_without_variance() {
        let a = prefs(&[(1, 3.0), (2, 3.0)]);
        let b = prefs(&[(1, 1.0), (2, 5.0)]);
        assert!(Similarity::Pearson.user_similarity(&a, &b).is_nan());
    }

    #[test]
    fn test_no_overlap_is_nan() {
        let a = prefs(&[(1, 3.0)]);
        let b = prefs(&[(2, 3.0)]);
        for similarity in [Similarity::Pearson, Similarity::Cosine, Similarity::Euclidean] {
            assert!(similarity.user_similarity(&a, &b).is_nan());
        }
    }

    #[test]
    fn test_cosine_and_euclidean() {
        let a = prefs(&[(1, 1.0), (2, 0.0)]);
        let b = prefs(&[(1, 1.0), (2, 1.0)]);
        let cosine = Similarity::Cosine.user_similarity(&a, &b);
        assert!((cosine - 1.0 / 2f64.sqrt()).abs() < 1e-9);

        let same = prefs(&[(1, 4.0), (2, 2.0)]);
        assert_eq!(Similarity::Euclidean.user_similarity(&same, &same), 1.0);
    }

    #[test]
    fn test_from_str_round_trip() {
        assert_eq!("Pearson".parse::<Similarity>().unwrap(), Similarity::Pearson);
        assert_eq!(Similarity::Cosine.to_string(), "cosine");
        assert!("jaccard".parse::<Similarity>().is_err());
    }
}
