//! Results of the evaluation stage.
//!
//! An undefined metric (RMSE of a fold without a single predicted test pair,
//! for instance) is NaN in memory and `null` in the JSON report.

use crate::config::RunConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Metric values of one fold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldMetrics {
    pub fold: usize,
    #[serde(with = "nan_as_null")]
    pub ndcg: f64,
    #[serde(with = "nan_as_null")]
    pub precision: f64,
    #[serde(with = "nan_as_null")]
    pub recall: f64,
    #[serde(with = "nan_as_null")]
    pub rmse: f64,
    #[serde(with = "nan_as_null")]
    pub mae: f64,
}

/// Unweighted mean of the fold metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanMetrics {
    #[serde(with = "nan_as_null")]
    pub ndcg: f64,
    #[serde(with = "nan_as_null")]
    pub precision: f64,
    #[serde(with = "nan_as_null")]
    pub recall: f64,
    #[serde(with = "nan_as_null")]
    pub rmse: f64,
    #[serde(with = "nan_as_null")]
    pub mae: f64,
}

/// Writes non-finite values as `null` and reads `null` back as NaN
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    pub config: RunConfig,
    pub folds: Vec<FoldMetrics>,
    pub mean: MeanMetrics,
}

impl CrossValidationReport {
    /// Build the report, averaging over `config.folds`.
    ///
    /// Every fold counts the same regardless of its size.
    pub fn new(config: RunConfig, folds: Vec<FoldMetrics>) -> Self {
        let n = config.folds as f64;
        let mut sum = MeanMetrics::default();
        for fold in &folds {
            sum.ndcg += fold.ndcg;
            sum.precision += fold.precision;
            sum.recall += fold.recall;
            sum.rmse += fold.rmse;
            sum.mae += fold.mae;
        }
        let mean = MeanMetrics {
            ndcg: sum.ndcg / n,
            precision: sum.precision / n,
            recall: sum.recall / n,
            rmse: sum.rmse / n,
            mae: sum.mae / n,
        };
        Self {
            config,
            folds,
            mean,
        }
    }

    /// The three result lines printed at the end of a run
    pub fn summary_lines(&self) -> [String; 3] {
        let at = self.config.at;
        [
            format!("NDCG@{}: {}", at, self.mean.ndcg),
            format!("RMSE: {}", self.mean.rmse),
            format!("P@{}: {}", at, self.mean.precision),
        ]
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("Failed to serialize report")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(fold: usize, value: f64) -> FoldMetrics {
        FoldMetrics {
            fold,
            ndcg: value,
            precision: value / 2.0,
            recall: value,
            rmse: 1.0 + value,
            mae: value,
        }
    }

    #[test]
    fn test_mean_is_unweighted() {
        let config = RunConfig {
            folds: 2,
            ..RunConfig::default()
        };
        let report = CrossValidationReport::new(config, vec![fold(0, 0.2), fold(1, 0.4)]);

        assert!((report.mean.ndcg - 0.3).abs() < 1e-12);
        assert!((report.mean.precision - 0.15).abs() < 1e-12);
        assert!((report.mean.rmse - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_summary_lines() {
        let config = RunConfig {
            folds: 1,
            ..RunConfig::default()
        };
        let report = CrossValidationReport::new(config, vec![fold(0, 0.5)]);
        assert_eq!(
            report.summary_lines(),
            [
                "NDCG@10: 0.5".to_string(),
                "RMSE: 1.5".to_string(),
                "P@10: 0.25".to_string()
            ]
        );
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = CrossValidationReport::new(RunConfig::default(), vec![fold(0, 0.5)]);

        report.write_json(&path).unwrap();
        let parsed: CrossValidationReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.folds.len(), 1);
        assert_eq!(parsed.config.strategy, report.config.strategy);
    }

    #[test]
    fn test_undefined_metric_survives_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let config = RunConfig {
            folds: 2,
            ..RunConfig::default()
        };
        let undefined = FoldMetrics {
            rmse: f64::NAN,
            mae: f64::NAN,
            ..fold(1, 0.4)
        };
        let report = CrossValidationReport::new(config, vec![fold(0, 0.2), undefined]);
        assert!(report.mean.rmse.is_nan());

        report.write_json(&path).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"rmse\": null"));

        let parsed: CrossValidationReport = serde_json::from_str(&json).unwrap();
        assert!(parsed.folds[1].rmse.is_nan());
        assert!(parsed.mean.mae.is_nan());
        assert_eq!(parsed.folds[0], report.folds[0]);
        assert!((parsed.mean.ndcg - 0.3).abs() < 1e-12);
    }
}
