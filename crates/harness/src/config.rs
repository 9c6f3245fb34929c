//! Run configuration.
//!
//! A [`RunConfig`] is built once (by the CLI, or by hand in tests) and
//! passed by reference to every stage. Nothing mutates it afterwards.

use crate::paths::FoldPaths;
use anyhow::{bail, Result};
use evaluation::StrategyKind;
use recommender::Similarity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// MovieLens 100K archive
pub const DEFAULT_URL: &str = "http://files.grouplens.org/datasets/movielens/ml-100k.zip";
pub const DEFAULT_DATA_DIR: &str = "data/ml-100k";
/// Ratings file inside the unpacked archive
pub const DATA_FILE_NAME: &str = "u.data";
pub const DEFAULT_FOLDS: usize = 5;
pub const DEFAULT_AT: usize = 10;
pub const DEFAULT_THRESHOLD: f64 = 3.0;
pub const DEFAULT_NEIGHBORHOOD_SIZE: usize = 50;
pub const DEFAULT_SEED: u64 = 2048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Folder the dataset is unpacked into; every output lives below it
    pub data_dir: PathBuf,
    /// Where to fetch the dataset archive from when it is missing
    pub url: String,
    pub folds: usize,
    /// Cutoff of the ranking metrics
    pub at: usize,
    /// Test preferences at or above this value are relevant
    pub threshold: f64,
    /// Split each user's ratings across folds instead of all ratings at once
    pub per_user: bool,
    pub neighborhood_size: usize,
    pub seed: u64,
    pub similarity: Similarity,
    pub strategy: StrategyKind,
    /// Evaluate the strategy-filtered models instead of the raw
    /// recommendation files
    pub evaluate_strategy_output: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            url: DEFAULT_URL.to_string(),
            folds: DEFAULT_FOLDS,
            at: DEFAULT_AT,
            threshold: DEFAULT_THRESHOLD,
            per_user: true,
            neighborhood_size: DEFAULT_NEIGHBORHOOD_SIZE,
            seed: DEFAULT_SEED,
            similarity: Similarity::default(),
            strategy: StrategyKind::default(),
            evaluate_strategy_output: false,
        }
    }
}

impl RunConfig {
    /// The canonical ratings file whose presence decides whether to download
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    pub fn paths(&self) -> FoldPaths {
        FoldPaths::under(&self.data_dir)
    }

    /// Reject values no stage can work with
    pub fn validate(&self) -> Result<()> {
        if self.folds == 0 {
            bail!("Number of folds must be at least 1");
        }
        if self.at == 0 {
            bail!("Metric cutoff must be at least 1");
        }
        if self.neighborhood_size == 0 {
            bail!("Neighborhood size must be at least 1");
        }
        if !self.threshold.is_finite() {
            bail!("Relevance threshold must be a finite number");
        }
        Ok(())
    }
}
