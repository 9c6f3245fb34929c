//! # Cross-Validation Orchestrator
//!
//! This module runs the stages of an offline evaluation, each reading the
//! previous stage's files:
//! 1. Provision the dataset (download + unzip when missing)
//! 2. Split it into train/test folds
//! 3. Produce a full ranked list for every test user of every fold
//! 4. Filter the recommendations through the evaluation strategy
//! 5. Compute NDCG, RMSE and precision per fold and average them
//!
//! Folds and users are processed one at a time. A stage that fails returns
//! an error; the caller decides whether the following stages still run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument, warn};

use data_loader::{
    ensure_dataset, save_data_model, DataModel, DatasetDownloader, Fetch, MovielensParser,
    Parser, SimpleParser,
};
use evaluation::filter_recommendations;
use evaluation::metrics::{ErrorMetric, Mae, Ndcg, Precision, RankingMetric, Recall, Rmse};
use recommender::{RecommendationWriter, UserBasedRecommender};
use splitter::{CrossValidationSplitter, Splitter};

use crate::config::RunConfig;
use crate::paths::{FoldFile, FoldPaths};
use crate::report::{CrossValidationReport, FoldMetrics};

/// What the recommendation stage did for one fold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRecommendations {
    pub fold: usize,
    /// Users whose list was written
    pub users_written: usize,
    /// Test users in the fold
    pub test_users: usize,
    /// Whether a failing user cut the fold short
    pub aborted: bool,
}

/// Coordinates the cross-validation stages for one configuration
#[derive(Debug, Clone)]
pub struct CrossValidationPipeline {
    config: RunConfig,
    paths: FoldPaths,
}

impl CrossValidationPipeline {
    /// Create a pipeline using the default file layout under `config.data_dir`
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;
        let paths = config.paths();
        Ok(Self { config, paths })
    }

    /// Create a pipeline writing to a custom layout
    pub fn with_paths(config: RunConfig, paths: FoldPaths) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, paths })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn paths(&self) -> &FoldPaths {
        &self.paths
    }

    /// Make sure the ratings file exists, downloading the archive otherwise.
    ///
    /// Returns whether a download happened.
    pub async fn provision(&self) -> Result<bool> {
        let downloader = DatasetDownloader::new(&self.config.url, &self.config.data_dir);
        self.provision_with(&downloader).await
    }

    /// [`Self::provision`] with a custom fetcher
    pub async fn provision_with<F: Fetch>(&self, fetcher: &F) -> Result<bool> {
        let data_file = self.config.data_file();
        ensure_dataset(&data_file, fetcher)
            .await
            .with_context(|| format!("Failed to provision dataset {}", data_file.display()))
    }

    /// Split the ratings file into folds and persist them.
    ///
    /// Returns the (train, test) paths written. A fold whose files cannot be
    /// saved is logged and skipped, the other folds are still written.
    #[instrument(skip(self))]
    pub fn prepare_splits(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let data_file = self.config.data_file();
        let data = MovielensParser
            .parse_data(&data_file)
            .with_context(|| format!("Failed to parse dataset {}", data_file.display()))?;
        info!(
            "Loaded {} ratings from {} users on {} items",
            data.num_preferences(),
            data.num_users(),
            data.num_items()
        );

        let splitter =
            CrossValidationSplitter::new(self.config.folds, self.config.per_user, self.config.seed);
        let splits = splitter.split(&data);

        // Also fails when a plain file sits where the directory should be
        let split_dir = self.paths.dir(FoldFile::Train);
        fs::create_dir_all(split_dir)
            .with_context(|| format!("Directory {} could not be created", split_dir.display()))?;

        let mut written = Vec::with_capacity(splits.len());
        for (fold, split) in splits.iter().enumerate() {
            let training_file = self.paths.train(fold);
            let test_file = self.paths.test(fold);
            println!("train: {}", training_file.display());
            println!("test: {}", test_file.display());

            let saved = save_data_model(&split.training, &training_file, true)
                .and_then(|_| save_data_model(&split.test, &test_file, true));
            match saved {
                Ok(_) => written.push((training_file, test_file)),
                Err(e) => error!("Failed to save fold {}: {}", fold, e),
            }
        }
        Ok(written)
    }

    /// Run the recommender on every fold.
    ///
    /// A fold whose split files cannot be loaded aborts the whole stage. A user
    /// the recommender fails on aborts the rest of that fold only; the file
    /// then holds the lists written so far.
    #[instrument(skip(self))]
    pub fn recommend(&self) -> Result<Vec<FoldRecommendations>> {
        let mut summaries = Vec::with_capacity(self.config.folds);
        for fold in 0..self.config.folds {
            let start = Instant::now();
            let training = Arc::new(self.load(&self.paths.train(fold))?);
            let test = self.load(&self.paths.test(fold))?;

            let recommender = UserBasedRecommender::new(
                training.clone(),
                self.config.similarity,
                self.config.neighborhood_size,
            );
            let writer = RecommendationWriter::new(self.paths.recommendations(fold));
            let how_many = training.num_items();

            let mut summary = FoldRecommendations {
                fold,
                users_written: 0,
                test_users: test.num_users(),
                aborted: false,
            };
            for user in test.users() {
                let written = recommender
                    .recommend(user, how_many)
                    .map_err(anyhow::Error::from)
                    .and_then(|items| {
                        // First write of the fold creates the file, later ones append
                        writer
                            .write(user, &items, summary.users_written > 0)
                            .map_err(anyhow::Error::from)
                    });
                if let Err(e) = written {
                    error!(
                        "Fold {}: recommendation for user {} failed, skipping remaining users: {}",
                        fold, user, e
                    );
                    summary.aborted = true;
                    break;
                }
                summary.users_written += 1;
            }

            info!(
                "Fold {}: wrote recommendations for {}/{} users in {:.2?}",
                fold,
                summary.users_written,
                summary.test_users,
                start.elapsed()
            );
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Filter each fold's recommendations through the configured strategy
    /// and persist the result. Returns the paths written.
    #[instrument(skip(self))]
    pub fn prepare_strategy(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.config.folds);
        for fold in 0..self.config.folds {
            let training = Arc::new(self.load(&self.paths.train(fold))?);
            let test = Arc::new(self.load(&self.paths.test(fold))?);
            let recs = self.load(&self.paths.recommendations(fold))?;

            let strategy =
                self.config
                    .strategy
                    .build(training, test, self.config.threshold, self.config.seed);
            let model_to_eval = filter_recommendations(strategy.as_ref(), &recs);

            let out = self.paths.strategy_model(fold);
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Directory {} could not be created", parent.display())
                })?;
            }
            save_data_model(&model_to_eval, &out, true)
                .with_context(|| format!("Failed to save {}", out.display()))?;
            debug!(
                "Fold {}: {} kept {} items",
                fold,
                strategy.name(),
                model_to_eval.num_preferences()
            );
            written.push(out);
        }
        Ok(written)
    }

    /// Compute the metrics of every fold and their unweighted mean.
    ///
    /// A fold whose files cannot be loaded aborts the stage: averaging over
    /// the remaining folds would silently change the denominator.
    #[instrument(skip(self))]
    pub fn evaluate(&self) -> Result<CrossValidationReport> {
        let at = self.config.at;
        let ndcg = Ndcg::new(&[at]);
        let precision = Precision::new(&[at], self.config.threshold);
        let recall = Recall::new(&[at], self.config.threshold);

        let mut folds = Vec::with_capacity(self.config.folds);
        for fold in 0..self.config.folds {
            let test = self.load(&self.paths.test(fold))?;
            let predictions_file = if self.config.evaluate_strategy_output {
                self.paths.strategy_model(fold)
            } else {
                self.paths.recommendations(fold)
            };
            let predictions = self.load(&predictions_file)?;

            let metrics = FoldMetrics {
                fold,
                ndcg: ndcg.compute(&predictions, &test).value_at(at).unwrap_or(f64::NAN),
                precision: precision
                    .compute(&predictions, &test)
                    .value_at(at)
                    .unwrap_or(f64::NAN),
                recall: recall.compute(&predictions, &test).value_at(at).unwrap_or(f64::NAN),
                rmse: Rmse.compute(&predictions, &test).value,
                mae: Mae.compute(&predictions, &test).value,
            };
            if metrics.rmse.is_nan() {
                warn!("Fold {}: no predicted test pairs, RMSE is undefined", fold);
            }
            info!(
                "Fold {}: NDCG@{} {:.4}, P@{} {:.4}, RMSE {:.4}",
                fold, at, metrics.ndcg, at, metrics.precision, metrics.rmse
            );
            folds.push(metrics);
        }

        Ok(CrossValidationReport::new(self.config.clone(), folds))
    }

    fn load(&self, path: &Path) -> Result<DataModel> {
        SimpleParser
            .parse_data(path)
            .with_context(|| format!("Failed to load {}", path.display()))
    }
}
