//! # Harness Crate
//!
//! Wires the data loader, splitter, recommender and evaluation crates into
//! an offline k-fold cross-validation run.
//!
//! ## Stages
//!
//! ```text
//! provision ─▶ prepare_splits ─▶ recommend ─▶ prepare_strategy ─▶ evaluate
//!   u.data     train_i/test_i     recs_i       strategymodel_i     report
//! ```
//!
//! Each stage only communicates with the next through files laid out by
//! [`FoldPaths`], so a stage can be re-run on its own.

pub mod config;
pub mod orchestrator;
pub mod paths;
pub mod report;

pub use config::RunConfig;
pub use orchestrator::{CrossValidationPipeline, FoldRecommendations};
pub use paths::{FoldFile, FoldPaths};
pub use report::{CrossValidationReport, FoldMetrics, MeanMetrics};
