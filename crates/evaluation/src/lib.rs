//! Offline evaluation of recommendation lists.
//!
//! This crate provides:
//! - EvaluationStrategy trait and the built-in candidate-selection strategies
//! - StrategyKind for selecting a strategy by configuration key
//! - Ranking metrics (NDCG, Precision, Recall) and error metrics (RMSE, MAE)
//!
//! ## Architecture
//! Evaluation of one fold happens in two steps:
//! 1. A strategy built from the fold's training and test data filters the
//!    recommendations down to each user's candidate items
//! 2. Metrics compare recommendations (filtered or not) with the test data
//!
//! ## Example Usage
//! ```ignore
//! use evaluation::{filter_recommendations, StrategyKind};
//! use evaluation::metrics::{ErrorMetric, Ndcg, Precision, RankingMetric, Rmse};
//!
//! let strategy = StrategyKind::UserTest.build(training, test.clone(), 3.0, 2048);
//! let filtered = filter_recommendations(strategy.as_ref(), &recs);
//!
//! let ndcg = Ndcg::new(&[10]).compute(&recs, &test).value_at(10);
//! let rmse = Rmse.compute(&recs, &test).value;
//! ```

pub mod error;
pub mod traits;
pub mod strategies;
pub mod strategy;
pub mod metrics;

// Re-export main types
pub use error::{EvaluationError, Result};
pub use traits::{EvaluationStrategy, StrategyBase};
pub use strategy::{filter_recommendations, StrategyKind};
