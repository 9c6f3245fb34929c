//! Error types for the recommender crate.

use data_loader::UserId;
use thiserror::Error;

/// Errors raised while producing or writing recommendations
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// The user has no preferences in the training model
    #[error("No such user in training data: {0}")]
    UnknownUser(UserId),

    /// Writing a recommendation file failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A similarity name that is not one of the supported measures
    #[error("Unknown similarity '{0}' (expected pearson, cosine or euclidean)")]
    UnknownSimilarity(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommenderError>;
