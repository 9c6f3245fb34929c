//! Error types for the evaluation crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvaluationError {
    /// A strategy key that is not one of the supported strategies
    #[error("Unknown evaluation strategy '{0}'")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
