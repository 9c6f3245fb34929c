//! # Data Loader Crate
//!
//! This crate handles acquiring, parsing and persisting rating datasets for
//! the cross-validation harness.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Preference, DataModel, Split)
//! - **parser**: Parse MovieLens `u.data` and the pipeline's own files
//! - **persist**: Save a DataModel as a tab-separated file
//! - **download**: Fetch and unzip a dataset when it is missing
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{MovielensParser, Parser, save_data_model};
//! use std::path::Path;
//!
//! let model = MovielensParser.parse_data(Path::new("data/ml-100k/u.data"))?;
//! println!("{} users rated {} items", model.num_users(), model.num_items());
//!
//! save_data_model(&model, Path::new("copy.csv"), true)?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod persist;
pub mod download;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    // Core types
    Preference,
    DataModel,
    Split,
};
pub use parser::{MovielensParser, Parser, SimpleParser};
pub use persist::save_data_model;
pub use download::{DatasetDownloader, Fetch, ensure_dataset};
