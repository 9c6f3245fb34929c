//! # Splitter Crate
//!
//! Partitions a rating dataset into train/test pairs.
//!
//! ## Components
//!
//! - [`CrossValidationSplitter`]: k-fold cross validation, per user or over
//!   the whole dataset
//! - [`RandomSplitter`]: a single seeded holdout split
//!
//! Both are deterministic for a given seed: the same input, seed and policy
//! always yield the same folds.
//!
//! ## Example Usage
//!
//! ```ignore
//! use splitter::{CrossValidationSplitter, Splitter};
//!
//! let splits = CrossValidationSplitter::new(5, true, 2048).split(&data);
//! for (fold, split) in splits.iter().enumerate() {
//!     println!("fold {fold}: {} test ratings", split.test.num_preferences());
//! }
//! ```

pub mod cross_validation;
pub mod random;

pub use cross_validation::CrossValidationSplitter;
pub use random::RandomSplitter;

use data_loader::{DataModel, Split};

/// Core trait for dataset splitters.
///
/// A splitter never fails: it only redistributes the preferences it is given.
pub trait Splitter {
    /// Split `data` into train/test pairs, one per fold
    fn split(&self, data: &DataModel) -> Vec<Split>;
}
