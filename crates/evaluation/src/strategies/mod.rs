//! Evaluation strategy implementations.
//!
//! This module contains the closed set of candidate-selection strategies
//! selectable through [`crate::StrategyKind`].

pub mod all_items;
pub mod rel_plus_n;
pub mod test_items;
pub mod train_items;
pub mod user_test;

// Re-export for convenience
pub use all_items::AllItems;
pub use rel_plus_n::RelPlusN;
pub use test_items::TestItems;
pub use train_items::TrainItems;
pub use user_test::UserTest;
