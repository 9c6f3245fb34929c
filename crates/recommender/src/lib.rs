//! # Recommender Crate
//!
//! User-based k-nearest-neighbour collaborative filtering, the recommender
//! evaluated by the cross-validation harness.
//!
//! ## Components
//!
//! - **similarity**: Pearson, cosine and Euclidean user similarity
//! - **neighborhood**: nearest-N user neighbourhood
//! - **user_based**: the recommender itself
//! - **io**: append-safe recommendation file writer
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{RecommendationWriter, Similarity, UserBasedRecommender};
//! use std::sync::Arc;
//!
//! let recommender = UserBasedRecommender::new(Arc::new(training), Similarity::Pearson, 50);
//! let writer = RecommendationWriter::new("recs_0.csv");
//!
//! let items = recommender.recommend(user_id, training.num_items())?;
//! writer.write(user_id, &items, false)?;
//! ```

pub mod error;
pub mod similarity;
pub mod neighborhood;
pub mod user_based;
pub mod io;

// Re-export commonly used types
pub use error::{RecommenderError, Result};
pub use similarity::Similarity;
pub use neighborhood::{NearestNUserNeighborhood, Neighbor};
pub use user_based::{RecommendedItem, UserBasedRecommender};
pub use io::RecommendationWriter;
