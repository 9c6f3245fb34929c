//! Nearest-N user neighbourhood.
//!
//! ## Algorithm
//! 1. Compute the similarity between the target user and every other user of
//!    the training model (in parallel with Rayon)
//! 2. Drop undefined (NaN) similarities
//! 3. Sort by similarity DESC, ties by user id ASC
//! 4. Keep the top `size`

use crate::similarity::Similarity;
use data_loader::{DataModel, UserId};
use rayon::prelude::*;
use std::cmp::Ordering;

/// A neighbour of the target user with its similarity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_id: UserId,
    pub similarity: f64,
}

/// Selects the `size` most similar users
#[derive(Debug, Clone, Copy)]
pub struct NearestNUserNeighborhood {
    size: usize,
    similarity: Similarity,
}

impl NearestNUserNeighborhood {
    pub fn new(size: usize, similarity: Similarity) -> Self {
        Self { size, similarity }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn similarity(&self) -> Similarity {
        self.similarity
    }

    /// Neighbours of `user`, most similar first. Empty for an unknown user.
    pub fn neighbors(&self, model: &DataModel, user: UserId) -> Vec<Neighbor> {
        let Some(target) = model.user_preferences(user) else {
            return Vec::new();
        };

        let others: Vec<UserId> = model.users().filter(|&other| other != user).collect();
        let mut scored: Vec<Neighbor> = others
            .par_iter()
            .filter_map(|&other| {
                let prefs = model.user_preferences(other)?;
                let similarity = self.similarity.user_similarity(target, prefs);
                if similarity.is_nan() {
                    None
                } else {
                    Some(Neighbor {
                        user_id: other,
                        similarity,
                    })
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        scored.truncate(self.size);
        scored
    }
}
