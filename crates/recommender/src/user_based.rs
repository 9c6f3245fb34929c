//! User-based collaborative filtering.
//!
//! "Users similar to you rated these items highly."
//!
//! ## Algorithm
//! 1. Find the target user's nearest neighbours in the training model
//! 2. Candidate items: everything a neighbour rated that the user did not
//! 3. Estimate each candidate as the similarity-weighted average of the
//!    neighbours' preferences: `Σ sim·pref / Σ sim`
//! 4. Discard estimates backed by a single neighbour, they carry no signal
//! 5. Sort by estimate DESC (ties by item id ASC) and keep `how_many`

use crate::error::{RecommenderError, Result};
use crate::neighborhood::{NearestNUserNeighborhood, Neighbor};
use crate::similarity::Similarity;
use data_loader::{DataModel, ItemId, UserId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// One entry of a ranked recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub item_id: ItemId,
    /// Estimated preference
    pub score: f64,
}

/// k-nearest-neighbour user-based recommender over a training model
#[derive(Debug, Clone)]
pub struct UserBasedRecommender {
    /// Shared, read-only training data
    model: Arc<DataModel>,
    neighborhood: NearestNUserNeighborhood,
}

impl UserBasedRecommender {
    /// Create a recommender using `neighborhood_size` neighbours compared
    /// with `similarity`
    pub fn new(model: Arc<DataModel>, similarity: Similarity, neighborhood_size: usize) -> Self {
        Self {
            model,
            neighborhood: NearestNUserNeighborhood::new(neighborhood_size, similarity),
        }
    }

    pub fn model(&self) -> &DataModel {
        &self.model
    }

    pub fn neighborhood(&self) -> &NearestNUserNeighborhood {
        &self.neighborhood
    }

    /// Ranked list of at most `how_many` items the user has not rated yet.
    ///
    /// Fails with [`RecommenderError::UnknownUser`] when the user is absent
    /// from the training model.
    #[instrument(skip(self))]
    pub fn recommend(&self, user: UserId, how_many: usize) -> Result<Vec<RecommendedItem>> {
        let rated = self
            .model
            .user_preferences(user)
            .ok_or(RecommenderError::UnknownUser(user))?;

        let neighbors = self.neighborhood.neighbors(&self.model, user);
        debug!("Found {} neighbours for user {}", neighbors.len(), user);
        if neighbors.is_empty() {
            return Ok(Vec::new());
        }

        let candidates: BTreeSet<ItemId> = neighbors
            .iter()
            .flat_map(|n| self.model.user_items(n.user_id))
            .filter(|item| !rated.contains_key(item))
            .collect();

        let mut items: Vec<RecommendedItem> = candidates
            .into_iter()
            .filter_map(|item_id| {
                self.estimate_from(&neighbors, item_id)
                    .map(|score| RecommendedItem { item_id, score })
            })
            .collect();

        items.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        items.truncate(how_many);

        debug!("Recommending {} items to user {}", items.len(), user);
        Ok(items)
    }

    /// Estimated preference of `user` for `item`.
    ///
    /// A preference already present in the training data is returned as is.
    /// `Ok(None)` means no estimate could be made.
    pub fn estimate_preference(&self, user: UserId, item: ItemId) -> Result<Option<f64>> {
        if !self.model.contains_user(user) {
            return Err(RecommenderError::UnknownUser(user));
        }
        if let Some(actual) = self.model.preference(user, item) {
            return Ok(Some(actual));
        }
        let neighbors = self.neighborhood.neighbors(&self.model, user);
        Ok(self.estimate_from(&neighbors, item))
    }

    fn estimate_from(&self, neighbors: &[Neighbor], item: ItemId) -> Option<f64> {
        let mut weighted = 0.0;
        let mut total_similarity = 0.0;
        let mut count = 0;

        for neighbor in neighbors {
            if let Some(pref) = self.model.preference(neighbor.user_id, item) {
                weighted += neighbor.similarity * pref;
                total_similarity += neighbor.similarity;
                count += 1;
            }
        }

        if count <= 1 || total_similarity == 0.0 {
            return None;
        }
        let estimate = weighted / total_similarity;
        if estimate.is_finite() { Some(estimate) } else { None }
    }
}
