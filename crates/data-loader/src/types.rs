//! Core domain types for rating datasets.
//!
//! This module defines the fundamental data structures shared by every stage
//! of the cross-validation pipeline:
//! - Type aliases for domain clarity (UserId, ItemId)
//! - A single interaction record ([`Preference`])
//! - The in-memory rating dataset ([`DataModel`])
//! - A train/test pair ([`Split`])
//!
//! `DataModel` keeps everything in `BTreeMap`s so that iteration order, and
//! therefore every file written from it, is fully deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u64;

/// Unique identifier for an item (a movie in MovieLens)
pub type ItemId = u64;

// =============================================================================
// Interaction Record
// =============================================================================

/// One interaction between a user and an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Rating or score (1.0 - 5.0 for MovieLens, arbitrary for recommendations)
    pub value: f64,
    /// Unix timestamp of the interaction, when the source carries one
    pub timestamp: Option<i64>,
}

impl Preference {
    pub fn new(user_id: UserId, item_id: ItemId, value: f64) -> Self {
        Self {
            user_id,
            item_id,
            value,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

// =============================================================================
// DataModel - the in-memory rating dataset
// =============================================================================

/// A collection of user/item preferences with optional timestamps.
///
/// Adding a preference for an existing (user, item) pair replaces its value.
/// Timestamps accumulate, mirroring datasets where the same pair is rated
/// more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub(crate) preferences: BTreeMap<UserId, BTreeMap<ItemId, f64>>,
    pub(crate) timestamps: BTreeMap<(UserId, ItemId), Vec<i64>>,
    pub(crate) items: BTreeSet<ItemId>,
}

impl DataModel {
    /// Creates a new, empty DataModel
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a list of interaction records
    pub fn from_preferences(preferences: impl IntoIterator<Item = Preference>) -> Self {
        let mut model = Self::new();
        for preference in preferences {
            model.insert(preference);
        }
        model
    }

    /// Insert a whole interaction record, timestamp included
    pub fn insert(&mut self, preference: Preference) {
        self.add_preference(preference.user_id, preference.item_id, preference.value);
        if let Some(timestamp) = preference.timestamp {
            self.add_timestamp(preference.user_id, preference.item_id, timestamp);
        }
    }

    /// Set the preference value of `user` for `item`
    pub fn add_preference(&mut self, user: UserId, item: ItemId, value: f64) {
        self.preferences
            .entry(user)
            .or_default()
            .insert(item, value);
        self.items.insert(item);
    }

    /// Record a timestamp for the (user, item) pair
    pub fn add_timestamp(&mut self, user: UserId, item: ItemId, timestamp: i64) {
        self.timestamps
            .entry((user, item))
            .or_default()
            .push(timestamp);
    }

    /// All users, in ascending order
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.preferences.keys().copied()
    }

    /// All items, in ascending order
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    /// The item set as a borrowed `BTreeSet`
    pub fn item_set(&self) -> &BTreeSet<ItemId> {
        &self.items
    }

    /// Preferences of a user keyed by item, or `None` for an unknown user
    pub fn user_preferences(&self, user: UserId) -> Option<&BTreeMap<ItemId, f64>> {
        self.preferences.get(&user)
    }

    /// Items rated by a user, in ascending order; empty for an unknown user
    pub fn user_items(&self, user: UserId) -> impl Iterator<Item = ItemId> + '_ {
        self.preferences
            .get(&user)
            .into_iter()
            .flat_map(|prefs| prefs.keys().copied())
    }

    pub fn preference(&self, user: UserId, item: ItemId) -> Option<f64> {
        self.preferences.get(&user)?.get(&item).copied()
    }

    /// Timestamps recorded for the pair; empty when none were recorded
    pub fn timestamps(&self, user: UserId, item: ItemId) -> &[i64] {
        self.timestamps
            .get(&(user, item))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.preferences.contains_key(&user)
    }

    pub fn num_users(&self) -> usize {
        self.preferences.len()
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Total number of (user, item) pairs
    pub fn num_preferences(&self) -> usize {
        self.preferences.values().map(|prefs| prefs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }

    /// Iterate every interaction record, users then items in ascending order.
    ///
    /// A pair with several timestamps is yielded once per timestamp.
    pub fn iter(&self) -> impl Iterator<Item = Preference> + '_ {
        self.preferences.iter().flat_map(move |(&user_id, prefs)| {
            prefs.iter().flat_map(move |(&item_id, &value)| {
                let base = Preference::new(user_id, item_id, value);
                let times = self.timestamps(user_id, item_id);
                let records: Vec<Preference> = if times.is_empty() {
                    vec![base]
                } else {
                    times.iter().map(|&t| base.with_timestamp(t)).collect()
                };
                records
            })
        })
    }

    /// Copy the preference (and its timestamps) of `user` for `item` from
    /// another model into this one. Does nothing if `source` lacks the pair.
    pub fn copy_pair_from(&mut self, source: &DataModel, user: UserId, item: ItemId) {
        if let Some(value) = source.preference(user, item) {
            self.add_preference(user, item, value);
            for &timestamp in source.timestamps(user, item) {
                self.add_timestamp(user, item, timestamp);
            }
        }
    }
}

// =============================================================================
// Split - one train/test pair
// =============================================================================

/// One fold of a split: a training model and its disjoint test model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    pub training: DataModel,
    pub test: DataModel,
}

impl Split {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten folds into the alternating `[train_0, test_0, train_1, ...]`
    /// layout, `2 × folds` models long.
    pub fn flatten(splits: Vec<Split>) -> Vec<DataModel> {
        splits
            .into_iter()
            .flat_map(|split| [split.training, split.test])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preference_replaces_value() {
        let mut model = DataModel::new();
        model.add_preference(1, 10, 3.0);
        model.add_preference(1, 10, 4.0);

        assert_eq!(model.preference(1, 10), Some(4.0));
        assert_eq!(model.num_preferences(), 1);
    }

    #[test]
    fn test_counts() {
        let model = DataModel::from_preferences(vec![
            Preference::new(1, 10, 3.0),
            Preference::new(1, 11, 4.0),
            Preference::new(2, 10, 5.0),
        ]);

        assert_eq!(model.num_users(), 2);
        assert_eq!(model.num_items(), 2);
        assert_eq!(model.num_preferences(), 3);
        assert_eq!(model.user_items(1).collect::<Vec<_>>(), vec![10, 11]);
        assert!(model.user_items(99).next().is_none());
    }

    #[test]
    fn test_iter_expands_timestamps() {
        let mut model = DataModel::new();
        model.insert(Preference::new(1, 10, 3.0).with_timestamp(100));
        model.add_timestamp(1, 10, 200);
        model.insert(Preference::new(2, 20, 1.0));

        let records: Vec<Preference> = model.iter().collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp, Some(100));
        assert_eq!(records[1].timestamp, Some(200));
        assert_eq!(records[2].timestamp, None);
    }

    #[test]
    fn test_flatten_alternates_train_and_test() {
        let mut first = Split::new();
        first.training.add_preference(1, 1, 1.0);
        first.test.add_preference(2, 2, 2.0);
        let second = Split::new();

        let flat = Split::flatten(vec![first, second]);
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[0].preference(1, 1), Some(1.0));
        assert_eq!(flat[1].preference(2, 2), Some(2.0));
        assert!(flat[2].is_empty());
    }
}
