//! Ingredients hidden by plugins

use parking_lot::RwLock;
use std::collections::HashSet;

/// Ingredient uids hidden from the ingredient list.
///
/// Shared between the ingredient registry, the helpers handed to plugins and
/// the ingredient filter; plugins add to it during generic registration.
#[derive(Debug, Default)]
pub struct IngredientBlacklist {
    uids: RwLock<HashSet<String>>,
}

impl IngredientBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the uid was already hidden
    pub fn add(&self, uid: impl Into<String>) -> bool {
        self.uids.write().insert(uid.into())
    }

    pub fn remove(&self, uid: &str) -> bool {
        self.uids.write().remove(uid)
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.uids.read().contains(uid)
    }

    pub fn len(&self) -> usize {
        self.uids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.read().is_empty()
    }
}
