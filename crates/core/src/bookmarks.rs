//! Bookmarked ingredients and their persistence

use crate::ingredients::{Ingredient, IngredientRegistry};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Bookmark persistence errors
#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    #[error("Failed to access bookmarks file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed bookmarks file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where bookmarks are read from and written to. Bookmarks are stored as
/// ingredient unique identifiers.
pub trait BookmarkStore: Send + Sync {
    fn load(&self) -> Result<Vec<String>, BookmarkError>;

    fn save(&self, uids: &[String]) -> Result<(), BookmarkError>;
}

/// JSON array of uids on disk. A missing file is an empty bookmark list.
#[derive(Debug, Clone)]
pub struct FileBookmarkStore {
    path: PathBuf,
}

impl FileBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStore for FileBookmarkStore {
    fn load(&self) -> Result<Vec<String>, BookmarkError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(BookmarkError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| BookmarkError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, uids: &[String]) -> Result<(), BookmarkError> {
        let content = serde_json::to_string_pretty(uids).map_err(|source| BookmarkError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, content).map_err(|source| BookmarkError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store, used when no bookmarks file is configured
#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    uids: RwLock<Vec<String>>,
}

impl MemoryBookmarkStore {
    pub fn new(uids: Vec<String>) -> Self {
        Self {
            uids: RwLock::new(uids),
        }
    }
}

impl BookmarkStore for MemoryBookmarkStore {
    fn load(&self) -> Result<Vec<String>, BookmarkError> {
        Ok(self.uids.read().clone())
    }

    fn save(&self, uids: &[String]) -> Result<(), BookmarkError> {
        *self.uids.write() = uids.to_vec();
        Ok(())
    }
}

/// Ordered list of bookmarked ingredients
pub struct BookmarkList {
    ingredient_registry: Arc<IngredientRegistry>,
    entries: RwLock<Vec<(String, Ingredient)>>,
}

impl BookmarkList {
    pub fn new(ingredient_registry: Arc<IngredientRegistry>) -> Self {
        Self {
            ingredient_registry,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Replace the list with the persisted bookmarks.
    ///
    /// Uids no longer present in the ingredient registry are skipped. A store
    /// that cannot be read leaves the list empty.
    pub fn load_bookmarks(&self, store: &dyn BookmarkStore) -> usize {
        let uids = match store.load() {
            Ok(uids) => uids,
            Err(e) => {
                tracing::warn!("Failed to load bookmarks: {}", e);
                Vec::new()
            }
        };

        let mut entries = Vec::with_capacity(uids.len());
        for uid in uids {
            match self.ingredient_registry.get(&uid) {
                Some(ingredient) if !entries.iter().any(|(known, _)| known == &uid) => {
                    entries.push((uid, ingredient.clone()));
                }
                Some(_) => {}
                None => tracing::debug!("Skipping bookmark for unknown ingredient {}", uid),
            }
        }

        let count = entries.len();
        *self.entries.write() = entries;
        count
    }

    pub fn save_bookmarks(&self, store: &dyn BookmarkStore) -> Result<(), BookmarkError> {
        store.save(&self.uids())
    }

    /// Add an ingredient; returns false if it was already bookmarked
    pub fn add(&self, ingredient: &Ingredient) -> bool {
        let uid = self.ingredient_registry.unique_identifier(ingredient);
        let mut entries = self.entries.write();
        if entries.iter().any(|(known, _)| known == &uid) {
            return false;
        }
        entries.push((uid, ingredient.clone()));
        true
    }

    pub fn remove(&self, ingredient: &Ingredient) -> bool {
        let uid = self.ingredient_registry.unique_identifier(ingredient);
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(known, _)| known != &uid);
        entries.len() != before
    }

    /// Add or remove, returning whether the ingredient is bookmarked afterwards
    pub fn toggle(&self, ingredient: &Ingredient) -> bool {
        if self.remove(ingredient) {
            false
        } else {
            self.add(ingredient)
        }
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        let uid = self.ingredient_registry.unique_identifier(ingredient);
        self.entries.read().iter().any(|(known, _)| known == &uid)
    }

    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.entries.read().iter().map(|(_, ingredient)| ingredient.clone()).collect()
    }

    pub fn uids(&self) -> Vec<String> {
        self.entries.read().iter().map(|(uid, _)| uid.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
