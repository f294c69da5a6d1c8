//! Sealed registry of every ingredient known to the runtime

use super::{Ingredient, IngredientBlacklist, IngredientKind, StackHelper};
use indexmap::IndexMap;
use std::sync::Arc;

/// All registered ingredients, grouped by kind and keyed by unique identifier.
///
/// Built once from [`super::ModIngredientRegistration`]; iteration follows
/// registration order.
pub struct IngredientRegistry {
    stack_helper: Arc<StackHelper>,
    blacklist: Arc<IngredientBlacklist>,
    by_kind: IndexMap<IngredientKind, IndexMap<String, Ingredient>>,
}

impl IngredientRegistry {
    pub(crate) fn new(
        stack_helper: Arc<StackHelper>,
        blacklist: Arc<IngredientBlacklist>,
        by_kind: IndexMap<IngredientKind, IndexMap<String, Ingredient>>,
    ) -> Self {
        Self {
            stack_helper,
            blacklist,
            by_kind,
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = &IngredientKind> {
        self.by_kind.keys()
    }

    /// Ingredients of one kind with their unique identifiers
    pub fn ingredients(&self, kind: &IngredientKind) -> impl Iterator<Item = (&str, &Ingredient)> {
        self.by_kind
            .get(kind)
            .into_iter()
            .flat_map(|entries| entries.iter().map(|(uid, ingredient)| (uid.as_str(), ingredient)))
    }

    pub fn all_ingredients(&self) -> impl Iterator<Item = (&str, &Ingredient)> {
        self.by_kind
            .values()
            .flat_map(|entries| entries.iter().map(|(uid, ingredient)| (uid.as_str(), ingredient)))
    }

    /// Look an ingredient up by unique identifier
    pub fn get(&self, uid: &str) -> Option<&Ingredient> {
        self.by_kind.values().find_map(|entries| entries.get(uid))
    }

    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.by_kind
            .get(&ingredient.kind)
            .is_some_and(|entries| entries.contains_key(&self.stack_helper.unique_identifier(ingredient)))
    }

    /// Whether a plugin hid this ingredient
    pub fn is_blacklisted(&self, ingredient: &Ingredient) -> bool {
        self.blacklist.contains(&self.stack_helper.unique_identifier(ingredient))
    }

    pub fn unique_identifier(&self, ingredient: &Ingredient) -> String {
        self.stack_helper.unique_identifier(ingredient)
    }

    /// Distinct mod ids owning at least one ingredient, in registration order
    pub fn mod_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for (_, ingredient) in self.all_ingredients() {
            if !ids.contains(&ingredient.mod_id()) {
                ids.push(ingredient.mod_id());
            }
        }
        ids
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stack_helper(&self) -> &Arc<StackHelper> {
        &self.stack_helper
    }
}
