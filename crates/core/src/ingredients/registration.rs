//! Accumulator for ingredients contributed during ingredient registration

use super::{Ingredient, IngredientBlacklist, IngredientKind, IngredientRegistry, StackHelper};
use anyhow::{bail, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Collects raw ingredient declarations from every plugin.
#[derive(Debug, Default)]
pub struct ModIngredientRegistration {
    ingredients: IndexMap<IngredientKind, Vec<Ingredient>>,
}

impl ModIngredientRegistration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register ingredients of one kind. Every ingredient must be of `kind`.
    pub fn register<I>(&mut self, kind: IngredientKind, ingredients: I) -> Result<()>
    where
        I: IntoIterator<Item = Ingredient>,
    {
        let ingredients: Vec<Ingredient> = ingredients.into_iter().collect();
        if let Some(mismatch) = ingredients.iter().find(|ingredient| ingredient.kind != kind) {
            bail!(
                "Ingredient {} is of kind '{}' but was registered as '{}'",
                mismatch.id,
                mismatch.kind,
                kind
            );
        }

        self.ingredients.entry(kind).or_default().extend(ingredients);
        Ok(())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &IngredientKind> {
        self.ingredients.keys()
    }

    pub fn len(&self) -> usize {
        self.ingredients.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge all contributions into the sealed ingredient registry.
    ///
    /// Ingredients are deduplicated by unique identifier, first registration wins.
    pub fn create_ingredient_registry(
        self,
        stack_helper: Arc<StackHelper>,
        blacklist: Arc<IngredientBlacklist>,
        debug_mode: bool,
    ) -> IngredientRegistry {
        let mut by_kind: IndexMap<IngredientKind, IndexMap<String, Ingredient>> = IndexMap::new();

        for (kind, ingredients) in self.ingredients {
            let entries = by_kind.entry(kind.clone()).or_default();
            let mut duplicates = 0usize;

            for ingredient in ingredients {
                let uid = stack_helper.unique_identifier(&ingredient);
                if entries.contains_key(&uid) {
                    duplicates += 1;
                    continue;
                }
                if debug_mode {
                    tracing::debug!("Registered ingredient {} ({})", uid, ingredient.display_name);
                }
                entries.insert(uid, ingredient);
            }

            if duplicates > 0 {
                tracing::debug!("Skipped {} duplicate {} ingredients", duplicates, kind);
            }
            if debug_mode {
                tracing::debug!("Registered {} {} ingredients", entries.len(), kind);
            }
        }

        IngredientRegistry::new(stack_helper, blacklist, by_kind)
    }
}
