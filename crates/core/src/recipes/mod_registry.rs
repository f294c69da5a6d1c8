//! Mutable registry fed by category and generic registration

use super::{Recipe, RecipeCategory, RecipeRegistry};
use crate::gui::{AdvancedGuiHandler, GhostIngredientHandler, GlobalGuiHandler, GuiHandlers, GuiScreenHandler};
use crate::helpers::Helpers;
use crate::ingredients::{Ingredient, IngredientRegistry};
use anyhow::{bail, Result};
use indexmap::IndexMap;
use std::sync::Arc;

/// Accumulates what plugins register before the derived indexes are built.
pub struct ModRegistry {
    helpers: Arc<Helpers>,
    ingredient_registry: Arc<IngredientRegistry>,
    categories: IndexMap<String, RecipeCategory>,
    recipes: IndexMap<String, Vec<Recipe>>,
    catalysts: IndexMap<String, Vec<Ingredient>>,
    handlers: GuiHandlers,
    mod_name_claims: Vec<String>,
}

impl ModRegistry {
    pub fn new(helpers: Arc<Helpers>, ingredient_registry: Arc<IngredientRegistry>) -> Self {
        Self {
            helpers,
            ingredient_registry,
            categories: IndexMap::new(),
            recipes: IndexMap::new(),
            catalysts: IndexMap::new(),
            handlers: GuiHandlers::default(),
            mod_name_claims: Vec::new(),
        }
    }

    pub fn helpers(&self) -> &Arc<Helpers> {
        &self.helpers
    }

    pub fn ingredient_registry(&self) -> &Arc<IngredientRegistry> {
        &self.ingredient_registry
    }

    /// Declare a recipe category. Category uids are unique.
    pub fn add_recipe_category(&mut self, category: RecipeCategory) -> Result<()> {
        if category.uid.is_empty() {
            bail!("Recipe category uid cannot be empty");
        }
        if self.categories.contains_key(&category.uid) {
            bail!("A recipe category with uid '{}' is already registered", category.uid);
        }

        tracing::debug!("Added recipe category {} ({})", category.uid, category.title);
        self.categories.insert(category.uid.clone(), category);
        Ok(())
    }

    /// Add recipes to a category. The category may be declared by another plugin,
    /// unknown categories are reported when the recipe registry is built.
    pub fn add_recipes<I>(&mut self, category_uid: &str, recipes: I)
    where
        I: IntoIterator<Item = Recipe>,
    {
        self.recipes.entry(category_uid.to_string()).or_default().extend(recipes);
    }

    /// Mark an ingredient as the crafting station for the given categories
    pub fn add_recipe_catalyst(&mut self, catalyst: Ingredient, category_uids: &[&str]) {
        for uid in category_uids {
            self.catalysts.entry((*uid).to_string()).or_default().push(catalyst.clone());
        }
    }

    pub fn add_advanced_gui_handler(&mut self, handler: Arc<dyn AdvancedGuiHandler>) {
        self.handlers.advanced.push(handler);
    }

    pub fn add_global_gui_handler(&mut self, handler: Arc<dyn GlobalGuiHandler>) {
        self.handlers.global.push(handler);
    }

    pub fn add_gui_screen_handler(&mut self, screen_type: &str, handler: Arc<dyn GuiScreenHandler>) {
        if self.handlers.screen.insert(screen_type.to_string(), handler).is_some() {
            tracing::warn!("Replaced gui screen handler for {}", screen_type);
        }
    }

    pub fn add_ghost_ingredient_handler(&mut self, screen_type: &str, handler: Arc<dyn GhostIngredientHandler>) {
        if self.handlers.ghost.insert(screen_type.to_string(), handler).is_some() {
            tracing::warn!("Replaced ghost ingredient handler for {}", screen_type);
        }
    }

    /// Hide an ingredient from the ingredient list
    pub fn hide_ingredient(&mut self, ingredient: &Ingredient) {
        self.helpers.hide_ingredient(ingredient);
    }

    /// Signal that the calling mod renders mod names itself
    pub fn claim_mod_name_display(&mut self, mod_id: impl Into<String>) {
        self.mod_name_claims.push(mod_id.into());
    }

    pub fn mod_name_claims(&self) -> &[String] {
        &self.mod_name_claims
    }

    pub fn categories(&self) -> impl Iterator<Item = &RecipeCategory> {
        self.categories.values()
    }

    pub fn gui_handlers(&self) -> GuiHandlers {
        self.handlers.clone()
    }

    /// Build the recipe index from the final registry state.
    pub fn create_recipe_registry(&self) -> RecipeRegistry {
        for (uid, recipes) in &self.recipes {
            if !self.categories.contains_key(uid) {
                tracing::error!(
                    "Dropping {} recipes for unregistered recipe category {}",
                    recipes.len(),
                    uid
                );
            }
        }
        for uid in self.catalysts.keys() {
            if !self.categories.contains_key(uid) {
                tracing::error!("Dropping catalysts for unregistered recipe category {}", uid);
            }
        }

        let categories = self
            .categories
            .values()
            .map(|category| {
                let recipes = self.recipes.get(&category.uid).cloned().unwrap_or_default();
                let catalysts = self.catalysts.get(&category.uid).cloned().unwrap_or_default();
                (category.clone(), recipes, catalysts)
            })
            .collect();

        RecipeRegistry::new(self.ingredient_registry.stack_helper().clone(), categories)
    }
}
