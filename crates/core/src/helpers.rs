//! Shared helper bundle handed to plugins during registration

use crate::config::SharedHideMode;
use crate::ingredients::{Ingredient, IngredientBlacklist, IngredientRegistry, StackHelper};
use std::sync::Arc;

/// Helpers available to plugins once the ingredient registry exists.
pub struct Helpers {
    ingredient_registry: Arc<IngredientRegistry>,
    blacklist: Arc<IngredientBlacklist>,
    stack_helper: Arc<StackHelper>,
    hide_mode: SharedHideMode,
}

impl Helpers {
    pub fn new(
        ingredient_registry: Arc<IngredientRegistry>,
        blacklist: Arc<IngredientBlacklist>,
        stack_helper: Arc<StackHelper>,
        hide_mode: SharedHideMode,
    ) -> Self {
        Self {
            ingredient_registry,
            blacklist,
            stack_helper,
            hide_mode,
        }
    }

    pub fn ingredient_registry(&self) -> &Arc<IngredientRegistry> {
        &self.ingredient_registry
    }

    pub fn stack_helper(&self) -> &Arc<StackHelper> {
        &self.stack_helper
    }

    pub fn blacklist(&self) -> &Arc<IngredientBlacklist> {
        &self.blacklist
    }

    pub fn hide_mode(&self) -> &SharedHideMode {
        &self.hide_mode
    }

    /// Hide an ingredient from the ingredient list
    pub fn hide_ingredient(&self, ingredient: &Ingredient) -> bool {
        self.blacklist.add(self.stack_helper.unique_identifier(ingredient))
    }

    /// Hidden by a plugin or by the user
    pub fn is_ingredient_hidden(&self, ingredient: &Ingredient) -> bool {
        let uid = self.stack_helper.unique_identifier(ingredient);
        self.blacklist.contains(&uid) || self.hide_mode.read().is_hidden(&uid)
    }
}
