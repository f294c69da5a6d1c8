//! Display list elements built from the ingredient registry

use super::{Ingredient, IngredientRegistry};

/// One entry of the ingredient list overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientListElement {
    pub ingredient: Ingredient,
    pub uid: String,
    pub mod_id: String,
    /// Lowercased display name, used by searches
    pub search_name: String,
    pub order_index: usize,
}

impl IngredientListElement {
    pub fn new(uid: &str, ingredient: &Ingredient, order_index: usize) -> Self {
        Self {
            uid: uid.to_string(),
            mod_id: ingredient.mod_id().to_string(),
            search_name: ingredient.display_name.to_lowercase(),
            ingredient: ingredient.clone(),
            order_index,
        }
    }
}

/// Build the base display list from all registered ingredients, in registry order.
pub fn create_base_list(registry: &IngredientRegistry) -> Vec<IngredientListElement> {
    registry
        .all_ingredients()
        .enumerate()
        .map(|(index, (uid, ingredient))| IngredientListElement::new(uid, ingredient, index))
        .collect()
}
