//! Sealed runtime handed to plugins once bootstrap is complete

use crate::filter::{IngredientFilter, IngredientFilterApi};
use crate::ingredients::{IngredientListElement, IngredientRegistry};
use crate::recipes::{Focus, RecipeMatch, RecipeRegistry};
use std::sync::Arc;

/// Recipe browsing surface
pub struct RecipesGui {
    recipe_registry: Arc<RecipeRegistry>,
}

impl RecipesGui {
    pub fn new(recipe_registry: Arc<RecipeRegistry>) -> Self {
        Self { recipe_registry }
    }

    /// Recipes to show for a focus, grouped by category in registration order
    pub fn show(&self, focus: &Focus) -> Vec<RecipeMatch<'_>> {
        self.recipe_registry.lookup(focus)
    }
}

/// Paged ingredient list drawn next to container screens
pub struct IngredientListOverlay {
    filter: Arc<IngredientFilter>,
    columns: usize,
}

impl IngredientListOverlay {
    pub fn new(filter: Arc<IngredientFilter>, columns: usize) -> Self {
        Self {
            filter,
            columns: columns.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn per_page(&self, rows: usize) -> usize {
        self.columns.saturating_mul(rows.max(1))
    }

    /// Elements on one page of `rows` rows
    pub fn page(&self, index: usize, rows: usize) -> Vec<IngredientListElement> {
        let per_page = self.per_page(rows);
        self.filter
            .filtered_elements()
            .into_iter()
            .skip(index.saturating_mul(per_page))
            .take(per_page)
            .collect()
    }

    pub fn page_count(&self, rows: usize) -> usize {
        self.filter.filtered_elements().len().div_ceil(self.per_page(rows))
    }
}

/// Immutable aggregate of the finished indexes
pub struct Runtime {
    recipe_registry: Arc<RecipeRegistry>,
    ingredient_registry: Arc<IngredientRegistry>,
    ingredient_list_overlay: IngredientListOverlay,
    recipes_gui: RecipesGui,
    ingredient_filter: IngredientFilterApi,
}

impl Runtime {
    pub fn new(
        recipe_registry: Arc<RecipeRegistry>,
        ingredient_registry: Arc<IngredientRegistry>,
        ingredient_list_overlay: IngredientListOverlay,
        recipes_gui: RecipesGui,
        ingredient_filter: IngredientFilterApi,
    ) -> Self {
        Self {
            recipe_registry,
            ingredient_registry,
            ingredient_list_overlay,
            recipes_gui,
            ingredient_filter,
        }
    }

    pub fn recipe_registry(&self) -> &Arc<RecipeRegistry> {
        &self.recipe_registry
    }

    pub fn ingredient_registry(&self) -> &Arc<IngredientRegistry> {
        &self.ingredient_registry
    }

    pub fn ingredient_list_overlay(&self) -> &IngredientListOverlay {
        &self.ingredient_list_overlay
    }

    pub fn recipes_gui(&self) -> &RecipesGui {
        &self.recipes_gui
    }

    pub fn ingredient_filter(&self) -> &IngredientFilterApi {
        &self.ingredient_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientConfig, HideModeConfig};
    use crate::ingredients::{Ingredient, IngredientBlacklist};

    fn overlay(columns: usize, count: usize) -> IngredientListOverlay {
        let filter = Arc::new(IngredientFilter::new(
            Arc::new(IngredientBlacklist::new()),
            &ClientConfig::default(),
            HideModeConfig::default().into_shared(),
        ));
        filter.add_ingredients(
            (0..count)
                .map(|index| {
                    let ingredient = Ingredient::item(&format!("minecraft:block_{}", index), format!("Block {}", index));
                    IngredientListElement::new(&format!("item:minecraft:block_{}", index), &ingredient, index)
                })
                .collect(),
        );
        IngredientListOverlay::new(filter, columns)
    }

    #[test]
    fn test_pages() {
        let list = overlay(3, 7);
        assert_eq!(list.page_count(2), 2);
        assert_eq!(list.page(0, 2).len(), 6);
        assert_eq!(list.page(1, 2).len(), 1);
        assert!(list.page(2, 2).is_empty());
        assert_eq!(list.page_count(0), 3);
    }

    #[test]
    fn test_huge_page_arguments() {
        let wide = overlay(usize::MAX, 5);
        assert_eq!(wide.page_count(usize::MAX), 1);
        assert_eq!(wide.page(0, usize::MAX).len(), 5);
        assert!(wide.page(usize::MAX, usize::MAX).is_empty());

        let narrow = overlay(2, 5);
        assert!(narrow.page(usize::MAX, 3).is_empty());
    }
}
