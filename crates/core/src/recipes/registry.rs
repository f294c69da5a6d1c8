//! Read-only recipe index

use super::{Focus, FocusMode, Recipe, RecipeCategory};
use crate::ingredients::{Ingredient, StackHelper};
use std::collections::HashMap;
use std::sync::Arc;

struct CategoryEntry {
    category: RecipeCategory,
    recipes: Vec<Recipe>,
    catalysts: Vec<Ingredient>,
}

/// A recipe matched by a lookup
#[derive(Debug, Clone, Copy)]
pub struct RecipeMatch<'a> {
    pub category: &'a RecipeCategory,
    pub recipe: &'a Recipe,
}

/// Recipes grouped by category, indexed by ingredient uid in both directions.
pub struct RecipeRegistry {
    stack_helper: Arc<StackHelper>,
    categories: Vec<CategoryEntry>,
    by_input: HashMap<String, Vec<(usize, usize)>>,
    by_output: HashMap<String, Vec<(usize, usize)>>,
    by_catalyst: HashMap<String, Vec<usize>>,
}

impl RecipeRegistry {
    pub(crate) fn new(
        stack_helper: Arc<StackHelper>,
        categories: Vec<(RecipeCategory, Vec<Recipe>, Vec<Ingredient>)>,
    ) -> Self {
        let mut by_input: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
        let mut by_output: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
        let mut by_catalyst: HashMap<String, Vec<usize>> = HashMap::new();

        let categories: Vec<CategoryEntry> = categories
            .into_iter()
            .map(|(category, recipes, catalysts)| CategoryEntry {
                category,
                recipes,
                catalysts,
            })
            .collect();

        for (category_index, entry) in categories.iter().enumerate() {
            for (recipe_index, recipe) in entry.recipes.iter().enumerate() {
                index_unique(&mut by_input, &stack_helper, &recipe.inputs, (category_index, recipe_index));
                index_unique(&mut by_output, &stack_helper, &recipe.outputs, (category_index, recipe_index));
            }
            for catalyst in &entry.catalysts {
                let slots = by_catalyst.entry(stack_helper.unique_identifier(catalyst)).or_default();
                if !slots.contains(&category_index) {
                    slots.push(category_index);
                }
            }
        }

        Self {
            stack_helper,
            categories,
            by_input,
            by_output,
            by_catalyst,
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &RecipeCategory> {
        self.categories.iter().map(|entry| &entry.category)
    }

    pub fn category(&self, uid: &str) -> Option<&RecipeCategory> {
        self.entry(uid).map(|entry| &entry.category)
    }

    pub fn recipes(&self, category_uid: &str) -> &[Recipe] {
        self.entry(category_uid).map(|entry| entry.recipes.as_slice()).unwrap_or(&[])
    }

    pub fn catalysts(&self, category_uid: &str) -> &[Ingredient] {
        self.entry(category_uid).map(|entry| entry.catalysts.as_slice()).unwrap_or(&[])
    }

    pub fn recipe_count(&self) -> usize {
        self.categories.iter().map(|entry| entry.recipes.len()).sum()
    }

    /// Every recipe matching the focus. Looking up uses of a catalyst also
    /// yields all recipes of the categories it is a catalyst for.
    pub fn lookup(&self, focus: &Focus) -> Vec<RecipeMatch<'_>> {
        let uid = self.stack_helper.unique_identifier(&focus.ingredient);
        let index = match focus.mode {
            FocusMode::Input => &self.by_input,
            FocusMode::Output => &self.by_output,
        };

        let mut slots: Vec<(usize, usize)> = index.get(&uid).cloned().unwrap_or_default();
        if focus.mode == FocusMode::Input {
            for &category_index in self.by_catalyst.get(&uid).into_iter().flatten() {
                for recipe_index in 0..self.categories[category_index].recipes.len() {
                    if !slots.contains(&(category_index, recipe_index)) {
                        slots.push((category_index, recipe_index));
                    }
                }
            }
        }
        slots.sort_unstable();

        slots
            .into_iter()
            .map(|(category_index, recipe_index)| {
                let entry = &self.categories[category_index];
                RecipeMatch {
                    category: &entry.category,
                    recipe: &entry.recipes[recipe_index],
                }
            })
            .collect()
    }

    /// Categories the ingredient is a catalyst for
    pub fn catalyst_categories(&self, ingredient: &Ingredient) -> Vec<&RecipeCategory> {
        let uid = self.stack_helper.unique_identifier(ingredient);
        self.by_catalyst
            .get(&uid)
            .into_iter()
            .flatten()
            .map(|&index| &self.categories[index].category)
            .collect()
    }

    fn entry(&self, uid: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|entry| entry.category.uid == uid)
    }
}

fn index_unique(
    index: &mut HashMap<String, Vec<(usize, usize)>>,
    stack_helper: &StackHelper,
    ingredients: &[Ingredient],
    slot: (usize, usize),
) {
    for ingredient in ingredients {
        let slots = index.entry(stack_helper.unique_identifier(ingredient)).or_default();
        if !slots.contains(&slot) {
            slots.push(slot);
        }
    }
}
