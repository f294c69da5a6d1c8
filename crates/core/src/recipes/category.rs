//! Recipe categories, recipes and lookup focus

use crate::ingredients::Ingredient;

/// A recipe category declared during category registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCategory {
    pub uid: String,
    pub title: String,
    pub mod_id: String,
}

impl RecipeCategory {
    pub fn new(uid: impl Into<String>, title: impl Into<String>, mod_id: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            mod_id: mod_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub inputs: Vec<Ingredient>,
    pub outputs: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(inputs: Vec<Ingredient>, outputs: Vec<Ingredient>) -> Self {
        Self { inputs, outputs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusMode {
    /// Recipes consuming the ingredient
    Input,
    /// Recipes producing the ingredient
    Output,
}

/// What the user asked recipes for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focus {
    pub mode: FocusMode,
    pub ingredient: Ingredient,
}

impl Focus {
    pub fn uses(ingredient: Ingredient) -> Self {
        Self {
            mode: FocusMode::Input,
            ingredient,
        }
    }

    pub fn recipes(ingredient: Ingredient) -> Self {
        Self {
            mode: FocusMode::Output,
            ingredient,
        }
    }
}
