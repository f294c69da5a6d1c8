//! Ingredient filter behind the search box

use crate::config::{ClientConfig, SharedHideMode};
use crate::ingredients::{Ingredient, IngredientBlacklist, IngredientListElement};
use parking_lot::RwLock;
use std::sync::Arc;

/// Searchable view over the display list.
///
/// Seeded once with the full display list; the visible subset depends on the
/// current filter text, the blacklist and the user's hide-mode state.
pub struct IngredientFilter {
    blacklist: Arc<IngredientBlacklist>,
    hide_mode: SharedHideMode,
    search_mod_ids: bool,
    elements: RwLock<Vec<IngredientListElement>>,
    filter_text: RwLock<String>,
}

impl IngredientFilter {
    pub fn new(blacklist: Arc<IngredientBlacklist>, config: &ClientConfig, hide_mode: SharedHideMode) -> Self {
        Self {
            blacklist,
            hide_mode,
            search_mod_ids: config.search_mod_ids,
            elements: RwLock::new(Vec::new()),
            filter_text: RwLock::new(String::new()),
        }
    }

    pub fn add_ingredients(&self, elements: Vec<IngredientListElement>) {
        let mut current = self.elements.write();
        current.extend(elements);
        current.sort_by_key(|element| element.order_index);
    }

    pub fn filter_text(&self) -> String {
        self.filter_text.read().clone()
    }

    pub fn set_filter_text(&self, text: &str) {
        *self.filter_text.write() = text.trim().to_lowercase();
    }

    /// Number of elements regardless of visibility
    pub fn total(&self) -> usize {
        self.elements.read().len()
    }

    /// Visible elements matching the current filter text, in display order
    pub fn filtered_elements(&self) -> Vec<IngredientListElement> {
        let text = self.filter_text.read().clone();
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let hide_mode = self.hide_mode.read();

        self.elements
            .read()
            .iter()
            .filter(|element| {
                hide_mode.edit_mode_enabled
                    || !(self.blacklist.contains(&element.uid) || hide_mode.is_hidden(&element.uid))
            })
            .filter(|element| tokens.iter().all(|token| self.matches(element, token)))
            .cloned()
            .collect()
    }

    fn matches(&self, element: &IngredientListElement, token: &str) -> bool {
        match token.strip_prefix('@') {
            Some(mod_id) if self.search_mod_ids => element.mod_id.contains(mod_id),
            _ => element.search_name.contains(token) || element.ingredient.id.path().contains(token),
        }
    }
}

/// Filter surface exposed to plugins through the runtime
#[derive(Clone)]
pub struct IngredientFilterApi {
    filter: Arc<IngredientFilter>,
}

impl IngredientFilterApi {
    pub fn new(filter: Arc<IngredientFilter>) -> Self {
        Self { filter }
    }

    pub fn filter_text(&self) -> String {
        self.filter.filter_text()
    }

    pub fn set_filter_text(&self, text: &str) {
        self.filter.set_filter_text(text);
    }

    pub fn filtered_ingredients(&self) -> Vec<Ingredient> {
        self.filter
            .filtered_elements()
            .into_iter()
            .map(|element| element.ingredient)
            .collect()
    }
}
