//! Queries over the gui handlers plugins registered

use super::{GuiHandlers, GuiProperties, Rect, Screen};
use crate::ingredients::{Ingredient, IngredientRegistry};
use std::sync::Arc;

pub struct GuiScreenHelper {
    ingredient_registry: Arc<IngredientRegistry>,
    handlers: GuiHandlers,
}

impl GuiScreenHelper {
    pub fn new(ingredient_registry: Arc<IngredientRegistry>, handlers: GuiHandlers) -> Self {
        Self {
            ingredient_registry,
            handlers,
        }
    }

    /// Placement of the screen's gui, if a handler knows the screen type
    pub fn gui_properties(&self, screen: &Screen) -> Option<GuiProperties> {
        let properties = self.handlers.screen.get(&screen.screen_type)?.gui_properties(screen)?;
        if properties.gui.is_empty() {
            return None;
        }
        Some(properties)
    }

    /// Areas overlays must not cover on this screen
    pub fn exclusion_areas(&self, screen: &Screen) -> Vec<Rect> {
        let mut areas: Vec<Rect> = self
            .handlers
            .global
            .iter()
            .flat_map(|handler| handler.global_gui_extra_areas())
            .collect();

        for handler in &self.handlers.advanced {
            if handler.screen_type() == screen.screen_type {
                areas.extend(handler.gui_extra_areas(screen));
            }
        }

        areas.retain(|area| !area.is_empty());
        areas
    }

    /// Ingredient drawn at a position by an advanced handler, if it is a known one
    pub fn ingredient_under_mouse(&self, screen: &Screen, mouse_x: i32, mouse_y: i32) -> Option<Ingredient> {
        self.handlers
            .advanced
            .iter()
            .filter(|handler| handler.screen_type() == screen.screen_type)
            .find_map(|handler| handler.ingredient_under_mouse(screen, mouse_x, mouse_y))
            .filter(|ingredient| self.ingredient_registry.contains(ingredient))
    }

    pub fn ghost_targets(&self, screen: &Screen, ingredient: &Ingredient) -> Vec<Rect> {
        self.handlers
            .ghost
            .get(&screen.screen_type)
            .map(|handler| handler.targets(screen, ingredient))
            .unwrap_or_default()
    }

    pub fn handlers(&self) -> &GuiHandlers {
        &self.handlers
    }
}
