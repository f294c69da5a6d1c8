//! Gui-adjacent handler bundles
//!
//! Nothing here draws. These are the aggregates a gui layer consumes: the
//! handlers plugins registered, the screen helper built from them and the event
//! and input bundles assembled at the end of bootstrap.

pub mod events;
pub mod handlers;
pub mod screen_helper;

pub use events::{GuiEventHandler, InputAction, InputHandler, InputResult, ScreenLayout};
pub use handlers::{
    AdvancedGuiHandler, GhostIngredientHandler, GlobalGuiHandler, GuiProperties, GuiScreenHandler, Rect, Screen,
};
pub use screen_helper::GuiScreenHelper;

use indexmap::IndexMap;
use std::sync::Arc;

/// Handlers collected by the mod registry during generic registration
#[derive(Clone, Default)]
pub struct GuiHandlers {
    pub advanced: Vec<Arc<dyn AdvancedGuiHandler>>,
    pub global: Vec<Arc<dyn GlobalGuiHandler>>,
    pub screen: IndexMap<String, Arc<dyn GuiScreenHandler>>,
    pub ghost: IndexMap<String, Arc<dyn GhostIngredientHandler>>,
}

impl GuiHandlers {
    pub fn len(&self) -> usize {
        self.advanced.len() + self.global.len() + self.screen.len() + self.ghost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
