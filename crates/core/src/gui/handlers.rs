//! Gui handler traits plugins register during generic registration

use crate::ingredients::Ingredient;
use serde::{Deserialize, Serialize};

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A screen the gui layer is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Screen type id, e.g. `minecraft:crafting_table`
    pub screen_type: String,
    pub width: i32,
    pub height: i32,
}

impl Screen {
    pub fn new(screen_type: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            screen_type: screen_type.into(),
            width,
            height,
        }
    }
}

/// Placement of a container gui inside its screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuiProperties {
    pub gui: Rect,
    pub screen_width: i32,
    pub screen_height: i32,
}

/// Extra areas drawn by one screen type, which overlays must avoid.
pub trait AdvancedGuiHandler: Send + Sync {
    fn screen_type(&self) -> &str;

    fn gui_extra_areas(&self, screen: &Screen) -> Vec<Rect>;

    fn ingredient_under_mouse(&self, _screen: &Screen, _mouse_x: i32, _mouse_y: i32) -> Option<Ingredient> {
        None
    }
}

/// Areas drawn on every screen.
pub trait GlobalGuiHandler: Send + Sync {
    fn global_gui_extra_areas(&self) -> Vec<Rect>;
}

/// Reports where a screen's gui sits so overlays can be laid out around it.
pub trait GuiScreenHandler: Send + Sync {
    fn gui_properties(&self, screen: &Screen) -> Option<GuiProperties>;
}

/// Drop targets for dragging ingredients out of the lists.
pub trait GhostIngredientHandler: Send + Sync {
    fn targets(&self, screen: &Screen, ingredient: &Ingredient) -> Vec<Rect>;
}
