//! Recipe categories, the mutable mod registry and the derived recipe index

pub mod category;
pub mod mod_registry;
pub mod registry;

pub use category::{Focus, FocusMode, Recipe, RecipeCategory};
pub use mod_registry::ModRegistry;
pub use registry::{RecipeMatch, RecipeRegistry};
