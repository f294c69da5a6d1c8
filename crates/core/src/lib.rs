//! Almanac
//!
//! Bootstraps the shared item-index runtime from the contributions of many
//! independently authored plugins. The [`startup::Starter`] drives every plugin
//! through the registration phases, assembles the subsystem chain from what they
//! contributed and hands the sealed [`runtime::Runtime`] back to them.

pub mod bookmarks;
pub mod config;
pub mod error;
pub mod filter;
pub mod gui;
pub mod helpers;
pub mod ingredients;
pub mod logging;
pub mod plugin;
pub mod recipes;
pub mod runtime;
pub mod startup;

// Re-export core types
pub use bookmarks::{BookmarkList, BookmarkStore, FileBookmarkStore, MemoryBookmarkStore};
pub use config::{ClientConfig, ConfigError, HideModeConfig, SharedHideMode};
pub use error::{BootstrapError, FailureKind, LinkageError, NotImplemented, PluginFailure};
pub use filter::{IngredientFilter, IngredientFilterApi};
pub use gui::{GuiEventHandler, GuiScreenHelper, InputHandler};
pub use helpers::Helpers;
pub use ingredients::{
    Ingredient, IngredientBlacklist, IngredientKind, IngredientRegistry, ModIngredientRegistration,
    ResourceId, StackHelper, SubtypeRegistry,
};
pub use logging::init_tracing;
pub use plugin::{ModPlugin, PluginInfo, BASELINE_PLUGIN_UID, PLUGIN_API_VERSION};
pub use recipes::{Focus, FocusMode, ModRegistry, Recipe, RecipeCategory, RecipeRegistry};
pub use runtime::Runtime;
pub use startup::{
    BootstrapReport, BootstrapResult, Clock, ManualClock, Phase, ProgressSink, SlowPlugin, Starter, SystemClock,
};
