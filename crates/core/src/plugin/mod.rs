//! Plugin system for Almanac
//!
//! Plugins are supplied by the host as an ordered list of [`ModPlugin`] trait
//! objects. Every hook has a default no-op body so a plugin only implements the
//! phases it contributes to.

pub mod plugin;

// Re-export core types
pub use plugin::{ModPlugin, PluginInfo, BASELINE_PLUGIN_UID, PLUGIN_API_VERSION};
