//! Almanac Plugins
//!
//! Plugins bundled with Almanac. The vanilla plugin supplies the baseline
//! ingredients, recipe categories and container screens.

pub mod vanilla;

pub use vanilla::VanillaPlugin;

use almanac::ModPlugin;
use std::sync::Arc;

/// Plugins shipped with the crate, in bootstrap order
pub fn bundled_plugins() -> Vec<Arc<dyn ModPlugin>> {
    vec![Arc::new(VanillaPlugin::new())]
}
