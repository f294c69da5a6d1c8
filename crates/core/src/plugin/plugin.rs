//! Core plugin trait and types for Almanac

use crate::ingredients::{ModIngredientRegistration, SubtypeRegistry};
use crate::recipes::ModRegistry;
use crate::runtime::Runtime;
use anyhow::Result;
use semver::{Version, VersionReq};

/// Version of the shared types handed to plugin hooks.
pub const PLUGIN_API_VERSION: Version = Version::new(1, 2, 0);

/// Uid of the baseline plugin. Its ingredients define the universe every
/// other subsystem assumes exists, so its ingredient registration may not fail.
pub const BASELINE_PLUGIN_UID: &str = "minecraft";

/// Core trait that all Almanac plugins implement
pub trait ModPlugin: Send + Sync {
    /// Get plugin information and metadata
    fn info(&self) -> PluginInfo;

    /// Name of the implementing type, used to identify the plugin in logs
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Declare subtype interpreters for items whose variants share an id.
    fn register_item_subtypes(&self, _registry: &mut SubtypeRegistry) -> Result<()> {
        Ok(())
    }

    /// Contribute ingredients to the ingredient registry.
    fn register_ingredients(&self, _registration: &mut ModIngredientRegistration) -> Result<()> {
        Ok(())
    }

    /// Declare recipe categories.
    ///
    /// Older plugins predate this hook; they either keep the default or
    /// return [`crate::NotImplemented`], both of which count as success.
    fn register_categories(&self, _registry: &mut ModRegistry) -> Result<()> {
        Ok(())
    }

    /// Register recipes, catalysts, gui handlers and anything else the mod
    /// registry accepts.
    fn register(&self, _registry: &mut ModRegistry) -> Result<()> {
        Ok(())
    }

    /// Called once the runtime is sealed.
    fn on_runtime_available(&self, _runtime: &Runtime) -> Result<()> {
        Ok(())
    }
}

/// Plugin information and metadata
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// Plugin uid (must be unique)
    pub uid: String,
    /// Human readable plugin name
    pub name: String,
    /// Plugin version
    pub version: Version,
    /// Plugin api versions this plugin was built against
    pub api_requirement: VersionReq,
    /// Plugin description
    pub description: String,
    /// Plugin author(s)
    pub author: String,
}

impl PluginInfo {
    /// Create new plugin info
    pub fn new(uid: impl Into<String>, version: Version) -> Self {
        let uid = uid.into();
        Self {
            name: uid.clone(),
            uid,
            version,
            api_requirement: VersionReq::STAR,
            description: String::new(),
            author: String::new(),
        }
    }

    /// Set name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the plugin api requirement
    pub fn with_api_requirement(mut self, requirement: VersionReq) -> Self {
        self.api_requirement = requirement;
        self
    }

    /// Whether this plugin can link against the host's plugin api
    pub fn is_compatible_with(&self, api_version: &Version) -> bool {
        self.api_requirement.matches(api_version)
    }

    pub fn is_baseline(&self) -> bool {
        self.uid == BASELINE_PLUGIN_UID
    }
}
