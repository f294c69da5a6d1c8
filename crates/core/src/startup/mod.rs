//! Bootstrap sequence
//!
//! The [`Starter`] drives the working plugin list through five registration
//! phases. Every plugin invocation goes through the [`HookInvoker`], which turns
//! errors and panics into removals from the working list so a single failing
//! plugin cannot take the whole bootstrap down.

pub mod invoker;
pub mod progress;
pub mod starter;
pub mod timer;

pub use invoker::{HookInvoker, Invocation, Outcome};
pub use progress::{ProgressBar, ProgressSink, TracingProgressSink};
pub use starter::Starter;
pub use timer::{Clock, InvocationTimer, LoggedTimer, ManualClock, SystemClock, SLOW_PLUGIN_BUDGET};

use crate::bookmarks::BookmarkList;
use crate::error::{BootstrapError, PluginFailure};
use crate::filter::IngredientFilter;
use crate::gui::{GuiEventHandler, GuiScreenHelper, InputHandler};
use crate::helpers::Helpers;
use crate::plugin::ModPlugin;
use crate::runtime::Runtime;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The five registration phases, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    ItemSubtypes,
    Ingredients,
    Categories,
    Plugins,
    Runtime,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::ItemSubtypes,
        Phase::Ingredients,
        Phase::Categories,
        Phase::Plugins,
        Phase::Runtime,
    ];

    /// Label used for progress reporting and the phase timer
    pub fn label(self) -> &'static str {
        match self {
            Self::ItemSubtypes => "Registering item subtypes",
            Self::Ingredients => "Registering ingredients",
            Self::Categories => "Registering categories",
            Self::Plugins => "Registering plugins",
            Self::Runtime => "Sending runtime",
        }
    }

    /// Whether each invocation is individually timed
    pub fn times_invocations(self) -> bool {
        matches!(self, Self::Categories | Self::Plugins | Self::Runtime)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// Ordered plugins still taking part in the bootstrap.
///
/// Starts as a copy of the caller's list and only ever shrinks.
pub struct WorkingList {
    plugins: Vec<Arc<dyn ModPlugin>>,
}

impl WorkingList {
    /// Copies the plugin list. An empty list is rejected; a uid seen again is
    /// logged and only its first plugin takes part.
    pub fn new(plugins: &[Arc<dyn ModPlugin>]) -> Result<Self, BootstrapError> {
        if plugins.is_empty() {
            return Err(BootstrapError::InvalidArgument(
                "At least one plugin is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let plugins = plugins
            .iter()
            .filter(|plugin| {
                let uid = plugin.info().uid;
                if seen.insert(uid.clone()) {
                    return true;
                }
                tracing::warn!(
                    "Ignoring {}: plugin uid '{}' is already registered",
                    plugin.type_name(),
                    uid
                );
                false
            })
            .cloned()
            .collect();

        Ok(Self { plugins })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ModPlugin>> {
        self.plugins.iter()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn uids(&self) -> Vec<String> {
        self.plugins.iter().map(|plugin| plugin.info().uid).collect()
    }

    /// Drops the plugins at the given positions, keeping the order of the rest
    pub fn remove_indices(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let mut index = 0;
        self.plugins.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
    }

    pub fn into_inner(self) -> Vec<Arc<dyn ModPlugin>> {
        self.plugins
    }
}

/// A runtime handoff that ran over [`SLOW_PLUGIN_BUDGET`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowPlugin {
    pub plugin_type: &'static str,
    pub uid: String,
    pub phase: Phase,
    pub elapsed: Duration,
}

/// What went wrong during a bootstrap that still produced a runtime
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Plugins removed from the working list, in the order they failed
    pub failures: Vec<PluginFailure>,
    pub slow_plugins: Vec<SlowPlugin>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.slow_plugins.is_empty()
    }

    pub fn removed_uids(&self) -> Vec<&str> {
        self.failures.iter().map(PluginFailure::uid).collect()
    }
}

/// The finished subsystems of a successful bootstrap
pub struct BootstrapResult {
    pub runtime: Arc<Runtime>,
    pub helpers: Arc<Helpers>,
    pub ingredient_filter: Arc<IngredientFilter>,
    pub gui_screen_helper: Arc<GuiScreenHelper>,
    pub gui_event_handler: GuiEventHandler,
    pub input_handler: InputHandler,
    pub bookmarks: Arc<BookmarkList>,
    /// Plugins that survived every phase, in their original order
    pub active_plugins: Vec<Arc<dyn ModPlugin>>,
    pub report: BootstrapReport,
}

impl BootstrapResult {
    pub fn active_uids(&self) -> Vec<String> {
        self.active_plugins.iter().map(|plugin| plugin.info().uid).collect()
    }
}
