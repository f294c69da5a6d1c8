//! Error types surfaced by plugins and by the bootstrap sequence

use crate::startup::Phase;
use anyhow::Error as AnyError;
use std::fmt;

/// Errors that abort [`crate::startup::Starter::start`].
///
/// Everything else a plugin does wrong is isolated and only shows up in the
/// [`crate::startup::BootstrapReport`].
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Fatal bootstrap failure: {0}")]
    FatalBootstrapFailure(#[source] PluginFailure),
}

/// Classification of a failed plugin hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The hook returned an error or panicked
    Runtime,
    /// The plugin was built against an incompatible plugin api
    Linkage,
    /// The hook reported that it is not implemented
    NotImplemented,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => write!(f, "runtime failure"),
            Self::Linkage => write!(f, "linkage failure"),
            Self::NotImplemented => write!(f, "not implemented"),
        }
    }
}

/// Returned by a hook when the plugin was compiled against shared types the host
/// no longer provides.
#[derive(Debug, Clone, thiserror::Error)]
#[error("incompatible with plugin api {provided}: {reason}")]
pub struct LinkageError {
    pub provided: semver::Version,
    pub reason: String,
}

impl LinkageError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            provided: crate::plugin::PLUGIN_API_VERSION,
            reason: reason.into(),
        }
    }
}

/// Returned by legacy plugins that do not implement a newer hook.
#[derive(Debug, Clone, Copy, Default, thiserror::Error)]
#[error("hook is not implemented")]
pub struct NotImplemented;

/// A failed plugin invocation, logged and recorded when the plugin is removed.
#[derive(Debug)]
pub struct PluginFailure {
    plugin_type: &'static str,
    uid: String,
    phase: Phase,
    kind: FailureKind,
    source: AnyError,
}

impl PluginFailure {
    pub fn new(
        plugin_type: &'static str,
        uid: impl Into<String>,
        phase: Phase,
        kind: FailureKind,
        source: AnyError,
    ) -> Self {
        Self {
            plugin_type,
            uid: uid.into(),
            phase,
            kind,
            source,
        }
    }

    /// Classifies a hook error by looking for the marker errors in its chain.
    pub fn classify(error: &AnyError) -> FailureKind {
        if error.chain().any(|cause| cause.is::<LinkageError>()) {
            FailureKind::Linkage
        } else if error.chain().any(|cause| cause.is::<NotImplemented>()) {
            FailureKind::NotImplemented
        } else {
            FailureKind::Runtime
        }
    }

    pub fn plugin_type(&self) -> &'static str {
        self.plugin_type
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn into_source(self) -> AnyError {
        self.source
    }

    /// Captured when the source error was created, if backtraces are enabled
    pub fn backtrace(&self) -> &std::backtrace::Backtrace {
        self.source.backtrace()
    }

    /// Like the display form, but with the numbered cause list and the
    /// backtrace when one was captured
    pub fn report(&self) -> String {
        format!(
            "{} of plugin '{}' ({}) during {}: {:?}",
            self.kind, self.uid, self.plugin_type, self.phase, self.source
        )
    }
}

impl fmt::Display for PluginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of plugin '{}' ({}) during {}: {:#}",
            self.kind, self.uid, self.plugin_type, self.phase, self.source
        )
    }
}

impl std::error::Error for PluginFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::backtrace::BacktraceStatus;

    #[test]
    fn test_classify_marker_errors() {
        let linkage = AnyError::new(LinkageError::new("missing IngredientKind::ITEM"));
        assert_eq!(PluginFailure::classify(&linkage), FailureKind::Linkage);

        let legacy = AnyError::new(NotImplemented);
        assert_eq!(PluginFailure::classify(&legacy), FailureKind::NotImplemented);

        let plain = anyhow::anyhow!("index out of bounds");
        assert_eq!(PluginFailure::classify(&plain), FailureKind::Runtime);
    }

    #[test]
    fn test_classify_looks_through_context() {
        let wrapped = Err::<(), _>(LinkageError::new("old recipe layout"))
            .context("registering recipes")
            .unwrap_err();
        assert_eq!(PluginFailure::classify(&wrapped), FailureKind::Linkage);
    }

    #[test]
    fn test_failure_display_names_plugin_and_phase() {
        let failure = PluginFailure::new(
            "my_mod::MyPlugin",
            "my_mod",
            Phase::Ingredients,
            FailureKind::Runtime,
            anyhow::anyhow!("boom"),
        );
        let message = failure.to_string();
        assert!(message.contains("my_mod::MyPlugin"));
        assert!(message.contains("registering ingredients"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_report_lists_causes() {
        let source = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "recipes.json"))
            .context("loading recipe layout")
            .unwrap_err();
        let failure = PluginFailure::new("my_mod::MyPlugin", "my_mod", Phase::Plugins, FailureKind::Runtime, source);

        let report = failure.report();
        assert!(report.starts_with("runtime failure of plugin 'my_mod'"));
        assert!(report.contains("loading recipe layout"));
        assert!(report.contains("Caused by:"));
        assert!(report.contains("recipes.json"));
        if failure.backtrace().status() == BacktraceStatus::Captured {
            assert!(report.contains("Stack backtrace:"));
        }
    }
}
