//! Runs one plugin hook and applies the failure policy

use super::{Clock, InvocationTimer, Phase, SlowPlugin, SLOW_PLUGIN_BUDGET};
use crate::error::{FailureKind, LinkageError, PluginFailure};
use crate::plugin::{ModPlugin, PLUGIN_API_VERSION};
use anyhow::Result;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/// What the sequencer does with a plugin after one invocation
#[derive(Debug)]
pub enum Outcome {
    /// Keep the plugin
    Ok,
    /// Drop the plugin at the end of the phase
    Removed(PluginFailure),
    /// Abort the bootstrap
    Fatal(PluginFailure),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[derive(Debug)]
pub struct Invocation {
    pub outcome: Outcome,
    /// Measured for phases that time their invocations
    pub elapsed: Option<Duration>,
    pub slow: Option<SlowPlugin>,
}

pub struct HookInvoker {
    clock: Arc<dyn Clock>,
}

impl HookInvoker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Invoke `hook` on `plugin` for `phase`.
    ///
    /// Returned errors and panics are both failures. A plugin whose api
    /// requirement the host does not satisfy fails with a linkage error before
    /// the hook runs.
    pub fn invoke<F>(&self, plugin: &dyn ModPlugin, phase: Phase, hook: F) -> Invocation
    where
        F: FnOnce(&dyn ModPlugin) -> Result<()>,
    {
        let info = plugin.info();
        let plugin_type = plugin.type_name();

        if !info.is_compatible_with(&PLUGIN_API_VERSION) {
            let error = anyhow::Error::new(LinkageError::new(format!(
                "plugin requires api {}",
                info.api_requirement
            )));
            return Invocation {
                outcome: self.fail(plugin_type, &info.uid, info.is_baseline(), phase, FailureKind::Linkage, error),
                elapsed: None,
                slow: None,
            };
        }

        let timer = InvocationTimer::start(phase, plugin_type, self.clock.clone());
        let result = catch_unwind(AssertUnwindSafe(|| hook(plugin)));
        let elapsed = timer.stop();

        let outcome = match result {
            Ok(Ok(())) => Outcome::Ok,
            Ok(Err(error)) => match PluginFailure::classify(&error) {
                FailureKind::NotImplemented if phase == Phase::Categories => Outcome::Ok,
                FailureKind::NotImplemented => {
                    self.fail(plugin_type, &info.uid, info.is_baseline(), phase, FailureKind::Runtime, error)
                }
                kind => self.fail(plugin_type, &info.uid, info.is_baseline(), phase, kind, error),
            },
            Err(payload) => {
                let error = anyhow::anyhow!("panicked: {}", payload_text(payload.as_ref()));
                self.fail(plugin_type, &info.uid, info.is_baseline(), phase, FailureKind::Runtime, error)
            }
        };

        let slow = InvocationTimer::over_budget(phase, elapsed).then(|| {
            tracing::warn!(
                "Slow plugin: {} took {:?} to handle the runtime, over the {:?} budget",
                plugin_type,
                elapsed,
                SLOW_PLUGIN_BUDGET
            );
            SlowPlugin {
                plugin_type,
                uid: info.uid.clone(),
                phase,
                elapsed,
            }
        });

        Invocation {
            outcome,
            elapsed: phase.times_invocations().then_some(elapsed),
            slow,
        }
    }

    fn fail(
        &self,
        plugin_type: &'static str,
        uid: &str,
        baseline: bool,
        phase: Phase,
        kind: FailureKind,
        error: anyhow::Error,
    ) -> Outcome {
        let failure = PluginFailure::new(plugin_type, uid, phase, kind, error);

        if baseline && phase == Phase::Ingredients {
            tracing::error!("Baseline plugin failed, aborting bootstrap: {}", failure.report());
            return Outcome::Fatal(failure);
        }

        tracing::error!("Removing plugin after {}", failure.report());
        Outcome::Removed(failure)
    }
}

/// `panic!` payloads are a `&str` for literals and a `String` when formatted
fn payload_text(payload: &(dyn Any + Send)) -> &str {
    match (payload.downcast_ref::<&'static str>(), payload.downcast_ref::<String>()) {
        (Some(text), _) => *text,
        (None, Some(text)) => text.as_str(),
        (None, None) => "non-string payload",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotImplemented;
    use crate::plugin::{PluginInfo, BASELINE_PLUGIN_UID};
    use crate::startup::ManualClock;
    use semver::{Version, VersionReq};

    struct Stub {
        info: PluginInfo,
    }

    impl Stub {
        fn new(uid: &str) -> Self {
            Self {
                info: PluginInfo::new(uid, Version::new(1, 0, 0)),
            }
        }
    }

    impl ModPlugin for Stub {
        fn info(&self) -> PluginInfo {
            self.info.clone()
        }
    }

    fn invoker() -> (HookInvoker, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (HookInvoker::new(clock.clone()), clock)
    }

    #[test]
    fn test_success() {
        let (invoker, _) = invoker();
        let invocation = invoker.invoke(&Stub::new("a"), Phase::Plugins, |_| Ok(()));
        assert!(invocation.outcome.is_ok());
        assert_eq!(invocation.elapsed, Some(Duration::ZERO));
        assert!(invocation.slow.is_none());
    }

    #[test]
    fn test_error_removes_plugin() {
        let (invoker, _) = invoker();
        let invocation = invoker.invoke(&Stub::new("a"), Phase::ItemSubtypes, |_| anyhow::bail!("broken"));
        match invocation.outcome {
            Outcome::Removed(failure) => {
                assert_eq!(failure.kind(), FailureKind::Runtime);
                assert_eq!(failure.phase(), Phase::ItemSubtypes);
                assert_eq!(failure.uid(), "a");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(invocation.elapsed.is_none());
    }

    #[test]
    fn test_formatted_panic_keeps_its_message() {
        let (invoker, _) = invoker();
        let invocation = invoker.invoke(&Stub::new("a"), Phase::Plugins, |_| panic!("slot {} is empty", 7));
        match invocation.outcome {
            Outcome::Removed(failure) => assert!(failure.to_string().contains("panicked: slot 7 is empty")),
            other => panic!("unexpected outcome {:?}", other),
        }

        let invocation = invoker.invoke(&Stub::new("a"), Phase::Plugins, |_| std::panic::panic_any(42_u8));
        match invocation.outcome {
            Outcome::Removed(failure) => assert!(failure.to_string().contains("non-string payload")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_panic_is_caught() {
        let (invoker, _) = invoker();
        let invocation = invoker.invoke(&Stub::new("a"), Phase::Plugins, |_| panic!("index out of range"));
        match invocation.outcome {
            Outcome::Removed(failure) => {
                assert_eq!(failure.kind(), FailureKind::Runtime);
                assert!(failure.to_string().contains("index out of range"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_not_implemented_only_tolerated_for_categories() {
        let (invoker, _) = invoker();
        let categories = invoker.invoke(&Stub::new("a"), Phase::Categories, |_| Err(NotImplemented.into()));
        assert!(categories.outcome.is_ok());

        let plugins = invoker.invoke(&Stub::new("a"), Phase::Plugins, |_| Err(NotImplemented.into()));
        assert!(matches!(
            plugins.outcome,
            Outcome::Removed(ref failure) if failure.kind() == FailureKind::Runtime
        ));
    }

    #[test]
    fn test_incompatible_api_fails_before_hook() {
        let (invoker, _) = invoker();
        let mut plugin = Stub::new("legacy");
        plugin.info = plugin.info.with_api_requirement(VersionReq::parse("^0.4").unwrap());

        let mut called = false;
        let invocation = invoker.invoke(&plugin, Phase::ItemSubtypes, |_| {
            called = true;
            Ok(())
        });
        assert!(!called);
        assert!(matches!(
            invocation.outcome,
            Outcome::Removed(ref failure) if failure.kind() == FailureKind::Linkage
        ));
    }

    #[test]
    fn test_baseline_ingredient_failure_is_fatal() {
        let (invoker, _) = invoker();
        let baseline = Stub::new(BASELINE_PLUGIN_UID);

        let fatal = invoker.invoke(&baseline, Phase::Ingredients, |_| anyhow::bail!("no items"));
        assert!(matches!(fatal.outcome, Outcome::Fatal(_)));

        let removed = invoker.invoke(&baseline, Phase::Plugins, |_| anyhow::bail!("no recipes"));
        assert!(matches!(removed.outcome, Outcome::Removed(_)));
    }

    #[test]
    fn test_slow_budget_only_in_runtime_phase() {
        let (invoker, clock) = invoker();
        let plugin = Stub::new("slow");

        let plugins = invoker.invoke(&plugin, Phase::Plugins, |_| {
            clock.advance(Duration::from_millis(150));
            Ok(())
        });
        assert!(plugins.slow.is_none());

        let runtime = invoker.invoke(&plugin, Phase::Runtime, |_| {
            clock.advance(Duration::from_millis(150));
            Ok(())
        });
        assert!(runtime.outcome.is_ok());
        let slow = runtime.slow.unwrap();
        assert_eq!(slow.uid, "slow");
        assert_eq!(slow.elapsed, Duration::from_millis(150));
    }
}
