//! Phase timing

use super::Phase;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runtime handoffs slower than this are reported
pub const SLOW_PLUGIN_BUDGET: Duration = Duration::from_millis(100);

/// Monotonic time source
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward, pinning at the largest representable time
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        let _ = self
            .micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |micros| Some(micros.saturating_add(by)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

/// Named stopwatch that logs when it starts and stops
pub struct LoggedTimer {
    label: String,
    clock: Arc<dyn Clock>,
    started: Duration,
}

impl LoggedTimer {
    pub fn start(label: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let label = label.into();
        tracing::info!("{}...", label);
        let started = clock.now();
        Self { label, clock, started }
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.started)
    }

    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::info!("{} took {:?}", self.label, elapsed);
        elapsed
    }
}

/// Stopwatch around a single plugin hook.
///
/// Only phases that time their invocations log the start and stop lines.
pub struct InvocationTimer {
    phase: Phase,
    plugin_type: &'static str,
    clock: Arc<dyn Clock>,
    started: Duration,
}

impl InvocationTimer {
    pub fn start(phase: Phase, plugin_type: &'static str, clock: Arc<dyn Clock>) -> Self {
        if phase.times_invocations() {
            tracing::debug!("{}: {}...", phase.label(), plugin_type);
        }
        let started = clock.now();
        Self {
            phase,
            plugin_type,
            clock,
            started,
        }
    }

    pub fn stop(self) -> Duration {
        let elapsed = self.clock.now().saturating_sub(self.started);
        if self.phase.times_invocations() {
            tracing::debug!("{}: {} took {:?}", self.phase.label(), self.plugin_type, elapsed);
        }
        elapsed
    }

    /// Only the runtime handoff is held to [`SLOW_PLUGIN_BUDGET`]
    pub fn over_budget(phase: Phase, elapsed: Duration) -> bool {
        phase == Phase::Runtime && elapsed > SLOW_PLUGIN_BUDGET
    }
}
