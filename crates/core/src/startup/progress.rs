//! Per-phase progress reporting

use std::sync::Arc;

/// Receives progress for each phase. The bootstrap never reads anything back.
pub trait ProgressSink: Send + Sync {
    fn start(&self, label: &str, total: usize);

    fn step(&self, label: &str, step: usize, item: &str);

    fn finish(&self, label: &str, steps: usize);
}

/// Writes progress to the log at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn start(&self, label: &str, total: usize) {
        tracing::debug!("{}: 0/{}", label, total);
    }

    fn step(&self, label: &str, step: usize, item: &str) {
        tracing::debug!("{}: {} ({})", label, step, item);
    }

    fn finish(&self, label: &str, steps: usize) {
        tracing::debug!("{}: done after {} steps", label, steps);
    }
}

/// Progress tracker for one phase. Finishes when dropped, including on early
/// returns out of the phase.
pub struct ProgressBar {
    label: &'static str,
    total: usize,
    steps: usize,
    sink: Arc<dyn ProgressSink>,
}

impl ProgressBar {
    pub fn start(label: &'static str, total: usize, sink: Arc<dyn ProgressSink>) -> Self {
        sink.start(label, total);
        Self {
            label,
            total,
            steps: 0,
            sink,
        }
    }

    pub fn step(&mut self, item: &str) {
        self.steps += 1;
        self.sink.step(self.label, self.steps, item);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.sink.finish(self.label, self.steps);
    }
}
