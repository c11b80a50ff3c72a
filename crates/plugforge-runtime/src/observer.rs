//! Progress reporting for discovery runs.

use tracing::info;

/// Sink for discovery progress events.
///
/// [`event`](Self::event) is called for every milestone: candidate found,
/// module loaded, module rejected, duplicate detected.
/// [`done`](Self::done) is called exactly once at the end of one
/// exploration, whether or not collisions occurred.
pub trait LoadingStatusObserver {
    fn event(&mut self, description: &str);
    fn done(&mut self);
}

/// Observer that discards everything. The default for callers not
/// interested in progress; costs nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatusObserver;

impl LoadingStatusObserver for NullStatusObserver {
    fn event(&mut self, _description: &str) {}

    fn done(&mut self) {}
}

/// Observer that forwards every milestone to the log stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatusObserver;

impl LoadingStatusObserver for TracingStatusObserver {
    fn event(&mut self, description: &str) {
        info!("{description}");
    }

    fn done(&mut self) {
        info!("module discovery finished");
    }
}
