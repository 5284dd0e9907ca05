//! The tracking capability the environment reports diagnostics through.
//!
//! The core only ever calls [`Tracker::track`]. Delivery, batching, and
//! debouncing are the implementation's concern; `track` is fire-and-forget
//! and must never fail back into the simulation.

use std::sync::Mutex;

/// Fire-and-forget diagnostic sink.
///
/// When `debounce` is true the implementation may coalesce repeated calls
/// with the same label. Callers must not assume synchronous or ordered
/// delivery.
pub trait Tracker: Send + Sync {
    /// Record a diagnostic under `label`.
    fn track(&self, label: &str, payload: serde_json::Value, debounce: bool);
}

/// A tracker that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _label: &str, _payload: serde_json::Value, _debounce: bool) {}
}

/// One recorded [`Tracker::track`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCall {
    /// Diagnostic label.
    pub label: String,
    /// Payload as passed.
    pub payload: serde_json::Value,
    /// Debounce flag as passed.
    pub debounce: bool,
}

/// A tracker that keeps every call in memory, in call order.
///
/// Used by tests and tooling that need to assert on emitted diagnostics.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    calls: Mutex<Vec<TrackCall>>,
}

impl RecordingTracker {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<TrackCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Recorded calls with the given label.
    pub fn calls_labelled(&self, label: &str) -> Vec<TrackCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.label == label)
            .collect()
    }

    /// Number of recorded calls with the given label.
    pub fn count(&self, label: &str) -> usize {
        self.calls_labelled(label).len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl Tracker for RecordingTracker {
    fn track(&self, label: &str, payload: serde_json::Value, debounce: bool) {
        // A poisoned lock drops the diagnostic; tracking never fails upward.
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(TrackCall {
                label: label.to_owned(),
                payload,
                debounce,
            });
        }
    }
}
