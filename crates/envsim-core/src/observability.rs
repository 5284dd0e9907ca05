//! Concrete tracker stack: a debouncing [`Tracker`] in front of an
//! [`EventSink`].
//!
//! The world crate only knows the [`Tracker`] trait. This module supplies
//! the implementation a run actually uses:
//!
//! - [`DebouncedTracker`] wraps every call in a [`TrackedEvent`] envelope.
//!   Non-debounced calls go straight to the sink. Debounced calls are held
//!   per label until the label has been quiet for the configured window;
//!   object payloads received in the meantime are merged, later keys
//!   winning.
//! - [`TracingSink`] forwards events to `tracing` at debug level.
//! - [`MemorySink`] keeps events in memory for tests and tooling.
//!
//! There are no background timers. Elapsed windows are flushed the next
//! time the tracker is used, by an explicit [`DebouncedTracker::flush_due`],
//! or when the tracker is dropped.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Utc;
use envsim_types::{EventId, EventType, SessionId, TrackedEvent};
use envsim_world::Tracker;
use serde_json::{Map, Value};
use tracing::debug;

/// Payload key that carries the event label.
pub const LABEL_KEY: &str = "event";

/// Destination for tracked events.
///
/// Delivery is fire-and-forget. A sink that cannot deliver drops the event.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn send(&self, event: TrackedEvent);
}

/// Sink that writes every event to `tracing` under `envsim::tracker`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn send(&self, event: TrackedEvent) {
        debug!(
            target: "envsim::tracker",
            id = %event.id,
            session = %event.session_id,
            event_type = ?event.event_type,
            label = %event.label,
            payload = %event.payload,
            "Tracked event"
        );
    }
}

/// Sink that keeps every event in memory, in delivery order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TrackedEvent>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of delivered events.
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Labels of delivered events, in delivery order.
    pub fn labels(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.label).collect()
    }

    /// Number of delivered events.
    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Whether nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn send(&self, event: TrackedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// A debounced label waiting for its quiet period to elapse.
#[derive(Debug)]
struct Pending {
    payload: Value,
    deadline: Instant,
}

/// [`Tracker`] that envelopes calls and debounces the ones that ask for it.
pub struct DebouncedTracker {
    sink: Arc<dyn EventSink>,
    session_id: SessionId,
    event_type: EventType,
    window: Duration,
    /// Pending debounced labels, flushed in label order.
    pending: Mutex<BTreeMap<String, Pending>>,
}

impl DebouncedTracker {
    /// Create a tracker emitting [`EventType::SimulationEvent`] envelopes.
    pub fn new(sink: Arc<dyn EventSink>, session_id: SessionId, window: Duration) -> Self {
        Self {
            sink,
            session_id,
            event_type: EventType::SimulationEvent,
            window,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    /// Use `event_type` for every envelope this tracker creates.
    #[must_use]
    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Session stamped on every event.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The debounce window.
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Labels currently held back, in flush order.
    pub fn pending_labels(&self) -> Vec<String> {
        self.pending
            .lock()
            .map(|pending| pending.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Emit every pending label whose window has elapsed at `now`.
    ///
    /// Returns the number of events sent.
    pub fn flush_due(&self, now: Instant) -> usize {
        let due: Vec<(String, Value)> = match self.pending.lock() {
            Ok(mut pending) => {
                let labels: Vec<String> = pending
                    .iter()
                    .filter(|(_, entry)| entry.deadline <= now)
                    .map(|(label, _)| label.clone())
                    .collect();
                labels
                    .into_iter()
                    .filter_map(|label| {
                        pending
                            .remove(&label)
                            .map(|entry| (label, entry.payload))
                    })
                    .collect()
            }
            Err(_) => return 0,
        };
        self.send_all(due)
    }

    /// Emit every pending label now, regardless of its window.
    ///
    /// Returns the number of events sent.
    pub fn flush(&self) -> usize {
        let all: Vec<(String, Value)> = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending)
                .into_iter()
                .map(|(label, entry)| (label, entry.payload))
                .collect(),
            Err(_) => return 0,
        };
        self.send_all(all)
    }

    fn send_all(&self, events: Vec<(String, Value)>) -> usize {
        let count = events.len();
        for (label, payload) in events {
            self.sink.send(self.envelope(&label, payload));
        }
        count
    }

    /// Wrap `payload` into an event. The label is stored under
    /// [`LABEL_KEY`]; object payload fields follow and may override it.
    /// Non-object payloads other than `null` are kept under `value`.
    fn envelope(&self, label: &str, payload: Value) -> TrackedEvent {
        let mut body = Map::new();
        body.insert(LABEL_KEY.to_owned(), Value::String(label.to_owned()));
        match payload {
            Value::Object(fields) => body.extend(fields),
            Value::Null => {}
            other => {
                body.insert("value".to_owned(), other);
            }
        }

        TrackedEvent {
            id: EventId::new(),
            timestamp: Utc::now(),
            event_type: self.event_type,
            session_id: self.session_id,
            label: label.to_owned(),
            payload: Value::Object(body),
        }
    }
}

/// Merge `update` into `base`: object keys are overlaid, anything else
/// replaces `base` outright.
fn merge_payload(base: &mut Value, update: Value) {
    match (base, update) {
        (Value::Object(existing), Value::Object(fields)) => existing.extend(fields),
        (base, update) => *base = update,
    }
}

impl Tracker for DebouncedTracker {
    fn track(&self, label: &str, payload: Value, debounce: bool) {
        debug!(label, debounce, "track");
        let now = Instant::now();
        self.flush_due(now);

        if !debounce {
            self.sink.send(self.envelope(label, payload));
            return;
        }

        let deadline = now.checked_add(self.window).unwrap_or(now);
        if let Ok(mut pending) = self.pending.lock() {
            match pending.get_mut(label) {
                Some(entry) => {
                    merge_payload(&mut entry.payload, payload);
                    entry.deadline = deadline;
                }
                None => {
                    pending.insert(label.to_owned(), Pending { payload, deadline });
                }
            }
        }
    }
}

impl Drop for DebouncedTracker {
    fn drop(&mut self) {
        self.flush();
    }
}

impl std::fmt::Debug for DebouncedTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedTracker")
            .field("session_id", &self.session_id)
            .field("event_type", &self.event_type)
            .field("window", &self.window)
            .field("pending", &self.pending_labels())
            .finish_non_exhaustive()
    }
}
