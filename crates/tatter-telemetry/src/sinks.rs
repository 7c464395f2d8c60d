//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tatter_types::Scalar;

use crate::events::{ClothEvent, EventKind};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &ClothEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Records every event into a shared buffer.
///
/// Keep the handle from [`RecordingSink::events`] before boxing the
/// sink into a bus; it stays readable afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<ClothEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded events.
    pub fn events(&self) -> Arc<Mutex<Vec<ClothEvent>>> {
        Arc::clone(&self.events)
    }
}

impl EventSink for RecordingSink {
    fn handle(&mut self, event: &ClothEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "recording_sink"
    }
}

/// Forwards events to `tracing` at a fixed level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &ClothEvent) {
        match self.level {
            tracing::Level::ERROR => tracing::error!(tick = event.tick, event = ?event.kind, "cloth_event"),
            tracing::Level::WARN => tracing::warn!(tick = event.tick, event = ?event.kind, "cloth_event"),
            tracing::Level::INFO => tracing::info!(tick = event.tick, event = ?event.kind, "cloth_event"),
            tracing::Level::DEBUG => tracing::debug!(tick = event.tick, event = ?event.kind, "cloth_event"),
            tracing::Level::TRACE => tracing::trace!(tick = event.tick, event = ?event.kind, "cloth_event"),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Running totals folded from the event stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySummary {
    pub ticks: u64,
    pub sticks_removed: u64,
    pub tears: u64,
    pub sticks_torn: u64,
    pub contacts_resolved: u64,
    pub peak_tension: Scalar,
    pub last_tension: Scalar,
    pub total_wall_time: f64,
}

impl TelemetrySummary {
    /// Folds one event into the totals.
    pub fn absorb(&mut self, event: &ClothEvent) {
        match &event.kind {
            EventKind::TickEnd { wall_time } => {
                self.ticks += 1;
                self.total_wall_time += wall_time;
            }
            EventKind::Tension { global, .. } => {
                self.last_tension = *global;
                if *global > self.peak_tension {
                    self.peak_tension = *global;
                }
            }
            EventKind::SticksRemoved { count } => self.sticks_removed += u64::from(*count),
            EventKind::Tear { count, .. } => {
                self.tears += 1;
                self.sticks_torn += u64::from(*count);
            }
            EventKind::Contacts { resolved, .. } => {
                self.contacts_resolved += u64::from(*resolved);
            }
            EventKind::SceneLoaded { .. }
            | EventKind::TickBegin { .. }
            | EventKind::Custom { .. } => {}
        }
    }
}

/// Folds events into a shared [`TelemetrySummary`].
#[derive(Debug, Clone, Default)]
pub struct SummarySink {
    summary: Arc<Mutex<TelemetrySummary>>,
}

impl SummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Arc<Mutex<TelemetrySummary>> {
        Arc::clone(&self.summary)
    }
}

impl EventSink for SummarySink {
    fn handle(&mut self, event: &ClothEvent) {
        if let Ok(mut summary) = self.summary.lock() {
            summary.absorb(event);
        }
    }

    fn name(&self) -> &str {
        "summary_sink"
    }
}
