//! # tatter-telemetry
//!
//! Event bus for cloth telemetry. Drivers emit structured events
//! (tick timing, tension, broken threads, tears, contacts) that are
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{ClothEvent, EventKind};
pub use sinks::{EventSink, RecordingSink, SummarySink, TelemetrySummary, TracingSink};
