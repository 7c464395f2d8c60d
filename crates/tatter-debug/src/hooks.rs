//! Tick hooks for live inspection.
//!
//! Hooks are called by a driver around each tick to capture metrics or
//! snapshots without touching the solver.

use std::sync::{Arc, Mutex};

use tatter_solver::Cloth;
use tatter_telemetry::events::{ClothEvent, EventKind};
use tracing::debug;

use crate::snapshot::ClothSnapshot;

/// Trait for tick inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each tick:
///   hook.on_tick_begin(...)
///   cloth.update(...)
///   hook.on_tick_end(...)
/// hook.on_run_end()
/// ```
pub trait TickHook: Send {
    fn on_tick_begin(&mut self, tick: u64, sim_time_ms: f64, wind: f64) {
        let _ = (tick, sim_time_ms, wind);
    }

    /// Called after the tick with read access to the cloth.
    fn on_tick_end(&mut self, tick: u64, wall_time: f64, cloth: &Cloth) {
        let _ = (tick, wall_time, cloth);
    }

    fn on_run_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Translates tick callbacks into telemetry events.
pub struct TelemetryHook {
    events: Vec<ClothEvent>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<ClothEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for TelemetryHook {
    fn default() -> Self {
        Self::new()
    }
}

impl TickHook for TelemetryHook {
    fn on_tick_begin(&mut self, tick: u64, sim_time_ms: f64, wind: f64) {
        self.events
            .push(ClothEvent::new(tick, EventKind::TickBegin { sim_time_ms, wind }));
    }

    fn on_tick_end(&mut self, tick: u64, wall_time: f64, cloth: &Cloth) {
        self.events
            .push(ClothEvent::new(tick, EventKind::TickEnd { wall_time }));
        self.events.push(ClothEvent::new(
            tick,
            EventKind::Tension {
                global: cloth.global_tension(),
                active_sticks: cloth.active_stick_count() as u32,
            },
        ));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Captures a snapshot every `interval` ticks.
///
/// Snapshots go into a shared buffer that stays readable after the hook
/// is boxed into a driver.
pub struct SnapshotHook {
    interval: u64,
    snapshots: Arc<Mutex<Vec<ClothSnapshot>>>,
}

impl SnapshotHook {
    /// An `interval` of 0 is treated as 1.
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            snapshots: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the captured snapshots.
    pub fn snapshots(&self) -> Arc<Mutex<Vec<ClothSnapshot>>> {
        Arc::clone(&self.snapshots)
    }
}

impl TickHook for SnapshotHook {
    fn on_tick_end(&mut self, tick: u64, _wall_time: f64, cloth: &Cloth) {
        if (tick + 1) % self.interval == 0 {
            if let Ok(mut snapshots) = self.snapshots.lock() {
                snapshots.push(ClothSnapshot::capture(cloth, tick));
            }
        }
    }

    fn on_run_end(&mut self) {
        let count = self.snapshots.lock().map(|s| s.len()).unwrap_or(0);
        debug!(count, "snapshots captured");
    }

    fn name(&self) -> &str {
        "snapshot_hook"
    }
}
