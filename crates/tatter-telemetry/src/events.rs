//! Cloth event types.
//!
//! Structured events emitted by a driver around each tick. Events are
//! plain values that carry just enough data for monitoring.

use serde::{Deserialize, Serialize};
use tatter_types::Scalar;

/// An event emitted while driving a cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothEvent {
    /// Tick number (0-indexed).
    pub tick: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A scene was set up.
    SceneLoaded {
        name: String,
        points: u32,
        sticks: u32,
    },

    /// Tick started.
    TickBegin {
        /// Driver clock in milliseconds.
        sim_time_ms: f64,
        /// Wind fed into this tick.
        wind: Scalar,
    },

    /// Tick completed.
    TickEnd {
        /// Wall-clock time for the tick (seconds).
        wall_time: f64,
    },

    /// Mean strain over the active sticks after the tick.
    Tension {
        global: Scalar,
        active_sticks: u32,
    },

    /// Sticks removed by the prune step, whether stretched or torn.
    SticksRemoved {
        count: u32,
    },

    /// A user tear deactivated sticks.
    Tear {
        x: Scalar,
        y: Scalar,
        count: u32,
    },

    /// Collision pass summary.
    Contacts {
        resolved: u32,
        max_penetration: Scalar,
    },

    /// Custom event for extensibility.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl ClothEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}
