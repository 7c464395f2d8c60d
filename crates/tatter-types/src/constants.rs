//! Simulation defaults and interaction tuning.
//!
//! Units are screen pixels and simulation steps. Gravity is a
//! per-step positional bias, not an acceleration in px/s².

/// Default gravity bias added to `y` each integration step.
pub const DEFAULT_GRAVITY: f64 = 1.0;

/// Default velocity retention factor applied during integration.
pub const DEFAULT_FRICTION: f64 = 0.98;

/// Default number of relaxation passes per tick.
pub const DEFAULT_STIFFNESS: u32 = 5;

/// Default stretch ratio at which a stick breaks.
pub const DEFAULT_BREAKING_LIMIT: f64 = 2.5;

/// Default base wind strength before turbulence.
pub const DEFAULT_WIND_STRENGTH: f64 = 0.2;

/// Fixed timestep handed to the cloth each frame.
pub const DEFAULT_TIMESTEP: f64 = 0.16;

/// Default rest length between neighbouring grid points (pixels).
pub const DEFAULT_SPACING: f64 = 12.0;

/// Epsilon below which a distance is treated as zero.
pub const EPSILON: f64 = 1.0e-9;

// ─── Interaction radii and strengths ─────────────────────────

pub const GRAB_RADIUS: f64 = 30.0;
pub const PIN_RADIUS: f64 = 25.0;
pub const TEAR_RADIUS: f64 = 20.0;

pub const EXPLOSION_RADIUS: f64 = 300.0;
pub const EXPLOSION_STRENGTH: f64 = 3.0;

pub const WELL_RADIUS: f64 = 500.0;
pub const WELL_STRENGTH: f64 = 2.5;

pub const VORTEX_RADIUS: f64 = 200.0;
pub const VORTEX_STRENGTH: f64 = 1.5;

// ─── Run limits ──────────────────────────────────────────────

/// Largest grid a run may build. Keeps every index within `PointId`.
pub const MAX_CLOTH_POINTS: usize = 1 << 24;

/// Longest headless run accepted from configuration.
pub const MAX_RUN_TICKS: u64 = 100_000_000;
