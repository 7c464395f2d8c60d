//! Scalar and vector aliases for the simulation.
//!
//! Positions are kept in double precision so long-running scenes
//! accumulate less integration drift.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;

/// 2D vector over [`Scalar`].
pub type Vec2 = glam::DVec2;
