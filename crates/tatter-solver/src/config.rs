//! Per-tick physics parameters.
//!
//! Built once per tick by the driver (usually through
//! [`SimulationState::physics_at`](crate::state::SimulationState::physics_at))
//! and handed to [`Cloth::update`](crate::cloth::Cloth::update) by reference.

use serde::{Deserialize, Serialize};
use tatter_types::constants::{
    DEFAULT_BREAKING_LIMIT, DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_STIFFNESS,
    DEFAULT_WIND_STRENGTH,
};
use tatter_types::{Scalar, TatterError, TatterResult};

/// Physics parameters for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fraction of implicit velocity kept each step (0.0–1.0).
    pub friction: Scalar,

    /// Downward positional bias added each step.
    pub gravity: Scalar,

    /// Relaxation passes per tick. Higher = closer to rigid rods.
    pub stiffness: u32,

    /// Horizontal force applied uniformly to every point.
    pub wind: Scalar,

    /// Stretch ratio at which sticks break. `0.0` disables breaking.
    pub breaking_limit: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            gravity: DEFAULT_GRAVITY,
            stiffness: DEFAULT_STIFFNESS,
            wind: DEFAULT_WIND_STRENGTH,
            breaking_limit: DEFAULT_BREAKING_LIMIT,
        }
    }
}

impl PhysicsConfig {
    /// No wind, no breaking. Useful for settling tests.
    pub fn calm() -> Self {
        Self {
            wind: 0.0,
            breaking_limit: 0.0,
            ..Default::default()
        }
    }

    /// Many relaxation passes, behaves close to inextensible cloth.
    pub fn rigid() -> Self {
        Self {
            stiffness: 20,
            ..Default::default()
        }
    }

    /// Returns a copy that is safe to simulate with.
    ///
    /// - `stiffness` is raised to at least 1
    /// - `friction` is clamped to `[0, 1]`
    /// - non-finite `friction`/`gravity`/`wind` fall back to defaults
    /// - negative or non-finite `breaking_limit` means "never break"
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let friction = if self.friction.is_finite() {
            self.friction.clamp(0.0, 1.0)
        } else {
            defaults.friction
        };
        let gravity = if self.gravity.is_finite() { self.gravity } else { defaults.gravity };
        let wind = if self.wind.is_finite() { self.wind } else { 0.0 };
        let breaking_limit = if self.breaking_limit.is_finite() && self.breaking_limit > 0.0 {
            self.breaking_limit
        } else {
            0.0
        };

        Self {
            friction,
            gravity,
            stiffness: self.stiffness.max(1),
            wind,
            breaking_limit,
        }
    }

    /// Returns true if [`sanitized`](Self::sanitized) would change anything.
    pub fn needs_sanitizing(&self) -> bool {
        let clean = self.sanitized();
        // Bitwise comparison so NaN fields count as changed.
        clean.friction.to_bits() != self.friction.to_bits()
            || clean.gravity.to_bits() != self.gravity.to_bits()
            || clean.wind.to_bits() != self.wind.to_bits()
            || clean.stiffness != self.stiffness
            || clean.breaking_limit.to_bits() != self.breaking_limit.to_bits()
    }

    /// Strict check used when loading configuration from disk.
    pub fn validate(&self) -> TatterResult<()> {
        if self.stiffness == 0 {
            return Err(TatterError::InvalidConfig(
                "stiffness must be at least 1".into(),
            ));
        }
        if !self.friction.is_finite() || !(0.0..=1.0).contains(&self.friction) {
            return Err(TatterError::InvalidConfig(format!(
                "friction must be within [0, 1], got {}",
                self.friction
            )));
        }
        if !self.gravity.is_finite() {
            return Err(TatterError::InvalidConfig("gravity must be finite".into()));
        }
        if !self.wind.is_finite() {
            return Err(TatterError::InvalidConfig("wind must be finite".into()));
        }
        if !self.breaking_limit.is_finite() || self.breaking_limit < 0.0 {
            return Err(TatterError::InvalidConfig(format!(
                "breaking_limit must be >= 0, got {}",
                self.breaking_limit
            )));
        }
        Ok(())
    }
}
