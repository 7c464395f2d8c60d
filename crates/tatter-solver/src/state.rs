//! Driver-owned simulation tunables.
//!
//! Everything the UI or a config file can tweak lives here. The cloth
//! never sees this type directly: each tick the driver derives a
//! [`PhysicsConfig`] from it.

use serde::{Deserialize, Serialize};
use tatter_types::constants::{
    DEFAULT_BREAKING_LIMIT, DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_STIFFNESS,
    DEFAULT_TIMESTEP, DEFAULT_WIND_STRENGTH,
};
use tatter_types::{Scalar, TatterError, TatterResult};

use crate::config::PhysicsConfig;

/// Angular rate of the wind gusts, per millisecond.
const GUST_RATE: Scalar = 0.003;

/// Tunable simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationState {
    pub gravity: Scalar,
    pub friction: Scalar,
    pub stiffness: u32,
    pub breaking_limit: Scalar,
    /// Base wind before turbulence is added.
    pub wind_strength: Scalar,
    /// `dt` handed to the cloth each tick.
    pub timestep: Scalar,
    /// Paused drivers skip `Cloth::update` entirely.
    pub paused: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            stiffness: DEFAULT_STIFFNESS,
            breaking_limit: DEFAULT_BREAKING_LIMIT,
            wind_strength: DEFAULT_WIND_STRENGTH,
            timestep: DEFAULT_TIMESTEP,
            paused: false,
        }
    }
}

impl SimulationState {
    /// Gusting wind at `time_ms`: oscillates between 0.5× and 1.5× the
    /// base strength.
    pub fn turbulent_wind(&self, time_ms: Scalar) -> Scalar {
        (time_ms * GUST_RATE).sin() * self.wind_strength * 0.5 + self.wind_strength
    }

    /// Builds the physics parameters for the tick at `time_ms`.
    pub fn physics_at(&self, time_ms: Scalar) -> PhysicsConfig {
        PhysicsConfig {
            friction: self.friction,
            gravity: self.gravity,
            stiffness: self.stiffness,
            wind: self.turbulent_wind(time_ms),
            breaking_limit: self.breaking_limit,
        }
    }

    /// Flips the pause flag and returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn validate(&self) -> TatterResult<()> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(TatterError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if !self.wind_strength.is_finite() {
            return Err(TatterError::InvalidConfig("wind_strength must be finite".into()));
        }
        self.physics_at(0.0).validate()
    }
}
