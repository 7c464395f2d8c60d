//! Run configuration loaded from TOML.
//!
//! ```toml
//! scene = "SPHERE"
//! material = "SILK"
//! ticks = 600
//!
//! [state]
//! wind_strength = 0.0
//!
//! [[interactions]]
//! tick = 120
//! action = { kind = "tear", x = 640.0, y = 200.0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use tatter_material::MaterialDatabase;
use tatter_solver::SimulationState;
use tatter_types::constants::{MAX_CLOTH_POINTS, MAX_RUN_TICKS};
use tatter_types::{Scalar, TatterError, TatterResult};

use crate::scenarios::{ClothLayout, SceneKind};

/// One user action, applied by the runner before the tick it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub tick: u64,
    pub action: Action,
}

/// The interactive gestures a driver can perform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Cut every stick near a point.
    Tear { x: Scalar, y: Scalar },
    Explosion { x: Scalar, y: Scalar },
    Well { x: Scalar, y: Scalar },
    Vortex { x: Scalar, y: Scalar },
    /// Grab whatever is under `(x, y)` (a collider first, then the
    /// nearest point) and move it to `(to_x, to_y)`.
    Drag {
        x: Scalar,
        y: Scalar,
        to_x: Scalar,
        to_y: Scalar,
    },
    TogglePin { x: Scalar, y: Scalar },
}

/// Everything needed for a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub scene: SceneKind,
    /// When set, the material's tunables replace those in `state`.
    pub material: Option<String>,
    pub ticks: u64,
    pub viewport_width: Scalar,
    pub viewport_height: Scalar,
    /// Driver clock advance per tick, feeding the wind gusts.
    pub tick_interval_ms: Scalar,
    pub state: SimulationState,
    pub interactions: Vec<Interaction>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Default,
            material: None,
            ticks: 600,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            tick_interval_ms: 16.0,
            state: SimulationState::default(),
            interactions: Vec::new(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> TatterResult<Self> {
        toml::from_str(text).map_err(|e| TatterError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> TatterResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> TatterResult<String> {
        toml::to_string_pretty(self).map_err(|e| TatterError::Serialization(e.to_string()))
    }

    pub fn layout(&self) -> ClothLayout {
        ClothLayout::fit_viewport(self.viewport_width, self.viewport_height)
    }

    /// Checks the viewport, run length, state and material name.
    ///
    /// Interactions scheduled past the last tick are only warned about.
    pub fn validate(&self) -> TatterResult<()> {
        for (label, value) in [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TatterError::InvalidConfig(format!(
                    "{label} must be positive, got {value}"
                )));
            }
        }
        match self.layout().point_count() {
            Some(points) if points <= MAX_CLOTH_POINTS => {}
            _ => {
                return Err(TatterError::InvalidConfig(format!(
                    "viewport {}x{} needs more than {MAX_CLOTH_POINTS} cloth points",
                    self.viewport_width, self.viewport_height
                )));
            }
        }
        if self.ticks > MAX_RUN_TICKS {
            return Err(TatterError::InvalidConfig(format!(
                "ticks must be at most {MAX_RUN_TICKS}, got {}",
                self.ticks
            )));
        }
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms < 0.0 {
            return Err(TatterError::InvalidConfig(format!(
                "tick_interval_ms must be >= 0, got {}",
                self.tick_interval_ms
            )));
        }
        self.state.validate()?;

        if let Some(name) = &self.material {
            if MaterialDatabase::with_defaults().get(name).is_none() {
                return Err(TatterError::UnknownMaterial(name.clone()));
            }
        }

        let late = self
            .interactions
            .iter()
            .filter(|i| i.tick >= self.ticks)
            .count();
        if late > 0 {
            warn!(late, ticks = self.ticks, "interactions scheduled after the last tick");
        }
        Ok(())
    }
}
