//! Current-material selection.

use tracing::info;

use tatter_solver::SimulationState;
use tatter_types::constants::DEFAULT_GRAVITY;
use tatter_types::{TatterError, TatterResult};

use crate::database::MaterialDatabase;
use crate::properties::{MaterialProperties, PropertyKey, PropertyValue};

/// Default material selected at startup.
pub const DEFAULT_MATERIAL: &str = "LINEN";

/// Tracks which preset is active.
#[derive(Debug, Clone)]
pub struct MaterialManager {
    database: MaterialDatabase,
    current: MaterialProperties,
}

impl MaterialManager {
    /// Uses the built-in presets with `name` selected.
    pub fn new(name: &str) -> TatterResult<Self> {
        Self::with_database(MaterialDatabase::with_defaults(), name)
    }

    pub fn with_database(database: MaterialDatabase, name: &str) -> TatterResult<Self> {
        let current = database
            .get(name)
            .ok_or_else(|| TatterError::UnknownMaterial(name.to_string()))?
            .clone();
        Ok(Self { database, current })
    }

    pub fn database(&self) -> &MaterialDatabase {
        &self.database
    }

    /// Switches to another preset. The selection is unchanged on error.
    pub fn set_material(&mut self, name: &str) -> TatterResult<&MaterialProperties> {
        let props = self
            .database
            .get(name)
            .ok_or_else(|| TatterError::UnknownMaterial(name.to_string()))?;
        info!(material = %props.name, "material selected");
        self.current = props.clone();
        Ok(&self.current)
    }

    /// The active preset.
    pub fn current(&self) -> &MaterialProperties {
        &self.current
    }

    pub fn current_name(&self) -> &str {
        &self.current.name
    }

    /// One property of the active preset.
    pub fn get_property(&self, key: PropertyKey) -> PropertyValue<'_> {
        self.current().get(key)
    }

    /// Copies the active preset's tunables onto `state`.
    ///
    /// Gravity becomes `gravity_scale × DEFAULT_GRAVITY`. Wind, timestep
    /// and pause state are left alone.
    pub fn apply_to(&self, state: &mut SimulationState) {
        let props = self.current();
        state.stiffness = props.stiffness;
        state.friction = props.friction;
        state.breaking_limit = props.breaking_limit;
        state.gravity = props.gravity_scale * DEFAULT_GRAVITY;
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self {
            database: MaterialDatabase::with_defaults(),
            current: crate::database::linen(),
        }
    }
}
