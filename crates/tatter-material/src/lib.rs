//! # tatter-material
//!
//! Material presets for the cloth and the manager that tracks which one
//! is selected.
//!
//! A material is a bundle of solver tunables (relaxation passes,
//! friction, breaking limit, gravity scale) plus display colours. The
//! [`MaterialManager`] copies the tunables onto a
//! [`SimulationState`](tatter_solver::SimulationState); the cloth itself
//! never sees materials.

pub mod database;
pub mod manager;
pub mod properties;

pub use database::MaterialDatabase;
pub use manager::MaterialManager;
pub use properties::{MaterialProperties, PropertyKey, PropertyValue};
