//! # tatter-solver
//!
//! Verlet integration, distance-constraint relaxation, and the per-tick
//! cloth pipeline.
//!
//! ## Key Types
//!
//! - [`Point`]: A mass node with implicit (position-difference) velocity
//! - [`Stick`]: A breakable distance constraint between two points
//! - [`Cloth`]: Owns the point arena and stick list, drives each tick
//! - [`PhysicsConfig`]: Immutable per-tick parameters
//! - [`SimulationState`]: Driver-owned tunables that produce a `PhysicsConfig`
//! - [`CollisionResolver`]: Seam through which colliders push points
//!
//! ## Tick pipeline
//!
//! ```text
//! wind + integrate every point
//!   → collision resolver (optional)
//!   → `stiffness` relaxation passes over active sticks
//!   → prune broken sticks, report whether any were removed
//! ```

pub mod cloth;
pub mod config;
pub mod forces;
pub mod point;
pub mod resolver;
pub mod state;
pub mod stick;

pub use cloth::{Cloth, Segment};
pub use config::PhysicsConfig;
pub use point::Point;
pub use resolver::{CollisionResolver, ContactResult};
pub use state::SimulationState;
pub use stick::Stick;
