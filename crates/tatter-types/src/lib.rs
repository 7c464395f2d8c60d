//! # tatter-types
//!
//! Shared types, identifiers, error types, and simulation defaults
//! for the Tatter cloth engine.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other Tatter crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{TatterError, TatterResult};
pub use ids::{ColliderId, PointId, StickId};
pub use scalar::{Scalar, Vec2};
