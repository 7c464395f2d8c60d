//! # tatter-contact
//!
//! Positional collision resolution between cloth points and solid
//! shapes.
//!
//! Colliders are one-way: a penetrating point is projected onto the
//! nearest surface, and colliders never move in response. The
//! [`CollisionHub`] owns the colliders and implements
//! [`CollisionResolver`](tatter_solver::CollisionResolver), which is how
//! the cloth calls into it each tick.

pub mod box_collider;
pub mod circle;
pub mod collider;
pub mod hub;

pub use box_collider::BoxCollider;
pub use circle::CircleCollider;
pub use collider::Collider;
pub use hub::CollisionHub;
pub use tatter_solver::{CollisionResolver, ContactResult};
