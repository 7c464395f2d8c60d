//! Analytical circle collision.

use serde::{Deserialize, Serialize};
use tatter_solver::Point;
use tatter_types::constants::EPSILON;
use tatter_types::{Scalar, Vec2};

/// Solid disc. Points inside are projected radially onto the rim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    pub center: Vec2,
    pub radius: Scalar,
    /// Stored for scene descriptions; positional resolution ignores it.
    pub friction: Scalar,
    /// Stored for scene descriptions; positional resolution ignores it.
    pub restitution: Scalar,
    #[serde(skip)]
    pub is_dragging: bool,
}

impl CircleCollider {
    pub fn new(x: Scalar, y: Scalar, radius: Scalar) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
            friction: 0.5,
            restitution: 0.0,
            is_dragging: false,
        }
    }

    /// Inclusive hit test used for picking.
    pub fn contains(&self, x: Scalar, y: Scalar) -> bool {
        self.center.distance_squared(Vec2::new(x, y)) <= self.radius * self.radius
    }

    /// Pushes `point` onto the rim if it is strictly inside.
    ///
    /// Returns the penetration depth that was corrected. A point sitting
    /// exactly on the centre has no outward direction; it is pushed
    /// straight up (towards negative screen `y`).
    pub fn resolve(&self, point: &mut Point) -> Option<Scalar> {
        if point.is_pinned {
            return None;
        }

        let offset = point.pos - self.center;
        let dist_sq = offset.length_squared();
        if dist_sq >= self.radius * self.radius {
            return None;
        }

        if dist_sq <= EPSILON * EPSILON {
            point.pos = self.center + Vec2::new(0.0, -self.radius);
            return Some(self.radius);
        }

        let dist = dist_sq.sqrt();
        point.pos = self.center + offset / dist * self.radius;
        Some(self.radius - dist)
    }
}
