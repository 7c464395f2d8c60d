//! Collider sum type.

use serde::{Deserialize, Serialize};
use tatter_solver::Point;
use tatter_types::{Scalar, Vec2};

use crate::box_collider::BoxCollider;
use crate::circle::CircleCollider;

/// Any shape the hub can resolve points against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    Circle(CircleCollider),
    Box(BoxCollider),
}

impl Collider {
    pub fn circle(x: Scalar, y: Scalar, radius: Scalar) -> Self {
        Collider::Circle(CircleCollider::new(x, y, radius))
    }

    pub fn rect(x: Scalar, y: Scalar, width: Scalar, height: Scalar) -> Self {
        Collider::Box(BoxCollider::new(x, y, width, height))
    }

    /// Pushes `point` out of the shape. Returns the corrected depth.
    pub fn resolve(&self, point: &mut Point) -> Option<Scalar> {
        match self {
            Collider::Circle(c) => c.resolve(point),
            Collider::Box(b) => b.resolve(point),
        }
    }

    pub fn contains(&self, x: Scalar, y: Scalar) -> bool {
        match self {
            Collider::Circle(c) => c.contains(x, y),
            Collider::Box(b) => b.contains(x, y),
        }
    }

    /// Anchor point: centre for circles, top-left corner for boxes.
    pub fn position(&self) -> Vec2 {
        match self {
            Collider::Circle(c) => c.center,
            Collider::Box(b) => b.position,
        }
    }

    /// Moves the anchor point (drag interaction).
    pub fn set_position(&mut self, x: Scalar, y: Scalar) {
        let to = Vec2::new(x, y);
        match self {
            Collider::Circle(c) => c.center = to,
            Collider::Box(b) => b.position = to,
        }
    }

    pub fn is_dragging(&self) -> bool {
        match self {
            Collider::Circle(c) => c.is_dragging,
            Collider::Box(b) => b.is_dragging,
        }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        match self {
            Collider::Circle(c) => c.is_dragging = dragging,
            Collider::Box(b) => b.is_dragging = dragging,
        }
    }

    pub fn friction(&self) -> Scalar {
        match self {
            Collider::Circle(c) => c.friction,
            Collider::Box(b) => b.friction,
        }
    }

    pub fn restitution(&self) -> Scalar {
        match self {
            Collider::Circle(c) => c.restitution,
            Collider::Box(b) => b.restitution,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collider::Circle(_) => "circle",
            Collider::Box(_) => "box",
        }
    }
}

impl From<CircleCollider> for Collider {
    fn from(c: CircleCollider) -> Self {
        Collider::Circle(c)
    }
}

impl From<BoxCollider> for Collider {
    fn from(b: BoxCollider) -> Self {
        Collider::Box(b)
    }
}
