//! Analytical axis-aligned box collision.
//!
//! A penetrating point leaves through the closest of the four edges.
//! Only correct for unrotated boxes.

use serde::{Deserialize, Serialize};
use tatter_solver::Point;
use tatter_types::{Scalar, Vec2};

/// Solid axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Top-left corner.
    pub position: Vec2,
    pub width: Scalar,
    pub height: Scalar,
    /// Stored for scene descriptions; positional resolution ignores it.
    pub friction: Scalar,
    /// Stored for scene descriptions; positional resolution ignores it.
    pub restitution: Scalar,
    #[serde(skip)]
    pub is_dragging: bool,
}

impl BoxCollider {
    pub fn new(x: Scalar, y: Scalar, width: Scalar, height: Scalar) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
            friction: 0.7,
            restitution: 0.0,
            is_dragging: false,
        }
    }

    /// Box of the given size centred on `(cx, cy)`.
    pub fn centered(cx: Scalar, cy: Scalar, width: Scalar, height: Scalar) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height) * 0.5
    }

    /// Inclusive hit test used for picking.
    pub fn contains(&self, x: Scalar, y: Scalar) -> bool {
        let max = self.max();
        x >= self.position.x && x <= max.x && y >= self.position.y && y <= max.y
    }

    /// Projects `point` onto the nearest edge if it is strictly inside.
    ///
    /// Returns the penetration depth that was corrected.
    pub fn resolve(&self, point: &mut Point) -> Option<Scalar> {
        if point.is_pinned {
            return None;
        }

        let min = self.position;
        let max = self.max();
        let (x, y) = (point.pos.x, point.pos.y);

        if !(x > min.x && x < max.x && y > min.y && y < max.y) {
            return None;
        }

        // Inside the box. Find shortest penetration depth to an edge.
        let d_left = x - min.x;
        let d_right = max.x - x;
        let d_top = y - min.y;
        let d_bottom = max.y - y;

        let min_d = d_left.min(d_right).min(d_top).min(d_bottom);

        if min_d == d_left {
            point.pos.x = min.x;
        } else if min_d == d_right {
            point.pos.x = max.x;
        } else if min_d == d_top {
            point.pos.y = min.y;
        } else {
            point.pos.y = max.y;
        }

        Some(min_d)
    }
}
