//! Breakable distance constraint.
//!
//! Each [`Stick::update`] moves both endpoints half of the way toward the
//! rest length. A pinned endpoint simply does not move, so its half of the
//! correction is dropped rather than handed to the other endpoint; repeated
//! passes make up the difference.
//!
//! ```text
//! ACTIVE ──(tear | distance > length × breaking_limit)──▶ BROKEN
//! ```
//!
//! `BROKEN` is terminal.

use serde::{Deserialize, Serialize};
use tatter_types::constants::EPSILON;
use tatter_types::{PointId, Scalar, Vec2};

use crate::point::Point;

/// A distance constraint between two points of the same arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stick {
    pub p1: PointId,
    pub p2: PointId,
    /// Rest length, fixed at creation.
    pub length: Scalar,
    /// False once torn or broken. Never flips back.
    pub is_active: bool,
    /// `|distance - length| / length` as of the last relaxation pass.
    pub tension: Scalar,
}

impl Stick {
    /// Creates an active, unstressed stick.
    pub fn new(p1: PointId, p2: PointId, length: Scalar) -> Self {
        Self {
            p1,
            p2,
            length,
            is_active: true,
            tension: 0.0,
        }
    }

    /// Creates a stick whose rest length is the current endpoint distance.
    pub fn between(points: &[Point], p1: PointId, p2: PointId) -> Self {
        let length = points[p1.index()].pos.distance(points[p2.index()].pos);
        Self::new(p1, p2, length)
    }

    /// Current endpoint positions.
    #[inline]
    pub fn endpoints(&self, points: &[Point]) -> (Vec2, Vec2) {
        (points[self.p1.index()].pos, points[self.p2.index()].pos)
    }

    pub fn current_length(&self, points: &[Point]) -> Scalar {
        let (a, b) = self.endpoints(points);
        a.distance(b)
    }

    pub fn midpoint(&self, points: &[Point]) -> Vec2 {
        let (a, b) = self.endpoints(points);
        (a + b) * 0.5
    }

    /// Marks the stick broken. Returns true if it was active before.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.is_active;
        self.is_active = false;
        was_active
    }

    /// One relaxation pass. Returns true if the stick broke during it.
    ///
    /// A `breaking_limit` of zero or less disables breaking. The breaking
    /// check runs before the correction, so a stick never both breaks and
    /// pulls in the same pass.
    pub fn update(&mut self, points: &mut [Point], breaking_limit: Scalar) -> bool {
        if !self.is_active {
            return false;
        }

        let a = points[self.p1.index()];
        let b = points[self.p2.index()];

        let delta = b.pos - a.pos;
        let distance = delta.length();
        if !distance.is_finite() {
            return false;
        }

        if breaking_limit > 0.0 && distance > self.length * breaking_limit {
            self.is_active = false;
            return true;
        }

        let difference = self.length - distance;
        self.tension = if self.length > EPSILON {
            difference.abs() / self.length
        } else {
            0.0
        };

        // Coincident endpoints have no direction to push along.
        if distance <= EPSILON {
            return false;
        }

        let offset = delta * (difference / distance / 2.0);

        if !a.is_pinned {
            points[self.p1.index()].pos -= offset;
        }
        if !b.is_pinned {
            points[self.p2.index()].pos += offset;
        }

        false
    }
}
