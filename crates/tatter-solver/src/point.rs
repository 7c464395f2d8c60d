//! Verlet mass point.
//!
//! Velocity is never stored. It is the difference between the current
//! and previous position, so moving `prev` is how forces are applied.

use serde::{Deserialize, Serialize};
use tatter_types::{Scalar, Vec2};

/// A single simulated mass node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Current position.
    pub pos: Vec2,
    /// Position at the previous integration step.
    pub prev: Vec2,
    /// Pinned points ignore forces, integration, relaxation and colliders.
    pub is_pinned: bool,
}

impl Point {
    /// Creates a free point at rest.
    pub fn new(x: Scalar, y: Scalar) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            prev: pos,
            is_pinned: false,
        }
    }

    /// Creates a pinned point at rest.
    pub fn pinned(x: Scalar, y: Scalar) -> Self {
        Self {
            is_pinned: true,
            ..Self::new(x, y)
        }
    }

    #[inline]
    pub fn x(&self) -> Scalar {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> Scalar {
        self.pos.y
    }

    /// Implicit velocity (displacement over the last step).
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev
    }

    /// Adds an impulse that shows up on the next [`update`](Self::update).
    pub fn apply_force(&mut self, fx: Scalar, fy: Scalar) {
        if self.is_pinned {
            return;
        }
        self.prev.x -= fx;
        self.prev.y -= fy;
    }

    /// One Verlet step.
    ///
    /// `gravity` is added to `y` as a flat per-step bias. `dt` is accepted
    /// for interface stability but does not enter the formula: the implicit
    /// velocity already encodes the frame spacing.
    ///
    /// A step that would produce a non-finite position is discarded and the
    /// point comes to rest where it was. If `pos` and `prev` are both
    /// non-finite there is nothing to fall back to and the point stays put;
    /// [`Cloth::update`](crate::Cloth::update) resets such points to their
    /// grid position.
    pub fn update(&mut self, _dt: Scalar, friction: Scalar, gravity: Scalar) {
        if self.is_pinned {
            return;
        }

        let velocity = (self.pos - self.prev) * friction;
        let next = self.pos + velocity + Vec2::new(0.0, gravity);

        if !next.is_finite() {
            if !self.pos.is_finite() {
                // Nothing finite to fall back to except the previous frame.
                self.pos = self.prev;
            }
            self.prev = self.pos;
            return;
        }

        self.prev = self.pos;
        self.pos = next;
    }

    /// Teleports the point, discarding its velocity.
    ///
    /// Used for drag interaction. Works on pinned points too.
    pub fn move_to(&mut self, x: Scalar, y: Scalar) {
        self.pos = Vec2::new(x, y);
        self.prev = self.pos;
    }

    pub fn pin(&mut self) {
        self.is_pinned = true;
    }

    pub fn unpin(&mut self) {
        self.is_pinned = false;
    }

    /// Flips the pin state and returns the new value.
    pub fn toggle_pin(&mut self) -> bool {
        self.is_pinned = !self.is_pinned;
        self.is_pinned
    }
}
