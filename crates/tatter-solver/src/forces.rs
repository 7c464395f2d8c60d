//! Radial and tangential force fields.
//!
//! All fields go through [`Point::apply_force`](crate::point::Point::apply_force),
//! so they take effect on the next integration step and skip pinned
//! points. Falloff is linear: full strength at the origin, zero at
//! `radius`. A point exactly at the origin has no direction and is left
//! alone.

use tatter_types::constants::EPSILON;
use tatter_types::{Scalar, Vec2};

use crate::cloth::Cloth;

impl Cloth {
    /// Pushes points within `radius` away from `(x, y)`.
    pub fn apply_explosion(&mut self, x: Scalar, y: Scalar, radius: Scalar, strength: Scalar) {
        self.apply_field(x, y, radius, |dir, falloff| dir * (falloff * strength));
    }

    /// Pulls points within `radius` toward `(x, y)`.
    pub fn apply_gravitational_well(&mut self, x: Scalar, y: Scalar, radius: Scalar, strength: Scalar) {
        self.apply_field(x, y, radius, |dir, falloff| -dir * (falloff * strength));
    }

    /// Swirls points within `radius` around `(x, y)`.
    pub fn apply_vortex(&mut self, x: Scalar, y: Scalar, radius: Scalar, strength: Scalar) {
        self.apply_field(x, y, radius, |dir, falloff| dir.perp() * (falloff * strength));
    }

    /// `force(dir, falloff)` gets the unit vector from the origin to the
    /// point and `1 - distance / radius`.
    fn apply_field<F>(&mut self, x: Scalar, y: Scalar, radius: Scalar, force: F)
    where
        F: Fn(Vec2, Scalar) -> Vec2,
    {
        if radius <= 0.0 {
            return;
        }
        let origin = Vec2::new(x, y);
        for point in self.points_mut() {
            let offset = point.pos - origin;
            let distance = offset.length();
            if distance >= radius || distance <= EPSILON {
                continue;
            }
            let f = force(offset / distance, 1.0 - distance / radius);
            point.apply_force(f.x, f.y);
        }
    }
}
