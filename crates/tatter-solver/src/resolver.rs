//! Collision seam between the cloth and whatever owns the colliders.
//!
//! The cloth calls the resolver once per tick, after integration and
//! before relaxation, so the stick network spreads each push-out to
//! the neighbours of the pushed point.

use tatter_types::Scalar;

use crate::point::Point;

/// Result of one collision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactResult {
    /// Number of point/collider corrections applied.
    pub resolved_count: u32,
    /// Deepest penetration corrected this pass.
    pub max_penetration: Scalar,
    /// Sum of all correction distances.
    pub total_correction: Scalar,
}

impl ContactResult {
    /// Folds another result into this one.
    pub fn merge(&mut self, other: ContactResult) {
        self.resolved_count += other.resolved_count;
        self.max_penetration = self.max_penetration.max(other.max_penetration);
        self.total_correction += other.total_correction;
    }
}

/// Positional collision resolution over a point arena.
///
/// Implementations must leave pinned points untouched.
pub trait CollisionResolver {
    /// Push every penetrating point back onto collider surfaces.
    fn reconcile(&self, points: &mut [Point]) -> ContactResult;

    /// Returns the resolver's name.
    fn name(&self) -> &str;
}
