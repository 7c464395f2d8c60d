//! Collider registry and per-tick resolution.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tatter_solver::{CollisionResolver, ContactResult, Point};
use tatter_types::{ColliderId, Scalar};

use crate::collider::Collider;

/// Ordered set of colliders.
///
/// Resolution visits colliders in registration order, so where two
/// colliders overlap the later one has the final say.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionHub {
    colliders: Vec<(ColliderId, Collider)>,
    next_id: u32,
}

impl CollisionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collider and returns its handle.
    pub fn add(&mut self, collider: impl Into<Collider>) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        let collider = collider.into();
        debug!(id = id.0, shape = collider.name(), "collider added");
        self.colliders.push((id, collider));
        id
    }

    /// Unregisters a collider. Other handles stay valid.
    pub fn remove(&mut self, id: ColliderId) -> Option<Collider> {
        let index = self.colliders.iter().position(|(cid, _)| *cid == id)?;
        Some(self.colliders.remove(index).1)
    }

    /// Drops every collider.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|(cid, _)| *cid == id).map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders
            .iter_mut()
            .find(|(cid, _)| *cid == id)
            .map(|(_, c)| c)
    }

    /// Colliders in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderId, &Collider)> {
        self.colliders.iter().map(|(id, c)| (*id, c))
    }

    /// First collider (in registration order) containing `(x, y)`.
    pub fn get_intersecting(&self, x: Scalar, y: Scalar) -> Option<ColliderId> {
        self.colliders
            .iter()
            .find(|(_, c)| c.contains(x, y))
            .map(|(id, _)| *id)
    }
}

impl CollisionResolver for CollisionHub {
    fn reconcile(&self, points: &mut [Point]) -> ContactResult {
        let mut result = ContactResult::default();
        if self.colliders.is_empty() {
            return result;
        }

        for point in points.iter_mut() {
            for (_, collider) in &self.colliders {
                if let Some(depth) = collider.resolve(point) {
                    result.resolved_count += 1;
                    result.max_penetration = result.max_penetration.max(depth);
                    result.total_correction += depth;
                }
            }
        }

        result
    }

    fn name(&self) -> &str {
        "collision_hub"
    }
}
