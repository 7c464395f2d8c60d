//! Binary cloth snapshots.

use serde::{Deserialize, Serialize};
use tatter_solver::{Cloth, Point, Stick};
use tatter_types::{Scalar, TatterError, TatterResult, Vec2};

/// The complete state of a cloth at one tick.
///
/// Serialized with `bincode`. Velocity lives in `Point::prev`, so a
/// restored cloth continues exactly where it left off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothSnapshot {
    /// Tick index when this snapshot was taken.
    pub tick: u64,
    pub width: usize,
    pub height: usize,
    pub spacing: Scalar,
    pub origin: Vec2,
    pub points: Vec<Point>,
    pub sticks: Vec<Stick>,
}

impl ClothSnapshot {
    pub fn capture(cloth: &Cloth, tick: u64) -> Self {
        Self {
            tick,
            width: cloth.width(),
            height: cloth.height(),
            spacing: cloth.spacing(),
            origin: cloth.origin(),
            points: cloth.points().to_vec(),
            sticks: cloth.sticks().to_vec(),
        }
    }

    /// Rebuilds the cloth. Fails if the captured arrays are inconsistent.
    pub fn restore(&self) -> TatterResult<Cloth> {
        Cloth::from_parts(
            self.width,
            self.height,
            self.spacing,
            self.origin,
            self.points.clone(),
            self.sticks.clone(),
        )
    }

    pub fn pinned_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_pinned).count()
    }

    pub fn active_stick_count(&self) -> usize {
        self.sticks.iter().filter(|s| s.is_active).count()
    }

    /// Largest per-point distance between two snapshots of the same
    /// grid. `None` if the point counts differ.
    pub fn max_displacement(&self, other: &ClothSnapshot) -> Option<Scalar> {
        if self.points.len() != other.points.len() {
            return None;
        }
        Some(
            self.points
                .iter()
                .zip(&other.points)
                .map(|(a, b)| a.pos.distance(b.pos))
                .fold(0.0, Scalar::max),
        )
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> TatterResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| TatterError::Serialization(format!("snapshot encode failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> TatterResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| TatterError::Serialization(format!("snapshot decode failed: {e}")))
    }
}
