//! Strongly-typed identifiers for simulation entities.
//!
//! Newtype wrappers prevent accidental mixing of point indices
//! with stick indices or collider handles.

use serde::{Deserialize, Serialize};

/// Index into the cloth's point arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub u32);

/// Position of a stick in the cloth's stick list.
///
/// Only stable between ticks that prune broken sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StickId(pub u32);

/// Handle of a collider registered with a collision hub.
///
/// Handles are never reused, so removing one collider does not
/// invalidate the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

impl PointId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl StickId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PointId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<usize> for PointId {
    fn from(val: usize) -> Self {
        Self(val as u32)
    }
}

impl From<u32> for StickId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for ColliderId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
