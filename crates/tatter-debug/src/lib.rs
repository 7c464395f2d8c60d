//! # tatter-debug
//!
//! Tick hooks and cloth snapshots for debugging a run. Snapshots
//! serialize the full point/stick state to binary so a run can be
//! inspected or resumed later.

pub mod hooks;
pub mod snapshot;

pub use hooks::{SnapshotHook, TelemetryHook, TickHook};
pub use snapshot::ClothSnapshot;
