//! Integration tests for tatter-debug.

use tatter_debug::hooks::{SnapshotHook, TelemetryHook, TickHook};
use tatter_debug::snapshot::ClothSnapshot;
use tatter_solver::{Cloth, PhysicsConfig};
use tatter_telemetry::EventKind;
use tatter_types::{PointId, TatterError};

fn settled_cloth(ticks: usize) -> Cloth {
    let mut cloth = Cloth::new(4, 3, 10.0, 0.0, 0.0);
    let config = PhysicsConfig::default();
    for _ in 0..ticks {
        cloth.update(0.16, &config, None);
    }
    cloth
}

// ─── Hook Tests ───────────────────────────────────────────────

#[test]
fn telemetry_hook_collects_events() {
    let cloth = Cloth::new(2, 2, 10.0, 0.0, 0.0);
    let mut hook = TelemetryHook::new();
    hook.on_tick_begin(0, 0.0, 0.2);
    hook.on_tick_end(0, 0.001, &cloth);

    let events = hook.drain_events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].tick, 0);
    assert!(matches!(events[2].kind, EventKind::Tension { active_sticks: 12, .. }));
}

#[test]
fn hook_drain_clears() {
    let mut hook = TelemetryHook::new();
    hook.on_tick_begin(0, 0.0, 0.0);
    let _ = hook.drain_events();
    assert!(hook.drain_events().is_empty());
}

#[test]
fn hook_names() {
    assert_eq!(TelemetryHook::new().name(), "telemetry_hook");
    assert_eq!(SnapshotHook::new(5).name(), "snapshot_hook");
}

#[test]
fn snapshot_hook_respects_interval() {
    let cloth = Cloth::new(1, 1, 10.0, 0.0, 0.0);
    let mut hook = SnapshotHook::new(3);
    let handle = hook.snapshots();
    for tick in 0..10 {
        hook.on_tick_end(tick, 0.0, &cloth);
    }
    hook.on_run_end();
    let ticks: Vec<u64> = handle.lock().unwrap().iter().map(|s| s.tick).collect();
    assert_eq!(ticks, vec![2, 5, 8]);
}

#[test]
fn zero_interval_snapshots_every_tick() {
    let cloth = Cloth::new(1, 1, 10.0, 0.0, 0.0);
    let mut hook = SnapshotHook::new(0);
    for tick in 0..4 {
        hook.on_tick_end(tick, 0.0, &cloth);
    }
    assert_eq!(hook.snapshots().lock().unwrap().len(), 4);
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_round_trip() {
    let cloth = settled_cloth(10);
    let snap = ClothSnapshot::capture(&cloth, 9);

    let bytes = snap.to_bytes().unwrap();
    let recovered = ClothSnapshot::from_bytes(&bytes).unwrap();

    assert_eq!(recovered, snap);
    assert_eq!(recovered.tick, 9);
    assert_eq!(recovered.points.len(), 20);
    assert_eq!(recovered.pinned_count(), 5);
}

#[test]
fn restored_cloth_continues_identically() {
    let mut original = settled_cloth(5);
    let mut restored = ClothSnapshot::capture(&original, 4).restore().unwrap();

    let config = PhysicsConfig::default();
    for _ in 0..5 {
        original.update(0.16, &config, None);
        restored.update(0.16, &config, None);
    }
    for (a, b) in original.points().iter().zip(restored.points()) {
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.prev, b.prev);
    }
}

#[test]
fn restore_rejects_bad_point_count() {
    let cloth = Cloth::new(2, 2, 10.0, 0.0, 0.0);
    let mut snap = ClothSnapshot::capture(&cloth, 0);
    snap.points.pop();
    assert!(matches!(snap.restore(), Err(TatterError::InvariantViolation(_))));
}

#[test]
fn restore_rejects_dangling_stick() {
    let cloth = Cloth::new(2, 2, 10.0, 0.0, 0.0);
    let mut snap = ClothSnapshot::capture(&cloth, 0);
    snap.sticks[0].p2 = PointId(999);
    assert!(snap.restore().is_err());
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = ClothSnapshot::from_bytes(&[1, 2, 3]).unwrap_err();
    assert!(matches!(err, TatterError::Serialization(_)));
}

#[test]
fn displacement_between_snapshots() {
    let mut cloth = Cloth::new(3, 3, 10.0, 0.0, 0.0);
    let start = ClothSnapshot::capture(&cloth, 0);
    cloth.update(0.16, &PhysicsConfig::default(), None);
    let later = ClothSnapshot::capture(&cloth, 1);

    assert_eq!(start.max_displacement(&start), Some(0.0));
    assert!(start.max_displacement(&later).unwrap() > 0.0);

    let mut truncated = start.clone();
    truncated.points.pop();
    assert_eq!(start.max_displacement(&truncated), None);
}
