//! Integration tests for tatter-contact.

use tatter_contact::{BoxCollider, CircleCollider, Collider, CollisionHub, CollisionResolver};
use tatter_solver::{Cloth, PhysicsConfig, Point};
use tatter_types::ColliderId;

// ─── Circle Tests ─────────────────────────────────────────────

#[test]
fn circle_projects_point_to_rim() {
    let circle = CircleCollider::new(0.0, 0.0, 10.0);
    let mut p = Point::new(3.0, 4.0);
    let depth = circle.resolve(&mut p).unwrap();
    assert!((depth - 5.0).abs() < 1e-12);
    assert!((p.pos.x - 6.0).abs() < 1e-12);
    assert!((p.pos.y - 8.0).abs() < 1e-12);
}

#[test]
fn circle_ignores_outside_and_rim_points() {
    let circle = CircleCollider::new(0.0, 0.0, 10.0);
    let mut outside = Point::new(20.0, 0.0);
    let mut on_rim = Point::new(10.0, 0.0);
    assert!(circle.resolve(&mut outside).is_none());
    assert!(circle.resolve(&mut on_rim).is_none());
    assert_eq!(outside.pos.x, 20.0);
    assert_eq!(on_rim.pos.x, 10.0);
}

#[test]
fn circle_center_point_is_pushed_up() {
    let circle = CircleCollider::new(50.0, 50.0, 10.0);
    let mut p = Point::new(50.0, 50.0);
    assert_eq!(circle.resolve(&mut p), Some(10.0));
    assert_eq!(p.pos.x, 50.0);
    assert_eq!(p.pos.y, 40.0);
    assert!(p.pos.is_finite());
}

#[test]
fn circle_leaves_pinned_points() {
    let circle = CircleCollider::new(0.0, 0.0, 10.0);
    let mut p = Point::pinned(1.0, 1.0);
    assert!(circle.resolve(&mut p).is_none());
    assert_eq!(p.pos.x, 1.0);
}

#[test]
fn circle_contains_is_inclusive() {
    let circle = CircleCollider::new(0.0, 0.0, 10.0);
    assert!(circle.contains(10.0, 0.0));
    assert!(!circle.contains(10.1, 0.0));
}

// ─── Box Tests ────────────────────────────────────────────────

#[test]
fn box_pushes_out_through_nearest_edge() {
    let b = BoxCollider::new(0.0, 0.0, 100.0, 50.0);

    let mut near_left = Point::new(5.0, 25.0);
    assert_eq!(b.resolve(&mut near_left), Some(5.0));
    assert_eq!((near_left.pos.x, near_left.pos.y), (0.0, 25.0));

    let mut near_right = Point::new(97.0, 25.0);
    b.resolve(&mut near_right);
    assert_eq!(near_right.pos.x, 100.0);

    let mut near_top = Point::new(50.0, 2.0);
    b.resolve(&mut near_top);
    assert_eq!((near_top.pos.x, near_top.pos.y), (50.0, 0.0));

    let mut near_bottom = Point::new(50.0, 49.0);
    b.resolve(&mut near_bottom);
    assert_eq!(near_bottom.pos.y, 50.0);
}

#[test]
fn box_ignores_outside_points() {
    let b = BoxCollider::new(0.0, 0.0, 10.0, 10.0);
    let mut p = Point::new(-1.0, 5.0);
    assert!(b.resolve(&mut p).is_none());
    assert_eq!(p.pos.x, -1.0);
}

#[test]
fn box_centered_and_contains() {
    let b = BoxCollider::centered(50.0, 50.0, 20.0, 10.0);
    assert_eq!(b.position.x, 40.0);
    assert_eq!(b.position.y, 45.0);
    assert_eq!(b.center().x, 50.0);
    assert!(b.contains(40.0, 45.0));
    assert!(b.contains(60.0, 55.0));
    assert!(!b.contains(61.0, 50.0));
}

// ─── Collider Enum Tests ──────────────────────────────────────

#[test]
fn collider_dispatch_and_drag_state() {
    let mut c = Collider::circle(0.0, 0.0, 5.0);
    assert_eq!(c.name(), "circle");
    assert!(!c.is_dragging());
    c.set_dragging(true);
    assert!(c.is_dragging());
    c.set_position(100.0, 100.0);
    assert!(c.contains(101.0, 101.0));
    assert!(!c.contains(0.0, 0.0));

    let r = Collider::rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(r.name(), "box");
    assert_eq!(r.friction(), 0.7);
    assert_eq!(r.restitution(), 0.0);
}

#[test]
fn collider_serialization() {
    let c = Collider::circle(1.0, 2.0, 3.0);
    let json = serde_json::to_string(&c).unwrap();
    assert!(json.contains("\"shape\":\"circle\""));
    let recovered: Collider = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, c);
}

// ─── Hub Tests ────────────────────────────────────────────────

#[test]
fn hub_add_remove_keeps_handles_stable() {
    let mut hub = CollisionHub::new();
    let a = hub.add(CircleCollider::new(0.0, 0.0, 5.0));
    let b = hub.add(BoxCollider::new(10.0, 10.0, 5.0, 5.0));
    assert_eq!(hub.len(), 2);

    assert!(hub.remove(a).is_some());
    assert!(hub.remove(a).is_none());
    assert_eq!(hub.get(b).unwrap().name(), "box");

    let c = hub.add(Collider::circle(0.0, 0.0, 1.0));
    assert_ne!(c, a);
    hub.clear();
    assert!(hub.is_empty());
}

#[test]
fn get_intersecting_returns_first_registered() {
    let mut hub = CollisionHub::new();
    let first = hub.add(Collider::rect(0.0, 0.0, 100.0, 100.0));
    let _second = hub.add(Collider::circle(50.0, 50.0, 10.0));
    assert_eq!(hub.get_intersecting(50.0, 50.0), Some(first));
    assert_eq!(hub.get_intersecting(500.0, 500.0), None);
}

#[test]
fn get_mut_allows_repositioning() {
    let mut hub = CollisionHub::new();
    let id = hub.add(Collider::circle(0.0, 0.0, 10.0));
    hub.get_mut(id).unwrap().set_position(200.0, 0.0);
    assert_eq!(hub.get_intersecting(200.0, 0.0), Some(id));
    assert!(hub.get_mut(ColliderId(99)).is_none());
}

#[test]
fn reconcile_visits_colliders_in_order() {
    let mut hub = CollisionHub::new();
    hub.add(Collider::circle(0.0, 0.0, 10.0));
    hub.add(Collider::rect(-20.0, -20.0, 40.0, 32.0));

    // Circle pushes the point to (0, 10); the box then finds it 2px
    // from its bottom edge and pushes it out to y = 12.
    let mut points = vec![Point::new(0.0, 5.0)];
    let result = hub.reconcile(&mut points);
    assert_eq!(result.resolved_count, 2);
    assert!((points[0].pos.y - 12.0).abs() < 1e-12);
}

#[test]
fn empty_hub_reconciles_nothing() {
    let hub = CollisionHub::new();
    let mut points = vec![Point::new(0.0, 0.0)];
    let result = hub.reconcile(&mut points);
    assert_eq!(result.resolved_count, 0);
    assert_eq!(hub.name(), "collision_hub");
}

#[test]
fn cloth_drapes_over_circle() {
    let mut cloth = Cloth::new(10, 10, 10.0, 0.0, 0.0);
    let mut hub = CollisionHub::new();
    hub.add(Collider::circle(50.0, 110.0, 25.0));

    let config = PhysicsConfig::calm();
    for _ in 0..200 {
        cloth.update(0.16, &config, Some(&hub));
    }

    let center = tatter_types::Vec2::new(50.0, 110.0);
    for p in cloth.points() {
        assert!(p.pos.is_finite());
        // Relaxation may nudge points back in slightly after projection.
        assert!(p.pos.distance(center) > 15.0);
    }
}
