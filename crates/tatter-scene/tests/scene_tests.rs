//! Integration tests for tatter-scene.

use tatter_contact::{Collider, CollisionHub};
use tatter_debug::SnapshotHook;
use tatter_scene::config::{Action, Interaction, RunConfig};
use tatter_scene::metrics::RunMetrics;
use tatter_scene::runner::SceneRunner;
use tatter_scene::scenarios::{ClothLayout, SceneKind, SceneManager};
use tatter_telemetry::{EventBus, EventKind, RecordingSink};
use tatter_types::constants::{MAX_CLOTH_POINTS, MAX_RUN_TICKS};
use tatter_types::TatterError;

fn small_layout() -> ClothLayout {
    ClothLayout {
        width: 8,
        height: 4,
        spacing: 10.0,
        start_x: 0.0,
        start_y: 0.0,
    }
}

fn load(kind: SceneKind) -> (tatter_solver::Cloth, CollisionHub) {
    let mut scenes = SceneManager::new(small_layout());
    let mut cloth = small_layout().build();
    let mut hub = CollisionHub::new();
    scenes.load_scene(kind, &mut cloth, &mut hub);
    assert_eq!(scenes.current(), Some(kind));
    (cloth, hub)
}

/// 320×220 viewport gives a 10×7 cell cloth.
fn short_run(ticks: u64) -> RunConfig {
    let mut config = RunConfig {
        ticks,
        viewport_width: 320.0,
        viewport_height: 220.0,
        ..RunConfig::default()
    };
    config.state.wind_strength = 0.0;
    config
}

// ─── SceneKind Tests ──────────────────────────────────────────

#[test]
fn all_scenes() {
    let names: Vec<&str> = SceneKind::all().iter().map(|k| k.name()).collect();
    assert_eq!(names, vec!["DEFAULT", "CURTAIN", "CORNERS", "SPHERE", "TABLE"]);
}

#[test]
fn scene_parsing_is_case_insensitive() {
    assert_eq!("curtain".parse::<SceneKind>().unwrap(), SceneKind::Curtain);
    assert_eq!("TABLE".parse::<SceneKind>().unwrap(), SceneKind::Table);
    let err = "hammock".parse::<SceneKind>().unwrap_err();
    assert!(matches!(err, TatterError::UnknownScene(ref s) if s == "hammock"));
}

#[test]
fn scene_kind_serializes_upper_case() {
    let json = serde_json::to_string(&SceneKind::Corners).unwrap();
    assert_eq!(json, "\"CORNERS\"");
}

// ─── Layout Tests ─────────────────────────────────────────────

#[test]
fn fit_viewport_matches_rebuild_rule() {
    let layout = ClothLayout::fit_viewport(1000.0, 500.0);
    assert_eq!(layout.width, 33);
    assert_eq!(layout.height, 16);
    assert_eq!(layout.spacing, 12.0);
    assert!((layout.start_x - 302.0).abs() < 1e-12);
    assert_eq!(layout.start_y, 40.0);
}

#[test]
fn fit_tiny_viewport_gives_degenerate_grid() {
    let layout = ClothLayout::fit_viewport(10.0, 10.0);
    assert_eq!(layout.width, 0);
    assert_eq!(layout.height, 0);
    let cloth = layout.build();
    assert_eq!(cloth.points().len(), 1);
    assert!(cloth.sticks().is_empty());
}

#[test]
fn fit_negative_viewport_is_clamped() {
    let layout = ClothLayout::fit_viewport(-100.0, f64::NAN);
    assert_eq!(layout.width, 0);
    assert_eq!(layout.height, 0);
}

// ─── SceneManager Tests ───────────────────────────────────────

#[test]
fn default_scene_pins_top_row() {
    let (cloth, hub) = load(SceneKind::Default);
    assert_eq!(cloth.points().len(), 45);
    assert_eq!(cloth.pinned_count(), 9);
    assert!(hub.is_empty());
}

#[test]
fn curtain_pins_every_fourth() {
    let (cloth, _) = load(SceneKind::Curtain);
    assert_eq!(cloth.pinned_count(), 3);
    for x in [0, 4, 8] {
        let id = cloth.index(x, 0).unwrap();
        assert!(cloth.point(id).unwrap().is_pinned);
    }
    assert!(!cloth.point(cloth.index(1, 0).unwrap()).unwrap().is_pinned);
}

#[test]
fn corners_pins_two_points() {
    let (cloth, hub) = load(SceneKind::Corners);
    assert_eq!(cloth.pinned_count(), 2);
    assert!(cloth.point(cloth.index(0, 0).unwrap()).unwrap().is_pinned);
    assert!(cloth.point(cloth.index(8, 0).unwrap()).unwrap().is_pinned);
    assert!(hub.is_empty());
}

#[test]
fn sphere_adds_ball_below_cloth() {
    let (cloth, hub) = load(SceneKind::Sphere);
    assert_eq!(cloth.pinned_count(), 9);
    assert_eq!(hub.len(), 1);
    let (_, collider) = hub.iter().next().unwrap();
    match collider {
        Collider::Circle(c) => {
            assert!((c.center.x - 40.0).abs() < 1e-12);
            assert!((c.center.y - 56.0).abs() < 1e-12);
            assert!((c.radius - 16.0).abs() < 1e-12);
        }
        other => panic!("expected circle, got {}", other.name()),
    }
}

#[test]
fn table_drops_free_sheet_onto_box() {
    let (cloth, hub) = load(SceneKind::Table);
    assert_eq!(cloth.pinned_count(), 0);
    assert_eq!(hub.len(), 1);
    let (_, collider) = hub.iter().next().unwrap();
    assert_eq!(collider.name(), "box");
    // Box sits below the cloth's rest position.
    assert!(collider.position().y > 40.0);
}

#[test]
fn loading_a_scene_clears_previous_colliders() {
    let mut scenes = SceneManager::new(small_layout());
    let mut cloth = small_layout().build();
    let mut hub = CollisionHub::new();
    scenes.load_scene(SceneKind::Sphere, &mut cloth, &mut hub);
    cloth.tear(40.0, 20.0, 15.0);

    scenes.load_scene(SceneKind::Default, &mut cloth, &mut hub);
    assert!(hub.is_empty());
    assert_eq!(cloth.active_stick_count(), 8 * 5 + 4 * 9);
}

// ─── RunConfig Tests ──────────────────────────────────────────

#[test]
fn parse_toml_config() {
    let text = r#"
scene = "SPHERE"
material = "SILK"
ticks = 50

[state]
wind_strength = 0.0

[[interactions]]
tick = 10
action = { kind = "tear", x = 640.0, y = 200.0 }

[[interactions]]
tick = 20
action = { kind = "drag", x = 1.0, y = 2.0, to_x = 3.0, to_y = 4.0 }
"#;
    let config = RunConfig::from_toml_str(text).unwrap();
    assert_eq!(config.scene, SceneKind::Sphere);
    assert_eq!(config.material.as_deref(), Some("SILK"));
    assert_eq!(config.ticks, 50);
    assert_eq!(config.state.wind_strength, 0.0);
    assert_eq!(config.state.gravity, 1.0);
    assert_eq!(config.viewport_width, 1280.0);
    assert_eq!(config.interactions.len(), 2);
    assert_eq!(
        config.interactions[1].action,
        Action::Drag { x: 1.0, y: 2.0, to_x: 3.0, to_y: 4.0 }
    );
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_is_default() {
    let config = RunConfig::from_toml_str("").unwrap();
    assert_eq!(config, RunConfig::default());
}

#[test]
fn toml_round_trip() {
    let mut config = short_run(30);
    config.material = Some("DENIM".into());
    config.interactions.push(Interaction {
        tick: 5,
        action: Action::Vortex { x: 10.0, y: 20.0 },
    });
    let text = config.to_toml_string().unwrap();
    assert_eq!(RunConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn malformed_toml_is_invalid_config() {
    let err = RunConfig::from_toml_str("ticks = \"many\"").unwrap_err();
    assert!(matches!(err, TatterError::InvalidConfig(_)));
}

#[test]
fn validate_rejects_bad_viewport() {
    let mut config = short_run(1);
    config.viewport_width = 0.0;
    assert!(matches!(config.validate(), Err(TatterError::InvalidConfig(_))));
}

#[test]
fn validate_rejects_unknown_material() {
    let mut config = short_run(1);
    config.material = Some("VELVET".into());
    assert!(matches!(config.validate(), Err(TatterError::UnknownMaterial(_))));
}

#[test]
fn validate_rejects_bad_timestep() {
    let mut config = short_run(1);
    config.state.timestep = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_oversized_viewport() {
    let mut config = short_run(1);
    config.viewport_width = 1e12;
    config.viewport_height = 1e12;
    assert!(config.layout().point_count().map_or(true, |n| n > MAX_CLOTH_POINTS));
    assert!(matches!(config.validate(), Err(TatterError::InvalidConfig(_))));
}

#[test]
fn validate_rejects_absurd_tick_count() {
    let config = RunConfig::from_toml_str(
        "ticks = 9223372036854775807\nviewport_width = 320.0\nviewport_height = 220.0\n",
    )
    .unwrap();
    assert!(matches!(config.validate(), Err(TatterError::InvalidConfig(_))));

    let at_limit = short_run(MAX_RUN_TICKS);
    assert!(at_limit.validate().is_ok());
}

#[test]
fn layout_point_count_matches_built_cloth() {
    let layout = small_layout();
    let cloth = layout.build();
    assert_eq!(layout.point_count(), Some(cloth.points().len()));
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_default_scene() {
    let mut runner = SceneRunner::new();
    let outcome = runner.run(&short_run(10)).unwrap();
    let m = &outcome.metrics;

    assert_eq!(m.scene, "DEFAULT");
    assert_eq!(m.material, "custom");
    assert_eq!(m.ticks, 10);
    assert_eq!(m.point_count, 88);
    assert_eq!(m.pinned_count, 11);
    assert_eq!(m.initial_sticks, 157);
    assert!(m.max_displacement > 0.0);
    assert!(m.final_tension >= 0.0);
    assert!(m.total_wall_time >= 0.0);
    assert_eq!(outcome.cloth.points().len(), 88);
}

#[test]
fn run_applies_material() {
    let mut config = short_run(5);
    config.material = Some("chainmail".into());
    let outcome = SceneRunner::new().run(&config).unwrap();
    assert_eq!(outcome.metrics.material, "CHAINMAIL");
}

#[test]
fn run_unknown_material_fails() {
    let mut config = short_run(5);
    config.material = Some("VELVET".into());
    assert!(SceneRunner::new().run(&config).is_err());
}

#[test]
fn run_rejects_oversized_configs_without_panicking() {
    let mut huge_grid = short_run(1);
    huge_grid.viewport_width = 1e12;
    huge_grid.viewport_height = 1e12;
    assert!(matches!(
        SceneRunner::new().run(&huge_grid),
        Err(TatterError::InvalidConfig(_))
    ));

    let long_run = short_run(u64::MAX / 2);
    assert!(matches!(
        SceneRunner::new().run(&long_run),
        Err(TatterError::InvalidConfig(_))
    ));
}

#[test]
fn scripted_tear_is_counted_and_emitted() {
    let mut config = short_run(3);
    config.state.breaking_limit = 0.0;
    // 10×7 cloth spans x 100..220, y 40..124.
    config.interactions.push(Interaction {
        tick: 0,
        action: Action::Tear { x: 160.0, y: 80.0 },
    });

    let mut bus = EventBus::new();
    let sink = RecordingSink::new();
    let events = sink.events();
    bus.add_sink(Box::new(sink));

    let outcome = SceneRunner::with_bus(bus).run(&config).unwrap();
    let m = &outcome.metrics;
    assert_eq!(m.tears, 1);
    assert!(m.sticks_broken > 0);
    assert_eq!(m.sticks_remaining + m.sticks_broken, m.initial_sticks);

    let events = events.lock().unwrap();
    assert!(matches!(events[0].kind, EventKind::SceneLoaded { .. }));
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, EventKind::Tear { count, .. } if count as usize == m.sticks_broken)));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::TickEnd { .. }))
            .count(),
        3
    );
}

#[test]
fn table_scene_registers_contacts() {
    let mut config = short_run(60);
    config.scene = SceneKind::Table;
    let outcome = SceneRunner::new().run(&config).unwrap();
    assert!(outcome.metrics.contacts_resolved > 0);
    assert_eq!(outcome.metrics.pinned_count, 0);
    assert_eq!(outcome.hub.len(), 1);
}

#[test]
fn paused_run_does_not_move() {
    let mut config = short_run(10);
    config.state.paused = true;
    let outcome = SceneRunner::new().run(&config).unwrap();
    assert_eq!(outcome.metrics.ticks, 0);
    assert_eq!(outcome.metrics.max_displacement, 0.0);
    assert_eq!(outcome.metrics.min_tick_time, 0.0);
}

#[test]
fn toggle_pin_interaction_frees_corner() {
    let mut config = short_run(1);
    config.interactions.push(Interaction {
        tick: 0,
        action: Action::TogglePin { x: 100.0, y: 40.0 },
    });
    let outcome = SceneRunner::new().run(&config).unwrap();
    assert_eq!(outcome.metrics.pinned_count, 10);
}

#[test]
fn drag_interaction_moves_collider() {
    let mut config = short_run(1);
    config.scene = SceneKind::Sphere;
    // Sphere centre: x = 160, y = 124 + 24.
    config.interactions.push(Interaction {
        tick: 0,
        action: Action::Drag { x: 160.0, y: 148.0, to_x: 500.0, to_y: 500.0 },
    });
    let outcome = SceneRunner::new().run(&config).unwrap();
    let (_, collider) = outcome.hub.iter().next().unwrap();
    assert_eq!(collider.position(), tatter_types::Vec2::new(500.0, 500.0));
}

#[test]
fn snapshot_hook_sees_run() {
    let mut runner = SceneRunner::new();
    let hook = SnapshotHook::new(4);
    let snapshots = hook.snapshots();
    runner.add_hook(Box::new(hook));
    runner.run(&short_run(8)).unwrap();
    assert_eq!(snapshots.lock().unwrap().len(), 2);
}

#[test]
fn run_all_covers_every_scene() {
    let metrics = SceneRunner::new().run_all(&short_run(2)).unwrap();
    assert_eq!(metrics.len(), 5);
    assert_eq!(metrics[4].scene, "TABLE");
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn csv_rows_match_header() {
    let metrics = SceneRunner::new().run(&short_run(2)).unwrap().metrics;
    let csv = RunMetrics::to_csv(&[metrics.clone(), metrics]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    let columns = lines[0].split(',').count();
    assert_eq!(columns, 16);
    for row in &lines[1..] {
        assert_eq!(row.split(',').count(), columns);
        assert!(row.starts_with("DEFAULT,custom,2,"));
    }
}

#[test]
fn integrity_of_intact_cloth() {
    let metrics = SceneRunner::new().run(&short_run(1)).unwrap().metrics;
    assert!((metrics.integrity() - 1.0).abs() < 1e-12);
}
