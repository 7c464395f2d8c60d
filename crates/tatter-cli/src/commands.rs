//! CLI command implementations.

use tatter_debug::ClothSnapshot;
use tatter_material::{MaterialDatabase, PropertyKey};
use tatter_scene::{RunConfig, RunMetrics, SceneKind, SceneRunner};
use tatter_telemetry::{EventBus, SummarySink, TracingSink};
use tracing::info;

/// Options for `tatter simulate`.
pub struct SimulateArgs<'a> {
    pub config: Option<&'a str>,
    pub scene: Option<&'a str>,
    pub material: Option<&'a str>,
    pub ticks: Option<u64>,
    pub output: Option<&'a str>,
    pub snapshot: Option<&'a str>,
    pub events: bool,
}

/// Run one scene, or all of them, and report metrics.
pub fn simulate(args: SimulateArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tatter Simulation");
    println!("═════════════════");
    println!();

    let mut config = match args.config {
        Some(path) => {
            info!(path, "loading run config");
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };
    if let Some(name) = args.material {
        config.material = Some(name.to_string());
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }

    let scenes: Vec<SceneKind> = match args.scene {
        Some(name) if name.eq_ignore_ascii_case("all") => SceneKind::all().to_vec(),
        Some(name) => vec![name.parse::<SceneKind>()?],
        None => vec![config.scene],
    };
    if args.snapshot.is_some() && scenes.len() > 1 {
        return Err("--snapshot needs a single scene".into());
    }

    let mut bus = EventBus::new();
    let summary_sink = SummarySink::new();
    let summary = summary_sink.summary();
    bus.add_sink(Box::new(summary_sink));
    if args.events {
        bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
    }
    let mut runner = SceneRunner::with_bus(bus);

    let mut all_metrics = Vec::new();
    for kind in scenes {
        let run = RunConfig {
            scene: kind,
            ..config.clone()
        };
        let layout = run.layout();
        println!(
            "Running: {} ({}×{} cells, {} ticks, material {})",
            kind.name(),
            layout.width,
            layout.height,
            run.ticks,
            run.material.as_deref().unwrap_or("custom"),
        );

        let outcome = runner
            .run(&run)
            .map_err(|e| format!("Run failed: {e}"))?;
        let m = &outcome.metrics;

        println!("  Wall time:     {:.3}s", m.total_wall_time);
        println!("  Avg tick:      {:.3}ms", m.avg_tick_time * 1000.0);
        println!("  Sticks:        {} / {} ({} broken)", m.sticks_remaining, m.initial_sticks, m.sticks_broken);
        println!("  Tension:       {:.4}", m.final_tension);
        println!("  Max displace:  {:.2}px", m.max_displacement);
        println!();

        if let Some(path) = args.snapshot {
            let snapshot = ClothSnapshot::capture(&outcome.cloth, m.ticks);
            std::fs::write(path, snapshot.to_bytes()?)?;
            println!("Snapshot written to: {path}");
        }

        all_metrics.push(outcome.metrics);
    }

    if let Ok(summary) = summary.lock() {
        println!(
            "Telemetry: {} ticks, {} sticks removed, {} tears, peak tension {:.4}",
            summary.ticks, summary.sticks_removed, summary.tears, summary.peak_tension
        );
        println!();
    }

    if let Some(path) = args.output {
        let csv = RunMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", RunMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// List the built-in scenes.
pub fn scenes() -> Result<(), Box<dyn std::error::Error>> {
    println!("Scenes");
    println!("──────");
    for kind in SceneKind::all() {
        println!("  {:<8} {}", kind.name(), kind.description());
    }
    Ok(())
}

/// List the material presets with their tunables.
pub fn materials() -> Result<(), Box<dyn std::error::Error>> {
    let db = MaterialDatabase::with_defaults();
    println!("Materials");
    println!("─────────");
    for name in db.names() {
        let Some(props) = db.get(name) else { continue };
        let fields: Vec<String> = PropertyKey::all()
            .iter()
            .map(|key| format!("{}={}", key.name(), props.get(*key)))
            .collect();
        println!("  {:<10} {}", name, fields.join(" "));
    }
    Ok(())
}

/// Inspect a cloth snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tatter Snapshot Inspector");
    println!("─────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot = ClothSnapshot::from_bytes(&data)?;

    println!("Tick:         {}", snapshot.tick);
    println!("Grid:         {}×{} cells, spacing {}", snapshot.width, snapshot.height, snapshot.spacing);
    println!("Points:       {} ({} pinned)", snapshot.points.len(), snapshot.pinned_count());
    println!("Sticks:       {} ({} active)", snapshot.sticks.len(), snapshot.active_stick_count());

    if !snapshot.points.is_empty() {
        let (min_y, max_y) = snapshot
            .points
            .iter()
            .map(|p| p.pos.y)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
        println!("Y range:      [{:.2}, {:.2}]", min_y, max_y);
    }

    let cloth = snapshot.restore()?;
    println!("Tension:      {:.4}", cloth.global_tension());

    Ok(())
}

/// Validate a run config file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tatter Validator");
    println!("────────────────");
    println!();

    let config = RunConfig::load(path)?;
    config.validate()?;

    let layout = config.layout();
    println!("Config:       {path}");
    println!("Scene:        {}", config.scene);
    println!("Material:     {}", config.material.as_deref().unwrap_or("custom"));
    println!("Ticks:        {}", config.ticks);
    println!("Cloth:        {}×{} cells at ({:.1}, {:.1})", layout.width, layout.height, layout.start_x, layout.start_y);
    println!("Interactions: {}", config.interactions.len());
    println!();
    println!("✓ Config is valid.");

    Ok(())
}
