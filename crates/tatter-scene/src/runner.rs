//! Headless runner. Drives a scene tick by tick and collects metrics.

use std::cell::Cell;
use std::time::Instant;

use tracing::{debug, info, warn};

use tatter_contact::CollisionHub;
use tatter_debug::{TelemetryHook, TickHook};
use tatter_material::MaterialManager;
use tatter_solver::{Cloth, CollisionResolver, ContactResult, Point};
use tatter_telemetry::{ClothEvent, EventBus, EventKind};
use tatter_types::constants::{
    EXPLOSION_RADIUS, EXPLOSION_STRENGTH, GRAB_RADIUS, PIN_RADIUS, TEAR_RADIUS, VORTEX_RADIUS,
    VORTEX_STRENGTH, WELL_RADIUS, WELL_STRENGTH,
};
use tatter_types::{TatterResult, Vec2};

use crate::config::{Action, Interaction, RunConfig};
use crate::metrics::RunMetrics;
use crate::scenarios::SceneManager;

/// Final state of a run.
pub struct RunOutcome {
    pub metrics: RunMetrics,
    pub cloth: Cloth,
    pub hub: CollisionHub,
}

/// Runs scenes headlessly, emitting telemetry on its bus.
pub struct SceneRunner {
    bus: EventBus,
    hooks: Vec<Box<dyn TickHook>>,
}

impl SceneRunner {
    pub fn new() -> Self {
        Self::with_bus(EventBus::new())
    }

    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            bus,
            hooks: Vec::new(),
        }
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Hooks see every tick after the built-in telemetry.
    pub fn add_hook(&mut self, hook: Box<dyn TickHook>) {
        self.hooks.push(hook);
    }

    /// Run one configured scene to completion.
    pub fn run(&mut self, config: &RunConfig) -> TatterResult<RunOutcome> {
        config.validate()?;

        let mut state = config.state.clone();
        let material_name = match &config.material {
            Some(name) => {
                let manager = MaterialManager::new(name)?;
                manager.apply_to(&mut state);
                manager.current_name().to_string()
            }
            None => "custom".to_string(),
        };

        let mut scenes = SceneManager::new(config.layout());
        let mut cloth = scenes.layout().build();
        let mut hub = CollisionHub::new();
        scenes.load_scene(config.scene, &mut cloth, &mut hub);
        self.bus.emit(ClothEvent::new(
            0,
            EventKind::SceneLoaded {
                name: config.scene.name().to_string(),
                points: cloth.points().len() as u32,
                sticks: cloth.sticks().len() as u32,
            },
        ));

        let initial: Vec<Vec2> = cloth.points().iter().map(|p| p.pos).collect();
        let initial_sticks = cloth.sticks().len();

        let mut schedule: Vec<&Interaction> = config.interactions.iter().collect();
        schedule.sort_by_key(|i| i.tick);
        let mut pending = schedule.into_iter().peekable();

        let mut telemetry = TelemetryHook::new();
        let mut tick_times: Vec<f64> = Vec::new();
        let mut tears = 0u32;
        let mut contacts_resolved = 0u64;
        let mut clock_ms = 0.0;

        if state.paused {
            warn!("state is paused; ticks will not advance the cloth");
        }

        let total_start = Instant::now();

        for tick in 0..config.ticks {
            while let Some(interaction) = pending.next_if(|i| i.tick <= tick) {
                let torn = apply_action(&interaction.action, &mut cloth, &mut hub);
                if let Action::Tear { x, y } = interaction.action {
                    if torn > 0 {
                        tears += 1;
                        self.bus.emit(ClothEvent::new(
                            tick,
                            EventKind::Tear {
                                x,
                                y,
                                count: torn as u32,
                            },
                        ));
                    }
                }
            }

            if state.paused {
                clock_ms += config.tick_interval_ms;
                continue;
            }

            let physics = state.physics_at(clock_ms);
            telemetry.on_tick_begin(tick, clock_ms, physics.wind);
            for hook in &mut self.hooks {
                hook.on_tick_begin(tick, clock_ms, physics.wind);
            }

            let before = cloth.sticks().len();
            let resolver = CountingResolver::new(&hub);
            let start = Instant::now();
            cloth.update(state.timestep, &physics, Some(&resolver));
            let wall_time = start.elapsed().as_secs_f64();
            tick_times.push(wall_time);

            let contacts = resolver.total();
            contacts_resolved += u64::from(contacts.resolved_count);
            if contacts.resolved_count > 0 {
                self.bus.emit(ClothEvent::new(
                    tick,
                    EventKind::Contacts {
                        resolved: contacts.resolved_count,
                        max_penetration: contacts.max_penetration,
                    },
                ));
            }
            let removed = before - cloth.sticks().len();
            if removed > 0 {
                self.bus.emit(ClothEvent::new(
                    tick,
                    EventKind::SticksRemoved {
                        count: removed as u32,
                    },
                ));
            }

            telemetry.on_tick_end(tick, wall_time, &cloth);
            for event in telemetry.drain_events() {
                self.bus.emit(event);
            }
            for hook in &mut self.hooks {
                hook.on_tick_end(tick, wall_time, &cloth);
            }
            self.bus.flush();

            clock_ms += config.tick_interval_ms;
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        for hook in &mut self.hooks {
            hook.on_run_end();
        }
        self.bus.finalize();

        let max_displacement = cloth
            .points()
            .iter()
            .zip(&initial)
            .map(|(p, start)| p.pos.distance(*start))
            .filter(|d| d.is_finite())
            .fold(0.0, f64::max);

        let avg_tick = if tick_times.is_empty() {
            0.0
        } else {
            tick_times.iter().sum::<f64>() / tick_times.len() as f64
        };
        let min_tick = tick_times.iter().copied().fold(f64::INFINITY, f64::min);
        let max_tick = tick_times.iter().copied().fold(0.0, f64::max);

        let sticks_remaining = cloth.active_stick_count();
        let metrics = RunMetrics {
            scene: config.scene.name().to_string(),
            material: material_name,
            ticks: tick_times.len() as u64,
            total_wall_time,
            avg_tick_time: avg_tick,
            min_tick_time: if min_tick.is_finite() { min_tick } else { 0.0 },
            max_tick_time: max_tick,
            point_count: cloth.points().len(),
            pinned_count: cloth.pinned_count(),
            initial_sticks,
            sticks_remaining,
            sticks_broken: initial_sticks - sticks_remaining,
            tears,
            contacts_resolved,
            final_tension: cloth.global_tension(),
            max_displacement,
        };

        info!(
            scene = %metrics.scene,
            material = %metrics.material,
            ticks = metrics.ticks,
            broken = metrics.sticks_broken,
            tension = metrics.final_tension,
            "run complete"
        );

        Ok(RunOutcome { metrics, cloth, hub })
    }

    /// Run every scene with the same settings.
    pub fn run_all(&mut self, base: &RunConfig) -> TatterResult<Vec<RunMetrics>> {
        use crate::scenarios::SceneKind;
        let mut results = Vec::new();
        for &kind in SceneKind::all() {
            let config = RunConfig {
                scene: kind,
                ..base.clone()
            };
            results.push(self.run(&config)?.metrics);
        }
        Ok(results)
    }
}

impl Default for SceneRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies one gesture. Returns the number of sticks torn.
fn apply_action(action: &Action, cloth: &mut Cloth, hub: &mut CollisionHub) -> usize {
    match *action {
        Action::Tear { x, y } => cloth.tear(x, y, TEAR_RADIUS).len(),
        Action::Explosion { x, y } => {
            cloth.apply_explosion(x, y, EXPLOSION_RADIUS, EXPLOSION_STRENGTH);
            0
        }
        Action::Well { x, y } => {
            cloth.apply_gravitational_well(x, y, WELL_RADIUS, WELL_STRENGTH);
            0
        }
        Action::Vortex { x, y } => {
            cloth.apply_vortex(x, y, VORTEX_RADIUS, VORTEX_STRENGTH);
            0
        }
        Action::Drag { x, y, to_x, to_y } => {
            if let Some(collider) = hub
                .get_intersecting(x, y)
                .and_then(|id| hub.get_mut(id))
            {
                collider.set_position(to_x, to_y);
            } else if let Some(id) = cloth.nearest_point(x, y, GRAB_RADIUS) {
                cloth.drag_point(id, to_x, to_y);
            } else {
                debug!(x, y, "drag hit nothing");
            }
            0
        }
        Action::TogglePin { x, y } => {
            if let Some(id) = cloth.nearest_point(x, y, PIN_RADIUS) {
                cloth.toggle_pin(id);
            }
            0
        }
    }
}

/// Wraps a resolver and accumulates what it reports.
struct CountingResolver<'a> {
    inner: &'a dyn CollisionResolver,
    total: Cell<ContactResult>,
}

impl<'a> CountingResolver<'a> {
    fn new(inner: &'a dyn CollisionResolver) -> Self {
        Self {
            inner,
            total: Cell::new(ContactResult::default()),
        }
    }

    fn total(&self) -> ContactResult {
        self.total.get()
    }
}

impl CollisionResolver for CountingResolver<'_> {
    fn reconcile(&self, points: &mut [Point]) -> ContactResult {
        let result = self.inner.reconcile(points);
        let mut total = self.total.get();
        total.merge(result);
        self.total.set(total);
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
