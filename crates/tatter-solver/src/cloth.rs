//! Cloth grid and the per-tick pipeline.
//!
//! Points are stored row-major in a flat arena: the point at grid
//! coordinate `(x, y)` lives at `y * (width + 1) + x`. Sticks refer to
//! points by [`PointId`], never by reference.

use tracing::{debug, trace, warn};

use tatter_types::{PointId, Scalar, StickId, TatterError, TatterResult, Vec2};

use crate::config::PhysicsConfig;
use crate::point::Point;
use crate::resolver::CollisionResolver;
use crate::stick::Stick;

/// One drawable stick: both endpoints plus its tension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub tension: Scalar,
}

/// A rectangular mass-spring sheet.
#[derive(Debug, Clone)]
pub struct Cloth {
    points: Vec<Point>,
    sticks: Vec<Stick>,
    /// Grid cells along X (points per row = `width + 1`).
    width: usize,
    /// Grid cells along Y (points per column = `height + 1`).
    height: usize,
    spacing: Scalar,
    origin: Vec2,
}

impl Cloth {
    /// Builds a `width × height` cell grid with its top-left point at
    /// `(start_x, start_y)` and the top row pinned.
    pub fn new(width: usize, height: usize, spacing: Scalar, start_x: Scalar, start_y: Scalar) -> Self {
        let mut cloth = Self {
            points: Vec::new(),
            sticks: Vec::new(),
            width,
            height,
            spacing,
            origin: Vec2::new(start_x, start_y),
        };
        cloth.generate(start_x, start_y, spacing);
        cloth
    }

    /// Reassembles a cloth from previously captured parts.
    ///
    /// Validates the grid size and every stick's endpoint indices.
    pub fn from_parts(
        width: usize,
        height: usize,
        spacing: Scalar,
        origin: Vec2,
        points: Vec<Point>,
        sticks: Vec<Stick>,
    ) -> TatterResult<Self> {
        let expected = (width + 1)
            .checked_mul(height + 1)
            .ok_or_else(|| {
                TatterError::InvariantViolation(format!("{}x{} grid is too large", width, height))
            })?;
        if points.len() != expected {
            return Err(TatterError::InvariantViolation(format!(
                "{}x{} grid needs {} points, got {}",
                width,
                height,
                expected,
                points.len()
            )));
        }
        for (i, stick) in sticks.iter().enumerate() {
            if stick.p1.index() >= expected || stick.p2.index() >= expected {
                return Err(TatterError::InvariantViolation(format!(
                    "stick {} references a point outside the grid ({:?}, {:?})",
                    i, stick.p1, stick.p2
                )));
            }
            if stick.p1 == stick.p2 {
                return Err(TatterError::InvariantViolation(format!(
                    "stick {} connects point {:?} to itself",
                    i, stick.p1
                )));
            }
        }
        Ok(Self {
            points,
            sticks,
            width,
            height,
            spacing,
            origin,
        })
    }

    /// Discards all points and sticks and rebuilds the grid.
    ///
    /// The top row is pinned. Every point gets a stick to its right
    /// neighbour and one to the neighbour below, each of rest length
    /// `spacing`.
    pub fn generate(&mut self, start_x: Scalar, start_y: Scalar, spacing: Scalar) {
        let cols = self.width + 1;
        let rows = self.height + 1;

        self.spacing = spacing;
        self.origin = Vec2::new(start_x, start_y);
        self.points = Vec::with_capacity(cols * rows);
        self.sticks = Vec::with_capacity(self.width * rows + self.height * cols);

        for y in 0..rows {
            for x in 0..cols {
                let px = start_x + x as Scalar * spacing;
                let py = start_y + y as Scalar * spacing;
                if y == 0 {
                    self.points.push(Point::pinned(px, py));
                } else {
                    self.points.push(Point::new(px, py));
                }
            }
        }

        for y in 0..rows {
            for x in 0..cols {
                let here = PointId::from(y * cols + x);
                if x < self.width {
                    self.sticks.push(Stick::new(here, PointId::from(y * cols + x + 1), spacing));
                }
                if y < self.height {
                    self.sticks.push(Stick::new(here, PointId::from((y + 1) * cols + x), spacing));
                }
            }
        }

        debug!(
            points = self.points.len(),
            sticks = self.sticks.len(),
            "cloth generated"
        );
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn spacing(&self) -> Scalar {
        self.spacing
    }

    /// Position the grid was generated at (top-left point).
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Id of the point at grid coordinate `(x, y)`, if it exists.
    pub fn index(&self, x: usize, y: usize) -> Option<PointId> {
        if x > self.width || y > self.height {
            return None;
        }
        Some(PointId::from(y * (self.width + 1) + x))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Direct access for drivers. Must not be held across a tick.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.index())
    }

    /// All sticks still in the collection, including torn ones that have
    /// not been pruned yet.
    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn stick(&self, id: StickId) -> Option<&Stick> {
        self.sticks.get(id.index())
    }

    pub fn active_sticks(&self) -> impl Iterator<Item = &Stick> {
        self.sticks.iter().filter(|s| s.is_active)
    }

    pub fn active_stick_count(&self) -> usize {
        self.active_sticks().count()
    }

    /// Render surface: one segment per active stick.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.active_sticks().map(move |s| {
            let (a, b) = s.endpoints(&self.points);
            Segment {
                a,
                b,
                tension: s.tension,
            }
        })
    }

    // ─── Simulation ───────────────────────────────────────────

    /// Advances the cloth by one tick.
    ///
    /// Order: recovery of non-finite points, wind + integration,
    /// collisions, `stiffness` relaxation passes, pruning. Returns true if any inactive sticks were
    /// removed this tick (broken by overstretch or torn since the last
    /// prune). Pruning only happens while breaking is enabled.
    pub fn update(
        &mut self,
        dt: Scalar,
        properties: &PhysicsConfig,
        collisions: Option<&dyn CollisionResolver>,
    ) -> bool {
        if properties.needs_sanitizing() {
            warn!(?properties, "physics config clamped");
        }
        let props = properties.sanitized();

        self.recover_non_finite();

        for point in &mut self.points {
            point.apply_force(props.wind, 0.0);
            point.update(dt, props.friction, props.gravity);
        }

        if let Some(resolver) = collisions {
            let contacts = resolver.reconcile(&mut self.points);
            if contacts.resolved_count > 0 {
                trace!(
                    resolver = resolver.name(),
                    resolved = contacts.resolved_count,
                    max_penetration = contacts.max_penetration,
                    "collisions resolved"
                );
            }
        }

        let mut broken = 0usize;
        for _ in 0..props.stiffness {
            for stick in &mut self.sticks {
                if stick.update(&mut self.points, props.breaking_limit) {
                    broken += 1;
                }
            }
        }

        if props.breaking_limit <= 0.0 {
            return false;
        }

        let before = self.sticks.len();
        self.sticks.retain(|s| s.is_active);
        let removed = before - self.sticks.len();

        if removed > 0 {
            debug!(broken, removed, remaining = self.sticks.len(), "sticks pruned");
        }
        removed > 0
    }

    /// Grid position of point `index` as generated.
    fn rest_position(&self, index: usize) -> Vec2 {
        let cols = self.width + 1;
        let (x, y) = (index % cols, index / cols);
        Vec2::new(
            self.origin.x + x as Scalar * self.spacing,
            self.origin.y + y as Scalar * self.spacing,
        )
    }

    /// Points with no finite position left go back to their grid slot at rest.
    fn recover_non_finite(&mut self) {
        for i in 0..self.points.len() {
            let point = &self.points[i];
            if point.pos.is_finite() || point.prev.is_finite() {
                continue;
            }
            let rest = self.rest_position(i);
            warn!(index = i, x = rest.x, y = rest.y, "non-finite point reset to rest position");
            self.points[i].move_to(rest.x, rest.y);
        }
    }

    /// Deactivates every active stick whose midpoint is within `radius`
    /// of `(x, y)`. Returns copies of the sticks just torn.
    ///
    /// A negative or NaN radius tears nothing.
    pub fn tear(&mut self, x: Scalar, y: Scalar, radius: Scalar) -> Vec<Stick> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }
        let target = Vec2::new(x, y);
        let radius_sq = radius * radius;
        let points = &self.points;

        let mut torn = Vec::new();
        for stick in self.sticks.iter_mut().filter(|s| s.is_active) {
            if stick.midpoint(points).distance_squared(target) <= radius_sq {
                stick.deactivate();
                torn.push(stick.clone());
            }
        }

        if !torn.is_empty() {
            debug!(count = torn.len(), x, y, radius, "cloth torn");
        }
        torn
    }

    /// Closest point within `radius` of `(x, y)`.
    pub fn nearest_point(&self, x: Scalar, y: Scalar, radius: Scalar) -> Option<PointId> {
        let target = Vec2::new(x, y);
        let mut best: Option<(usize, Scalar)> = None;

        for (i, point) in self.points.iter().enumerate() {
            let d = point.pos.distance(target);
            if d <= radius && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }

        best.map(|(i, _)| PointId::from(i))
    }

    /// Mean tension over active sticks; 0 when none remain.
    pub fn global_tension(&self) -> Scalar {
        let (sum, count) = self
            .active_sticks()
            .fold((0.0, 0usize), |(sum, n), s| (sum + s.tension, n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as Scalar
        }
    }

    // ─── Interaction ──────────────────────────────────────────

    /// Moves a point to `(x, y)` without giving it velocity.
    pub fn drag_point(&mut self, id: PointId, x: Scalar, y: Scalar) -> bool {
        match self.points.get_mut(id.index()) {
            Some(point) => {
                point.move_to(x, y);
                true
            }
            None => false,
        }
    }

    /// Flips a point's pin state. Returns the new state.
    pub fn toggle_pin(&mut self, id: PointId) -> Option<bool> {
        self.points.get_mut(id.index()).map(Point::toggle_pin)
    }

    pub fn pin(&mut self, id: PointId) {
        if let Some(point) = self.points.get_mut(id.index()) {
            point.pin();
        }
    }

    pub fn unpin(&mut self, id: PointId) {
        if let Some(point) = self.points.get_mut(id.index()) {
            point.unpin();
        }
    }

    pub fn unpin_all(&mut self) {
        for point in &mut self.points {
            point.unpin();
        }
    }

    pub fn pinned_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_pinned).count()
    }
}
