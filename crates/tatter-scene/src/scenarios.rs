//! Scenes: a cloth layout plus the pins and colliders applied to it.
//!
//! Five canonical scenes:
//! 1. **DEFAULT**: top row pinned, nothing to collide with
//! 2. **CURTAIN**: every fourth top-row point pinned, so the top edge scallops
//! 3. **CORNERS**: only the two top corners pinned
//! 4. **SPHERE**: top row pinned, a ball under the hanging sheet
//! 5. **TABLE**: nothing pinned, the sheet falls onto a box

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tatter_contact::{Collider, CollisionHub};
use tatter_solver::Cloth;
use tatter_types::constants::DEFAULT_SPACING;
use tatter_types::{Scalar, TatterError};

/// Fraction of the viewport the cloth spans on each axis.
const VIEWPORT_FILL: Scalar = 0.4;

/// Distance from the viewport top to the cloth's top edge.
const TOP_MARGIN: Scalar = 40.0;

/// Which scene to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SceneKind {
    #[default]
    Default,
    Curtain,
    Corners,
    Sphere,
    Table,
}

impl SceneKind {
    /// Returns all scene kinds.
    pub fn all() -> &'static [SceneKind] {
        &[
            SceneKind::Default,
            SceneKind::Curtain,
            SceneKind::Corners,
            SceneKind::Sphere,
            SceneKind::Table,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SceneKind::Default => "DEFAULT",
            SceneKind::Curtain => "CURTAIN",
            SceneKind::Corners => "CORNERS",
            SceneKind::Sphere => "SPHERE",
            SceneKind::Table => "TABLE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SceneKind::Default => "top row pinned",
            SceneKind::Curtain => "every fourth top point pinned",
            SceneKind::Corners => "top corners pinned",
            SceneKind::Sphere => "top row pinned over a ball",
            SceneKind::Table => "free sheet dropped onto a box",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = TatterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKind::all()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TatterError::UnknownScene(s.to_string()))
    }
}

/// Grid dimensions and placement for a cloth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClothLayout {
    /// Cells along X.
    pub width: usize,
    /// Cells along Y.
    pub height: usize,
    pub spacing: Scalar,
    pub start_x: Scalar,
    pub start_y: Scalar,
}

impl ClothLayout {
    /// Sizes the cloth to 40% of a viewport, centred horizontally and
    /// hung from a fixed top margin.
    pub fn fit_viewport(viewport_width: Scalar, viewport_height: Scalar) -> Self {
        let spacing = DEFAULT_SPACING;
        let width = cells(viewport_width / spacing * VIEWPORT_FILL);
        let height = cells(viewport_height / spacing * VIEWPORT_FILL);
        Self {
            width,
            height,
            spacing,
            start_x: (viewport_width - width as Scalar * spacing) / 2.0,
            start_y: TOP_MARGIN,
        }
    }

    /// Points the built grid will hold, or `None` on overflow.
    pub fn point_count(&self) -> Option<usize> {
        self.width
            .checked_add(1)?
            .checked_mul(self.height.checked_add(1)?)
    }

    /// Horizontal extent of the cloth at rest.
    pub fn span_x(&self) -> Scalar {
        self.width as Scalar * self.spacing
    }

    pub fn span_y(&self) -> Scalar {
        self.height as Scalar * self.spacing
    }

    pub fn center_x(&self) -> Scalar {
        self.start_x + self.span_x() / 2.0
    }

    /// Y of the bottom row at rest.
    pub fn bottom(&self) -> Scalar {
        self.start_y + self.span_y()
    }

    pub fn build(&self) -> Cloth {
        Cloth::new(self.width, self.height, self.spacing, self.start_x, self.start_y)
    }
}

impl Default for ClothLayout {
    fn default() -> Self {
        Self::fit_viewport(1280.0, 720.0)
    }
}

/// Floors a cell count; negative or non-finite sizes give 0.
fn cells(raw: Scalar) -> usize {
    if raw.is_finite() && raw >= 0.0 {
        raw.floor() as usize
    } else {
        warn!(raw, "viewport size out of range, clamping cloth to a single point");
        0
    }
}

/// Sets up scenes on a cloth and its collision hub.
#[derive(Debug, Clone)]
pub struct SceneManager {
    layout: ClothLayout,
    current: Option<SceneKind>,
}

impl SceneManager {
    pub fn new(layout: ClothLayout) -> Self {
        Self {
            layout,
            current: None,
        }
    }

    pub fn layout(&self) -> &ClothLayout {
        &self.layout
    }

    /// Takes effect on the next `load_scene`.
    pub fn set_layout(&mut self, layout: ClothLayout) {
        self.layout = layout;
    }

    pub fn current(&self) -> Option<SceneKind> {
        self.current
    }

    /// Clears `hub`, rebuilds `cloth` from the layout, then applies
    /// the scene's pins and colliders.
    pub fn load_scene(&mut self, kind: SceneKind, cloth: &mut Cloth, hub: &mut CollisionHub) {
        hub.clear();
        *cloth = self.layout.build();

        let layout = self.layout;
        match kind {
            SceneKind::Default => {}
            SceneKind::Curtain => {
                for x in 0..=layout.width {
                    if let Some(id) = cloth.index(x, 0) {
                        if x % 4 != 0 {
                            cloth.unpin(id);
                        }
                    }
                }
            }
            SceneKind::Corners => {
                cloth.unpin_all();
                for x in [0, layout.width] {
                    if let Some(id) = cloth.index(x, 0) {
                        cloth.pin(id);
                    }
                }
            }
            SceneKind::Sphere => {
                let radius = (layout.span_x() * 0.2).max(layout.spacing);
                hub.add(Collider::circle(
                    layout.center_x(),
                    layout.bottom() + radius,
                    radius,
                ));
            }
            SceneKind::Table => {
                cloth.unpin_all();
                let table_width = (layout.span_x() * 0.5).max(layout.spacing);
                hub.add(Collider::rect(
                    layout.center_x() - table_width / 2.0,
                    layout.bottom() + layout.spacing * 4.0,
                    table_width,
                    layout.spacing * 2.0,
                ));
            }
        }

        self.current = Some(kind);
        info!(
            scene = kind.name(),
            points = cloth.points().len(),
            sticks = cloth.sticks().len(),
            pinned = cloth.pinned_count(),
            colliders = hub.len(),
            "scene loaded"
        );
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new(ClothLayout::default())
    }
}
