//! Material database with the built-in cloth presets.

use std::collections::HashMap;

use tatter_types::TatterResult;

use crate::properties::MaterialProperties;

/// A named collection of material presets.
///
/// Names are stored upper case; lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: HashMap<String, MaterialProperties>,
}

impl MaterialDatabase {
    /// Creates a new database with the 5 built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();
        for props in [linen(), silk(), denim(), rubber(), chainmail()] {
            db.materials.insert(props.name.clone(), props);
        }
        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Registers a material after validating it. Overwrites if the
    /// name already exists.
    pub fn register(&mut self, mut props: MaterialProperties) -> TatterResult<()> {
        props.validate()?;
        props.name = props.name.to_uppercase();
        self.materials.insert(props.name.clone(), props);
        Ok(())
    }

    /// Looks up a material by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&MaterialProperties> {
        self.materials.get(&name.to_uppercase())
    }

    /// Returns all registered material names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Linen: the reference material. Matches the driver defaults.
pub(crate) fn linen() -> MaterialProperties {
    MaterialProperties {
        name: "LINEN".into(),
        stiffness: 5,
        friction: 0.98,
        breaking_limit: 2.5,
        gravity_scale: 1.0,
        color: "#e2e8f0".into(),
        highlight_color: "#c084fc".into(),
    }
}

/// Silk: light and loose, tears early.
fn silk() -> MaterialProperties {
    MaterialProperties {
        name: "SILK".into(),
        stiffness: 3,
        friction: 0.99,
        breaking_limit: 2.0,
        gravity_scale: 0.6,
        color: "#f9a8d4".into(),
        highlight_color: "#f472b6".into(),
    }
}

/// Denim: heavy, stiff, hard to tear.
fn denim() -> MaterialProperties {
    MaterialProperties {
        name: "DENIM".into(),
        stiffness: 10,
        friction: 0.97,
        breaking_limit: 4.0,
        gravity_scale: 1.4,
        color: "#60a5fa".into(),
        highlight_color: "#2563eb".into(),
    }
}

/// Rubber: few passes so it stretches a lot before snapping.
fn rubber() -> MaterialProperties {
    MaterialProperties {
        name: "RUBBER".into(),
        stiffness: 2,
        friction: 0.985,
        breaking_limit: 6.0,
        gravity_scale: 1.0,
        color: "#fbbf24".into(),
        highlight_color: "#d97706".into(),
    }
}

/// Chainmail: very rigid and heavy, never breaks from stress.
fn chainmail() -> MaterialProperties {
    MaterialProperties {
        name: "CHAINMAIL".into(),
        stiffness: 15,
        friction: 0.96,
        breaking_limit: 0.0,
        gravity_scale: 2.0,
        color: "#9ca3af".into(),
        highlight_color: "#4b5563".into(),
    }
}
