//! Material parameters and keyed property access.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tatter_types::{Scalar, TatterError, TatterResult};

/// Physical and display parameters of a cloth material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Preset key, upper case (e.g., "LINEN").
    pub name: String,

    /// Relaxation passes per tick. Higher = stiffer weave.
    pub stiffness: u32,

    /// Velocity retained per step (0.0–1.0). Lower = heavier damping.
    pub friction: Scalar,

    /// Stretch ratio at which threads snap. `0.0` = unbreakable.
    pub breaking_limit: Scalar,

    /// Multiplier on the base gravity. Heavy fabrics hang faster.
    pub gravity_scale: Scalar,

    /// Base mesh colour (CSS hex).
    pub color: String,

    /// Colour used for tear effects (CSS hex).
    pub highlight_color: String,
}

impl MaterialProperties {
    /// Checks that every parameter is in range.
    pub fn validate(&self) -> TatterResult<()> {
        if self.name.trim().is_empty() {
            return Err(TatterError::InvalidMaterial("name must not be empty".into()));
        }
        if self.stiffness == 0 {
            return Err(TatterError::InvalidMaterial(format!(
                "{}: stiffness must be at least 1",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(TatterError::InvalidMaterial(format!(
                "{}: friction must be within [0, 1], got {}",
                self.name, self.friction
            )));
        }
        if !self.breaking_limit.is_finite() || self.breaking_limit < 0.0 {
            return Err(TatterError::InvalidMaterial(format!(
                "{}: breaking_limit must be >= 0, got {}",
                self.name, self.breaking_limit
            )));
        }
        if !self.gravity_scale.is_finite() {
            return Err(TatterError::InvalidMaterial(format!(
                "{}: gravity_scale must be finite",
                self.name
            )));
        }
        Ok(())
    }

    /// Returns true if the material never tears from stress.
    pub fn is_unbreakable(&self) -> bool {
        self.breaking_limit <= 0.0
    }

    /// Looks up one property by key.
    pub fn get(&self, key: PropertyKey) -> PropertyValue<'_> {
        match key {
            PropertyKey::Stiffness => PropertyValue::Count(self.stiffness),
            PropertyKey::Friction => PropertyValue::Number(self.friction),
            PropertyKey::BreakingLimit => PropertyValue::Number(self.breaking_limit),
            PropertyKey::GravityScale => PropertyValue::Number(self.gravity_scale),
            PropertyKey::Color => PropertyValue::Color(&self.color),
            PropertyKey::HighlightColor => PropertyValue::Color(&self.highlight_color),
        }
    }
}

/// Names of the properties a driver can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKey {
    Stiffness,
    Friction,
    BreakingLimit,
    GravityScale,
    Color,
    HighlightColor,
}

impl PropertyKey {
    pub fn all() -> &'static [PropertyKey] {
        &[
            PropertyKey::Stiffness,
            PropertyKey::Friction,
            PropertyKey::BreakingLimit,
            PropertyKey::GravityScale,
            PropertyKey::Color,
            PropertyKey::HighlightColor,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PropertyKey::Stiffness => "stiffness",
            PropertyKey::Friction => "friction",
            PropertyKey::BreakingLimit => "breaking_limit",
            PropertyKey::GravityScale => "gravity_scale",
            PropertyKey::Color => "color",
            PropertyKey::HighlightColor => "highlight_color",
        }
    }
}

impl FromStr for PropertyKey {
    type Err = TatterError;

    /// Accepts `snake_case` and `camelCase` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stiffness" => Ok(PropertyKey::Stiffness),
            "friction" => Ok(PropertyKey::Friction),
            "breaking_limit" | "breakingLimit" => Ok(PropertyKey::BreakingLimit),
            "gravity_scale" | "gravityScale" => Ok(PropertyKey::GravityScale),
            "color" => Ok(PropertyKey::Color),
            "highlight_color" | "highlightColor" => Ok(PropertyKey::HighlightColor),
            other => Err(TatterError::InvalidMaterial(format!(
                "unknown property key '{other}'"
            ))),
        }
    }
}

/// A borrowed property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Count(u32),
    Number(Scalar),
    Color(&'a str),
}

impl PropertyValue<'_> {
    /// Numeric view; colours have none.
    pub fn as_number(&self) -> Option<Scalar> {
        match *self {
            PropertyValue::Count(n) => Some(n as Scalar),
            PropertyValue::Number(x) => Some(x),
            PropertyValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<&str> {
        match *self {
            PropertyValue::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Count(n) => write!(f, "{n}"),
            PropertyValue::Number(x) => write!(f, "{x:.3}"),
            PropertyValue::Color(c) => f.write_str(c),
        }
    }
}
