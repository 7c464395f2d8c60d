//! # tatter-scene
//!
//! Scene setup and the headless driver for the cloth.
//!
//! Provides the 5 canonical scenes, viewport layout fitting, a TOML run
//! configuration with scripted interactions, and a runner that collects
//! metrics with CSV export.

pub mod config;
pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use config::{Action, Interaction, RunConfig};
pub use metrics::RunMetrics;
pub use runner::{RunOutcome, SceneRunner};
pub use scenarios::{ClothLayout, SceneKind, SceneManager};
