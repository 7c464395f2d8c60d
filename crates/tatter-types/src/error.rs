//! Error types for the Tatter engine.
//!
//! The per-tick simulation path never fails. Everything at the edges
//! (configuration, lookups, snapshots, files) returns `TatterResult<T>`.

use thiserror::Error;

/// Unified error type for the Tatter engine.
#[derive(Debug, Error)]
pub enum TatterError {
    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// No material is registered under this name.
    #[error("Unknown material: '{0}'")]
    UnknownMaterial(String),

    /// No scene is known under this name.
    #[error("Unknown scene: '{0}'")]
    UnknownScene(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Restored state is internally inconsistent (e.g., a stick
    /// referencing a point that does not exist).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, TatterError>`.
pub type TatterResult<T> = Result<T, TatterError>;
