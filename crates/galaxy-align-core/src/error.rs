//! Error types for Galaxy Align Core
//!
//! This module defines all error types used throughout the orientation engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.
//!
//! The model itself is total: out-of-range strengths and unknown shear
//! patterns are not errors. Only construction parameters (population size,
//! field size, ellipticity) and projection geometry are validated.

use thiserror::Error;

/// Result type alias for Galaxy Align operations
pub type Result<T> = std::result::Result<T, GalaxyAlignError>;

/// Main error type for Galaxy Align operations
#[derive(Error, Debug)]
pub enum GalaxyAlignError {
    /// Construction parameters out of domain (N, field size, ellipticity, bins)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Projection geometry out of domain (outline samples, vector length)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Orientation result not aligned with the population it is projected on
    #[error("Length mismatch: expected {expected} orientations, got {actual}")]
    LengthMismatch {
        /// Number of galaxies in the population
        expected: usize,
        /// Number of angles supplied
        actual: usize,
    },

    /// Configuration file could not be parsed or rendered
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        /// What was being attempted
        context: String,
        /// Underlying failure
        source: Box<GalaxyAlignError>,
    },
}

impl From<toml::de::Error> for GalaxyAlignError {
    fn from(e: toml::de::Error) -> Self {
        GalaxyAlignError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for GalaxyAlignError {
    fn from(e: toml::ser::Error) -> Self {
        GalaxyAlignError::Config(e.to_string())
    }
}

impl GalaxyAlignError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for an [`GalaxyAlignError::InvalidConfiguration`]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Shorthand for an [`GalaxyAlignError::InvalidGeometry`]
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}
