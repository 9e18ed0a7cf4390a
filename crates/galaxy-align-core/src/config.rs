//! Simulation configuration
//!
//! Every fixed constant of a session lives here: population size, field
//! size, seed, galaxy shape and the projection resolution. Configurations
//! are plain serde structs and can be loaded from TOML; any key left out of
//! the file keeps its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GalaxyAlignError, Result, ResultExt};
use crate::types::Point;

/// Default number of galaxies
pub const DEFAULT_GALAXIES: usize = 200;

/// Default side of the square field
pub const DEFAULT_FIELD_SIZE: f64 = 100.0;

/// Default generator seed
pub const DEFAULT_SEED: u64 = 42;

/// Default minor/major axis ratio
pub const DEFAULT_ELLIPTICITY: f64 = 0.6;

/// Default semi-major axis (full width 1.0)
pub const DEFAULT_SEMI_MAJOR: f64 = 0.5;

/// Default samples per ellipse outline
pub const DEFAULT_OUTLINE_POINTS: usize = 30;

/// Default length of an orientation vector
pub const DEFAULT_VECTOR_LENGTH: f64 = 2.5;

/// Default number of histogram bins over [0, 180)
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Offset subtracted from raw coordinates by the radial and tangential
/// shear patterns. It is not rescaled by the field size.
pub const DEFAULT_SHEAR_CENTER: [f64; 2] = [0.5, 0.5];

/// Main simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of galaxies in the population
    pub galaxies: usize,

    /// Side of the square field; positions lie in [0, field_size)
    pub field_size: f64,

    /// Seed of the population generator
    pub seed: u64,

    /// Minor/major axis ratio, in (0, 1]
    pub ellipticity: f64,

    /// Semi-major axis of every ellipse
    pub semi_major: f64,

    /// Samples per ellipse outline (closed, both endpoints included)
    pub outline_points: usize,

    /// Length of the orientation vectors
    pub vector_length: f64,

    /// Number of histogram bins over [0, 180)
    pub histogram_bins: usize,

    /// Constant subtracted from raw positions for radial/tangential shear
    pub shear_center: [f64; 2],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            galaxies: DEFAULT_GALAXIES,
            field_size: DEFAULT_FIELD_SIZE,
            seed: DEFAULT_SEED,
            ellipticity: DEFAULT_ELLIPTICITY,
            semi_major: DEFAULT_SEMI_MAJOR,
            outline_points: DEFAULT_OUTLINE_POINTS,
            vector_length: DEFAULT_VECTOR_LENGTH,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            shear_center: DEFAULT_SHEAR_CENTER,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size
    pub fn with_galaxies(mut self, galaxies: usize) -> Self {
        self.galaxies = galaxies;
        self
    }

    /// Set the field size
    pub fn with_field_size(mut self, field_size: f64) -> Self {
        self.field_size = field_size;
        self
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the ellipticity
    pub fn with_ellipticity(mut self, ellipticity: f64) -> Self {
        self.ellipticity = ellipticity;
        self
    }

    /// Set the number of histogram bins
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Set the shear-pattern center offset
    pub fn with_shear_center(mut self, x: f64, y: f64) -> Self {
        self.shear_center = [x, y];
        self
    }

    /// Shear-pattern center as a point
    pub fn shear_center(&self) -> Point {
        Point::new(self.shear_center[0], self.shear_center[1])
    }

    /// Check every construction parameter
    pub fn validate(&self) -> Result<()> {
        if self.galaxies == 0 {
            return Err(GalaxyAlignError::invalid_config(
                "galaxies must be positive",
            ));
        }
        if !(self.field_size.is_finite() && self.field_size > 0.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "field_size must be a positive finite number, got {}",
                self.field_size
            )));
        }
        if !(self.ellipticity > 0.0 && self.ellipticity <= 1.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "ellipticity must be in (0, 1], got {}",
                self.ellipticity
            )));
        }
        if !(self.semi_major.is_finite() && self.semi_major > 0.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "semi_major must be a positive finite number, got {}",
                self.semi_major
            )));
        }
        if self.outline_points < 2 {
            return Err(GalaxyAlignError::invalid_config(format!(
                "outline_points must be at least 2, got {}",
                self.outline_points
            )));
        }
        if !(self.vector_length.is_finite() && self.vector_length >= 0.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "vector_length must be a non-negative finite number, got {}",
                self.vector_length
            )));
        }
        if self.histogram_bins == 0 {
            return Err(GalaxyAlignError::invalid_config(
                "histogram_bins must be positive",
            ));
        }
        if !self.shear_center.iter().all(|c| c.is_finite()) {
            return Err(GalaxyAlignError::invalid_config(
                "shear_center must be finite",
            ));
        }
        Ok(())
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(GalaxyAlignError::from)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_dashboard() {
        let config = SimulationConfig::default();
        assert_eq!(config.galaxies, 200);
        assert_eq!(config.field_size, 100.0);
        assert_eq!(config.seed, 42);
        assert_eq!(config.ellipticity, 0.6);
        assert_eq!(config.outline_points, 30);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.shear_center(), Point::new(0.5, 0.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_construction_values() {
        let bad = [
            SimulationConfig::new().with_galaxies(0),
            SimulationConfig::new().with_field_size(0.0),
            SimulationConfig::new().with_field_size(-5.0),
            SimulationConfig::new().with_field_size(f64::NAN),
            SimulationConfig::new().with_ellipticity(0.0),
            SimulationConfig::new().with_ellipticity(1.5),
            SimulationConfig::new().with_histogram_bins(0),
        ];
        for config in bad {
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, GalaxyAlignError::InvalidConfiguration(_)),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str("galaxies = 12\nseed = 7\n").unwrap();
        assert_eq!(config.galaxies, 12);
        assert_eq!(config.seed, 7);
        assert_eq!(config.field_size, DEFAULT_FIELD_SIZE);
        assert_eq!(config.ellipticity, DEFAULT_ELLIPTICITY);
    }

    #[test]
    fn test_toml_out_of_domain_is_rejected() {
        let err = SimulationConfig::from_toml_str("ellipticity = 2.0").unwrap_err();
        assert!(matches!(err, GalaxyAlignError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SimulationConfig::new().with_seed(9).with_shear_center(50.0, 50.0);
        let text = config.to_toml_string().unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }
}
