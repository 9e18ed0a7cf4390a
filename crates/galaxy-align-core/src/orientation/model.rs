//! Orientation model - final angle of every galaxy
//!
//! For each galaxy with base angle θ₀ at position p:
//!
//! ```text
//! shear_dir  = pattern.direction(p, shear_angle, center)
//! intrinsic  = ia_strength    * sin(2 (preferred_angle - θ₀))
//! shear      = shear_strength * sin(2 (shear_dir       - θ₀))
//! θ_final    = θ₀ + intrinsic + shear
//! ```
//!
//! The doubled angle makes both offsets invariant under θ₀ → θ₀ + π, the
//! symmetry of an ellipse. `θ_final` is not wrapped.
//!
//! The model accepts any real strength; values outside [0, 1] are not
//! rejected, to keep the model total.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::AlignmentParameters;
use crate::config::DEFAULT_SHEAR_CENTER;
use crate::population::{Galaxy, GalaxyPopulation};
use crate::types::Point;

/// Breakdown of one galaxy's final angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationTerms {
    /// Shear direction selected by the pattern, radians
    pub shear_direction: f64,

    /// Intrinsic-alignment offset, radians
    pub intrinsic_offset: f64,

    /// Shear offset, radians
    pub shear_offset: f64,

    /// Base angle plus both offsets, radians
    pub final_angle: f64,
}

/// Final angles, positionally aligned with the population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrientationResult {
    angles: Vec<f64>,
}

impl OrientationResult {
    /// Wrap raw angles
    pub fn new(angles: Vec<f64>) -> Self {
        Self { angles }
    }

    /// Final angles in radians, unwrapped
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Number of angles
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// True when there are no angles
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

impl From<Vec<f64>> for OrientationResult {
    fn from(angles: Vec<f64>) -> Self {
        Self::new(angles)
    }
}

/// Stateless orientation model
///
/// The only setting is the pattern center. Every call recomputes from
/// scratch.
///
/// # Examples
///
/// ```
/// use galaxy_align_core::orientation::{AlignmentParameters, OrientationModel};
/// use galaxy_align_core::population::{Galaxy, GalaxyPopulation};
/// use galaxy_align_core::types::Point;
/// use std::f64::consts::FRAC_PI_4;
///
/// let population = GalaxyPopulation::from_galaxies(
///     100.0,
///     vec![Galaxy { position: Point::new(50.0, 50.0), base_angle: 0.0 }],
/// ).unwrap();
/// let params = AlignmentParameters::identity().with_intrinsic(1.0, FRAC_PI_4);
///
/// let result = OrientationModel::new().compute(&population, &params);
/// assert!((result.angles()[0] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationModel {
    center: Point,
}

impl Default for OrientationModel {
    fn default() -> Self {
        Self {
            center: Point::new(DEFAULT_SHEAR_CENTER[0], DEFAULT_SHEAR_CENTER[1]),
        }
    }
}

impl OrientationModel {
    /// Model with the default pattern center
    pub fn new() -> Self {
        Self::default()
    }

    /// Model with a custom pattern center
    pub fn with_center(center: Point) -> Self {
        Self { center }
    }

    /// Pattern center
    pub fn center(&self) -> Point {
        self.center
    }

    /// Terms for a single galaxy
    pub fn terms(&self, galaxy: &Galaxy, params: &AlignmentParameters) -> OrientationTerms {
        let base = galaxy.base_angle;
        let shear_direction =
            params
                .shear_pattern
                .direction(galaxy.position, params.shear_angle, self.center);
        let intrinsic_offset = periodic_offset(params.ia_strength, params.preferred_angle, base);
        let shear_offset = periodic_offset(params.shear_strength, shear_direction, base);

        OrientationTerms {
            shear_direction,
            intrinsic_offset,
            shear_offset,
            final_angle: base + intrinsic_offset + shear_offset,
        }
    }

    /// Terms for every galaxy, in population order
    pub fn breakdown(
        &self,
        population: &GalaxyPopulation,
        params: &AlignmentParameters,
    ) -> Vec<OrientationTerms> {
        population.iter().map(|g| self.terms(g, params)).collect()
    }

    /// Final angle of every galaxy
    pub fn compute(
        &self,
        population: &GalaxyPopulation,
        params: &AlignmentParameters,
    ) -> OrientationResult {
        let angles: Vec<f64> = population
            .iter()
            .map(|g| self.terms(g, params).final_angle)
            .collect();

        debug!(
            galaxies = angles.len(),
            ia_strength = params.ia_strength,
            shear_strength = params.shear_strength,
            pattern = %params.shear_pattern,
            "computed orientations"
        );

        OrientationResult::new(angles)
    }
}

/// `strength * sin(2 (target - base))`
#[inline]
pub fn periodic_offset(strength: f64, target: f64, base: f64) -> f64 {
    strength * (2.0 * (target - base)).sin()
}

/// Compute final angles with the default pattern center
pub fn compute(population: &GalaxyPopulation, params: &AlignmentParameters) -> OrientationResult {
    OrientationModel::new().compute(population, params)
}
