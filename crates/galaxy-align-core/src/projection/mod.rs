//! Geometry projector - drawable output from final angles
//!
//! Maps a population and its orientation result to:
//! - one closed ellipse outline per galaxy
//! - optionally, one orientation vector per galaxy
//! - the folded angle list that feeds the histogram
//!
//! Ellipses are rotated by the unwrapped final angle; only the histogram
//! angles are folded into [0°, 180°).

pub mod ellipse;
pub mod histogram;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{
    SimulationConfig, DEFAULT_OUTLINE_POINTS, DEFAULT_SEMI_MAJOR, DEFAULT_VECTOR_LENGTH,
};
use crate::error::{GalaxyAlignError, Result};
use crate::orientation::OrientationResult;
use crate::population::GalaxyPopulation;
use crate::types::{Polyline, Segment};

pub use ellipse::{ellipse_outline, orientation_vector};
pub use histogram::{histogram_angles, wrap_degrees, AngleHistogram};

/// Everything a renderer needs for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Closed outline per galaxy, in population order
    pub ellipses: Vec<Polyline>,

    /// Orientation segment per galaxy, when requested
    pub vectors: Option<Vec<Segment>>,

    /// Final angles folded into degrees in [0, 180)
    pub histogram_angles: Vec<f64>,
}

/// Projection resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    semi_major: f64,
    outline_points: usize,
    vector_length: f64,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            semi_major: DEFAULT_SEMI_MAJOR,
            outline_points: DEFAULT_OUTLINE_POINTS,
            vector_length: DEFAULT_VECTOR_LENGTH,
        }
    }
}

impl Projector {
    /// Projector with the default resolution
    pub fn new() -> Self {
        Self::default()
    }

    /// Projector matching a simulation config
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            semi_major: config.semi_major,
            outline_points: config.outline_points,
            vector_length: config.vector_length,
        }
    }

    /// Set the semi-major axis
    pub fn with_semi_major(mut self, semi_major: f64) -> Self {
        self.semi_major = semi_major;
        self
    }

    /// Set the outline sample count
    pub fn with_outline_points(mut self, points: usize) -> Self {
        self.outline_points = points;
        self
    }

    /// Set the orientation vector length
    pub fn with_vector_length(mut self, length: f64) -> Self {
        self.vector_length = length;
        self
    }

    /// Project every galaxy
    ///
    /// Fails when `ellipticity` is outside (0, 1], when the result does not
    /// have one angle per galaxy, or when the resolution is invalid.
    pub fn project(
        &self,
        population: &GalaxyPopulation,
        result: &OrientationResult,
        ellipticity: f64,
        show_vectors: bool,
    ) -> Result<Projection> {
        if !(ellipticity > 0.0 && ellipticity <= 1.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "ellipticity must be in (0, 1], got {ellipticity}"
            )));
        }
        if result.len() != population.len() {
            return Err(GalaxyAlignError::LengthMismatch {
                expected: population.len(),
                actual: result.len(),
            });
        }

        let ellipses = population
            .positions()
            .zip(result.angles())
            .map(|(position, &angle)| {
                ellipse_outline(
                    position,
                    angle,
                    self.semi_major,
                    ellipticity,
                    self.outline_points,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let vectors = if show_vectors {
            let segments = population
                .positions()
                .zip(result.angles())
                .map(|(position, &angle)| orientation_vector(position, angle, self.vector_length))
                .collect::<Result<Vec<_>>>()?;
            Some(segments)
        } else {
            None
        };

        debug!(
            ellipses = ellipses.len(),
            vectors = show_vectors,
            "projected geometry"
        );

        Ok(Projection {
            ellipses,
            vectors,
            histogram_angles: histogram_angles(result.angles()),
        })
    }
}

/// Project with the default resolution
pub fn project(
    population: &GalaxyPopulation,
    result: &OrientationResult,
    ellipticity: f64,
    show_vectors: bool,
) -> Result<Projection> {
    Projector::new().project(population, result, ellipticity, show_vectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{compute, AlignmentParameters};

    #[test]
    fn test_project_shapes() {
        let population = GalaxyPopulation::generate(20, 100.0, 42).unwrap();
        let result = compute(&population, &AlignmentParameters::identity());

        let without = project(&population, &result, 0.6, false).unwrap();
        assert_eq!(without.ellipses.len(), 20);
        assert!(without.ellipses.iter().all(|e| e.len() == 30));
        assert!(without.vectors.is_none());
        assert_eq!(without.histogram_angles.len(), 20);

        let with = project(&population, &result, 0.6, true).unwrap();
        assert_eq!(with.vectors.as_ref().map(Vec::len), Some(20));
        assert_eq!(with.ellipses, without.ellipses);
    }

    #[test]
    fn test_vectors_centered_on_galaxies() {
        let population = GalaxyPopulation::generate(5, 100.0, 1).unwrap();
        let result = compute(&population, &AlignmentParameters::identity());
        let projection = Projector::new()
            .with_vector_length(4.0)
            .project(&population, &result, 1.0, true)
            .unwrap();
        for (galaxy, segment) in population.iter().zip(projection.vectors.unwrap()) {
            assert!((segment.length() - 4.0).abs() < 1e-9);
            assert!(segment.midpoint().distance(galaxy.position) < 1e-9);
        }
    }

    #[test]
    fn test_custom_resolution() {
        let population = GalaxyPopulation::generate(4, 100.0, 2).unwrap();
        let result = compute(&population, &AlignmentParameters::identity());
        let projection = Projector::new()
            .with_semi_major(2.0)
            .with_outline_points(9)
            .project(&population, &result, 1.0, false)
            .unwrap();
        for (galaxy, outline) in population.iter().zip(&projection.ellipses) {
            assert_eq!(outline.len(), 9);
            assert!(outline
                .iter()
                .all(|p| (p.distance(galaxy.position) - 2.0).abs() < 1e-9));
        }

        let too_coarse = Projector::new().with_outline_points(1);
        assert!(too_coarse.project(&population, &result, 1.0, false).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let population = GalaxyPopulation::generate(3, 100.0, 1).unwrap();
        let result = OrientationResult::new(vec![0.0, 1.0]);
        let err = project(&population, &result, 0.6, false).unwrap_err();
        assert!(matches!(
            err,
            GalaxyAlignError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_ellipticity_domain() {
        let population = GalaxyPopulation::generate(3, 100.0, 1).unwrap();
        let result = compute(&population, &AlignmentParameters::identity());
        assert!(project(&population, &result, 0.0, false).is_err());
        assert!(project(&population, &result, 1.01, false).is_err());
        assert!(project(&population, &result, 1.0, false).is_ok());
    }
}
