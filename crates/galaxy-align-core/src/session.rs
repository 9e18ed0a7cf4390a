//! Session - one population, many evaluations
//!
//! A session validates its configuration, generates the population once and
//! then answers any number of parameter changes. Each evaluation runs the
//! orientation model and the projector from scratch; nothing is cached
//! between calls.
//!
//! The population sits behind an `Arc`, so a host serving concurrent
//! requests can hand clones of it to worker threads and read it without
//! locking.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::{Result, ResultExt};
use crate::orientation::{AlignmentParameters, OrientationModel, OrientationResult, ParameterInput};
use crate::population::GalaxyPopulation;
use crate::projection::{AngleHistogram, Projection, Projector};

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Human-readable summary of the parameters
    pub title: String,

    /// Final angle per galaxy, radians
    pub orientations: OrientationResult,

    /// Drawable geometry
    pub projection: Projection,

    /// Binned folded angles
    pub histogram: AngleHistogram,
}

/// Owns the population and the fixed settings of a run
#[derive(Debug, Clone)]
pub struct Session {
    config: SimulationConfig,
    population: Arc<GalaxyPopulation>,
    model: OrientationModel,
    projector: Projector,
}

impl Session {
    /// Validate `config` and generate the population
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate().context("invalid session configuration")?;
        let population = GalaxyPopulation::generate(config.galaxies, config.field_size, config.seed)
            .context("generating population")?;
        Ok(Self::from_parts(config, population))
    }

    /// Session over an existing population
    ///
    /// `config` still supplies shape, resolution and pattern center; its
    /// population fields are ignored.
    pub fn with_population(config: SimulationConfig, population: GalaxyPopulation) -> Result<Self> {
        config.validate().context("invalid session configuration")?;
        Ok(Self::from_parts(config, population))
    }

    fn from_parts(config: SimulationConfig, population: GalaxyPopulation) -> Self {
        Self {
            model: OrientationModel::with_center(config.shear_center()),
            projector: Projector::from_config(&config),
            population: Arc::new(population),
            config,
        }
    }

    /// Effective configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The population
    pub fn population(&self) -> &GalaxyPopulation {
        &self.population
    }

    /// Shared handle to the population
    pub fn population_handle(&self) -> Arc<GalaxyPopulation> {
        Arc::clone(&self.population)
    }

    /// Orientation model with this session's pattern center
    pub fn model(&self) -> &OrientationModel {
        &self.model
    }

    /// Final angles only
    pub fn compute(&self, params: &AlignmentParameters) -> OrientationResult {
        self.model.compute(&self.population, params)
    }

    /// Full evaluation from front-end parameters
    pub fn evaluate(&self, input: &ParameterInput, show_vectors: bool) -> Result<Frame> {
        let params = input.to_parameters();
        let orientations = self.compute(&params);
        let projection = self
            .projector
            .project(
                &self.population,
                &orientations,
                self.config.ellipticity,
                show_vectors,
            )
            .context("projecting geometry")?;
        let histogram =
            AngleHistogram::from_degrees(&projection.histogram_angles, self.config.histogram_bins)?;

        debug!(title = %input, peak_bin = ?histogram.peak(), "evaluated frame");

        Ok(Frame {
            title: input.to_string(),
            orientations,
            projection,
            histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalaxyAlignError;
    use crate::types::Point;
    use std::thread;

    #[test]
    fn test_default_session() {
        let session = Session::new(SimulationConfig::default()).unwrap();
        assert_eq!(session.population().len(), 200);

        let frame = session.evaluate(&ParameterInput::default(), false).unwrap();
        assert_eq!(frame.orientations.len(), 200);
        assert_eq!(frame.histogram.total(), 200);
        assert_eq!(frame.histogram.bins(), 30);
        assert_eq!(frame.title, "IA: 0.00 @ 45°, Shear: 0.00 @ 90°");
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = Session::new(SimulationConfig::new().with_galaxies(0)).unwrap_err();
        assert!(matches!(err, GalaxyAlignError::WithContext { .. }));
        assert!(err.to_string().contains("galaxies must be positive"));
    }

    #[test]
    fn test_evaluations_do_not_disturb_population() {
        let session = Session::new(SimulationConfig::new().with_galaxies(40)).unwrap();
        let before = session.population().clone();
        let strong = ParameterInput::new()
            .with_intrinsic(1.0, 10.0)
            .with_shear(1.0, 0.0, "radial");
        session.evaluate(&strong, true).unwrap();
        assert_eq!(session.population(), &before);
    }

    #[test]
    fn test_concurrent_evaluations_share_population() {
        let session = Arc::new(Session::new(SimulationConfig::new().with_galaxies(50)).unwrap());
        let input = ParameterInput::new().with_intrinsic(0.5, 30.0);
        let expected = session.evaluate(&input, false).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = Arc::clone(&session);
                let input = input.clone();
                thread::spawn(move || session.evaluate(&input, false).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_population_handle_feeds_worker_threads() {
        let config = SimulationConfig::new()
            .with_galaxies(30)
            .with_shear_center(50.0, 50.0);
        let session = Session::new(config).unwrap();
        let params = ParameterInput::new()
            .with_shear(0.8, 0.0, "radial")
            .to_parameters();
        let expected = session.compute(&params);
        assert_eq!(session.model().center(), Point::new(50.0, 50.0));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let population = session.population_handle();
                let model = *session.model();
                thread::spawn(move || model.compute(&population, &params))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert!(Arc::ptr_eq(
            &session.population_handle(),
            &session.population_handle()
        ));
    }
}
