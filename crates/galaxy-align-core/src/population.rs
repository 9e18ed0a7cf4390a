//! Galaxy population - the fixed field of galaxies
//!
//! A population is generated once per session from a seed and never
//! changes afterwards. It is shared read-only by the orientation model and
//! the projector.
//!
//! # Sampling
//!
//! Draws come from a `ChaChaRng` seeded with `seed_from_u64`, in this order:
//!
//! 1. N x coordinates, uniform over `[0, field_size)`
//! 2. N y coordinates, uniform over `[0, field_size)`
//! 3. N base angles, uniform over `[0, π)`
//!
//! The same seed always yields a bit-identical population. The draw
//! sequence is not meant to match any other generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::info;

use crate::error::{GalaxyAlignError, Result};
use crate::types::Point;

/// One galaxy: a fixed position and a base orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    /// Position in field coordinates
    pub position: Point,

    /// Random orientation before any perturbation, radians in [0, π)
    pub base_angle: f64,
}

/// Immutable, ordered set of galaxies
///
/// # Examples
///
/// ```
/// use galaxy_align_core::population::GalaxyPopulation;
///
/// let a = GalaxyPopulation::generate(200, 100.0, 42).unwrap();
/// let b = GalaxyPopulation::generate(200, 100.0, 42).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PopulationRecord")]
pub struct GalaxyPopulation {
    field_size: f64,
    seed: Option<u64>,
    galaxies: Vec<Galaxy>,
}

/// Unchecked serialized form, validated on the way in
#[derive(Deserialize)]
struct PopulationRecord {
    field_size: f64,
    #[serde(default)]
    seed: Option<u64>,
    galaxies: Vec<Galaxy>,
}

impl TryFrom<PopulationRecord> for GalaxyPopulation {
    type Error = GalaxyAlignError;

    fn try_from(record: PopulationRecord) -> Result<Self> {
        let mut population = Self::from_galaxies(record.field_size, record.galaxies)?;
        population.seed = record.seed;
        Ok(population)
    }
}

impl GalaxyPopulation {
    /// Generate a population of `count` galaxies over a square field
    ///
    /// Fails with `InvalidConfiguration` when `count` is zero or
    /// `field_size` is not a positive finite number. No partial population
    /// is ever returned.
    pub fn generate(count: usize, field_size: f64, seed: u64) -> Result<Self> {
        if count == 0 {
            return Err(GalaxyAlignError::invalid_config(
                "population size must be positive",
            ));
        }
        if !(field_size.is_finite() && field_size > 0.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "field size must be a positive finite number, got {field_size}"
            )));
        }

        let mut rng = ChaChaRng::seed_from_u64(seed);

        let xs: Vec<f64> = (0..count).map(|_| rng.gen_range(0.0..field_size)).collect();
        let ys: Vec<f64> = (0..count).map(|_| rng.gen_range(0.0..field_size)).collect();
        let angles: Vec<f64> = (0..count).map(|_| rng.gen_range(0.0..PI)).collect();

        let galaxies = xs
            .into_iter()
            .zip(ys)
            .zip(angles)
            .map(|((x, y), base_angle)| Galaxy {
                position: Point::new(x, y),
                base_angle,
            })
            .collect();

        info!(count, field_size, seed, "generated galaxy population");

        Ok(Self {
            field_size,
            seed: Some(seed),
            galaxies,
        })
    }

    /// Build a population from explicit galaxies
    ///
    /// Used for hand-placed scenarios. Base angles are taken as given.
    pub fn from_galaxies(field_size: f64, galaxies: Vec<Galaxy>) -> Result<Self> {
        if galaxies.is_empty() {
            return Err(GalaxyAlignError::invalid_config(
                "population size must be positive",
            ));
        }
        if !(field_size.is_finite() && field_size > 0.0) {
            return Err(GalaxyAlignError::invalid_config(format!(
                "field size must be a positive finite number, got {field_size}"
            )));
        }
        Ok(Self {
            field_size,
            seed: None,
            galaxies,
        })
    }

    /// Number of galaxies
    pub fn len(&self) -> usize {
        self.galaxies.len()
    }

    /// True when there are no galaxies; no constructor or deserialization
    /// path produces such a population
    pub fn is_empty(&self) -> bool {
        self.galaxies.is_empty()
    }

    /// Side of the square field
    pub fn field_size(&self) -> f64 {
        self.field_size
    }

    /// Seed the population was generated from, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// All galaxies, in generation order
    pub fn galaxies(&self) -> &[Galaxy] {
        &self.galaxies
    }

    /// Iterate over galaxies
    pub fn iter(&self) -> std::slice::Iter<'_, Galaxy> {
        self.galaxies.iter()
    }

    /// Positions, in generation order
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.galaxies.iter().map(|g| g.position)
    }

    /// Base angles, in generation order
    pub fn base_angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.galaxies.iter().map(|g| g.base_angle)
    }
}

impl<'a> IntoIterator for &'a GalaxyPopulation {
    type Item = &'a Galaxy;
    type IntoIter = std::slice::Iter<'a, Galaxy>;

    fn into_iter(self) -> Self::IntoIter {
        self.galaxies.iter()
    }
}
