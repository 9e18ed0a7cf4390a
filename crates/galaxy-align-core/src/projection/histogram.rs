//! Orientation histogram
//!
//! An ellipse looks the same after a half turn, so orientations are folded
//! into [0°, 180°) before binning. Only the histogram path wraps; the
//! ellipse geometry always uses the unwrapped angle.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{GalaxyAlignError, Result};

/// Upper bound of the folded orientation range, degrees
pub const HALF_TURN_DEG: f64 = 180.0;

/// Fold an angle in radians into degrees in [0, 180)
///
/// The half-turn reduction happens in radians, so angles too large to
/// convert to degrees still fold. A non-finite angle has no orientation
/// and maps to 0.
pub fn wrap_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(PI).to_degrees();
    // rem_euclid rounds tiny negatives up to exactly π, i.e. 180
    if wrapped >= HALF_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

/// Fold every final angle into degrees in [0, 180)
pub fn histogram_angles(final_angles: &[f64]) -> Vec<f64> {
    final_angles.iter().copied().map(wrap_degrees).collect()
}

/// Equal-width bin counts over [0, 180)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleHistogram {
    counts: Vec<usize>,
    skipped: usize,
}

impl AngleHistogram {
    /// Bin folded angles (degrees) into `bins` bins
    ///
    /// Values outside [0, 180) are folded again; non-finite values are
    /// counted as skipped.
    pub fn from_degrees(angles: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(GalaxyAlignError::invalid_config(
                "histogram needs at least one bin",
            ));
        }
        let mut histogram = Self {
            counts: vec![0; bins],
            skipped: 0,
        };
        for &angle in angles {
            match histogram.bin_of(angle) {
                Some(bin) => histogram.counts[bin] += 1,
                None => histogram.skipped += 1,
            }
        }
        Ok(histogram)
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Count per bin
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Non-finite inputs that were not binned
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Total binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Width of a bin in degrees
    pub fn bin_width(&self) -> f64 {
        HALF_TURN_DEG / self.bins() as f64
    }

    /// Bin boundaries, `bins + 1` values from 0 to 180
    pub fn bin_edges(&self) -> Vec<f64> {
        let width = self.bin_width();
        (0..=self.bins()).map(|i| i as f64 * width).collect()
    }

    /// Bin index of an angle in degrees
    pub fn bin_of(&self, angle_deg: f64) -> Option<usize> {
        if !angle_deg.is_finite() {
            return None;
        }
        let folded = angle_deg.rem_euclid(HALF_TURN_DEG);
        let index = (folded / self.bin_width()).floor() as usize;
        Some(index.min(self.bins() - 1))
    }

    /// Index of the fullest bin; the lowest one on ties
    pub fn peak(&self) -> Option<usize> {
        let max = *self.counts.iter().max()?;
        if max == 0 {
            return None;
        }
        self.counts.iter().position(|&c| c == max)
    }
}
