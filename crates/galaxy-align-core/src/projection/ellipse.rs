//! Ellipse outlines and orientation vectors

use std::f64::consts::TAU;

use crate::error::{GalaxyAlignError, Result};
use crate::types::{Point, Polyline, Segment};

/// Closed outline of a rotated, translated ellipse
///
/// Samples `n_points` values of `t` evenly over `[0, 2π]`, both ends
/// included, on `(a cos t, a e sin t)`, rotates by `angle` and translates to
/// `position`. The last point is the first point, so the outline is closed
/// exactly.
pub fn ellipse_outline(
    position: Point,
    angle: f64,
    semi_major: f64,
    ellipticity: f64,
    n_points: usize,
) -> Result<Polyline> {
    if n_points < 2 {
        return Err(GalaxyAlignError::invalid_geometry(format!(
            "an outline needs at least 2 points, got {n_points}"
        )));
    }
    if !(semi_major.is_finite() && semi_major >= 0.0) {
        return Err(GalaxyAlignError::invalid_geometry(format!(
            "semi-major axis must be a non-negative finite number, got {semi_major}"
        )));
    }

    let semi_minor = semi_major * ellipticity;
    let (sin_a, cos_a) = angle.sin_cos();
    let last = (n_points - 1) as f64;

    let mut outline: Polyline = (0..n_points)
        .map(|i| {
            let t = TAU * i as f64 / last;
            let ex = semi_major * t.cos();
            let ey = semi_minor * t.sin();
            position.offset(cos_a * ex - sin_a * ey, sin_a * ex + cos_a * ey)
        })
        .collect();

    // sin(2π) is not exactly zero
    outline[n_points - 1] = outline[0];
    Ok(outline)
}

/// Segment of `length` centered on `position` along `angle`
pub fn orientation_vector(position: Point, angle: f64, length: f64) -> Result<Segment> {
    if !(length.is_finite() && length >= 0.0) {
        return Err(GalaxyAlignError::invalid_geometry(format!(
            "vector length must be a non-negative finite number, got {length}"
        )));
    }
    let half = 0.5 * length;
    let (sin_a, cos_a) = angle.sin_cos();
    Ok(Segment::new(
        position.offset(-half * cos_a, -half * sin_a),
        position.offset(half * cos_a, half * sin_a),
    ))
}
