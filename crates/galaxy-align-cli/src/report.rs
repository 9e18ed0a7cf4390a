//! Plain-text rendering of populations and frames

use colored::Colorize;

use galaxy_align_core::orientation::OrientationTerms;
use galaxy_align_core::projection::wrap_degrees;
use galaxy_align_core::{AngleHistogram, Frame, GalaxyPopulation};

/// Widest histogram bar, in characters
const BAR_WIDTH: usize = 50;

/// Mean axial orientation in degrees, or None when the angles cancel out
///
/// Angles are doubled before averaging so that θ and θ + 180° count as the
/// same orientation.
pub fn mean_orientation_deg(angles_deg: &[f64]) -> Option<f64> {
    let (s, c) = angles_deg.iter().fold((0.0, 0.0), |(s, c), d| {
        let doubled = (2.0 * d).to_radians();
        (s + doubled.sin(), c + doubled.cos())
    });
    if s.hypot(c) < 1e-9 {
        return None;
    }
    Some(wrap_degrees(s.atan2(c) / 2.0))
}

pub fn print_population(population: &GalaxyPopulation) {
    println!(
        "{} {} galaxies, field {}, seed {}",
        "POPULATION".bold(),
        population.len(),
        population.field_size(),
        population
            .seed()
            .map_or_else(|| "-".to_string(), |s| s.to_string())
    );
    for (i, galaxy) in population.iter().enumerate() {
        println!(
            "{i:>5}  {}  {:>7.2}°",
            galaxy.position,
            galaxy.base_angle.to_degrees()
        );
    }
}

pub fn print_summary(frame: &Frame) {
    println!("{}", frame.title.bold());
    println!("  galaxies:  {}", frame.orientations.len());
    println!("  ellipses:  {}", frame.projection.ellipses.len());
    if let Some(vectors) = &frame.projection.vectors {
        println!("  vectors:   {}", vectors.len());
    }
    match mean_orientation_deg(&frame.projection.histogram_angles) {
        Some(mean) => println!("  mean axis: {mean:.1}°"),
        None => println!("  mean axis: undefined"),
    }
    println!();
}

pub fn print_breakdown(terms: &[OrientationTerms]) {
    println!("{}", "Per-galaxy terms (degrees)".bold());
    println!(
        "{:>5}  {:>9}  {:>9}  {:>9}  {:>9}",
        "#", "shear dir", "ia", "shear", "final"
    );
    for (i, t) in terms.iter().enumerate() {
        println!(
            "{i:>5}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
            t.shear_direction.to_degrees(),
            t.intrinsic_offset.to_degrees(),
            t.shear_offset.to_degrees(),
            t.final_angle.to_degrees()
        );
    }
    println!();
}

pub fn print_histogram(histogram: &AngleHistogram) {
    println!("{}", "Orientation Angle Histogram".bold());
    let max = histogram.counts().iter().copied().max().unwrap_or(0).max(1);
    let edges = histogram.bin_edges();
    for (i, &count) in histogram.counts().iter().enumerate() {
        let len = count * BAR_WIDTH / max;
        println!(
            "{:>6.1}-{:<6.1} {:>4} {}",
            edges[i],
            edges[i + 1],
            count,
            "█".repeat(len).purple()
        );
    }
    if histogram.skipped() > 0 {
        println!("{} non-finite angles skipped", histogram.skipped());
    }
}
