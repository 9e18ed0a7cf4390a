//! Shear pattern - spatial rule for the lensing shear direction

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::types::Point;

/// Spatial rule selecting the shear direction at each galaxy
///
/// Resolved once from its string form. Unknown names resolve to
/// [`ShearPattern::Fallback`], which applies a zero shear direction
/// everywhere; parsing never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShearPattern {
    /// Same fixed shear angle everywhere
    #[default]
    Uniform,

    /// Perpendicular to the direction from the center
    Radial,

    /// Along the direction from the center
    Tangential,

    /// Unrecognized selector: direction 0 everywhere
    Fallback,
}

impl ShearPattern {
    /// Names accepted by [`ShearPattern::parse`]
    pub const NAMES: [&'static str; 3] = ["uniform", "radial", "tangential"];

    /// Resolve a selector string. Matching is exact.
    pub fn parse(name: &str) -> Self {
        match name {
            "uniform" => ShearPattern::Uniform,
            "radial" => ShearPattern::Radial,
            "tangential" => ShearPattern::Tangential,
            _ => ShearPattern::Fallback,
        }
    }

    /// Canonical name
    pub fn as_str(self) -> &'static str {
        match self {
            ShearPattern::Uniform => "uniform",
            ShearPattern::Radial => "radial",
            ShearPattern::Tangential => "tangential",
            ShearPattern::Fallback => "fallback",
        }
    }

    /// Shear direction in radians at `position`
    ///
    /// `center` is subtracted from the raw position as-is; it is not
    /// rescaled by the field size. `shear_angle` only matters for
    /// [`ShearPattern::Uniform`].
    pub fn direction(self, position: Point, shear_angle: f64, center: Point) -> f64 {
        let dx = position.x - center.x;
        let dy = position.y - center.y;
        match self {
            ShearPattern::Uniform => shear_angle,
            ShearPattern::Radial => dy.atan2(dx) + FRAC_PI_2,
            ShearPattern::Tangential => dy.atan2(dx),
            ShearPattern::Fallback => 0.0,
        }
    }
}

impl From<&str> for ShearPattern {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for ShearPattern {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ShearPattern> for String {
    fn from(pattern: ShearPattern) -> Self {
        pattern.as_str().to_string()
    }
}

impl fmt::Display for ShearPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_4, PI};

    const CENTER: Point = Point::new(0.5, 0.5);

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(ShearPattern::parse("uniform"), ShearPattern::Uniform);
        assert_eq!(ShearPattern::parse("radial"), ShearPattern::Radial);
        assert_eq!(ShearPattern::parse("tangential"), ShearPattern::Tangential);
        assert_eq!(ShearPattern::parse("unknown_value"), ShearPattern::Fallback);
        assert_eq!(ShearPattern::parse("Radial"), ShearPattern::Fallback);
        assert_eq!(ShearPattern::parse(""), ShearPattern::Fallback);
    }

    #[test]
    fn test_uniform_ignores_position() {
        let a = ShearPattern::Uniform.direction(Point::new(1.0, 2.0), 0.3, CENTER);
        let b = ShearPattern::Uniform.direction(Point::new(90.0, 5.0), 0.3, CENTER);
        assert_eq!(a, 0.3);
        assert_eq!(b, 0.3);
    }

    #[test]
    fn test_tangential_and_radial_are_a_quarter_turn_apart() {
        let p = Point::new(10.5, 10.5);
        let tangential = ShearPattern::Tangential.direction(p, 0.0, CENTER);
        let radial = ShearPattern::Radial.direction(p, 0.0, CENTER);
        assert!((tangential - FRAC_PI_4).abs() < 1e-12);
        assert!((radial - (FRAC_PI_4 + PI / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_center_is_raw_offset() {
        // (50, 50) is the field midpoint but not the pattern center
        let d = ShearPattern::Tangential.direction(Point::new(50.0, 50.0), 0.0, CENTER);
        assert!((d - FRAC_PI_4).abs() < 1e-12);

        // atan2(0, 0) is 0, so a galaxy on the center gets a finite direction
        let at_center = ShearPattern::Radial.direction(CENTER, 0.0, CENTER);
        assert!((at_center - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fallback_is_zero() {
        let d = ShearPattern::Fallback.direction(Point::new(3.0, 4.0), 1.2, CENTER);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&ShearPattern::Tangential).unwrap();
        assert_eq!(json, "\"tangential\"");
        let parsed: ShearPattern = serde_json::from_str("\"spiral\"").unwrap();
        assert_eq!(parsed, ShearPattern::Fallback);
    }
}
