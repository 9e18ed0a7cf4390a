//! Alignment parameters
//!
//! Two forms of the same parameter set:
//! - [`ParameterInput`]: what a front end hands over. Angles in degrees,
//!   pattern as a free-form string.
//! - [`AlignmentParameters`]: what the model consumes. Angles in radians,
//!   pattern resolved to a [`ShearPattern`].
//!
//! Conversion happens once, at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::pattern::ShearPattern;

/// Model-side parameters, angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentParameters {
    /// Intrinsic-alignment strength, recommended in [0, 1]
    pub ia_strength: f64,

    /// Preferred alignment angle, radians
    pub preferred_angle: f64,

    /// Lensing shear strength, recommended in [0, 1]
    pub shear_strength: f64,

    /// Shear angle for the uniform pattern, radians
    pub shear_angle: f64,

    /// Spatial shear rule
    pub shear_pattern: ShearPattern,
}

impl AlignmentParameters {
    /// Parameters with no perturbation at all
    pub fn identity() -> Self {
        Self::default()
    }

    /// Set the intrinsic alignment
    pub fn with_intrinsic(mut self, strength: f64, preferred_angle: f64) -> Self {
        self.ia_strength = strength;
        self.preferred_angle = preferred_angle;
        self
    }

    /// Set the shear
    pub fn with_shear(mut self, strength: f64, angle: f64, pattern: ShearPattern) -> Self {
        self.shear_strength = strength;
        self.shear_angle = angle;
        self.shear_pattern = pattern;
        self
    }
}

/// Front-end parameters, angles in degrees
///
/// Defaults match the initial slider positions of the dashboard: no
/// alignment, no shear, preferred angle 45°, shear angle 90°, uniform
/// pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterInput {
    /// Intrinsic-alignment strength, recommended in [0, 1]
    pub ia_strength: f64,

    /// Lensing shear strength, recommended in [0, 1]
    pub shear_strength: f64,

    /// Preferred alignment angle, degrees in [0, 180]
    pub preferred_angle_deg: f64,

    /// Shear angle, degrees in [0, 180]
    pub shear_angle_deg: f64,

    /// Pattern selector: "uniform", "radial" or "tangential"
    pub shear_pattern: String,
}

impl Default for ParameterInput {
    fn default() -> Self {
        Self {
            ia_strength: 0.0,
            shear_strength: 0.0,
            preferred_angle_deg: 45.0,
            shear_angle_deg: 90.0,
            shear_pattern: ShearPattern::Uniform.to_string(),
        }
    }
}

impl ParameterInput {
    /// Create input with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intrinsic alignment
    pub fn with_intrinsic(mut self, strength: f64, preferred_angle_deg: f64) -> Self {
        self.ia_strength = strength;
        self.preferred_angle_deg = preferred_angle_deg;
        self
    }

    /// Set the shear
    pub fn with_shear(
        mut self,
        strength: f64,
        angle_deg: f64,
        pattern: impl Into<String>,
    ) -> Self {
        self.shear_strength = strength;
        self.shear_angle_deg = angle_deg;
        self.shear_pattern = pattern.into();
        self
    }

    /// Names of the values outside their recommended domain
    pub fn out_of_range(&self) -> Vec<&'static str> {
        let unit = 0.0..=1.0;
        let half_turn = 0.0..=180.0;
        let mut fields = Vec::new();
        if !unit.contains(&self.ia_strength) {
            fields.push("ia_strength");
        }
        if !unit.contains(&self.shear_strength) {
            fields.push("shear_strength");
        }
        if !half_turn.contains(&self.preferred_angle_deg) {
            fields.push("preferred_angle_deg");
        }
        if !half_turn.contains(&self.shear_angle_deg) {
            fields.push("shear_angle_deg");
        }
        fields
    }

    /// Convert to model parameters
    ///
    /// Degrees become radians and the pattern is resolved. Out-of-range
    /// values are logged and passed through; they are never rejected.
    pub fn to_parameters(&self) -> AlignmentParameters {
        for field in self.out_of_range() {
            warn!(field, "parameter outside recommended domain");
        }

        let shear_pattern = ShearPattern::parse(&self.shear_pattern);
        if shear_pattern == ShearPattern::Fallback {
            warn!(
                pattern = %self.shear_pattern,
                "unknown shear pattern, using zero shear direction"
            );
        }

        AlignmentParameters {
            ia_strength: self.ia_strength,
            preferred_angle: self.preferred_angle_deg.to_radians(),
            shear_strength: self.shear_strength,
            shear_angle: self.shear_angle_deg.to_radians(),
            shear_pattern,
        }
    }
}

impl From<&ParameterInput> for AlignmentParameters {
    fn from(input: &ParameterInput) -> Self {
        input.to_parameters()
    }
}

impl fmt::Display for ParameterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IA: {:.2} @ {}°, Shear: {:.2} @ {}°",
            self.ia_strength, self.preferred_angle_deg, self.shear_strength, self.shear_angle_deg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_defaults() {
        let input = ParameterInput::default();
        assert_eq!(input.preferred_angle_deg, 45.0);
        assert_eq!(input.shear_angle_deg, 90.0);
        assert_eq!(input.shear_pattern, "uniform");
        assert!(input.out_of_range().is_empty());
    }

    #[test]
    fn test_degrees_converted_once() {
        let params = ParameterInput::new()
            .with_intrinsic(0.5, 45.0)
            .with_shear(0.25, 90.0, "radial")
            .to_parameters();
        assert!((params.preferred_angle - FRAC_PI_4).abs() < 1e-15);
        assert!((params.shear_angle - FRAC_PI_2).abs() < 1e-15);
        assert_eq!(params.ia_strength, 0.5);
        assert_eq!(params.shear_strength, 0.25);
        assert_eq!(params.shear_pattern, ShearPattern::Radial);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let input = ParameterInput::new()
            .with_intrinsic(1.5, 200.0)
            .with_shear(-0.2, 45.0, "uniform");
        assert_eq!(
            input.out_of_range(),
            vec!["ia_strength", "shear_strength", "preferred_angle_deg"]
        );
        let params = input.to_parameters();
        assert_eq!(params.ia_strength, 1.5);
        assert_eq!(params.shear_strength, -0.2);
    }

    #[test]
    fn test_unknown_pattern_resolves_to_fallback() {
        let params = ParameterInput::new()
            .with_shear(1.0, 30.0, "unknown_value")
            .to_parameters();
        assert_eq!(params.shear_pattern, ShearPattern::Fallback);
    }

    #[test]
    fn test_title() {
        let input = ParameterInput::new()
            .with_intrinsic(0.6, 45.0)
            .with_shear(0.3, 90.0, "uniform");
        assert_eq!(input.to_string(), "IA: 0.60 @ 45°, Shear: 0.30 @ 90°");
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: ParameterInput =
            serde_json::from_str(r#"{"ia_strength": 0.4, "shear_pattern": "tangential"}"#).unwrap();
        assert_eq!(input.ia_strength, 0.4);
        assert_eq!(input.preferred_angle_deg, 45.0);
        assert_eq!(input.shear_pattern, "tangential");
    }
}
