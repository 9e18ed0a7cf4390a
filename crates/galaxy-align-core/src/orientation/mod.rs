//! Orientation system - how galaxy orientations are perturbed
//!
//! This module turns a fixed population and a set of parameters into a
//! final orientation angle per galaxy.
//!
//! # Architecture
//!
//! ## 1. ShearPattern (`pattern`)
//!
//! Closed set of spatial shear rules (uniform, radial, tangential) plus an
//! explicit fallback for unrecognized selectors.
//!
//! ## 2. Parameters (`params`)
//!
//! - `ParameterInput`: degrees and a raw pattern string, as a front end
//!   supplies them
//! - `AlignmentParameters`: radians and a resolved pattern, as the model
//!   consumes them
//!
//! ## 3. OrientationModel (`model`)
//!
//! Pure function from (population, parameters) to final angles.
//!
//! # How It Works
//!
//! ```text
//! ParameterInput (deg) --to_parameters()--> AlignmentParameters (rad)
//!                                                   |
//! GalaxyPopulation ----------------------------------+
//!                                                   v
//!                                     OrientationModel::compute()
//!                                                   |
//!                                                   v
//!                                          OrientationResult
//! ```
//!
//! # Safety
//!
//! - No `unsafe` code
//! - No shared mutable state; the population is only ever borrowed

pub mod model;
pub mod params;
pub mod pattern;

pub use model::{compute, periodic_offset, OrientationModel, OrientationResult, OrientationTerms};
pub use params::{AlignmentParameters, ParameterInput};
pub use pattern::ShearPattern;
