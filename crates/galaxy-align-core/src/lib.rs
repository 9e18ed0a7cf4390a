//! Galaxy Align Core - orientation model for intrinsic alignment and lensing shear
//!
//! Galaxy Align Core computes how the orientations of a fixed population of
//! elliptical galaxies are perturbed by two effects: intrinsic alignment
//! toward a preferred direction, and lensing shear following a spatial
//! pattern. It then derives the geometry a front end needs to draw them.
//!
//! # Architecture
//!
//! Data flows one way, and nothing downstream mutates what it receives:
//!
//! 1. **Population** (`population`): N fixed positions and base angles,
//!    generated once from a seed
//! 2. **Orientation** (`orientation`): pure function from population and
//!    parameters to final angles
//! 3. **Projection** (`projection`): ellipse outlines, orientation vectors
//!    and the folded angle histogram
//!
//! A `Session` (`session`) ties the three together for a configuration.
//!
//! # Quick Start
//!
//! ```
//! use galaxy_align_core::{ParameterInput, Session, SimulationConfig};
//!
//! let session = Session::new(SimulationConfig::default()).unwrap();
//!
//! let input = ParameterInput::new()
//!     .with_intrinsic(0.6, 45.0)
//!     .with_shear(0.3, 90.0, "tangential");
//!
//! let frame = session.evaluate(&input, true).unwrap();
//! assert_eq!(frame.projection.ellipses.len(), 200);
//! assert!(frame.projection.vectors.is_some());
//! assert!(frame
//!     .projection
//!     .histogram_angles
//!     .iter()
//!     .all(|d| (0.0..180.0).contains(d)));
//! ```
//!
//! # Call Surfaces
//!
//! - [`GalaxyPopulation::generate`]
//! - [`orientation::compute`]
//! - [`projection::project`]

#![deny(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod error;
pub mod orientation;
pub mod population;
pub mod projection;
pub mod session;
pub mod types;

// Re-export commonly used types for convenience
pub use config::SimulationConfig;
pub use error::{GalaxyAlignError, Result};
pub use orientation::{
    compute, AlignmentParameters, OrientationModel, OrientationResult, ParameterInput,
    ShearPattern,
};
pub use population::{Galaxy, GalaxyPopulation};
pub use projection::{project, AngleHistogram, Projection, Projector};
pub use session::{Frame, Session};
pub use types::{Point, Polyline, Segment};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
