//! # coordconv
//!
//! Astrometric coordinate conversions between ICRS, FK5, FK4, Galactic, geocentric apparent,
//! topocentric and observed (refracted) coordinates, including space motion, annual and
//! diurnal aberration, annual and diurnal parallax, precession, nutation and refraction.
//!
//! The entry point is [`coord_conv`](crate::coord_conv::coord_conv), which also reports how
//! a direction on the sky rotates and how angular scale changes between the two systems.
//!
//! ## Layout
//!
//! - [`vector_math`], [`spherical`]: angle and vector helpers, spherical trigonometry.
//! - [`time`]: epochs, sidereal time.
//! - [`earth_orientation`], [`earth_position`], [`apparent`]: precession, nutation, Earth
//!   ephemeris, mean-to-apparent parameters.
//! - [`observers`]: site geometry and refraction coefficients.
//! - [`cnv`]: cartesian conversions between neighbouring systems.
//! - [`sph_conv`]: spherical ⟷ cartesian with space motion, az/alt ⟷ HA/Dec.
//! - [`coord_conv`]: the orchestrator.

pub mod apparent;
pub mod cnv;
pub mod constants;
pub mod coord_conv;
pub mod coordconv_errors;
pub mod earth_orientation;
pub mod earth_position;
pub mod observers;
pub mod sph_conv;
pub mod spherical;
pub mod time;
pub mod vector_math;

pub use coord_conv::{conv_star_state, CoordConvParams, CoordConvResult, CoordSys};
pub use coordconv_errors::CoordConvError;
pub use observers::{ObserverData, RefractionCoeffs};
pub use sph_conv::StarState;
pub use spherical::SphericalPos;
