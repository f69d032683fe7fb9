//! # Constants and type definitions for coordconv
//!
//! This module centralizes the **physical constants**, **conversion factors**, **numerical
//! thresholds** and **unit type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians ↔ arcseconds)
//! - Time constants (MJD of reference epochs, year lengths)
//! - Astronomical constants (AU, light time, Earth rotation rate)
//! - Numerical thresholds shared by the spherical decomposition and the iterative solvers
//! - Defaults used by the coordinate conversion orchestrator

// -------------------------------------------------------------------------------------------------
// Angle conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Arcseconds per degree
pub const ARCSEC_PER_DEG: f64 = 3600.0;

// -------------------------------------------------------------------------------------------------
// Time
// -------------------------------------------------------------------------------------------------

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// MJD of the Besselian epoch B1900.0
pub const B1900_MJD: f64 = 15019.81352;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Length of the Julian year in days
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Length of the tropical (Besselian) year in days
pub const DAYS_PER_BESSELIAN_YEAR: f64 = 365.242198781;

// -------------------------------------------------------------------------------------------------
// Physical constants
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in kilometers (IAU 1976, consistent with the site model)
pub const AU: f64 = 149_597_870.0;

/// Astronomical Unit in meters
pub const AU_METERS: f64 = AU * 1000.0;

/// Equatorial radius of the Earth, in meters (IAU 1976)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_140.0;

/// Flattening of the Earth ellipsoid (IAU 1976)
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257;

/// Light time for one AU, in seconds
pub const AU_SEC: f64 = 499.004782;

/// Earth rotation rate relative to the fixed stars, in radians per second
pub const EARTH_ROT_RATE: f64 = 7.2921158e-5;

/// Radial velocity conversion: km/s → AU per Julian year
pub const AU_PER_YEAR_PER_KM_PER_SEC: f64 = SECONDS_PER_DAY * DAYS_PER_JULIAN_YEAR / AU;

// -------------------------------------------------------------------------------------------------
// Numerical thresholds
// -------------------------------------------------------------------------------------------------

/// Relative accuracy of a double, padded for accumulated round-off.
///
/// Used as the "too small to trust" threshold by the spherical decomposition,
/// the spherical triangle solver and the iterative inversions.
pub const F_ACCURACY: f64 = 10.0 * f64::EPSILON;

/// Maximum number of iterations of the apparent-place inversion
pub const MAX_ITER: usize = 20;

/// Number of fixed-point iterations used to fold the e-terms into an FK4 position
pub const E_TERM_ITERATIONS: usize = 3;

/// Number of Newton steps used to remove refraction
pub const REFRACTION_NEWTON_STEPS: usize = 2;

/// Largest zenith distance (degrees) at which the refraction model is evaluated
pub const MAX_ZDU: f64 = 85.0;

/// Smallest meaningful parallax (arcsec); anything below is treated as infinitely distant
pub const MIN_PARALLAX: f64 = 1.0e-7;

/// Default magnitude (degrees) of the offset used to track orientation and scale
pub const OFF_MAG: f64 = 1.0e-4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
