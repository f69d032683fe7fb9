//! # Observer & site geometry
//!
//! This module gathers the **observatory-dependent** data used by the topocentric and observed
//! conversions:
//!
//! - [`geoc`] turns a geodetic latitude and elevation into the geocentric distances of the site
//!   from the Earth's rotation axis and from the equatorial plane.
//! - [`ObserverData`] is the immutable bundle built once per site with [`ObserverData::new`] and
//!   threaded explicitly through every call of
//!   [`topo_from_geo`](crate::cnv::topo::topo_from_geo) / [`geo_from_topo`](crate::cnv::topo::geo_from_topo).
//! - [`RefractionCoeffs`] holds the two coefficients of the refraction model. They are derived
//!   from the local weather by the caller, never computed here.
//!
//! ## Frames & conventions
//!
//! The site position [`ObserverData::p`] is expressed in the frame obtained by rotating the
//! true equator and equinox of date by the local apparent sidereal time, so that the local
//! meridian lies in the x–z plane:
//!
//! ```text
//! p = (distance from the rotation axis, 0, distance from the equatorial plane)
//! ```
//!
//! ## Units
//!
//! - Longitude / latitude: **degrees** (east positive, geodetic).
//! - Elevation: **meters** above the reference ellipsoid.
//! - `p`: **AU**.
//! - `diur_ab_mag`: dimensionless (rotational speed of the site / speed of light).
//! - Refraction coefficients: **degrees**.
//!
//! ## See also
//! ------------
//! * [`crate::cnv::topo`] – geocentric ⟷ topocentric conversion using [`ObserverData`].
//! * [`crate::cnv::refraction`] – topocentric ⟷ observed conversion using [`RefractionCoeffs`].

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        Degree, Meter, AU_METERS, AU_SEC, EARTH_FLATTENING, EARTH_MAJOR_AXIS, EARTH_ROT_RATE,
        RADEG,
    },
    coordconv_errors::CoordConvError,
};

/// Geodetic to geocentric conversion of a site position.
///
/// The Earth is modelled by the IAU 1976 reference ellipsoid
/// (equatorial radius [`EARTH_MAJOR_AXIS`], flattening [`EARTH_FLATTENING`]).
///
/// ```text
/// C = 1 / sqrt(cos²φ + (1 − f)² sin²φ)
/// S = (1 − f)² C
/// r = (a C + h) cos φ
/// z = (a S + h) sin φ
/// ```
///
/// Arguments
/// ---------
/// * `lat`: geodetic latitude, in **radians**.
/// * `height`: height above the reference ellipsoid, in **meters**.
///
/// Return
/// ------
/// * `(axis_dist, eq_dist)`: distance from the Earth's rotation axis and from the equatorial
///   plane, in **AU**.
pub fn geoc(lat: f64, height: Meter) -> (f64, f64) {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let flat_sq = (1.0 - EARTH_FLATTENING).powi(2);

    let c = 1.0 / (cos_lat * cos_lat + flat_sq * sin_lat * sin_lat).sqrt();
    let s = flat_sq * c;

    let axis_dist = (EARTH_MAJOR_AXIS * c + height) * cos_lat / AU_METERS;
    let eq_dist = (EARTH_MAJOR_AXIS * s + height) * sin_lat / AU_METERS;

    (axis_dist, eq_dist)
}

/// Precomputed geometry of an observing site.
///
/// Built once per site with [`ObserverData::new`]; never mutated afterwards, so a single
/// instance can be shared by every conversion (and every thread) working for that site.
///
/// Units
/// -----
/// * `longitude`, `latitude`: degrees (geodetic, east positive).
/// * `elevation`: meters.
/// * `p`: AU, in the "local meridian" frame described in the module docs.
/// * `diur_ab_mag`: dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverData {
    /// Geodetic longitude in **degrees** east of Greenwich.
    pub longitude: Degree,

    /// Geodetic latitude in **degrees**.
    pub latitude: Degree,

    /// Height above the reference ellipsoid in **meters**.
    pub elevation: Meter,

    /// Geocentric position of the site, `(axis_dist, 0, eq_dist)` in **AU**.
    pub p: Vector3<f64>,

    /// Magnitude of the diurnal aberration vector (site rotational speed / c).
    pub diur_ab_mag: f64,
}

impl ObserverData {
    /// Create the geometry of an observing site from its geodetic coordinates.
    ///
    /// Arguments
    /// ---------
    /// * `longitude`: geodetic longitude in **degrees** (east positive).
    /// * `latitude`: geodetic latitude in **degrees**.
    /// * `elevation`: height above the reference ellipsoid in **meters**.
    ///
    /// Return
    /// ------
    /// * the site [`ObserverData`].
    /// * [`CoordConvError::Range`] if the latitude is outside `[-90, 90]` or an input is not finite.
    ///
    /// # See also
    /// * [`geoc`] – geodetic to geocentric conversion used internally
    pub fn new(
        longitude: Degree,
        latitude: Degree,
        elevation: Meter,
    ) -> Result<Self, CoordConvError> {
        if !longitude.is_finite() || !elevation.is_finite() {
            return Err(CoordConvError::Range(format!(
                "observer longitude and elevation must be finite, got ({longitude}, {elevation})"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordConvError::Range(format!(
                "observer latitude must be in [-90, 90], got {latitude}"
            )));
        }

        let (axis_dist, eq_dist) = geoc(latitude * RADEG, elevation);

        Ok(ObserverData {
            longitude,
            latitude,
            elevation,
            p: Vector3::new(axis_dist, 0.0, eq_dist),
            // AU · rad/s · s/AU
            diur_ab_mag: axis_dist * EARTH_ROT_RATE * AU_SEC,
        })
    }
}

/// Coefficients of the two-term refraction model.
///
/// ```text
/// zd_unrefracted = zd_refracted + A·tan(zd_refracted) + B·tan³(zd_refracted)
/// ```
///
/// Both coefficients are in **degrees**. Typical sea-level values are
/// `A ≈ 0.0161`, `B ≈ -1.8e-5`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RefractionCoeffs {
    pub a: Degree,
    pub b: Degree,
}

impl RefractionCoeffs {
    pub fn new(a: Degree, b: Degree) -> Self {
        RefractionCoeffs { a, b }
    }
}

#[cfg(test)]
mod observer_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geoc_equator_and_pole() {
        let (axis, eq) = geoc(0.0, 0.0);
        assert_relative_eq!(axis, 4.263523270752451e-05, max_relative = 1e-14);
        assert_eq!(eq, 0.0);

        let (axis, eq) = geoc(std::f64::consts::FRAC_PI_2, 0.0);
        assert!(axis.abs() < 1e-20);
        // polar radius a·(1 − f)
        assert_relative_eq!(eq, 4.2492284737460016e-05, max_relative = 1e-14);
    }

    #[test]
    fn test_observer_constructor() {
        // Apache Point Observatory
        let apo = ObserverData::new(-105.820417, 32.780361, 2788.0).unwrap();
        assert_eq!(apo.longitude, -105.820417);
        assert_relative_eq!(apo.p.x, 3.589655884027342e-05, max_relative = 1e-12);
        assert_eq!(apo.p.y, 0.0);
        assert_relative_eq!(apo.p.z, 2.296166096827901e-05, max_relative = 1e-12);
        assert_relative_eq!(apo.diur_ab_mag, 1.3062042182374203e-06, max_relative = 1e-12);
    }

    #[test]
    fn test_observer_invalid_latitude() {
        let err = ObserverData::new(0.0, 91.0, 0.0).unwrap_err();
        assert!(matches!(err, CoordConvError::Range(_)));

        let err = ObserverData::new(f64::NAN, 10.0, 0.0).unwrap_err();
        assert!(matches!(err, CoordConvError::Range(_)));
    }
}
