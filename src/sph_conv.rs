//! # Spherical system conversions
//!
//! Glue between catalogue-style spherical quantities (position, proper motion, parallax,
//! radial velocity) and the cartesian `(p, v)` vectors used by [`crate::cnv`], plus the
//! hour angle/declination ⟷ azimuth/altitude rotation.
//!
//! ## Units
//!
//! | Quantity | Spherical | Cartesian |
//! |---|---|---|
//! | position | degrees | AU |
//! | proper motion | arcsec per century (`dlon/dt`, `dlat/dt`) | AU per year |
//! | parallax | arcsec | – |
//! | radial velocity | km/s (positive receding) | AU per year |
//!
//! The year is the Julian year, except for FK4 data where the proper motion (and therefore
//! the velocity) is per Besselian year. Radial velocities always use the Julian year.
//!
//! ## Objects at infinity
//!
//! A parallax below [`MIN_PARALLAX`] cannot be represented: such objects are placed at the
//! distance of [`MIN_PARALLAX`], their radial velocity is ignored and the `at_inf` flag is set.
//! Going the other way, any vector farther than that distance reports zero parallax and zero
//! radial velocity.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{ArcSec, Degree, AU_PER_YEAR_PER_KM_PER_SEC, F_ACCURACY, MIN_PARALLAX, RADSEC},
    coordconv_errors::CoordConvError,
    spherical::{
        cc_from_sc, dc_from_sc, sc_dir_from_sc_pair, sc_from_cc, sc_from_dc, sc_from_sc_off,
        SphericalPos,
    },
    vector_math::{cosd, sind, wrap_ctr},
};

/// Catalogue description of an object: position and space motion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StarState {
    pub pos: SphericalPos,
    /// Proper motion `(dlon/dt, dlat/dt)` in **arcsec per century**
    pub pm: [ArcSec; 2],
    /// Parallax in **arcsec**
    pub parallax: ArcSec,
    /// Radial velocity in **km/s**, positive receding
    pub rad_vel: f64,
}

impl StarState {
    pub fn new(pos: SphericalPos, pm: [ArcSec; 2], parallax: ArcSec, rad_vel: f64) -> Self {
        StarState {
            pos,
            pm,
            parallax,
            rad_vel,
        }
    }

    /// A distant object with no known space motion.
    pub fn fixed(pos: SphericalPos) -> Self {
        StarState {
            pos,
            ..Default::default()
        }
    }
}

/// Cartesian position and velocity built from a [`StarState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvResult {
    pub p: Vector3<f64>,
    pub v: Vector3<f64>,
    /// The parallax was too small: the object sits at the [`MIN_PARALLAX`] distance
    pub at_inf: bool,
}

/// Same as [`PvResult`] with an extra position offset from the object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PvOffResult {
    pub p: Vector3<f64>,
    pub v: Vector3<f64>,
    /// Position of a point a small angle away from the object, at the same distance
    pub off_p: Vector3<f64>,
    pub at_inf: bool,
}

/// [`StarState`] decomposed from cartesian position and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarResult {
    pub star: StarState,
    /// The object is beyond the [`MIN_PARALLAX`] distance: parallax and radial velocity are 0
    pub at_inf: bool,
    /// The object is at a pole: longitude and proper motion are 0
    pub at_pole: bool,
}

/// Same as [`StarResult`] with the direction and angular length of the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarOffResult {
    pub star: StarState,
    /// Direction from the object to the offset point (0 = increasing lon, 90 = increasing lat)
    pub off_dir: Degree,
    /// Angular distance from the object to the offset point (degrees)
    pub off_mag: Degree,
    pub at_inf: bool,
    pub at_pole: bool,
}

/// Convert hour angle/declination to azimuth/altitude.
///
/// Arguments
/// ---------
/// * `ha_dec`: `(HA, Dec)` in degrees.
/// * `lat`: latitude of the observer (degrees).
///
/// Return
/// ------
/// * `(az, alt)` in degrees, azimuth 0 = south, 90 = east, and the `at_pole` flag (object at
///   the zenith or nadir, where the azimuth is set to 0).
///
/// # See also
/// * [`ha_dec_from_az_alt`] – the inverse rotation
pub fn az_alt_from_ha_dec(
    ha_dec: &SphericalPos,
    lat: Degree,
) -> Result<(SphericalPos, bool), CoordConvError> {
    // x = -HA so the sense matches azimuth
    let dc = dc_from_sc(&SphericalPos::new(-ha_dec.lon, ha_dec.lat));
    let (sin_lat, cos_lat) = (sind(lat), cosd(lat));
    let az_alt_dc = Vector3::new(
        sin_lat * dc.x - cos_lat * dc.z,
        dc.y,
        cos_lat * dc.x + sin_lat * dc.z,
    );
    sc_from_dc(&az_alt_dc)
}

/// Convert azimuth/altitude to hour angle/declination.
///
/// Return
/// ------
/// * `(HA, Dec)` in degrees with HA in `[-180, 180)`, and the `at_pole` flag (object at a
///   celestial pole, where the hour angle is set to 0).
pub fn ha_dec_from_az_alt(
    az_alt: &SphericalPos,
    lat: Degree,
) -> Result<(SphericalPos, bool), CoordConvError> {
    let dc = dc_from_sc(az_alt);
    let (sin_lat, cos_lat) = (sind(lat), cosd(lat));
    let ha_dec_dc = Vector3::new(
        sin_lat * dc.x + cos_lat * dc.z,
        dc.y,
        -cos_lat * dc.x + sin_lat * dc.z,
    );
    let (pos, at_pole) = sc_from_dc(&ha_dec_dc)?;
    let ha = if at_pole { 0.0 } else { wrap_ctr(-pos.lon) };
    Ok((SphericalPos::new(ha, pos.lat), at_pole))
}

/// Convert spherical position and space motion to cartesian position and velocity.
///
/// Arguments
/// ---------
/// * `star`: position, proper motion (arcsec/century), parallax (arcsec) and radial
///   velocity (km/s).
///
/// Return
/// ------
/// * a [`PvResult`] with `p` in AU and `v` in AU per year.
/// * [`CoordConvError::Range`] if the latitude is outside `[-90, 90]`.
///
/// # See also
/// * [`sc_from_cc_pv`] – the inverse conversion
pub fn cc_from_sc_pv(star: &StarState) -> Result<PvResult, CoordConvError> {
    cc_from_sc_pv_with(star, MIN_PARALLAX)
}

pub(crate) fn cc_from_sc_pv_with(
    star: &StarState,
    min_parallax: ArcSec,
) -> Result<PvResult, CoordConvError> {
    let lat = star.pos.lat;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordConvError::Range(format!(
            "latitude must be in [-90, 90], got {lat}"
        )));
    }

    let (parallax, rad_vel, at_inf) = if star.parallax < min_parallax {
        (min_parallax, 0.0, true)
    } else {
        (star.parallax, star.rad_vel, false)
    };

    let dist = 1.0 / (RADSEC * parallax);
    let (sin_lon, cos_lon) = (sind(star.pos.lon), cosd(star.pos.lon));
    let (sin_lat, cos_lat) = (sind(lat), cosd(lat));

    // arcsec/century -> rad/year, km/s -> AU/year
    let pm_lon = star.pm[0] * RADSEC / 100.0;
    let pm_lat = star.pm[1] * RADSEC / 100.0;
    let rv = rad_vel * AU_PER_YEAR_PER_KM_PER_SEC;

    let p = cc_from_sc(&star.pos, dist);
    let v = Vector3::new(
        -pm_lon * dist * cos_lat * sin_lon - pm_lat * dist * sin_lat * cos_lon
            + rv * cos_lat * cos_lon,
        pm_lon * dist * cos_lat * cos_lon - pm_lat * dist * sin_lat * sin_lon
            + rv * cos_lat * sin_lon,
        pm_lat * dist * cos_lat + rv * sin_lat,
    );

    Ok(PvResult { p, v, at_inf })
}

/// Same as [`cc_from_sc_pv`], plus a point offset from the object.
///
/// Arguments
/// ---------
/// * `star`: the object.
/// * `off_dir`: direction of the offset at the object (0 = increasing lon, 90 = increasing lat).
/// * `off_mag`: angular length of the offset (degrees).
///
/// Return
/// ------
/// * a [`PvOffResult`]. The offset point is at the same distance as the object and is given
///   the same velocity.
pub fn cc_from_sc_pv_off(
    star: &StarState,
    off_dir: Degree,
    off_mag: Degree,
) -> Result<PvOffResult, CoordConvError> {
    cc_from_sc_pv_off_with(star, off_dir, off_mag, MIN_PARALLAX)
}

pub(crate) fn cc_from_sc_pv_off_with(
    star: &StarState,
    off_dir: Degree,
    off_mag: Degree,
    min_parallax: ArcSec,
) -> Result<PvOffResult, CoordConvError> {
    let PvResult { p, v, at_inf } = cc_from_sc_pv_with(star, min_parallax)?;
    let off_pos = sc_from_sc_off(&star.pos, off_dir, off_mag).pos;
    let off_p = cc_from_sc(&off_pos, p.norm());
    Ok(PvOffResult { p, v, off_p, at_inf })
}

/// Convert cartesian position and velocity to spherical position and space motion.
///
/// Objects at or beyond the distance of `MIN_PARALLAX` (to within rounding) are reported at
/// infinity, with parallax and radial velocity set to 0.
///
/// Arguments
/// ---------
/// * `p`: position (AU).
/// * `v`: velocity (AU per year).
///
/// Return
/// ------
/// * a [`StarResult`].
/// * [`CoordConvError::DegenerateVector`] if `p` is too short to have a direction.
pub fn sc_from_cc_pv(p: &Vector3<f64>, v: &Vector3<f64>) -> Result<StarResult, CoordConvError> {
    sc_from_cc_pv_with(p, v, MIN_PARALLAX)
}

pub(crate) fn sc_from_cc_pv_with(
    p: &Vector3<f64>,
    v: &Vector3<f64>,
    min_parallax: ArcSec,
) -> Result<StarResult, CoordConvError> {
    let decomp = sc_from_cc(p)?;
    let mag = decomp.mag;

    let pm = if decomp.at_pole {
        [0.0, 0.0]
    } else {
        let xy_sq = p.x * p.x + p.y * p.y;
        let xy_mag = xy_sq.sqrt();
        // rad/year -> arcsec/century
        let pm_lon = (p.x * v.y - p.y * v.x) / xy_sq;
        let pm_lat = (v.z * xy_sq - p.z * (p.x * v.x + p.y * v.y)) / (mag * mag * xy_mag);
        [pm_lon * 100.0 / RADSEC, pm_lat * 100.0 / RADSEC]
    };

    let at_inf = mag >= (1.0 - F_ACCURACY) / (RADSEC * min_parallax);
    let (parallax, rad_vel) = if at_inf {
        (0.0, 0.0)
    } else {
        (
            1.0 / (RADSEC * mag),
            p.dot(v) / mag / AU_PER_YEAR_PER_KM_PER_SEC,
        )
    };

    Ok(StarResult {
        star: StarState::new(decomp.pos, pm, parallax, rad_vel),
        at_inf,
        at_pole: decomp.at_pole,
    })
}

/// Same as [`sc_from_cc_pv`], plus the direction and length of an offset.
///
/// Arguments
/// ---------
/// * `p`, `v`: position (AU) and velocity (AU per year) of the object.
/// * `off_p`: position of the offset point (AU).
///
/// Return
/// ------
/// * a [`StarOffResult`]; `off_dir` is measured at the object. If the offset point coincides
///   with the object the direction is reported as 0.
pub fn sc_from_cc_pv_off(
    p: &Vector3<f64>,
    v: &Vector3<f64>,
    off_p: &Vector3<f64>,
) -> Result<StarOffResult, CoordConvError> {
    sc_from_cc_pv_off_with(p, v, off_p, MIN_PARALLAX)
}

pub(crate) fn sc_from_cc_pv_off_with(
    p: &Vector3<f64>,
    v: &Vector3<f64>,
    off_p: &Vector3<f64>,
    min_parallax: ArcSec,
) -> Result<StarOffResult, CoordConvError> {
    let StarResult {
        star,
        at_inf,
        at_pole,
    } = sc_from_cc_pv_with(p, v, min_parallax)?;

    let off_pos = sc_from_cc(off_p)?.pos;
    let offset = sc_dir_from_sc_pair(&star.pos, &off_pos);

    Ok(StarOffResult {
        star,
        off_dir: offset.dir,
        off_mag: offset.dist,
        at_inf,
        at_pole,
    })
}

#[cfg(test)]
mod sph_conv_test {
    use super::*;
    use crate::constants::OFF_MAG;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_az_alt_roundtrip() {
        for &(ha, dec, lat) in &[
            (10.0, 20.0, 32.78),
            (-75.0, -40.0, -30.24),
            (150.0, 60.0, 19.82),
            (-179.0, 5.0, 0.0),
        ] {
            let ha_dec = SphericalPos::new(ha, dec);
            let (az_alt, at_pole) = az_alt_from_ha_dec(&ha_dec, lat).unwrap();
            assert!(!at_pole);
            let (back, at_pole) = ha_dec_from_az_alt(&az_alt, lat).unwrap();
            assert!(!at_pole);
            assert_relative_eq!(back.lon, ha, max_relative = 1e-14, epsilon = 1e-12);
            assert_relative_eq!(back.lat, dec, max_relative = 1e-14, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_az_alt_conventions() {
        let lat = 40.0;
        // on the meridian, south of the zenith
        let (az_alt, _) = az_alt_from_ha_dec(&SphericalPos::new(0.0, 10.0), lat).unwrap();
        assert_abs_diff_eq!(az_alt.lon, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(az_alt.lat, 60.0, epsilon = 1e-12);

        // rising on the east horizon
        let (az_alt, _) = az_alt_from_ha_dec(&SphericalPos::new(-90.0, 0.0), lat).unwrap();
        assert_abs_diff_eq!(az_alt.lon, 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(az_alt.lat, 0.0, epsilon = 1e-12);

        // the celestial pole is at altitude = latitude, due north
        let (az_alt, _) = az_alt_from_ha_dec(&SphericalPos::new(0.0, 90.0), lat).unwrap();
        assert_abs_diff_eq!(az_alt.lon, 180.0, epsilon = 1e-12);
        assert_abs_diff_eq!(az_alt.lat, lat, epsilon = 1e-12);
    }

    #[test]
    fn test_cc_from_sc_pv_units() {
        // 1" parallax is 1 parsec = 206264.8 AU
        let star = StarState::new(SphericalPos::new(0.0, 0.0), [100.0, 0.0], 1.0, 1.0);
        let pv = cc_from_sc_pv(&star).unwrap();
        assert!(!pv.at_inf);
        assert_relative_eq!(pv.p.x, 206264.80624709636, max_relative = 1e-14);
        // 1"/year across 1 pc is 1 AU/year
        assert_relative_eq!(pv.v.y, 1.0, max_relative = 1e-14);
        // 1 km/s is 0.2109 AU per Julian year
        assert_relative_eq!(pv.v.x, AU_PER_YEAR_PER_KM_PER_SEC, max_relative = 1e-14);
        // one Julian year of travel at 1 km/s
        assert_relative_eq!(AU_PER_YEAR_PER_KM_PER_SEC, 0.21094952755677604, max_relative = 1e-12);
    }

    #[test]
    fn test_pv_roundtrip() {
        let star = StarState::new(SphericalPos::new(123.4, -45.6), [1234.5, -987.6], 0.75, -42.0);
        let pv = cc_from_sc_pv(&star).unwrap();
        let back = sc_from_cc_pv(&pv.p, &pv.v).unwrap();
        assert!(!back.at_inf && !back.at_pole);
        assert_relative_eq!(back.star.pos.lon, 123.4, max_relative = 1e-13);
        assert_relative_eq!(back.star.pos.lat, -45.6, max_relative = 1e-13);
        assert_relative_eq!(back.star.pm[0], 1234.5, max_relative = 1e-12);
        assert_relative_eq!(back.star.pm[1], -987.6, max_relative = 1e-12);
        assert_relative_eq!(back.star.parallax, 0.75, max_relative = 1e-13);
        assert_relative_eq!(back.star.rad_vel, -42.0, max_relative = 1e-12);
    }

    #[test]
    fn test_at_infinity() {
        let star = StarState::new(SphericalPos::new(10.0, 10.0), [5.0, 5.0], 0.0, 100.0);
        let pv = cc_from_sc_pv(&star).unwrap();
        assert!(pv.at_inf);
        assert_relative_eq!(pv.p.norm(), 1.0 / (RADSEC * MIN_PARALLAX), max_relative = 1e-14);

        let back = sc_from_cc_pv(&pv.p, &pv.v).unwrap();
        assert!(back.at_inf);
        assert_eq!(back.star.parallax, 0.0);
        assert_eq!(back.star.rad_vel, 0.0);
        assert_relative_eq!(back.star.pm[0], 5.0, max_relative = 1e-9);
    }

    #[test]
    fn test_parallax_at_the_limit() {
        let near = StarState::new(SphericalPos::new(10.0, 10.0), [0.0, 0.0], 1.00005e-7, 10.0);
        let pv = cc_from_sc_pv(&near).unwrap();
        assert!(!pv.at_inf);
        let back = sc_from_cc_pv(&pv.p, &pv.v).unwrap();
        assert!(!back.at_inf);
        assert_relative_eq!(back.star.parallax, 1.00005e-7, max_relative = 1e-12);
        assert_relative_eq!(back.star.rad_vel, 10.0, max_relative = 1e-9);
    }

    #[test]
    fn test_at_pole() {
        let back = sc_from_cc_pv(&Vector3::new(0.0, 0.0, 1.0e5), &Vector3::new(1.0, 1.0, 1.0))
            .unwrap();
        assert!(back.at_pole);
        assert_eq!(back.star.pm, [0.0, 0.0]);
        assert_eq!(back.star.pos.lat, 90.0);
    }

    #[test]
    fn test_invalid_latitude() {
        let star = StarState::fixed(SphericalPos::new(0.0, 91.0));
        assert!(matches!(
            cc_from_sc_pv(&star).unwrap_err(),
            CoordConvError::Range(_)
        ));
    }

    #[test]
    fn test_offset_roundtrip() {
        let star = StarState::new(SphericalPos::new(200.0, 35.0), [10.0, -20.0], 0.1, 5.0);
        for &dir in &[0.0, 45.0, 90.0, -120.0] {
            let pv = cc_from_sc_pv_off(&star, dir, OFF_MAG).unwrap();
            let back = sc_from_cc_pv_off(&pv.p, &pv.v, &pv.off_p).unwrap();
            assert_abs_diff_eq!(wrap_ctr(back.off_dir - dir), 0.0, epsilon = 1e-6);
            assert_relative_eq!(back.off_mag, OFF_MAG, max_relative = 1e-8);
        }
    }
}
