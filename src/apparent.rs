//! # Mean-to-apparent parameters
//!
//! Star-independent quantities shared by every apparent-place conversion at a given date:
//! the [`ApparentParams`] bundle built by [`mappa`], and the FK4 e-terms vector [`etrms`].

use nalgebra::{Matrix3, Vector3};

use crate::{
    constants::{AU_SEC, RADSEC},
    earth_orientation::prenut,
    earth_position::evp,
    time::epj_from_mjd,
};

/// Gravitational radius of the Sun × 2 (2·μ/c², AU)
const GR2: f64 = 2.0 * 9.87063e-9;

/// Star-independent parameters for converting between mean and geocentric apparent place.
///
/// Built once per (mean epoch, date) pair with [`mappa`] and shared read-only by every star
/// converted at that date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentParams {
    /// Time interval for proper motion (Julian years)
    pub dt_pm: f64,
    /// Barycentric position of the Earth (AU)
    pub b_pos: Vector3<f64>,
    /// Heliocentric direction of the Earth (unit vector)
    pub b_dir: Vector3<f64>,
    /// (Schwarzschild radius of the Sun) / (Sun–Earth distance)
    pub light_defl: f64,
    /// Barycentric velocity of the Earth in units of c
    pub b_vel_c: Vector3<f64>,
    /// sqrt(1 − |b_vel_c|²)
    pub gamma: f64,
    /// Precession/nutation matrix, mean at the given epoch → true of date
    pub pn_mat: Matrix3<f64>,
}

/// Compute the star-independent mean-to-apparent parameters.
///
/// Arguments
/// ---------
/// * `epoch`: Julian epoch of the mean equator and equinox (e.g. 2000.0).
/// * `tdb`: TDB of the apparent place, as a Modified Julian Date.
///
/// Return
/// ------
/// * an [`ApparentParams`] bundle.
///
/// # See also
/// * [`geo_from_icrs`](crate::cnv::geo::geo_from_icrs) – forward apparent-place conversion
/// * [`icrs_from_geo`](crate::cnv::geo::icrs_from_geo) – its iterative inverse
pub fn mappa(epoch: f64, tdb: f64) -> ApparentParams {
    let earth = evp(tdb, epoch);

    let helio_dist = earth.helio_pos.norm();
    let b_vel_c = earth.bary_vel * AU_SEC;

    ApparentParams {
        dt_pm: epj_from_mjd(tdb) - epoch,
        b_pos: earth.bary_pos,
        b_dir: earth.helio_pos / helio_dist,
        light_defl: GR2 / helio_dist,
        b_vel_c,
        gamma: (1.0 - b_vel_c.norm_squared()).sqrt(),
        pn_mat: prenut(epoch, tdb),
    }
}

/// E-terms of aberration.
///
/// The elliptic part of the annual aberration, folded into FK4 catalogue positions.
///
/// Arguments
/// ---------
/// * `bep`: Besselian epoch.
///
/// Return
/// ------
/// * the e-terms vector (dimensionless, about 1.6e-6 long).
pub fn etrms(bep: f64) -> Vector3<f64> {
    // Julian centuries since B1950
    let t = (bep - 1950.0) * 1.00002135903e-2;

    // eccentricity of the Earth's orbit
    let e = 0.01673011 - (0.00004193 + 0.000000126 * t) * t;

    // mean obliquity
    let e0 = (84404.836 - (46.8495 + (0.00319 + 0.00181 * t) * t) * t) * RADSEC;

    // mean longitude of perihelion
    let p = (1015489.951 + (6190.67 + (1.65 + 0.012 * t) * t) * t) * RADSEC;

    // e-terms magnitude
    let ek = e * 20.49552 * RADSEC;

    let (sin_p, cos_p) = p.sin_cos();
    let (sin_e0, cos_e0) = e0.sin_cos();
    Vector3::new(ek * sin_p, -ek * cos_p * cos_e0, -ek * cos_p * sin_e0)
}

#[cfg(test)]
mod apparent_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_etrms_b1950() {
        // classical B1950 e-terms: (-1.62557e-6, -0.31919e-6, -0.13843e-6)
        let e = etrms(1950.0);
        assert_abs_diff_eq!(e.x, -1.62557e-6, epsilon = 1e-10);
        assert_abs_diff_eq!(e.y, -0.31919e-6, epsilon = 1e-10);
        assert_abs_diff_eq!(e.z, -0.13843e-6, epsilon = 1e-10);
    }

    #[test]
    fn test_mappa() {
        // reference values from a full planetary theory and the IAU 2006 precession model;
        // the Stumpff series and IAU 1976/1980 models agree to the tolerances below
        let amp = mappa(2010.0, 55927.0);

        assert_abs_diff_eq!(amp.dt_pm, 1.9986310746064646082, epsilon = 1e-12);
        assert_abs_diff_eq!(
            amp.b_pos,
            Vector3::new(-0.1728200754134739392, 0.88745394651412767839, 0.38472374350184274094),
            epsilon = 2e-4
        );
        assert_abs_diff_eq!(
            amp.b_dir,
            Vector3::new(-0.17245634725219796679, 0.90374808622520386159, 0.3917884696321610738),
            epsilon = 2e-5
        );
        assert_abs_diff_eq!(amp.light_defl, 2.0075929387510784968e-08, epsilon = 1e-12);
        assert_abs_diff_eq!(
            amp.b_vel_c,
            Vector3::new(
                -9.9464149073251757597e-05,
                -1.6125306981057062306e-05,
                -6.9897255793245634435e-06
            ),
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(amp.gamma, 0.99999999489900059935, epsilon = 1e-12);

        let pn_ref = Matrix3::new(
            0.99999983777998024959,
            -0.00052248206600935195865,
            -0.00022683144398381763045,
            0.00052248547063364874764,
            0.99999986339269864022,
            1.4950491424992534218e-05,
            0.00022682360163333854623,
            -1.5069005133483779417e-05,
            0.99999997416198904698,
        );
        assert_abs_diff_eq!(amp.pn_mat, pn_ref, epsilon = 2e-7);
    }
}
