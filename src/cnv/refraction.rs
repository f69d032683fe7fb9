//! # Topocentric ⟷ observed (refraction)
//!
//! Two-term refraction model, with zenith distances in degrees:
//!
//! ```text
//! zdu = zdr + A·tan(zdr) + B·tan³(zdr)
//! ```
//!
//! where `zdu` is the unrefracted (topocentric) and `zdr` the refracted (observed) zenith
//! distance. The model is only evaluated up to [`MAX_ZDU`]. Below that altitude the correction
//! computed at [`MAX_ZDU`] is applied unchanged and the `too_low` flag is raised.
//!
//! The clamp is not symmetric: [`obs_from_topo`] clamps the *unrefracted* zenith distance and
//! [`topo_from_obs`] clamps the *refracted* one, so a round trip through the clamped region
//! does not return the starting point.

use nalgebra::Vector3;
use tracing::debug;

use crate::{
    constants::{Degree, F_ACCURACY, MAX_ZDU, RADEG, REFRACTION_NEWTON_STEPS},
    observers::RefractionCoeffs,
    vector_math::{atan2d, cosd, sind, tand},
};

/// Result of a refraction conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObsResult {
    pub p: Vector3<f64>,
    /// The zenith distance exceeded [`MAX_ZDU`]; the correction was computed at [`MAX_ZDU`]
    pub too_low: bool,
}

/// Rebuild a vector with the same length and azimuth at a new zenith distance.
fn with_zenith_dist(p: &Vector3<f64>, xy_mag: f64, zd: Degree) -> Vector3<f64> {
    let mag = p.norm();
    let scale = sind(zd) * mag / xy_mag;
    Vector3::new(p.x * scale, p.y * scale, cosd(zd) * mag)
}

/// Apply refraction to a topocentric position.
///
/// Arguments
/// ---------
/// * `topo_p`: topocentric position (AU), local horizon frame.
/// * `ref_co`: refraction coefficients.
///
/// Return
/// ------
/// * the observed position (same length and azimuth, smaller zenith distance) and the
///   `too_low` flag.
///
/// The refracted zenith distance is found with [`REFRACTION_NEWTON_STEPS`] Newton steps
/// started at the unrefracted one. A position at the zenith is returned unchanged.
///
/// # See also
/// * [`topo_from_obs`] – the inverse conversion
pub fn obs_from_topo(topo_p: &Vector3<f64>, ref_co: &RefractionCoeffs) -> ObsResult {
    let xy_mag = topo_p.x.hypot(topo_p.y);
    if xy_mag <= F_ACCURACY * topo_p.norm() {
        return ObsResult {
            p: *topo_p,
            too_low: false,
        };
    }

    let zdu = atan2d(xy_mag, topo_p.z);
    let too_low = zdu > MAX_ZDU;
    let zdu_model = if too_low {
        debug!(zdu, "unrefracted zenith distance clamped");
        MAX_ZDU
    } else {
        zdu
    };

    let (a, b) = (ref_co.a, ref_co.b);
    let zdr = (0..REFRACTION_NEWTON_STEPS).fold(zdu_model, |zdr, _| {
        let tan_zd = tand(zdr);
        let tan_sq = tan_zd * tan_zd;
        let cos_zd = cosd(zdr);
        let f = zdr + (a + b * tan_sq) * tan_zd - zdu_model;
        // tan' = sec² per radian
        let df = 1.0 + (a + 3.0 * b * tan_sq) * RADEG / (cos_zd * cos_zd);
        zdr - f / df
    });

    let zd_obs = zdu - (zdu_model - zdr);
    ObsResult {
        p: with_zenith_dist(topo_p, xy_mag, zd_obs),
        too_low,
    }
}

/// Remove refraction from an observed position.
///
/// Arguments
/// ---------
/// * `obs_p`: observed position (AU), local horizon frame.
/// * `ref_co`: refraction coefficients.
///
/// Return
/// ------
/// * the topocentric position and the `too_low` flag.
///
/// The refraction model is explicit in this direction, so no iteration is needed.
pub fn topo_from_obs(obs_p: &Vector3<f64>, ref_co: &RefractionCoeffs) -> ObsResult {
    let xy_mag = obs_p.x.hypot(obs_p.y);
    if xy_mag <= F_ACCURACY * obs_p.norm() {
        return ObsResult {
            p: *obs_p,
            too_low: false,
        };
    }

    let zdr = atan2d(xy_mag, obs_p.z);
    let too_low = zdr > MAX_ZDU;
    let zdr_model = if too_low {
        debug!(zdr, "refracted zenith distance clamped");
        MAX_ZDU
    } else {
        zdr
    };

    let tan_zd = tand(zdr_model);
    let zdu = zdr_model + (ref_co.a + ref_co.b * tan_zd * tan_zd) * tan_zd;

    let zd_topo = zdr + (zdu - zdr_model);
    ObsResult {
        p: with_zenith_dist(obs_p, xy_mag, zd_topo),
        too_low,
    }
}

#[cfg(test)]
mod refraction_test {
    use super::*;
    use crate::spherical::{dc_from_sc, sc_from_cc, SphericalPos};
    use approx::assert_abs_diff_eq;

    const SEA_LEVEL: RefractionCoeffs = RefractionCoeffs {
        a: 0.0161,
        b: -1.8e-5,
    };

    fn alt_of(p: &Vector3<f64>) -> Degree {
        sc_from_cc(p).unwrap().pos.lat
    }

    #[test]
    fn test_refraction_roundtrip() {
        for &zd in &[0.5, 10.0, 30.0, 60.0, 80.0, 84.9] {
            let p = dc_from_sc(&SphericalPos::new(33.0, 90.0 - zd)) * 1.0e6;
            let obs = obs_from_topo(&p, &SEA_LEVEL);
            assert!(!obs.too_low);
            // refraction raises the object
            assert!(alt_of(&obs.p) > 90.0 - zd);

            let topo = topo_from_obs(&obs.p, &SEA_LEVEL);
            assert!(!topo.too_low);
            assert_abs_diff_eq!(alt_of(&topo.p), 90.0 - zd, epsilon = 1e-10);
            assert_abs_diff_eq!(topo.p.norm(), 1.0e6, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_refraction_at_45_degrees() {
        // A + B at zd = 45°
        let p = dc_from_sc(&SphericalPos::new(0.0, 45.0));
        let obs = obs_from_topo(&p, &SEA_LEVEL);
        assert_abs_diff_eq!(alt_of(&obs.p) - 45.0, 0.0161 - 1.8e-5, epsilon = 3e-5);
    }

    #[test]
    fn test_zenith_unchanged() {
        let p = Vector3::new(0.0, 0.0, 5.0);
        assert_eq!(obs_from_topo(&p, &SEA_LEVEL).p, p);
        assert_eq!(topo_from_obs(&p, &SEA_LEVEL).p, p);
    }

    #[test]
    fn test_too_low_clamp() {
        let p = dc_from_sc(&SphericalPos::new(33.0, -5.0));
        let obs = obs_from_topo(&p, &SEA_LEVEL);
        assert!(obs.too_low);
        // the correction at zd = 85° is applied as is
        let at_limit = obs_from_topo(&dc_from_sc(&SphericalPos::new(33.0, 5.0)), &SEA_LEVEL);
        let corr_limit = alt_of(&at_limit.p) - 5.0;
        assert_abs_diff_eq!(alt_of(&obs.p) + 5.0, corr_limit, epsilon = 1e-9);
        assert_abs_diff_eq!(sc_from_cc(&obs.p).unwrap().pos.lon, 33.0, epsilon = 1e-9);

        // the inverse clamps the refracted zenith distance instead: no exact round trip
        let topo = topo_from_obs(&obs.p, &SEA_LEVEL);
        assert!(topo.too_low);
        let miss = (alt_of(&topo.p) + 5.0).abs();
        assert!(miss > 1e-4 && miss < 1e-2, "miss = {miss}");
    }
}
