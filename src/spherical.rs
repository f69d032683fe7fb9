//! # Spherical primitives
//!
//! Conversions between spherical `(lon, lat)` positions and cartesian vectors, angular
//! separation, and the spherical-triangle solver [`ang_side_ang`] with the two offset helpers
//! built on top of it.
//!
//! ## Conventions
//!
//! - `lon` in `[0, 360)`, `lat` in `[-90, 90]`, both in **degrees**.
//! - Directions on the sky are measured at a point from the direction of increasing
//!   longitude (0°) towards increasing latitude (90°).
//! - Near a pole the longitude is undefined; every decomposition reports this through an
//!   `at_pole` flag instead of an error, and sets `lon = 0`, `lat = ±90`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, F_ACCURACY},
    coordconv_errors::CoordConvError,
    vector_math::{atan2d, cosd, sind, wrap_pos},
};

/// A position on the celestial sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SphericalPos {
    pub lon: Degree,
    pub lat: Degree,
}

impl SphericalPos {
    pub fn new(lon: Degree, lat: Degree) -> Self {
        SphericalPos { lon, lat }
    }
}

impl From<(f64, f64)> for SphericalPos {
    fn from((lon, lat): (f64, f64)) -> Self {
        SphericalPos { lon, lat }
    }
}

/// Result of decomposing a cartesian vector into spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalDecomp {
    pub pos: SphericalPos,
    pub mag: f64,
    /// The vector is so close to the z axis that `lon` is meaningless (it is set to 0)
    pub at_pole: bool,
}

/// Solution of a spherical triangle given two sides and the included angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSolution {
    pub ang_a: Degree,
    pub side_b: Degree,
    pub ang_c: Degree,
    /// Side B is (nearly) zero, so `ang_a` and `ang_c` are not individually defined
    pub zero_b: bool,
}

/// Result of moving along a great circle away from a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetPoint {
    pub pos: SphericalPos,
    /// Direction of motion at the end point
    pub dir: Degree,
    pub zero_b: bool,
}

/// Direction and distance from one point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetDir {
    pub dir: Degree,
    pub dist: Degree,
    /// The two points coincide (or are antipodal) so `dir` is meaningless (it is set to 0)
    pub dir_undefined: bool,
}

/// Convert spherical coordinates to a cartesian vector of the given magnitude.
///
/// Arguments
/// ---------
/// * `pos`: spherical position in degrees.
/// * `mag`: magnitude of the returned vector.
///
/// Return
/// ------
/// * `mag · (cos lat cos lon, cos lat sin lon, sin lat)`
pub fn cc_from_sc(pos: &SphericalPos, mag: f64) -> Vector3<f64> {
    let cos_lat = cosd(pos.lat);
    Vector3::new(
        mag * cos_lat * cosd(pos.lon),
        mag * cos_lat * sind(pos.lon),
        mag * sind(pos.lat),
    )
}

/// Unit vector (direction cosines) pointing at `pos`.
pub fn dc_from_sc(pos: &SphericalPos) -> Vector3<f64> {
    cc_from_sc(pos, 1.0)
}

/// Convert a cartesian vector to spherical coordinates.
///
/// Arguments
/// ---------
/// * `p`: cartesian vector (any unit).
///
/// Return
/// ------
/// * a [`SphericalDecomp`] holding `(lon, lat)`, `|p|` and the `at_pole` flag.
/// * [`CoordConvError::DegenerateVector`] if `|p|²` is below [`F_ACCURACY`].
///
/// When the projection of `p` on the equatorial plane is within [`F_ACCURACY`]·`|p|` of zero
/// the longitude is not computed: `at_pole` is set, `lon = 0` and `lat = ±90` following the
/// sign of `z`.
pub fn sc_from_cc(p: &Vector3<f64>) -> Result<SphericalDecomp, CoordConvError> {
    let xy_sq = p.x * p.x + p.y * p.y;
    let mag_sq = xy_sq + p.z * p.z;
    if mag_sq < F_ACCURACY {
        return Err(CoordConvError::DegenerateVector(mag_sq));
    }
    let mag = mag_sq.sqrt();
    let xy_mag = xy_sq.sqrt();

    if xy_mag <= F_ACCURACY * mag {
        return Ok(SphericalDecomp {
            pos: SphericalPos::new(0.0, 90.0_f64.copysign(p.z)),
            mag,
            at_pole: true,
        });
    }

    Ok(SphericalDecomp {
        pos: SphericalPos::new(wrap_pos(atan2d(p.y, p.x)), atan2d(p.z, xy_mag)),
        mag,
        at_pole: false,
    })
}

/// Spherical coordinates of a set of direction cosines.
///
/// Same as [`sc_from_cc`] but only the direction is returned.
pub fn sc_from_dc(dc: &Vector3<f64>) -> Result<(SphericalPos, bool), CoordConvError> {
    let decomp = sc_from_cc(dc)?;
    Ok((decomp.pos, decomp.at_pole))
}

/// Angular separation between two points, in degrees.
///
/// The separation is computed from the chord between the two unit vectors,
/// `2·atan2(h, √(1−h²))` with `h` half the chord length, which keeps full precision
/// for very small separations where `acos(a·b)` would not.
pub fn ang_sep(a: &SphericalPos, b: &SphericalPos) -> Degree {
    let half_chord = (dc_from_sc(a) - dc_from_sc(b)).norm() * 0.5;
    2.0 * atan2d(half_chord, (1.0 - half_chord * half_chord).max(0.0).sqrt())
}

/// Solve a spherical triangle given two sides and the included angle.
///
/// ```text
///             C
///            / \
///        b  /   \  a
///          /     \
///         A ----- B
///             c
/// ```
///
/// Arguments
/// ---------
/// * `side_aa`: side `a`, opposite vertex A (degrees).
/// * `ang_b`: angle at vertex B, between sides `a` and `c` (degrees).
/// * `side_cc`: side `c`, opposite vertex C (degrees).
///
/// Return
/// ------
/// * [`TriangleSolution`] with angles A, C and side b wrapped into `[0, 360)`.
///
/// Napier's analogies give `(A+C)/2` and `(A−C)/2`. If the numerator and denominator of
/// either one are both at or below [`F_ACCURACY`] the triangle is degenerate and the result is
/// `(90, 0, 90, zero_b = true)`. Side b is then taken from whichever of the `b−a` or `b+a`
/// analogies has the larger `|num| + |den|`, which avoids cancellation when b is small.
///
/// Inputs close to (but not exactly at) the degenerate limits can lose accuracy in the angles.
pub fn ang_side_ang(side_aa: Degree, ang_b: Degree, side_cc: Degree) -> TriangleSolution {
    let sin_h_aa = sind(side_aa * 0.5);
    let cos_h_aa = cosd(side_aa * 0.5);
    let sin_h_cc = sind(side_cc * 0.5);
    let cos_h_cc = cosd(side_cc * 0.5);
    let sin_h_b = sind(ang_b * 0.5);
    let cos_h_b = cosd(ang_b * 0.5);

    let sin_h_aa_p_cc = sin_h_aa * cos_h_cc + cos_h_aa * sin_h_cc;
    let sin_h_aa_m_cc = sin_h_aa * cos_h_cc - cos_h_aa * sin_h_cc;
    let cos_h_aa_p_cc = cos_h_aa * cos_h_cc - sin_h_aa * sin_h_cc;
    let cos_h_aa_m_cc = cos_h_aa * cos_h_cc + sin_h_aa * sin_h_cc;

    // tan((A+C)/2) and tan((A-C)/2)
    let num1 = cos_h_b * cos_h_aa_m_cc;
    let den1 = sin_h_b * cos_h_aa_p_cc;
    let num2 = cos_h_b * sin_h_aa_m_cc;
    let den2 = sin_h_b * sin_h_aa_p_cc;

    if (num1.abs() <= F_ACCURACY && den1.abs() <= F_ACCURACY)
        || (num2.abs() <= F_ACCURACY && den2.abs() <= F_ACCURACY)
    {
        return TriangleSolution {
            ang_a: 90.0,
            side_b: 0.0,
            ang_c: 90.0,
            zero_b: true,
        };
    }

    let h_sum_ac = atan2d(num1, den1);
    let h_diff_ac = atan2d(num2, den2);
    let ang_a = h_sum_ac + h_diff_ac;
    let ang_c = h_sum_ac - h_diff_ac;

    let sin_h_a = sind(ang_a * 0.5);
    let cos_h_a = cosd(ang_a * 0.5);
    let sin_h_b_p_a = sin_h_b * cos_h_a + cos_h_b * sin_h_a;
    let sin_h_b_m_a = sin_h_b * cos_h_a - cos_h_b * sin_h_a;
    let cos_h_b_p_a = cos_h_b * cos_h_a - sin_h_b * sin_h_a;
    let cos_h_b_m_a = cos_h_b * cos_h_a + sin_h_b * sin_h_a;

    // tan((b-a)/2) and tan((b+a)/2)
    let num3 = sin_h_cc * sin_h_b_m_a;
    let den3 = cos_h_cc * sin_h_b_p_a;
    let num4 = sin_h_cc * cos_h_b_m_a;
    let den4 = cos_h_cc * cos_h_b_p_a;

    let side_b = if num3.abs() + den3.abs() > num4.abs() + den4.abs() {
        2.0 * atan2d(num3, den3) + side_aa
    } else {
        2.0 * atan2d(num4, den4) - side_aa
    };

    TriangleSolution {
        ang_a: wrap_pos(ang_a),
        side_b: wrap_pos(side_b),
        ang_c: wrap_pos(ang_c),
        zero_b: false,
    }
}

/// Move `dist` degrees along a great circle leaving `pos` in direction `dir`.
///
/// Arguments
/// ---------
/// * `pos`: starting point.
/// * `dir`: direction of motion at the starting point (0 = increasing lon, 90 = increasing lat).
/// * `dist`: length of the arc (degrees).
///
/// Return
/// ------
/// * the end point and the direction of motion there.
///
/// # See also
/// * [`sc_dir_from_sc_pair`] – the inverse operation
pub fn sc_from_sc_off(pos: &SphericalPos, dir: Degree, dist: Degree) -> OffsetPoint {
    // triangle: B = start point, C = pole, A = end point
    let tri = ang_side_ang(90.0 - pos.lat, 90.0 - dir, dist);
    OffsetPoint {
        pos: SphericalPos::new(wrap_pos(pos.lon + tri.ang_c), 90.0 - tri.side_b),
        dir: tri.ang_a - 90.0,
        zero_b: tri.zero_b,
    }
}

/// Direction and great-circle distance from `pos1` to `pos2`.
///
/// The direction is measured at `pos1`. When the points coincide the direction is undefined:
/// `dir_undefined` is set and `dir = 0`.
pub fn sc_dir_from_sc_pair(pos1: &SphericalPos, pos2: &SphericalPos) -> OffsetDir {
    // triangle: A = first point, B = pole, C = second point
    let tri = ang_side_ang(90.0 - pos2.lat, pos2.lon - pos1.lon, 90.0 - pos1.lat);
    if tri.zero_b {
        return OffsetDir {
            dir: 0.0,
            dist: tri.side_b,
            dir_undefined: true,
        };
    }
    OffsetDir {
        dir: 90.0 - tri.ang_a,
        dist: tri.side_b,
        dir_undefined: false,
    }
}

#[cfg(test)]
mod spherical_test {
    use super::*;
    use crate::vector_math::wrap_ctr;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_dc_from_sc_literal() {
        let dc = dc_from_sc(&SphericalPos::new(10.0, 0.0));
        assert_relative_eq!(dc.x, 0.984807753012208, max_relative = 1e-14);
        assert_relative_eq!(dc.y, 0.173648177666930, max_relative = 1e-14);
        assert_eq!(dc.z, 0.0);
    }

    #[test]
    fn test_sc_from_cc_roundtrip() {
        for &(lon, lat) in &[(0.0, 0.0), (45.0, 30.0), (123.4, -67.8), (359.5, 89.0)] {
            let pos = SphericalPos::new(lon, lat);
            let (back, at_pole) = sc_from_dc(&dc_from_sc(&pos)).unwrap();
            assert!(!at_pole);
            assert_relative_eq!(back.lon, lon, max_relative = 1e-14, epsilon = 1e-12);
            assert_relative_eq!(back.lat, lat, max_relative = 1e-14, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sc_from_cc_magnitude() {
        let decomp = sc_from_cc(&Vector3::new(0.0, -2.0, 0.0)).unwrap();
        assert_relative_eq!(decomp.mag, 2.0);
        assert_relative_eq!(decomp.pos.lon, 270.0);
        assert_relative_eq!(decomp.pos.lat, 0.0);
    }

    #[test]
    fn test_sc_from_cc_pole() {
        let north = sc_from_cc(&Vector3::new(1e-17, 0.0, 1.0)).unwrap();
        assert!(north.at_pole);
        assert_eq!(north.pos, SphericalPos::new(0.0, 90.0));

        let south = sc_from_cc(&Vector3::new(0.0, 0.0, -3.0)).unwrap();
        assert!(south.at_pole);
        assert_eq!(south.pos, SphericalPos::new(0.0, -90.0));
    }

    #[test]
    fn test_sc_from_cc_degenerate() {
        let err = sc_from_cc(&Vector3::new(1e-9, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, CoordConvError::DegenerateVector(_)));
    }

    #[test]
    fn test_ang_sep() {
        let a = SphericalPos::new(10.0, 20.0);
        let b = SphericalPos::new(11.0, 21.5);
        assert_eq!(ang_sep(&a, &a), 0.0);
        assert_eq!(ang_sep(&a, &b), ang_sep(&b, &a));
        assert_relative_eq!(
            ang_sep(&SphericalPos::new(0.0, 0.0), &SphericalPos::new(0.0, 90.0)),
            90.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ang_sep(&SphericalPos::new(0.0, 0.0), &SphericalPos::new(1e-9, 0.0)),
            1e-9,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_ang_side_ang_degenerate_literal() {
        let tri = ang_side_ang(180.0, 10.0, 179.9999999999999);
        assert_eq!(
            tri,
            TriangleSolution {
                ang_a: 90.0,
                side_b: 0.0,
                ang_c: 90.0,
                zero_b: true
            }
        );
    }

    #[test]
    fn test_ang_side_ang_general() {
        // checked against the spherical law of cosines and law of sines
        let tri = ang_side_ang(60.0, 45.0, 30.0);
        assert!(!tri.zero_b);
        assert_relative_eq!(tri.side_b, 42.336779535532315, epsilon = 1e-11);
        assert_relative_eq!(tri.ang_a, 114.5972226843821, epsilon = 1e-11);
        assert_relative_eq!(tri.ang_c, 31.665507547916494, epsilon = 1e-11);
    }

    #[test]
    fn test_offset_roundtrip() {
        let start = SphericalPos::new(20.0, 10.0);
        for &dir in &[0.0, 30.0, 90.0, 135.0, 200.0, -40.0] {
            let end = sc_from_sc_off(&start, dir, 5.0);
            assert!(!end.zero_b);
            assert_relative_eq!(ang_sep(&start, &end.pos), 5.0, epsilon = 1e-12);

            let back = sc_dir_from_sc_pair(&start, &end.pos);
            assert!(!back.dir_undefined);
            assert_relative_eq!(back.dist, 5.0, epsilon = 1e-12);
            assert_abs_diff_eq!(wrap_ctr(back.dir - dir), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_offset_north() {
        let end = sc_from_sc_off(&SphericalPos::new(20.0, 10.0), 90.0, 5.0);
        assert_relative_eq!(end.pos.lon, 20.0, epsilon = 1e-12);
        assert_relative_eq!(end.pos.lat, 15.0, epsilon = 1e-12);
        assert_relative_eq!(end.dir, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dir_same_point() {
        let p = SphericalPos::new(33.0, -12.0);
        let off = sc_dir_from_sc_pair(&p, &p);
        assert!(off.dir_undefined);
        assert_eq!(off.dist, 0.0);
    }
}
