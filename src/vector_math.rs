//! # Vector and angle helpers
//!
//! Small numerical building blocks shared by every conversion: degree-based trigonometry,
//! angle wrapping, unit-vector normalization and tolerant float comparison.
//!
//! All angles are in **degrees** unless the function name says otherwise.

use nalgebra::Vector3;

use crate::{
    constants::{Degree, F_ACCURACY, RADEG},
    coordconv_errors::CoordConvError,
};

#[inline]
pub fn sind(angle: Degree) -> f64 {
    (angle * RADEG).sin()
}

#[inline]
pub fn cosd(angle: Degree) -> f64 {
    (angle * RADEG).cos()
}

#[inline]
pub fn tand(angle: Degree) -> f64 {
    (angle * RADEG).tan()
}

#[inline]
pub fn atan2d(y: f64, x: f64) -> Degree {
    y.atan2(x) / RADEG
}

#[inline]
pub fn asind(x: f64) -> Degree {
    x.asin() / RADEG
}

#[inline]
pub fn acosd(x: f64) -> Degree {
    x.acos() / RADEG
}

/// Wrap an angle into the range `[0, 360)`.
///
/// The naive `rem_euclid` can return exactly `360.0` for tiny negative inputs
/// because of rounding; that case is folded back to `0.0`.
pub fn wrap_pos(angle: Degree) -> Degree {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into the range `[-180, 180)`.
pub fn wrap_ctr(angle: Degree) -> Degree {
    let wrapped = wrap_pos(angle);
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Wrap `angle` into the range `[ref_ang - 180, ref_ang + 180)`.
///
/// Used to report a direction that stays as close as possible to a reference direction.
pub fn wrap_near(angle: Degree, ref_ang: Degree) -> Degree {
    let wrapped = ref_ang + wrap_ctr(angle - ref_ang);
    // round-off can push the result one ulp past the upper bound
    if wrapped - ref_ang >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Euclidean norm of a 3-vector.
#[inline]
pub fn vmag(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Scalar product of two 3-vectors.
#[inline]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Normalize a vector.
///
/// Return
/// ------
/// * `(unit_vector, magnitude)`
/// * [`CoordConvError::DegenerateVector`] if `|v|²` is below [`F_ACCURACY`].
pub fn vn(v: &Vector3<f64>) -> Result<(Vector3<f64>, f64), CoordConvError> {
    let mag_sq = v.norm_squared();
    if mag_sq < F_ACCURACY {
        return Err(CoordConvError::DegenerateVector(mag_sq));
    }
    let mag = mag_sq.sqrt();
    Ok((v / mag, mag))
}

/// Compare two floats with a relative tolerance, falling back to an absolute one near zero.
pub fn f_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel_tol * scale
}

/// Largest absolute component difference between two vectors.
pub fn max_abs_diff(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    (a - b).amax()
}

#[cfg(test)]
mod vector_math_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_pos() {
        assert_eq!(wrap_pos(0.0), 0.0);
        assert_eq!(wrap_pos(360.0), 0.0);
        assert_relative_eq!(wrap_pos(-10.0), 350.0);
        assert_relative_eq!(wrap_pos(725.0), 5.0);
        assert!(wrap_pos(-1e-20) < 360.0);
    }

    #[test]
    fn test_wrap_ctr_and_near() {
        assert_relative_eq!(wrap_ctr(190.0), -170.0);
        assert_relative_eq!(wrap_ctr(-180.0), -180.0);
        assert_relative_eq!(wrap_ctr(180.0), -180.0);
        assert_relative_eq!(wrap_near(350.0, 10.0), -10.0);
        assert_relative_eq!(wrap_near(-350.0, 200.0), 370.0);
        assert_relative_eq!(wrap_near(45.0, 45.0), 45.0);
    }

    #[test]
    fn test_vn() {
        let (u, mag) = vn(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(mag, 5.0);
        assert_relative_eq!(u, Vector3::new(0.6, 0.0, 0.8), epsilon = 1e-15);

        let err = vn(&Vector3::new(0.0, 1e-9, 0.0)).unwrap_err();
        assert!(matches!(err, CoordConvError::DegenerateVector(_)));
    }

    #[test]
    fn test_dot_and_mag() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-2.0, 0.5, 1.0);
        assert_eq!(dot(&a, &b), 2.0);
        assert_eq!(dot(&a, &Vector3::zeros()), 0.0);
        assert_relative_eq!(vmag(&a), 14.0_f64.sqrt());
    }

    #[test]
    fn test_degree_trig() {
        assert_relative_eq!(sind(30.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(cosd(60.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(tand(45.0), 1.0, epsilon = 1e-15);
        assert_relative_eq!(atan2d(1.0, -1.0), 135.0, epsilon = 1e-13);
        assert_relative_eq!(asind(0.5), 30.0, epsilon = 1e-13);
        assert_relative_eq!(acosd(0.5), 60.0, epsilon = 1e-13);
    }

    #[test]
    fn test_f_eq() {
        assert!(f_eq(1.0, 1.0 + 1e-16, 1e-15));
        assert!(!f_eq(1.0, 1.001, 1e-6));
        assert!(f_eq(0.0, 1e-20, 1e-15));
        assert_eq!(
            max_abs_diff(&Vector3::new(1.0, 2.0, 3.0), &Vector3::new(1.0, 2.5, 2.0)),
            1.0
        );
    }
}
