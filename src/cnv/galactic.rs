//! # Galactic ⟷ ICRS
//!
//! IAU 1958 galactic coordinates, defined through FK4 B1950 and re-expressed here directly
//! against ICRS (FK5 J2000). The conversion is a pure rotation applied to both position and
//! velocity.

use nalgebra::{Matrix3, Vector3};

/// Rotation ICRS → galactic, row-major: `v_gal = M · v_icrs`.
const GAL_FROM_ICRS: [[f64; 3]; 3] = [
    [-0.054875539726, -0.873437108010, -0.483834985808],
    [0.494109453312, -0.444829589425, 0.746982251810],
    [-0.867666135858, -0.198076386122, 0.455983795705],
];

fn gal_matrix() -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| GAL_FROM_ICRS[i][j])
}

/// Convert an ICRS position and velocity to galactic coordinates.
///
/// # See also
/// * [`icrs_from_gal`] – the inverse rotation
pub fn gal_from_icrs(icrs_p: &Vector3<f64>, icrs_v: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let rot = gal_matrix();
    (rot * icrs_p, rot * icrs_v)
}

/// Convert a galactic position and velocity to ICRS.
pub fn icrs_from_gal(gal_p: &Vector3<f64>, gal_v: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let rot = gal_matrix().transpose();
    (rot * gal_p, rot * gal_v)
}

#[cfg(test)]
mod galactic_test {
    use super::*;
    use crate::spherical::{dc_from_sc, sc_from_cc, SphericalPos};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_galactic_center() {
        // Sgr A* region: the galactic centre direction in ICRS
        let icrs = dc_from_sc(&SphericalPos::new(266.40510, -28.936175));
        let (gal, _) = gal_from_icrs(&icrs, &Vector3::zeros());
        let decomp = sc_from_cc(&gal).unwrap();
        assert_abs_diff_eq!(crate::vector_math::wrap_ctr(decomp.pos.lon), 0.0, epsilon = 2e-4);
        assert_abs_diff_eq!(decomp.pos.lat, 0.0, epsilon = 2e-4);
    }

    #[test]
    fn test_north_galactic_pole() {
        let (icrs, _) = icrs_from_gal(&Vector3::z(), &Vector3::zeros());
        let decomp = sc_from_cc(&icrs).unwrap();
        assert_abs_diff_eq!(decomp.pos.lon, 192.85948, epsilon = 1e-4);
        assert_abs_diff_eq!(decomp.pos.lat, 27.12825, epsilon = 1e-4);
    }

    #[test]
    fn test_galactic_roundtrip() {
        let p = Vector3::new(1.0e4, -3.0e4, 2.5e4);
        let v = Vector3::new(0.5, 0.25, -1.0);
        let (gp, gv) = gal_from_icrs(&p, &v);
        let (back_p, back_v) = icrs_from_gal(&gp, &gv);
        // the published matrix is orthogonal to about 1e-11
        assert_abs_diff_eq!(back_p, p, epsilon = 1e-10 * p.norm());
        assert_abs_diff_eq!(back_v, v, epsilon = 1e-10);
    }
}
