//! # ICRS ⟷ geocentric apparent
//!
//! The apparent place of an object as seen from the centre of the Earth, referred to the true
//! equator and equinox of date. Going from ICRS the conversion:
//!
//! 1. applies space motion over [`ApparentParams::dt_pm`] and removes the barycentric
//!    position of the Earth (annual parallax),
//! 2. applies annual aberration with the full relativistic formula,
//! 3. rotates by the precession/nutation matrix.
//!
//! Light deflection by the Sun is not applied.
//!
//! The inverse cannot undo aberration in closed form, so [`icrs_from_geo`] iterates until the
//! position stops changing to within [`F_ACCURACY`] of its length.

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::{
    apparent::ApparentParams,
    constants::{F_ACCURACY, MAX_ITER},
    coordconv_errors::CoordConvError,
    vector_math::{max_abs_diff, vn},
};

/// Convert an ICRS position and velocity to a geocentric apparent position.
///
/// Arguments
/// ---------
/// * `icrs_p`: ICRS position at the epoch used to build `amp` (AU).
/// * `icrs_v`: ICRS velocity (AU per Julian year).
/// * `amp`: mean-to-apparent parameters from [`mappa`](crate::apparent::mappa).
///
/// Return
/// ------
/// * the geocentric apparent position (AU), true equator and equinox of date.
/// * [`CoordConvError::DegenerateVector`] if the geocentric position is too short to have a
///   direction.
///
/// # See also
/// * [`icrs_from_geo`] – the inverse conversion
pub fn geo_from_icrs(
    icrs_p: &Vector3<f64>,
    icrs_v: &Vector3<f64>,
    amp: &ApparentParams,
) -> Result<Vector3<f64>, CoordConvError> {
    // space motion and parallax
    let p1 = icrs_p + icrs_v * amp.dt_pm - amp.b_pos;

    // annual aberration
    let (p1_dir, p1_mag) = vn(&p1)?;
    let dot = p1_dir.dot(&amp.b_vel_c);
    let vfac = p1_mag * (1.0 + dot / (1.0 + amp.gamma));
    let p2 = (p1 * amp.gamma + amp.b_vel_c * vfac) / (1.0 + dot);

    Ok(amp.pn_mat * p2)
}

/// Convert a geocentric apparent position back to ICRS.
///
/// Arguments
/// ---------
/// * `geo_p`: geocentric apparent position (AU).
/// * `amp`: mean-to-apparent parameters from [`mappa`](crate::apparent::mappa).
///
/// Return
/// ------
/// * the ICRS position (AU). Space motion cannot be recovered: the result is the position at
///   the date of `amp`, and the velocity is taken as zero.
/// * [`CoordConvError::Convergence`] if the aberration inversion has not converged after
///   [`MAX_ITER`] iterations.
/// * [`CoordConvError::DegenerateVector`] if a position too short to have a direction shows up.
pub fn icrs_from_geo(
    geo_p: &Vector3<f64>,
    amp: &ApparentParams,
) -> Result<Vector3<f64>, CoordConvError> {
    // undo precession and nutation
    let p3 = amp.pn_mat.transpose() * geo_p;

    // undo aberration: iterate p2 = ((1 + p̂2·v)·p3 − vfac·v) / γ
    let mut p2 = p3;
    for iter in 1..=MAX_ITER {
        let (p2_dir, p2_mag) = vn(&p2)?;
        let dot = p2_dir.dot(&amp.b_vel_c);
        let vfac = p2_mag * (1.0 + dot / (1.0 + amp.gamma));
        let new_p2 = (p3 * (1.0 + dot) - amp.b_vel_c * vfac) / amp.gamma;

        let change = max_abs_diff(&new_p2, &p2);
        p2 = new_p2;
        if change <= F_ACCURACY * p2.norm() {
            debug!(iterations = iter, "aberration inversion converged");
            return Ok(p2 + amp.b_pos);
        }
    }

    warn!(
        iterations = MAX_ITER,
        "aberration inversion did not converge"
    );
    Err(CoordConvError::Convergence {
        iterations: MAX_ITER,
    })
}
