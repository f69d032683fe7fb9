//! # FK5 precession
//!
//! FK5 mean positions at any Julian equinox. ICRS is taken as FK5 J2000, so converting
//! between the two is a precession plus the space motion over the same interval.

use nalgebra::Vector3;

use crate::earth_orientation::prec;

/// Precess an FK5 position and velocity, applying space motion over the same interval.
///
/// Arguments
/// ---------
/// * `p`: position at `from_epoch` (AU), mean equator and equinox of `from_epoch`.
/// * `v`: velocity (AU per Julian year).
/// * `from_epoch`: Julian epoch of the input equinox and position.
/// * `to_epoch`: Julian epoch of the output equinox and position.
///
/// Return
/// ------
/// * `(p', v')` with `p' = R·(p + v·(to − from))` and `v' = R·v`, `R = prec(from, to)`.
pub fn fk5_prec(
    p: &Vector3<f64>,
    v: &Vector3<f64>,
    from_epoch: f64,
    to_epoch: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let prec_mat = prec(from_epoch, to_epoch);
    let moved = p + v * (to_epoch - from_epoch);
    (prec_mat * moved, prec_mat * v)
}
