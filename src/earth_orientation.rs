//! # Earth orientation: precession, nutation and the equation of the equinoxes
//!
//! - [`nutc`]: IAU 1980 nutation in longitude and obliquity plus the mean obliquity.
//! - [`nut`]: nutation matrix (mean of date → true of date).
//! - [`prec`]: IAU 1976 precession matrix between two Julian epochs (FK5 system).
//! - [`prebn`]: Newcomb precession matrix between two Besselian epochs (FK4 system).
//! - [`prenut`]: combined precession + nutation matrix.
//! - [`eqeqx`]: equation of the equinoxes.
//!
//! All matrices rotate **vectors** from the first frame to the second: `v_to = M · v_from`.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    constants::{Radian, DPI, RADSEC, T2000},
    time::epj_from_mjd,
};

/// One term of the IAU 1980 nutation series.
///
/// The argument is `Σ mult[i] · F[i]` with the fundamental arguments ordered as
/// `[l, l', F, D, Ω]`. Amplitudes are in units of 0.0001″, with a linear time dependence
/// per Julian century.
#[derive(Debug, Clone, Copy)]
struct NutationTerm {
    mult: [i8; 5],
    dpsi_sin: f64,
    dpsi_sin_t: f64,
    deps_cos: f64,
    deps_cos_t: f64,
}

impl NutationTerm {
    const fn new(
        mult: [i8; 5],
        dpsi_sin: f64,
        dpsi_sin_t: f64,
        deps_cos: f64,
        deps_cos_t: f64,
    ) -> Self {
        NutationTerm {
            mult,
            dpsi_sin,
            dpsi_sin_t,
            deps_cos,
            deps_cos_t,
        }
    }
}

/// IAU 1980 nutation series, largest terms first.
#[rustfmt::skip]
const NUTATION_1980: [NutationTerm; 106] = [
    NutationTerm::new([0, 0, 0, 0, 1], -171996.0, -174.2, 92025.0, 8.9),
    NutationTerm::new([0, 0, 2, -2, 2], -13187.0, -1.6, 5736.0, -3.1),
    NutationTerm::new([0, 0, 2, 0, 2], -2274.0, -0.2, 977.0, -0.5),
    NutationTerm::new([0, 0, 0, 0, 2], 2062.0, 0.2, -895.0, 0.5),
    NutationTerm::new([0, 1, 0, 0, 0], 1426.0, -3.4, 54.0, -0.1),
    NutationTerm::new([1, 0, 0, 0, 0], 712.0, 0.1, -7.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 2], -517.0, 1.2, 224.0, -0.6),
    NutationTerm::new([0, 0, 2, 0, 1], -386.0, -0.4, 200.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 2], -301.0, 0.0, 129.0, -0.1),
    NutationTerm::new([0, -1, 2, -2, 2], 217.0, -0.5, -95.0, 0.3),
    NutationTerm::new([-1, 0, 0, 2, 0], 158.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, 2, -2, 1], 129.0, 0.1, -70.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 2], 123.0, 0.0, -53.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 1], 63.0, 0.1, -33.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 0], 63.0, 0.0, -2.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 2], -59.0, 0.0, 26.0, 0.0),
    NutationTerm::new([-1, 0, 0, 0, 1], -58.0, -0.1, 32.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 1], -51.0, 0.0, 27.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 0], -48.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 1], 46.0, 0.0, -24.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 2], -38.0, 0.0, 16.0, 0.0),
    NutationTerm::new([2, 0, 2, 0, 2], -31.0, 0.0, 13.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 2], 29.0, 0.0, -12.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 0], 29.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, 2, 0, 0], 26.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, -2, 2, 0], 22.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 1], 21.0, 0.0, -10.0, 0.0),
    NutationTerm::new([0, 2, 0, 0, 0], 17.0, -0.1, 0.0, 0.0),
    NutationTerm::new([-1, 0, 0, 2, 1], 16.0, 0.0, -8.0, 0.0),
    NutationTerm::new([0, 2, 2, -2, 2], -16.0, 0.1, 7.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 1], -15.0, 0.0, 9.0, 0.0),
    NutationTerm::new([1, 0, 0, -2, 1], -13.0, 0.0, 7.0, 0.0),
    NutationTerm::new([0, -1, 0, 0, 1], -12.0, 0.0, 6.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 0], -11.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 1], -10.0, 0.0, 5.0, 0.0),
    NutationTerm::new([1, 0, 2, 2, 2], -8.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 2, 2, 1], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 1, 2, 0, 2], 7.0, 0.0, -3.0, 0.0),
    NutationTerm::new([0, -1, 2, 0, 2], -7.0, 0.0, 3.0, 0.0),
    NutationTerm::new([-1, -1, 0, 2, 0], 7.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 0, 2, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 0, 2, 1], -6.0, 0.0, 3.0, 0.0),
    NutationTerm::new([1, 0, 2, -2, 1], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([2, 0, 2, -2, 2], 6.0, 0.0, -3.0, 0.0),
    NutationTerm::new([1, 0, 0, 2, 0], 6.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 2, 0, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, 0, 0, -2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([0, -1, 2, -2, 1], -5.0, 0.0, 3.0, 0.0),
    NutationTerm::new([-1, 1, 0, 0, 0], -5.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 0, -2, 1], 4.0, 0.0, -2.0, 0.0),
    NutationTerm::new([0, 1, 2, -2, 1], 4.0, 0.0, -2.0, 0.0),
    NutationTerm::new([-1, 0, 0, 1, 0], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, 0, 2, 0], 4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 0, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 0, 1, 0], -4.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([0, -1, 2, 2, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, -1, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-1, -1, 2, 2, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([3, 0, 2, 0, 2], -3.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-1, 1, 0, 1, 0], 3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, 0, 0], 3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 0, 0, 0], -3.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -2, 2, -2, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, 0, 0, 1], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-2, 0, 0, 0, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-1, 0, 2, -2, 1], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([1, 1, 2, 0, 2], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 0, 0, 0, 2], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([0, 0, 2, 1, 2], 2.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 2, 4, 2], -2.0, 0.0, 1.0, 0.0),
    NutationTerm::new([3, 0, 0, 0, 0], 2.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 2, 2, 1], -1.0, 0.0, 1.0, 0.0),
    NutationTerm::new([-2, 0, 2, 2, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([1, 1, 2, -2, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-1, 0, 0, 0, 2], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([-2, 0, 2, 4, 2], -1.0, 0.0, 1.0, 0.0),
    NutationTerm::new([2, 0, 2, -2, 1], 1.0, 0.0, -1.0, 0.0),
    NutationTerm::new([0, 0, -2, 0, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, -2, 0, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, -2, 2, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, -2, 2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, -2, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 0, 2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 2, 0, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, -1, 2, 0, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, -1, 0, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 0, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 0, 1, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 2, 2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, -2, 2, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, -2, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 0, 0, 2, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 1, 0, 2, 0], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([2, 0, 2, 2, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, -1, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 0, 4, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-2, 0, 0, 4, 0], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 2, 4, 2], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, 0, 4, 0, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 0, 4, -2, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([3, 0, 2, -2, 2], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([1, 1, 0, -2, 1], -1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([-1, -1, 0, 2, 1], 1.0, 0.0, 0.0, 0.0),
    NutationTerm::new([0, 1, 0, 1, 0], 1.0, 0.0, 0.0, 0.0),
];

/// Elementary rotation of a **vector** by `alpha` around one of the principal axes.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians (positive = direct sense).
/// * `k`: axis index, `0` → X, `1` → Y, `2` → Z (any other value is reduced modulo 3).
///
/// Return
/// ------
/// * the 3×3 matrix `R` such that the rotated vector is `x' = R · x`.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k % 3 {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        _ => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Build a frame-rotation matrix from a sequence of Euler rotations.
///
/// Each `(axis, angle)` pair rotates the **coordinate frame** by `angle` radians around the
/// given axis (so a vector is rotated by `-angle`). The rotations are applied in order: the
/// first pair acts first.
///
/// # See also
/// * [`rotmt`] – elementary vector rotation used for each step
pub fn euler(rotations: &[(usize, Radian)]) -> Matrix3<f64> {
    rotations
        .iter()
        .fold(Matrix3::identity(), |acc, &(axis, angle)| {
            rotmt(-angle, axis) * acc
        })
}

/// Fundamental arguments of the IAU 1980 nutation theory, in radians.
///
/// Order: mean anomaly of the Moon `l`, mean anomaly of the Sun `l'`, argument of latitude of
/// the Moon `F`, mean elongation of the Moon from the Sun `D`, longitude of the ascending
/// node of the Moon `Ω`.
fn fundamental_args(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;

    let dl = (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let dp = (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let df = (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let dd = (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let dn = (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC;

    [dl % DPI, dp % DPI, df % DPI, dd % DPI, dn % DPI]
}

/// Mean obliquity of the ecliptic (IAU 1976), in radians.
fn mean_obliquity(t: f64) -> Radian {
    RADSEC * (84381.448 + (-46.8150 + (-0.00059 + 0.001813 * t) * t) * t)
}

/// Nutation components and mean obliquity (IAU 1980).
///
/// Arguments
/// ---------
/// * `tdb`: TDB as a Modified Julian Date (TT is close enough).
///
/// Return
/// ------
/// * `(Δψ, Δε, ε₀)`: nutation in longitude, nutation in obliquity and mean obliquity of
///   date, all in **radians**.
///
/// The series is summed from the smallest term to the largest to limit round-off.
pub fn nutc(tdb: f64) -> (Radian, Radian, Radian) {
    let t = (tdb - T2000) / 36525.0;
    let args = fundamental_args(t);

    let (dpsi, deps) = NUTATION_1980
        .iter()
        .rev()
        .fold((0.0, 0.0), |(dpsi, deps), term| {
            let arg: f64 = term
                .mult
                .iter()
                .zip(args.iter())
                .map(|(&m, &a)| f64::from(m) * a)
                .sum();
            (
                dpsi + (term.dpsi_sin + term.dpsi_sin_t * t) * arg.sin(),
                deps + (term.deps_cos + term.deps_cos_t * t) * arg.cos(),
            )
        });

    // series amplitudes are in units of 0.1 milliarcsecond
    let units = 1e-4 * RADSEC;
    (dpsi * units, deps * units, mean_obliquity(t))
}

/// Nutation matrix, mean equator and equinox of date → true equator and equinox of date.
///
/// Arguments
/// ---------
/// * `tdb`: TDB as a Modified Julian Date.
pub fn nut(tdb: f64) -> Matrix3<f64> {
    let (dpsi, deps, eps0) = nutc(tdb);
    euler(&[(0, eps0), (2, -dpsi), (0, -(eps0 + deps))])
}

/// Precession matrix between two Julian epochs (IAU 1976, FK5 system).
///
/// Arguments
/// ---------
/// * `ep0`: starting Julian epoch.
/// * `ep1`: ending Julian epoch.
///
/// Return
/// ------
/// * the matrix rotating a mean-equator vector at `ep0` to the mean equator at `ep1`.
///
/// Lieske et al. (1977) expressions for ζ, z and θ, valid for any pair of epochs.
pub fn prec(ep0: f64, ep1: f64) -> Matrix3<f64> {
    let t0 = (ep0 - 2000.0) / 100.0;
    let t = (ep1 - ep0) / 100.0;

    let tas2r = t * RADSEC;
    let w = 2306.2181 + (1.39656 - 0.000139 * t0) * t0;

    let zeta = (w + ((0.30188 - 0.000344 * t0) + 0.017998 * t) * t) * tas2r;
    let z = (w + ((1.09468 + 0.000066 * t0) + 0.018203 * t) * t) * tas2r;
    let theta = ((2004.3109 + (-0.85330 - 0.000217 * t0) * t0)
        + ((-0.42665 - 0.000217 * t0) - 0.041833 * t) * t)
        * tas2r;

    euler(&[(2, -zeta), (1, theta), (2, -z)])
}

/// Precession matrix between two Besselian epochs (Newcomb, FK4 system).
///
/// Arguments
/// ---------
/// * `bep0`: starting Besselian epoch.
/// * `bep1`: ending Besselian epoch.
///
/// Andoyer's expressions for Newcomb's precession, with time measured from B1850.
pub fn prebn(bep0: f64, bep1: f64) -> Matrix3<f64> {
    let bigt = (bep0 - 1850.0) / 100.0;
    let t = (bep1 - bep0) / 100.0;

    let tas2r = t * RADSEC;
    let w = 2303.5548 + (1.39720 + 0.000059 * bigt) * bigt;

    let zeta = (w + (0.30242 - 0.000269 * bigt + 0.017996 * t) * t) * tas2r;
    let z = (w + (1.09478 + 0.000387 * bigt + 0.018324 * t) * t) * tas2r;
    let theta = (2005.1125 + (-0.85294 - 0.000365 * bigt) * bigt
        + (-0.42647 - 0.000365 * bigt - 0.041802 * t) * t)
        * tas2r;

    euler(&[(2, -zeta), (1, theta), (2, -z)])
}

/// Combined precession and nutation matrix.
///
/// Arguments
/// ---------
/// * `epoch`: Julian epoch of the mean equator and equinox.
/// * `tdb`: TDB (MJD) of the true equator and equinox.
///
/// Return
/// ------
/// * the matrix rotating mean coordinates at `epoch` into true coordinates of date.
pub fn prenut(epoch: f64, tdb: f64) -> Matrix3<f64> {
    nut(tdb) * prec(epoch, epj_from_mjd(tdb))
}

/// Equation of the equinoxes (IAU 1994), in radians.
///
/// Apparent minus mean sidereal time: `Δψ·cos ε₀` plus the two small terms in the longitude
/// of the lunar node.
///
/// Arguments
/// ---------
/// * `tdb`: TDB as a Modified Julian Date.
pub fn eqeqx(tdb: f64) -> Radian {
    let t = (tdb - T2000) / 36525.0;
    let node = fundamental_args(t)[4];
    let (dpsi, _, eps0) = nutc(tdb);

    dpsi * eps0.cos() + RADSEC * (0.00264 * node.sin() + 0.000063 * (node + node).sin())
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_orthonormal(m: &Matrix3<f64>) {
        let id = m * m.transpose();
        assert_abs_diff_eq!(id, Matrix3::identity(), epsilon = 1e-14);
    }

    #[test]
    fn test_nutation_table_size() {
        assert_eq!(NUTATION_1980.len(), 106);
        assert_eq!(NUTATION_1980[0].mult, [0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_nutc() {
        let (dpsi, deps, eps0) = nutc(T2000);
        assert_relative_eq!(dpsi / RADSEC, -13.923385169502602, max_relative = 1e-13);
        assert_relative_eq!(deps / RADSEC, -5.773808263765919, max_relative = 1e-13);
        assert_relative_eq!(eps0 / RADSEC, 84381.448, max_relative = 1e-15);

        let (dpsi, deps, _) = nutc(60000.0);
        assert_relative_eq!(dpsi / RADSEC, -9.27490746466071, max_relative = 1e-12);
        assert_relative_eq!(deps / RADSEC, 7.736184490904768, max_relative = 1e-12);
    }

    #[test]
    fn test_euler_frame_rotation() {
        // rotating the frame by +90 deg around z brings the old y axis onto the new x axis
        let m = euler(&[(2, std::f64::consts::FRAC_PI_2)]);
        let v = m * Vector3::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(v, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_prec() {
        assert_abs_diff_eq!(prec(2000.0, 2000.0), Matrix3::identity(), epsilon = 1e-15);

        let p = prec(2000.0, 2050.0);
        assert_orthonormal(&p);
        // inverse precession is the transpose
        assert_abs_diff_eq!(prec(2050.0, 2000.0), p.transpose(), epsilon = 1e-12);
        // the truncated series compose to a few 1e-12 rad
        assert_abs_diff_eq!(
            prec(2025.0, 2050.0) * prec(2000.0, 2025.0),
            p,
            epsilon = 1e-10
        );
        // general precession in longitude is about 50.3"/yr, i.e. ~0.7 deg in 50 years;
        // the pole moves in declination by ~20"/yr
        let pole = p.transpose() * Vector3::z();
        assert_relative_eq!(pole.x.atan2(pole.z) / RADSEC, 1002.1, epsilon = 0.5);
    }

    #[test]
    fn test_prebn() {
        let p = prebn(1950.0, 1950.0);
        assert_abs_diff_eq!(p, Matrix3::identity(), epsilon = 1e-15);

        let p = prebn(1950.0, 1850.0);
        assert_orthonormal(&p);
        assert_abs_diff_eq!(prebn(1850.0, 1950.0), p.transpose(), epsilon = 1e-12);
    }

    #[test]
    fn test_nut_matrix_j2000() {
        let ref_nut = Matrix3::new(
            0.9999999977217079,
            6.19323109890795e-5,
            2.6850942970991024e-5,
            -6.193306258211379e-5,
            0.9999999976903892,
            2.799138089948361e-5,
            -2.6849209338068913e-5,
            -2.7993043796858963e-5,
            0.9999999992477547,
        );
        assert_abs_diff_eq!(nut(T2000), ref_nut, epsilon = 1e-14);
    }

    #[test]
    fn test_nut_and_prenut() {
        let n = nut(T2000);
        assert_orthonormal(&n);
        let (dpsi, _, eps0) = nutc(T2000);
        // first order: the equinox moves along the ecliptic by dpsi
        assert_relative_eq!(n[(0, 1)], -dpsi * eps0.cos(), max_relative = 1e-6);

        let pn = prenut(2000.0, T2000);
        assert_abs_diff_eq!(pn, n, epsilon = 1e-15);
    }

    #[test]
    fn test_eqeqx() {
        let (dpsi, _, eps0) = nutc(T2000);
        let ee = eqeqx(T2000);
        assert_abs_diff_eq!(ee, dpsi * eps0.cos(), epsilon = 0.003 * RADSEC);
        assert!(ee.abs() < 20.0 * RADSEC);
    }
}
