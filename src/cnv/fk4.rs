//! # FK4 ⟷ ICRS
//!
//! Conversion between FK4 mean positions at any Besselian equinox and ICRS (taken as FK5
//! J2000). The change of frame itself is a constant 6×6 matrix acting on the stacked
//! `(position, velocity)` at B1950; precession to and from B1950 uses [`prebn`], and the
//! e-terms of aberration baked into FK4 positions are removed or restored with [`etrms`].
//!
//! Units: positions in AU, FK4 velocities in AU per Besselian year, ICRS velocities in AU per
//! Julian year. The frame matrix also carries the motion from B1950 to J2000, so the ICRS
//! result is the position **at J2000**.

use nalgebra::{Matrix3, Vector3};

use crate::{
    apparent::etrms,
    constants::E_TERM_ITERATIONS,
    earth_orientation::prebn,
    time::epj_from_epb,
};

type Block = [[f64; 3]; 3];

// B1950 FK4 → J2000 ICRS, position/velocity blocks
const FK4_TO_ICRS_PP: Block = [
    [0.999925678186902, -0.011182059642247, -0.00485794655896],
    [0.011182059571766, 0.999937478448132, -0.000027176441185],
    [0.004857946721186, -0.000027147426498, 0.99998819973877],
];
const FK4_TO_ICRS_PV: Block = [
    [49.9975652422434, -0.5591148629065, -0.24290038365],
    [0.5591148476355, 49.9981856815, -0.001358878498],
    [0.24290038763, -0.001358849482, 49.999412207505],
];
const FK4_TO_ICRS_VP: Block = [
    [-0.262600477903207e-10, -0.115370204968080e-07, 0.211489087156010e-07],
    [0.115345713338304e-07, -0.128997445928004e-09, -0.413922822287973e-09],
    [-0.211432713109975e-07, 0.594337564639027e-09, 0.102737391643701e-09],
];
const FK4_TO_ICRS_VV: Block = [
    [0.999947035154614, -0.011182506121805, -0.004857669684959],
    [0.011182506007244, 0.999958833818833, -0.000027184471371],
    [0.00485766994865, -0.000027137309539, 1.00000956036356],
];

// J2000 ICRS → B1950 FK4, the exact inverse of the 6×6 matrix above
const ICRS_TO_FK4_PP: Block = [
    [9.999256794998581e-01, 1.118148284073820e-02, 4.859003889264518e-03],
    [-1.118148278840506e-02, 9.999374848980302e-01, -2.717714351129098e-05],
    [-4.859003981872111e-03, -2.715574538669906e-05, 9.999881946018289e-01],
];
const ICRS_TO_FK4_PV: Block = [
    [-4.999649734846372e+01, -5.590896890997685e-01, -2.429291585189338e-01],
    [5.590897073657543e-01, -4.999711793944714e+01, 1.358363204475959e-03],
    [2.429291481490061e-01, 1.359622211015032e-03, -4.999834412650188e+01],
];
const ICRS_TO_FK4_VP: Block = [
    [-2.625948747860982e-11, 1.153432497186924e-08, -2.114281972092205e-08],
    [-1.153677408251452e-08, -1.289946907267694e-10, 5.943248704366689e-10],
    [2.114845700511976e-08, -4.139139814886471e-10, 1.027351973215011e-10],
];
const ICRS_TO_FK4_VV: Block = [
    [9.999043220430540e-01, 1.118145160854402e-02, 4.858519563539535e-03],
    [-1.118145160102505e-02, 9.999161253401062e-01, -2.716586583419347e-05],
    [-4.858519608767125e-03, -2.716261432960104e-05, 9.999668381313673e-01],
];

#[inline]
fn block(rows: &Block) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| rows[i][j])
}

/// Convert an FK4 mean position and velocity to ICRS.
///
/// Arguments
/// ---------
/// * `fk4_p`: FK4 position at `fk4_epoch` (AU), e-terms included.
/// * `fk4_v`: FK4 velocity (AU per Besselian year).
/// * `fk4_epoch`: Besselian epoch of the equinox and of the position.
///
/// Return
/// ------
/// * `(icrs_p, icrs_v)`: ICRS position at J2000 (AU) and velocity (AU per Julian year).
///
/// The e-terms are removed using the magnitude of the input position. Their small
/// contribution to the proper motion is ignored.
///
/// # See also
/// * [`fk4_from_icrs`] – the inverse conversion
/// * [`icrs_from_fixed_fk4`] – variant for objects with no known space motion
pub fn icrs_from_fk4(
    fk4_p: &Vector3<f64>,
    fk4_v: &Vector3<f64>,
    fk4_epoch: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let e_terms = etrms(fk4_epoch);
    let mean_p = fk4_p - e_terms * fk4_p.norm();

    // move to B1950, then precess to the B1950 equinox
    let temp_p = mean_p + fk4_v * (1950.0 - fk4_epoch);
    let prec_mat = prebn(fk4_epoch, 1950.0);
    let b1950_p = prec_mat * temp_p;
    let b1950_v = prec_mat * fk4_v;

    let icrs_p = block(&FK4_TO_ICRS_PP) * b1950_p + block(&FK4_TO_ICRS_PV) * b1950_v;
    let icrs_v = block(&FK4_TO_ICRS_VP) * b1950_p + block(&FK4_TO_ICRS_VV) * b1950_v;
    (icrs_p, icrs_v)
}

/// Convert an ICRS position and velocity to an FK4 mean position.
///
/// Arguments
/// ---------
/// * `icrs_p`: ICRS position at J2000 (AU).
/// * `icrs_v`: ICRS velocity (AU per Julian year).
/// * `fk4_epoch`: Besselian epoch of the FK4 equinox and of the returned position.
///
/// Return
/// ------
/// * `(fk4_p, fk4_v)`: FK4 position (AU, e-terms included) and velocity (AU per Besselian year).
///
/// The e-terms scale with the magnitude of the result, so they are folded in by a fixed
/// number ([`E_TERM_ITERATIONS`]) of fixed-point iterations `p = mean_p + e·|p|`.
pub fn fk4_from_icrs(
    icrs_p: &Vector3<f64>,
    icrs_v: &Vector3<f64>,
    fk4_epoch: f64,
) -> (Vector3<f64>, Vector3<f64>) {
    let b1950_p = block(&ICRS_TO_FK4_PP) * icrs_p + block(&ICRS_TO_FK4_PV) * icrs_v;
    let b1950_v = block(&ICRS_TO_FK4_VP) * icrs_p + block(&ICRS_TO_FK4_VV) * icrs_v;

    let temp_p = b1950_p + b1950_v * (fk4_epoch - 1950.0);
    let prec_mat = prebn(1950.0, fk4_epoch);
    let mean_p = prec_mat * temp_p;
    let fk4_v = prec_mat * b1950_v;

    let e_terms = etrms(fk4_epoch);
    let fk4_p = (0..E_TERM_ITERATIONS).fold(mean_p, |p, _| mean_p + e_terms * p.norm());

    (fk4_p, fk4_v)
}

/// Convert the FK4 position of a fixed object to ICRS.
///
/// FK4 is slowly rotating with respect to the inertial frame, so an object with zero FK4
/// proper motion has a small fictitious ICRS proper motion. This variant treats the object as
/// fixed on the sky: that motion is removed by moving the J2000 result back to `fk4_epoch`.
///
/// Arguments
/// ---------
/// * `fk4_p`: FK4 position at `fk4_epoch` (AU), e-terms included.
/// * `fk4_epoch`: Besselian epoch of the equinox and of the position.
///
/// Return
/// ------
/// * the ICRS position at the date of `fk4_epoch` (AU). The ICRS velocity is zero.
pub fn icrs_from_fixed_fk4(fk4_p: &Vector3<f64>, fk4_epoch: f64) -> Vector3<f64> {
    let e_terms = etrms(fk4_epoch);
    let mean_p = fk4_p - e_terms * fk4_p.norm();
    let b1950_p = prebn(fk4_epoch, 1950.0) * mean_p;

    let temp_p = block(&FK4_TO_ICRS_PP) * b1950_p;
    let temp_v = block(&FK4_TO_ICRS_VP) * b1950_p;

    temp_p + temp_v * (epj_from_epb(fk4_epoch) - 2000.0)
}
