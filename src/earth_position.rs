//! # Earth position and velocity (Stumpff series)
//!
//! Barycentric and heliocentric position and velocity of the Earth from Stumpff's (1979,
//! 1980) truncated series, the model behind the classical `EVP` routine.
//!
//! Accuracy is about 4e-8 AU/day (velocity) and 1e-4 AU (barycentric position), enough for
//! annual aberration and parallax; no planetary ephemeris is needed.
//!
//! Results are referred to the mean equator and equinox of date (corrected to the FK5
//! equinox), or of the Julian epoch `deqx` when one is requested.

use nalgebra::Vector3;

use crate::{earth_orientation::prec, time::epj_from_mjd};

/// Earth state returned by [`evp`].
///
/// Positions are in AU, velocities in AU per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthState {
    pub bary_vel: Vector3<f64>,
    pub bary_pos: Vector3<f64>,
    pub helio_vel: Vector3<f64>,
    pub helio_pos: Vector3<f64>,
}

const DC2PI: f64 = 6.2831853071796;
const CC2PI: f64 = 6.283185;

/// FK4 → FK5 equinox correction, seconds of time → radians
const DS2R: f64 = 0.7272205216643e-4;

/// B1950.0 as a Julian epoch
const B1950_EPJ: f64 = 1949.9997904423;

/// Fast changing elements: mean longitude of the EMB, then the mean anomaly of the EMB,
/// Earth's mean elongation from the Moon, Moon's argument of latitude, and the mean
/// longitudes of Venus, Mars, Jupiter and Saturn.
#[rustfmt::skip]
const DCFEL: [[f64; 3]; 8] = [
    [1.7400353e0,  6.2833195099091e+02,  5.2796e-6],
    [6.2565836e0,  6.2830194572674e+02, -2.6180e-6],
    [4.7199666e0,  8.3997091449254e+03, -1.9780e-5],
    [1.9636505e-1, 8.4334662911720e+03, -5.6044e-5],
    [4.1547339e0,  5.2993466764997e+01,  5.8845e-6],
    [4.6524223e0,  2.1354275911213e+01,  5.6797e-6],
    [4.2620486e0,  7.5025342197656e+00,  5.5317e-6],
    [1.4740694e0,  3.8377331909193e+00,  5.6093e-6],
];

/// Mean obliquity of date
const DCEPS: [f64; 3] = [4.093198e-1, -2.271110e-4, -2.860401e-8];

/// Slowly changing elements: EMB eccentricity, perihelia of the planets, their
/// eccentricities and inclinations.
#[rustfmt::skip]
const CCSEL: [[f64; 3]; 17] = [
    [1.675104e-2, -4.179579e-5, -1.260516e-7],
    [2.220221e-1,  2.809917e-2,  1.852532e-5],
    [1.589963e0,   3.418075e-2,  1.430200e-5],
    [2.994089e0,   2.590824e-2,  4.155840e-6],
    [8.155457e-1,  2.486352e-2,  6.836840e-6],
    [1.735614e0,   1.763719e-2,  6.370440e-6],
    [1.968564e0,   1.524020e-2, -2.517152e-6],
    [1.282417e0,   8.703393e-3,  2.289292e-5],
    [2.280820e0,   1.918010e-2,  4.484520e-6],
    [4.833473e-2,  1.641773e-4, -4.654200e-7],
    [5.589232e-2, -3.455092e-4, -7.388560e-7],
    [4.634443e-2, -2.658234e-5,  7.757000e-8],
    [8.997041e-3,  6.329728e-6, -1.939256e-9],
    [2.284178e-2, -9.941590e-5,  6.787400e-8],
    [4.350267e-2, -6.839749e-5, -2.714956e-7],
    [1.348204e-2,  1.091504e-5,  6.903760e-7],
    [3.106570e-2, -1.665665e-4, -1.590188e-7],
];

/// Arguments of the short-period planetary perturbations
#[rustfmt::skip]
const DCARGS: [[f64; 2]; 15] = [
    [5.0974222e0, -7.8604195454652e+02],
    [3.9584962e0, -5.7533848094674e+02],
    [1.6338070e0, -1.1506769618935e+03],
    [2.5487111e0, -3.9302097727326e+02],
    [4.9255514e0, -5.8849265665348e+02],
    [1.3363463e0, -5.5076098609303e+02],
    [1.6072053e0, -5.2237501616674e+02],
    [1.3629480e0, -1.1790629318198e+03],
    [5.5657014e0, -1.0977134971135e+03],
    [5.0708205e0, -1.5774000881978e+02],
    [3.9318944e0,  5.2963464780000e+01],
    [4.8989497e0,  3.9809289073258e+01],
    [1.3097446e0,  7.7540959633708e+01],
    [3.5147141e0,  7.9618578146517e+01],
    [3.5413158e0, -5.4868336758022e+02],
];

/// Amplitudes of the short-period planetary perturbations
#[rustfmt::skip]
const CCAMPS: [[f64; 5]; 15] = [
    [-2.279594e-5,  1.407414e-5,  8.273188e-6,  1.340565e-5, -2.490817e-7],
    [-3.494537e-5,  2.860401e-7,  1.289448e-7,  1.627237e-5, -1.823138e-7],
    [ 6.593466e-7,  1.322572e-5,  9.258695e-6, -4.674248e-7, -3.646275e-7],
    [ 1.140767e-5, -2.049792e-5, -4.747930e-6, -2.638763e-6, -1.245408e-7],
    [ 9.516893e-6, -2.748894e-6, -1.319381e-6, -4.549908e-6, -1.864821e-7],
    [ 7.310990e-6, -1.924710e-6, -8.772849e-7, -3.334143e-6, -1.745256e-7],
    [-2.603449e-6,  7.359472e-6,  3.168357e-6,  1.119056e-6, -1.655307e-7],
    [-3.228859e-6,  1.308997e-7,  1.013137e-7,  2.403899e-6, -3.736225e-7],
    [ 3.442177e-7,  2.671323e-6,  1.832858e-6, -2.394688e-7, -3.478444e-7],
    [ 8.702406e-6, -8.421214e-6, -1.372341e-6, -1.455234e-6, -4.998479e-8],
    [-1.488378e-6, -1.251789e-5,  5.226868e-7, -2.049301e-7,  0.0],
    [-8.043059e-6, -2.991300e-6,  1.473654e-7, -3.154542e-7,  0.0],
    [ 3.699128e-6, -3.316126e-6,  2.901257e-7,  3.407826e-7,  0.0],
    [ 2.550120e-6, -1.241123e-6,  9.901116e-8,  2.210482e-7,  0.0],
    [-6.351059e-7,  2.341650e-6,  1.061492e-6,  2.878231e-7,  0.0],
];

/// Secular perturbations in longitude
const CCSEC3: f64 = -7.757020e-8;
#[rustfmt::skip]
const CCSEC: [[f64; 3]; 4] = [
    [1.289600e-6, 5.550147e-1, 2.076942e0],
    [3.102810e-5, 4.035027e0,  3.525565e-1],
    [9.124190e-6, 9.990265e-1, 2.622706e0],
    [9.793240e-7, 5.508259e0,  1.559103e1],
];

/// Sidereal rate in longitude, rate in mean anomaly
const DCSLD: f64 = 1.990987e-7;
const CCSGD: f64 = 1.990969e-7;

/// Lunar contribution
const CCKM: f64 = 3.122140e-5;
const CCMLD: f64 = 2.661699e-6;
const CCFDI: f64 = 2.399485e-7;

/// Arguments of the perturbations of the motion of the Moon
#[rustfmt::skip]
const DCARGM: [[f64; 2]; 3] = [
    [5.1679830e0,  8.3286911095275e+03],
    [5.4913150e0, -7.2140632838100e+03],
    [5.9598530e0,  1.5542754389685e+04],
];

/// Amplitudes of the perturbations of the Moon
#[rustfmt::skip]
const CCAMPM: [[f64; 4]; 3] = [
    [ 1.097594e-1, 2.896773e-7, 5.450474e-2,  1.438491e-7],
    [-2.223581e-2, 5.083103e-8, 1.002548e-2, -2.291823e-8],
    [ 1.148966e-2, 5.658888e-8, 8.249439e-3,  4.063015e-8],
];

/// a·m·dl/dt for Venus, Mars, Jupiter, Saturn; 1 − mass of the Earth-Moon system
const CCPAMV: [f64; 4] = [8.326827e-11, 1.843484e-11, 1.988712e-12, 1.881276e-12];
const DC1MME: f64 = 0.99999696;

/// a·m for the planets; inclination of the Moon's orbit
const CCPAM: [f64; 4] = [4.960906e-3, 2.727436e-3, 8.392311e-4, 1.556861e-3];
const CCIM: f64 = 8.978749e-2;

/// Rotate the `y`/`z` components from the ecliptic to the mean equator of date.
#[inline]
fn to_equator(v: Vector3<f64>, cos_eps: f64, sin_eps: f64) -> Vector3<f64> {
    Vector3::new(
        v.x,
        cos_eps * v.y - sin_eps * v.z,
        sin_eps * v.y + cos_eps * v.z,
    )
}

/// Apply the FK4 → FK5 equinox correction (a small rotation around z).
#[inline]
fn equinox_correction(v: Vector3<f64>, deqcor: f64) -> Vector3<f64> {
    Vector3::new(v.x - deqcor * v.y, v.y + deqcor * v.x, v.z)
}

/// Barycentric and heliocentric position and velocity of the Earth.
///
/// Arguments
/// ---------
/// * `tdb`: TDB as a Modified Julian Date (TT is close enough).
/// * `deqx`: Julian epoch of the mean equator and equinox of the results; any value `≤ 0`
///   means "mean equator and equinox of date".
///
/// Return
/// ------
/// * an [`EarthState`]: positions in AU, velocities in AU/s.
///
/// # See also
/// * [`mappa`](crate::apparent::mappa) – packs these results for the apparent-place conversions
pub fn evp(tdb: f64, deqx: f64) -> EarthState {
    // time in Julian centuries since 1900 January 0.5
    let dt = (tdb - 15019.5) / 36525.0;
    let dtsq = dt * dt;

    // fast changing elements: the first is the mean longitude of the EMB
    let dml = (DCFEL[0][0] + dt * DCFEL[0][1] + dtsq * DCFEL[0][2]) % DC2PI;
    let mut forbel = [0.0_f64; 7];
    for (k, elem) in forbel.iter_mut().enumerate() {
        let c = &DCFEL[k + 1];
        *elem = (c[0] + dt * c[1] + dtsq * c[2]) % DC2PI;
    }
    let deps = (DCEPS[0] + dt * DCEPS[1] + dtsq * DCEPS[2]) % DC2PI;

    let mut sorbel = [0.0_f64; 17];
    for (elem, c) in sorbel.iter_mut().zip(CCSEL.iter()) {
        *elem = (c[0] + dt * c[1] + dtsq * c[2]) % CC2PI;
    }

    // secular perturbations in longitude
    let mut sn = [0.0_f64; 4];
    for (s, c) in sn.iter_mut().zip(CCSEC.iter()) {
        *s = ((c[1] + dt * c[2]) % CC2PI).sin();
    }

    // periodic perturbations of the EMB
    let mut pertl = CCSEC[0][0] * sn[0]
        + CCSEC[1][0] * sn[1]
        + (CCSEC[2][0] + dt * CCSEC3) * sn[2]
        + CCSEC[3][0] * sn[3];
    let mut pertld = 0.0;
    let mut pertr = 0.0;
    let mut pertrd = 0.0;
    for (k, (args, amps)) in DCARGS.iter().zip(CCAMPS.iter()).enumerate() {
        let a = (args[0] + dt * args[1]) % DC2PI;
        let (sina, cosa) = a.sin_cos();
        pertl += amps[0] * cosa + amps[1] * sina;
        pertr += amps[2] * cosa + amps[3] * sina;
        if k < 10 {
            pertld += (amps[1] * cosa - amps[0] * sina) * amps[4];
            pertrd += (amps[3] * cosa - amps[2] * sina) * amps[4];
        }
    }

    // elliptic part of the motion of the EMB
    let e = sorbel[0];
    let g = forbel[0];
    let esq = e * e;
    let dparam = 1.0 - esq;
    let twoe = e + e;
    let twog = g + g;
    let phi = twoe
        * ((1.0 - esq * 0.125) * g.sin()
            + e * 0.625 * twog.sin()
            + esq * 0.5416667 * (g + twog).sin());
    let f = g + phi;
    let (sinf, cosf) = f.sin_cos();
    let dpsi = dparam / (1.0 + e * cosf);
    let phid = twoe * CCSGD * ((1.0 + esq * 1.5) * cosf + e * (1.25 - sinf * sinf * 0.5));
    let psid = CCSGD * e * sinf / dparam.sqrt();

    // perturbed heliocentric motion of the EMB
    let d1pdro = 1.0 + pertr;
    let drd = d1pdro * (psid + dpsi * pertrd);
    let drld = d1pdro * dpsi * (DCSLD + phid + pertld);
    let dtl = (dml + phi + pertl) % DC2PI;
    let (dsinls, dcosls) = dtl.sin_cos();
    let mut dxhd = drd * dcosls - drld * dsinls;
    let mut dyhd = drd * dsinls + drld * dcosls;

    // eccentricity, evection and variation of the geocentric motion of the Moon
    let mut pertl = 0.0;
    let mut pertld = 0.0;
    let mut pertp = 0.0;
    let mut pertpd = 0.0;
    for (args, amps) in DCARGM.iter().zip(CCAMPM.iter()) {
        let a = (args[0] + dt * args[1]) % DC2PI;
        let (sina, cosa) = a.sin_cos();
        pertl += amps[0] * sina;
        pertld += amps[1] * cosa;
        pertp += amps[2] * cosa;
        pertpd -= amps[3] * sina;
    }

    // heliocentric motion of the Earth
    let tl = forbel[1] + pertl;
    let (sinlm, coslm) = tl.sin_cos();
    let sigma = CCKM / (1.0 + pertp);
    let a = sigma * (CCMLD + pertld);
    let b = sigma * pertpd;
    dxhd += a * sinlm + b * coslm;
    dyhd += -a * coslm + b * sinlm;
    let dzhd = -sigma * CCFDI * forbel[2].cos();

    // barycentric motion of the Earth
    let mut dxbd = dxhd * DC1MME;
    let mut dybd = dyhd * DC1MME;
    let mut dzbd = dzhd * DC1MME;
    for k in 0..4 {
        let plon = forbel[k + 3];
        let pomg = sorbel[k + 1];
        let pecc = sorbel[k + 9];
        let tl = (plon + 2.0 * pecc * (plon - pomg).sin()) % CC2PI;
        dxbd += CCPAMV[k] * (tl.sin() + pecc * pomg.sin());
        dybd -= CCPAMV[k] * (tl.cos() + pecc * pomg.cos());
        dzbd -= CCPAMV[k] * sorbel[k + 13] * (plon - sorbel[k + 5]).cos();
    }

    // heliocentric position of the Earth
    let dr = dpsi * d1pdro;
    let flatm = CCIM * forbel[2].sin();
    let a = sigma * flatm.cos();
    let dxh = dr * dcosls - a * coslm;
    let dyh = dr * dsinls - a * sinlm;
    let dzh = -sigma * flatm.sin();

    // barycentric position of the Earth
    let mut dxb = dxh * DC1MME;
    let mut dyb = dyh * DC1MME;
    let mut dzb = dzh * DC1MME;
    for k in 0..4 {
        let flat = sorbel[k + 13] * (forbel[k + 3] - sorbel[k + 5]).sin();
        let a = CCPAM[k] * (1.0 - sorbel[k + 9] * (forbel[k + 3] - sorbel[k + 1]).cos());
        let b = a * flat.cos();
        dxb -= b * forbel[k + 3].cos();
        dyb -= b * forbel[k + 3].sin();
        dzb -= a * flat.sin();
    }

    // ecliptic → mean equator of date, then FK4 → FK5 equinox
    let (sin_eps, cos_eps) = deps.sin_cos();
    let depj = epj_from_mjd(tdb);
    let deqcor = DS2R * (0.035 + 0.00085 * (depj - B1950_EPJ));
    let fix = |v: Vector3<f64>| equinox_correction(to_equator(v, cos_eps, sin_eps), deqcor);

    let mut state = EarthState {
        bary_vel: fix(Vector3::new(dxbd, dybd, dzbd)),
        bary_pos: fix(Vector3::new(dxb, dyb, dzb)),
        helio_vel: fix(Vector3::new(dxhd, dyhd, dzhd)),
        helio_pos: fix(Vector3::new(dxh, dyh, dzh)),
    };

    if deqx > 0.0 {
        let prema = prec(depj, deqx);
        state.bary_vel = prema * state.bary_vel;
        state.bary_pos = prema * state.bary_pos;
        state.helio_vel = prema * state.helio_vel;
        state.helio_pos = prema * state.helio_pos;
    }

    state
}
