#![allow(dead_code)]

use approx::assert_relative_eq;
use coordconv::spherical::ang_sep;
use coordconv::vector_math::asind;
use coordconv::{CoordConvParams, ObserverData, RefractionCoeffs, SphericalPos, StarState};
use rand::rngs::StdRng;
use rand::Rng;

/// Apache Point Observatory
pub fn apo() -> ObserverData {
    ObserverData::new(-105.820417, 32.780361, 2788.0).unwrap()
}

pub fn apo_params() -> CoordConvParams {
    CoordConvParams::builder()
        .observer(apo())
        .refraction(RefractionCoeffs::new(0.0161, -1.8e-5))
        .build()
        .unwrap()
}

/// Random star away from the poles, one in five at infinity.
pub fn random_star(rng: &mut StdRng) -> StarState {
    let lon = rng.random::<f64>() * 360.0;
    let lat = asind(rng.random_range(-0.99..0.99));
    let pm = [
        rng.random_range(-1000.0..1000.0),
        rng.random_range(-1000.0..1000.0),
    ];
    if rng.random::<f64>() < 0.2 {
        // no measurable space motion at infinity
        return StarState::fixed(SphericalPos::new(lon, lat));
    }
    let parallax = rng.random_range(1e-3..0.5);
    let rad_vel = rng.random_range(-100.0..100.0);
    StarState::new(SphericalPos::new(lon, lat), pm, parallax, rad_vel)
}

pub fn assert_star_close(actual: &StarState, expected: &StarState, pos_eps: f64, pm_eps: f64) {
    let sep = ang_sep(&actual.pos, &expected.pos);
    assert!(
        sep <= pos_eps,
        "separation {sep}° between {actual:?} and {expected:?}"
    );
    assert_relative_eq!(actual.pm[0], expected.pm[0], epsilon = pm_eps);
    assert_relative_eq!(actual.pm[1], expected.pm[1], epsilon = pm_eps);
    assert_relative_eq!(
        actual.parallax,
        expected.parallax,
        epsilon = 1e-12,
        max_relative = 1e-9
    );
    assert_relative_eq!(actual.rad_vel, expected.rad_vel, epsilon = 1e-5);
}
