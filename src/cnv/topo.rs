//! # Geocentric ⟷ topocentric
//!
//! Moves the point of view from the centre of the Earth to the observing site: diurnal
//! aberration (the site moves with the Earth's rotation) and diurnal parallax (the site is
//! offset from the geocentre). The topocentric frame is the local horizon frame:
//!
//! - x towards the south horizon (azimuth 0),
//! - y towards the east horizon (azimuth 90),
//! - z towards the zenith.
//!
//! Diurnal aberration is applied along the east–west axis only, which is exact for a site
//! velocity perpendicular to the local meridian.

use nalgebra::Vector3;

use crate::{
    constants::Degree,
    observers::ObserverData,
    vector_math::{cosd, sind},
};

/// Convert a geocentric apparent position to topocentric (az/alt) coordinates.
///
/// Arguments
/// ---------
/// * `geo_p`: geocentric apparent position (AU), true equator and equinox of date.
/// * `last`: local apparent sidereal time (degrees).
/// * `obs`: site geometry.
///
/// Return
/// ------
/// * the topocentric position (AU) in the local horizon frame.
///
/// # See also
/// * [`geo_from_topo`] – the inverse conversion
/// * [`last_from_ut1`](crate::time::last_from_ut1) – local apparent sidereal time
pub fn topo_from_geo(geo_p: &Vector3<f64>, last: Degree, obs: &ObserverData) -> Vector3<f64> {
    let (sin_last, cos_last) = (sind(last), cosd(last));

    // rotate to the (-HA, Dec) frame: x on the local meridian
    let mut pos_a = Vector3::new(
        cos_last * geo_p.x + sin_last * geo_p.y,
        -sin_last * geo_p.x + cos_last * geo_p.y,
        geo_p.z,
    );

    // diurnal aberration
    pos_a.y += obs.diur_ab_mag * pos_a.norm();

    // diurnal parallax
    let pos_b = pos_a - obs.p;

    let (sin_lat, cos_lat) = (sind(obs.latitude), cosd(obs.latitude));
    Vector3::new(
        sin_lat * pos_b.x - cos_lat * pos_b.z,
        pos_b.y,
        cos_lat * pos_b.x + sin_lat * pos_b.z,
    )
}

/// Convert a topocentric (az/alt) position back to geocentric apparent coordinates.
///
/// Arguments
/// ---------
/// * `topo_p`: topocentric position (AU) in the local horizon frame.
/// * `last`: local apparent sidereal time (degrees).
/// * `obs`: site geometry.
///
/// Return
/// ------
/// * the geocentric apparent position (AU), true equator and equinox of date.
pub fn geo_from_topo(topo_p: &Vector3<f64>, last: Degree, obs: &ObserverData) -> Vector3<f64> {
    let (sin_lat, cos_lat) = (sind(obs.latitude), cosd(obs.latitude));
    let pos_b = Vector3::new(
        sin_lat * topo_p.x + cos_lat * topo_p.z,
        topo_p.y,
        -cos_lat * topo_p.x + sin_lat * topo_p.z,
    );

    let mut pos_a = pos_b + obs.p;

    // pos_b.y = pos_a.y + k·|pos_a|: solve the quadratic for |pos_a|
    let k = obs.diur_ab_mag;
    let one_m_k2 = 1.0 - k * k;
    let mag_a = (-k * pos_a.y + (k * k * pos_a.y * pos_a.y + one_m_k2 * pos_a.norm_squared()).sqrt())
        / one_m_k2;
    pos_a.y -= k * mag_a;

    let (sin_last, cos_last) = (sind(last), cosd(last));
    Vector3::new(
        cos_last * pos_a.x - sin_last * pos_a.y,
        sin_last * pos_a.x + cos_last * pos_a.y,
        pos_a.z,
    )
}
