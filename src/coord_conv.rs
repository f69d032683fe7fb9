//! # Coordinate conversion orchestrator
//!
//! [`coord_conv`] converts an object between any two of the supported [`CoordSys`] at any
//! two dates, going through ICRS:
//!
//! ```text
//! from_sys ──► ICRS (at some Julian epoch) ──► to_sys
//! ```
//!
//! Next to the object itself, a second point [`CoordConvParams::off_mag`] degrees away along
//! `from_dir` is carried through the same chain. Its direction and distance at the end give
//! the on-sky rotation (`to_dir`) and the scale change of the conversion.
//!
//! ## Dates
//!
//! The meaning of `from_date` / `to_date` depends on the system:
//!
//! | System | Date |
//! |---|---|
//! | [`CoordSys::ICRS`] | Julian epoch of the position |
//! | [`CoordSys::FK5`] | Julian epoch of the equinox and of the position |
//! | [`CoordSys::FK4`] | Besselian epoch of the equinox and of the position |
//! | [`CoordSys::Galactic`] | Julian epoch of the position |
//! | [`CoordSys::Geocentric`], [`CoordSys::Topocentric`], [`CoordSys::Observed`] | UT1 as a Modified Julian Date |
//!
//! ## Apparent systems
//!
//! Geocentric, topocentric and observed positions carry no space motion: proper motion and
//! radial velocity given in these systems are ignored, and are reported as zero when
//! converting to them. The topocentric and observed systems use azimuth (0 = south, 90 = east)
//! and altitude, and need the site geometry [`ObserverData`]; the observed system also needs
//! the [`RefractionCoeffs`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use coordconv::coord_conv::{coord_conv, CoordConvParams, CoordSys};
//! use coordconv::observers::{ObserverData, RefractionCoeffs};
//! use coordconv::spherical::SphericalPos;
//! use coordconv::sph_conv::StarState;
//!
//! let params = CoordConvParams::builder()
//!     .observer(ObserverData::new(-105.820417, 32.780361, 2788.0)?)
//!     .refraction(RefractionCoeffs::new(0.0161, -1.8e-5))
//!     .build()?;
//!
//! let vega = StarState::new(SphericalPos::new(279.23473, 38.78369), [20.06, 28.66], 0.13, -13.5);
//! let seen = coord_conv(&vega, CoordSys::ICRS, 2000.0, CoordSys::Observed, 59215.3, 0.0, &params)?;
//! println!("az = {}, alt = {}", seen.star.pos.lon, seen.star.pos.lat);
//! # Ok::<(), coordconv::coordconv_errors::CoordConvError>(())
//! ```

use std::cmp::Ordering::{Equal, Greater};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    apparent::mappa,
    cnv::{
        fk4::{fk4_from_icrs, icrs_from_fixed_fk4, icrs_from_fk4},
        fk5::fk5_prec,
        galactic::{gal_from_icrs, icrs_from_gal},
        geo::{geo_from_icrs, icrs_from_geo},
        refraction::{obs_from_topo, topo_from_obs},
        topo::{geo_from_topo, topo_from_geo},
    },
    constants::{ArcSec, Degree, MIN_PARALLAX, OFF_MAG},
    coordconv_errors::CoordConvError,
    observers::{ObserverData, RefractionCoeffs},
    sph_conv::{cc_from_sc_pv_off_with, sc_from_cc_pv_off_with, StarState},
    time::{epj_from_epb, epj_from_mjd, last_from_ut1, tdb_from_ut1},
    vector_math::wrap_near,
};

/// Coordinate systems handled by [`coord_conv`].
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordSys {
    /// International Celestial Reference System, taken as FK5 J2000
    ICRS,
    /// FK5 mean equator and equinox
    FK5,
    /// FK4 mean equator and equinox, e-terms included
    FK4,
    /// IAU 1958 galactic coordinates
    Galactic,
    /// Geocentric apparent place, true equator and equinox of date
    Geocentric,
    /// Topocentric azimuth/altitude, no refraction
    Topocentric,
    /// Topocentric azimuth/altitude with refraction
    Observed,
}

impl CoordSys {
    pub fn needs_observer(&self) -> bool {
        matches!(self, CoordSys::Topocentric | CoordSys::Observed)
    }

    pub fn needs_refraction(&self) -> bool {
        matches!(self, CoordSys::Observed)
    }
}

/// Tunables and site data used by [`coord_conv`].
///
/// Defaults
/// --------
/// * `off_mag`: [`OFF_MAG`] (1e-4 degree)
/// * `min_parallax`: [`MIN_PARALLAX`] (1e-7 arcsec)
/// * `observer`, `refraction`: none
///
/// # See also
/// * [`CoordConvParams::builder`] – validated construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordConvParams {
    /// Angular length of the offset used to measure rotation and scale (degrees)
    pub off_mag: Degree,
    /// Parallax below which an object is treated as infinitely distant (arcsec)
    pub min_parallax: ArcSec,
    /// Site geometry, required by the topocentric and observed systems
    pub observer: Option<ObserverData>,
    /// Refraction coefficients, required by the observed system
    pub refraction: Option<RefractionCoeffs>,
}

impl CoordConvParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`CoordConvParamsBuilder`] initialised with the default values.
    pub fn builder() -> CoordConvParamsBuilder {
        CoordConvParamsBuilder::new()
    }

    fn observer_data(&self) -> Result<&ObserverData, CoordConvError> {
        self.observer
            .as_ref()
            .ok_or(CoordConvError::MissingObserverData)
    }

    fn refraction_coeffs(&self) -> Result<&RefractionCoeffs, CoordConvError> {
        self.refraction
            .as_ref()
            .ok_or(CoordConvError::MissingRefraction)
    }

    /// Fail early if `sys` needs external data that is not there.
    fn check_requirements(&self, sys: CoordSys) -> Result<(), CoordConvError> {
        if sys.needs_observer() {
            self.observer_data()?;
        }
        if sys.needs_refraction() {
            self.refraction_coeffs()?;
        }
        Ok(())
    }
}

impl Default for CoordConvParams {
    fn default() -> Self {
        CoordConvParams {
            off_mag: OFF_MAG,
            min_parallax: MIN_PARALLAX,
            observer: None,
            refraction: None,
        }
    }
}

/// Builder for [`CoordConvParams`], with validation.
#[derive(Debug, Clone)]
pub struct CoordConvParamsBuilder {
    params: CoordConvParams,
}

impl Default for CoordConvParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordConvParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: CoordConvParams::default(),
        }
    }

    pub fn off_mag(mut self, v: Degree) -> Self {
        self.params.off_mag = v;
        self
    }
    pub fn min_parallax(mut self, v: ArcSec) -> Self {
        self.params.min_parallax = v;
        self
    }
    pub fn observer(mut self, obs: ObserverData) -> Self {
        self.params.observer = Some(obs);
        self
    }
    pub fn refraction(mut self, ref_co: RefractionCoeffs) -> Self {
        self.params.refraction = Some(ref_co);
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Validate and produce the [`CoordConvParams`].
    ///
    /// Validation rules
    /// ----------------
    /// * `off_mag` in `(0, 1]` degree.
    /// * `min_parallax` finite and `> 0`.
    ///
    /// Return
    /// ------
    /// * `Ok(CoordConvParams)` if all values are valid.
    /// * [`CoordConvError::InvalidParameter`] otherwise.
    pub fn build(self) -> Result<CoordConvParams, CoordConvError> {
        let p = &self.params;

        if !Self::gt0(p.off_mag) || !Self::ge0(1.0 - p.off_mag) {
            return Err(CoordConvError::InvalidParameter(format!(
                "off_mag must be in (0, 1] degree, got {}",
                p.off_mag
            )));
        }
        if !Self::gt0(p.min_parallax) || !p.min_parallax.is_finite() {
            return Err(CoordConvError::InvalidParameter(format!(
                "min_parallax must be finite and > 0, got {}",
                p.min_parallax
            )));
        }

        Ok(self.params)
    }
}

/// Result of [`coord_conv`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordConvResult {
    /// Converted position, proper motion, parallax and radial velocity
    pub star: StarState,
    /// `from_dir` as seen in the output system, wrapped to the nearest angle to `from_dir`
    pub to_dir: Degree,
    /// Output offset length / input offset length
    pub scale_change: f64,
    /// The object is treated as infinitely distant (parallax and radial velocity are 0)
    pub at_inf: bool,
    /// The output position is at a pole: longitude and proper motion are 0
    pub at_pole: bool,
    /// A zenith distance went past the limit of the refraction model
    pub too_low: bool,
}

/// Object, offset point and velocity in ICRS at a given Julian epoch.
#[derive(Debug, Clone, Copy)]
struct IcrsState {
    p: Vector3<f64>,
    v: Vector3<f64>,
    off_p: Vector3<f64>,
    epoch: f64,
    /// The input observed position was below the refraction model limit
    too_low: bool,
}

impl IcrsState {
    /// Move both points along the shared velocity to `epoch`.
    fn at_epoch(&self, epoch: f64) -> (Vector3<f64>, Vector3<f64>) {
        let dt = epoch - self.epoch;
        (self.p + self.v * dt, self.off_p + self.v * dt)
    }
}

/// Cartesian state in the output system.
struct OutState {
    p: Vector3<f64>,
    v: Vector3<f64>,
    off_p: Vector3<f64>,
    too_low: bool,
}

/// Convert from an apparent system down to ICRS at the TDB epoch of `ut1`.
fn icrs_from_apparent(
    p: Vector3<f64>,
    off_p: Vector3<f64>,
    sys: CoordSys,
    ut1: f64,
    params: &CoordConvParams,
) -> Result<IcrsState, CoordConvError> {
    let (mut p, mut off_p) = (p, off_p);
    let mut too_low = false;

    if sys == CoordSys::Observed {
        let ref_co = params.refraction_coeffs()?;
        let unrefracted = topo_from_obs(&p, ref_co);
        p = unrefracted.p;
        off_p = topo_from_obs(&off_p, ref_co).p;
        too_low = unrefracted.too_low;
    }

    if sys.needs_observer() {
        let obs = params.observer_data()?;
        let last = last_from_ut1(ut1, obs.longitude);
        p = geo_from_topo(&p, last, obs);
        off_p = geo_from_topo(&off_p, last, obs);
    }

    let tdb = tdb_from_ut1(ut1);
    let amp = mappa(2000.0, tdb);
    Ok(IcrsState {
        p: icrs_from_geo(&p, &amp)?,
        v: Vector3::zeros(),
        off_p: icrs_from_geo(&off_p, &amp)?,
        epoch: epj_from_mjd(tdb),
        too_low,
    })
}

fn to_icrs(
    p: Vector3<f64>,
    v: Vector3<f64>,
    off_p: Vector3<f64>,
    sys: CoordSys,
    date: f64,
    params: &CoordConvParams,
) -> Result<IcrsState, CoordConvError> {
    let state = match sys {
        CoordSys::ICRS => IcrsState {
            p,
            v,
            off_p,
            epoch: date,
            too_low: false,
        },
        CoordSys::FK5 => {
            let (icrs_p, icrs_v) = fk5_prec(&p, &v, date, 2000.0);
            let (icrs_off_p, _) = fk5_prec(&off_p, &v, date, 2000.0);
            IcrsState {
                p: icrs_p,
                v: icrs_v,
                off_p: icrs_off_p,
                epoch: 2000.0,
                too_low: false,
            }
        }
        CoordSys::FK4 if v == Vector3::zeros() => IcrsState {
            p: icrs_from_fixed_fk4(&p, date),
            v: Vector3::zeros(),
            off_p: icrs_from_fixed_fk4(&off_p, date),
            epoch: epj_from_epb(date),
            too_low: false,
        },
        CoordSys::FK4 => {
            let (icrs_p, icrs_v) = icrs_from_fk4(&p, &v, date);
            let (icrs_off_p, _) = icrs_from_fk4(&off_p, &v, date);
            IcrsState {
                p: icrs_p,
                v: icrs_v,
                off_p: icrs_off_p,
                epoch: 2000.0,
                too_low: false,
            }
        }
        CoordSys::Galactic => {
            let (icrs_p, icrs_v) = icrs_from_gal(&p, &v);
            let (icrs_off_p, _) = icrs_from_gal(&off_p, &v);
            IcrsState {
                p: icrs_p,
                v: icrs_v,
                off_p: icrs_off_p,
                epoch: date,
                too_low: false,
            }
        }
        CoordSys::Geocentric | CoordSys::Topocentric | CoordSys::Observed => {
            icrs_from_apparent(p, off_p, sys, date, params)?
        }
    };
    Ok(state)
}

fn from_icrs(
    icrs: &IcrsState,
    sys: CoordSys,
    date: f64,
    params: &CoordConvParams,
) -> Result<OutState, CoordConvError> {
    let mean = |p: Vector3<f64>, v: Vector3<f64>, off_p: Vector3<f64>| OutState {
        p,
        v,
        off_p,
        too_low: false,
    };

    let out = match sys {
        CoordSys::ICRS => {
            let (p, off_p) = icrs.at_epoch(date);
            mean(p, icrs.v, off_p)
        }
        CoordSys::FK5 => {
            let (p, off_p) = icrs.at_epoch(2000.0);
            let (fk5_p, fk5_v) = fk5_prec(&p, &icrs.v, 2000.0, date);
            let (fk5_off_p, _) = fk5_prec(&off_p, &icrs.v, 2000.0, date);
            mean(fk5_p, fk5_v, fk5_off_p)
        }
        CoordSys::FK4 => {
            let (p, off_p) = icrs.at_epoch(2000.0);
            let (fk4_p, fk4_v) = fk4_from_icrs(&p, &icrs.v, date);
            let (fk4_off_p, _) = fk4_from_icrs(&off_p, &icrs.v, date);
            mean(fk4_p, fk4_v, fk4_off_p)
        }
        CoordSys::Galactic => {
            let (p, off_p) = icrs.at_epoch(date);
            let (gal_p, gal_v) = gal_from_icrs(&p, &icrs.v);
            let (gal_off_p, _) = gal_from_icrs(&off_p, &icrs.v);
            mean(gal_p, gal_v, gal_off_p)
        }
        CoordSys::Geocentric | CoordSys::Topocentric | CoordSys::Observed => {
            let tdb = tdb_from_ut1(date);
            let amp = mappa(2000.0, tdb);
            let (p, off_p) = icrs.at_epoch(2000.0);
            let mut out = OutState {
                p: geo_from_icrs(&p, &icrs.v, &amp)?,
                v: Vector3::zeros(),
                off_p: geo_from_icrs(&off_p, &icrs.v, &amp)?,
                too_low: false,
            };

            if sys.needs_observer() {
                let obs = params.observer_data()?;
                let last = last_from_ut1(date, obs.longitude);
                out.p = topo_from_geo(&out.p, last, obs);
                out.off_p = topo_from_geo(&out.off_p, last, obs);
            }

            if sys == CoordSys::Observed {
                let ref_co = params.refraction_coeffs()?;
                let refracted = obs_from_topo(&out.p, ref_co);
                out.p = refracted.p;
                out.off_p = obs_from_topo(&out.off_p, ref_co).p;
                out.too_low = refracted.too_low;
            }
            out
        }
    };
    Ok(out)
}

/// Convert an object between two coordinate systems and dates.
///
/// Arguments
/// ---------
/// * `from`: position, proper motion (arcsec/century), parallax (arcsec) and radial velocity
///   (km/s) in `from_sys`.
/// * `from_sys`, `from_date`: input system and its date (see the module docs for the meaning
///   of the date).
/// * `to_sys`, `to_date`: output system and its date.
/// * `from_dir`: a direction at the object in the input system (degrees, 0 = increasing lon,
///   90 = increasing lat).
/// * `params`: offset size, infinity threshold, and the site data needed by the topocentric and
///   observed systems.
///
/// Return
/// ------
/// * a [`CoordConvResult`] with the converted object, `from_dir` rotated into the output
///   system, the scale change and the `at_inf` / `at_pole` / `too_low` flags.
/// * [`CoordConvError::MissingObserverData`] / [`CoordConvError::MissingRefraction`] if a
///   topocentric or observed system is requested without the corresponding data.
/// * [`CoordConvError::Range`] if the input latitude is outside `[-90, 90]`.
/// * [`CoordConvError::Convergence`] if leaving an apparent system fails to converge.
///
/// # See also
/// * [`conv_star_state`] – same conversion, returning only the converted object
pub fn coord_conv(
    from: &StarState,
    from_sys: CoordSys,
    from_date: f64,
    to_sys: CoordSys,
    to_date: f64,
    from_dir: Degree,
    params: &CoordConvParams,
) -> Result<CoordConvResult, CoordConvError> {
    params.check_requirements(from_sys)?;
    params.check_requirements(to_sys)?;
    debug!(?from_sys, from_date, ?to_sys, to_date, "coordinate conversion");

    let from_pv = cc_from_sc_pv_off_with(from, from_dir, params.off_mag, params.min_parallax)?;

    let icrs = to_icrs(from_pv.p, from_pv.v, from_pv.off_p, from_sys, from_date, params)?;
    let out = from_icrs(&icrs, to_sys, to_date, params)?;

    let to = sc_from_cc_pv_off_with(&out.p, &out.v, &out.off_p, params.min_parallax)?;

    let at_inf = from_pv.at_inf || to.at_inf;
    let mut star = to.star;
    if at_inf {
        // e-terms and aberration nudge the distance of an object at infinity
        star.parallax = 0.0;
        star.rad_vel = 0.0;
    }

    Ok(CoordConvResult {
        star,
        to_dir: wrap_near(to.off_dir, from_dir),
        scale_change: to.off_mag / params.off_mag,
        at_inf,
        at_pole: to.at_pole,
        too_low: icrs.too_low || out.too_low,
    })
}

/// Convert a [`StarState`] between two coordinate systems and dates.
///
/// Shortcut for [`coord_conv`] when only the converted object is needed.
pub fn conv_star_state(
    from: &StarState,
    from_sys: CoordSys,
    from_date: f64,
    to_sys: CoordSys,
    to_date: f64,
    params: &CoordConvParams,
) -> Result<StarState, CoordConvError> {
    coord_conv(from, from_sys, from_date, to_sys, to_date, 0.0, params).map(|res| res.star)
}
