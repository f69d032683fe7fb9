//! # Time system
//!
//! Epoch conversions (Julian and Besselian), civil date → MJD, the UT1 → TDB approximation
//! and sidereal time.
//!
//! ## Conventions
//!
//! - All dates are **Modified Julian Dates** (JD − 2400000.5).
//! - Julian epochs use the Julian year of 365.25 days counted from J2000.0 (MJD 51544.5).
//! - Besselian epochs use the tropical year of 365.242198781 days counted from B1900.0
//!   (MJD 15019.81352), following Lieske (1979).
//! - Sidereal times are returned in **degrees**, wrapped into `[0, 360)`.

use hifitime::{Epoch, TimeScale};
use std::str::FromStr;

use crate::{
    constants::{
        Degree, B1900_MJD, DAYS_PER_BESSELIAN_YEAR, DAYS_PER_JULIAN_YEAR, MJD, RADEG, T2000,
    },
    coordconv_errors::CoordConvError,
    earth_orientation::eqeqx,
    vector_math::wrap_pos,
};

/// Julian epoch of a Modified Julian Date.
pub fn epj_from_mjd(mjd: MJD) -> f64 {
    2000.0 + (mjd - T2000) / DAYS_PER_JULIAN_YEAR
}

/// Modified Julian Date of a Julian epoch.
pub fn mjd_from_epj(epj: f64) -> MJD {
    T2000 + (epj - 2000.0) * DAYS_PER_JULIAN_YEAR
}

/// Besselian epoch of a Modified Julian Date.
pub fn epb_from_mjd(mjd: MJD) -> f64 {
    1900.0 + (mjd - B1900_MJD) / DAYS_PER_BESSELIAN_YEAR
}

/// Modified Julian Date of a Besselian epoch.
pub fn mjd_from_epb(epb: f64) -> MJD {
    B1900_MJD + (epb - 1900.0) * DAYS_PER_BESSELIAN_YEAR
}

/// Julian epoch of the instant given as a Besselian epoch.
pub fn epj_from_epb(epb: f64) -> f64 {
    epj_from_mjd(mjd_from_epb(epb))
}

/// Besselian epoch of the instant given as a Julian epoch.
pub fn epb_from_epj(epj: f64) -> f64 {
    epb_from_mjd(mjd_from_epj(epj))
}

/// Modified Julian Date of a Gregorian calendar date and time of day.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: calendar date (month and day are 1-based).
/// * `hour`, `minute`: time of day.
/// * `second`: seconds, fractional part allowed.
///
/// Return
/// ------
/// * the MJD of the instant, in whatever time scale the inputs are expressed in.
/// * [`CoordConvError::Range`] if the date is not a valid calendar date.
pub fn mjd_from_civil(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
) -> Result<MJD, CoordConvError> {
    if !(0.0..60.0).contains(&second) {
        return Err(CoordConvError::Range(format!(
            "second must be in [0, 60), got {second}"
        )));
    }
    let whole = second.trunc();
    let nanos = ((second - whole) * 1e9).round().min(999_999_999.0) as u32;

    let epoch = Epoch::maybe_from_gregorian(
        year,
        month,
        day,
        hour,
        minute,
        whole as u8,
        nanos,
        TimeScale::UTC,
    )
    .map_err(|e| {
        CoordConvError::Range(format!(
            "invalid civil date {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}: {e}"
        ))
    })?;

    Ok(epoch.to_mjd_utc_days())
}

/// Modified Julian Date of an ISO 8601 date string such as `2021-01-01T00:00:00`.
pub fn mjd_from_date_str(date: &str) -> Result<MJD, CoordConvError> {
    Ok(Epoch::from_str(date)?.to_mjd_utc_days())
}

/// Approximate TDB from UT1.
///
/// UT1 is taken as UTC (the difference is below a second, far under what the apparent-place
/// models need) and hifitime applies the leap seconds, the TT − TAI offset and the periodic
/// TDB − TT terms.
pub fn tdb_from_ut1(ut1: MJD) -> MJD {
    // J2000.0 TDB is MJD 51544.5
    T2000 + Epoch::from_mjd_utc(ut1).to_tdb_days_since_j2000()
}

/// Greenwich mean sidereal time, in degrees.
///
/// IAU 1982 expression. The polynomial is evaluated with the full UT1 date and the
/// fraction of the day is added separately as `frac · 360°`; the 1.0027379 ratio between
/// sidereal and solar days is carried by the linear term of the polynomial.
///
/// Arguments
/// ---------
/// * `ut1`: UT1 as a Modified Julian Date.
///
/// Return
/// ------
/// * GMST in degrees, in `[0, 360)`.
pub fn gmst_from_ut1(ut1: MJD) -> Degree {
    // Polynomial coefficients for GMST (in seconds of time)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    let t = (ut1 - T2000) / 36525.0;
    let frac_day = ut1.fract();

    // 240 seconds of time per degree
    wrap_pos(frac_day * 360.0 + (((C3 * t + C2) * t + C1) * t + C0) / 240.0)
}

/// Local mean sidereal time, in degrees.
///
/// Arguments
/// ---------
/// * `ut1`: UT1 as a Modified Julian Date.
/// * `longitude`: east longitude of the observer, in degrees.
pub fn lmst_from_ut1(ut1: MJD, longitude: Degree) -> Degree {
    wrap_pos(gmst_from_ut1(ut1) + longitude)
}

/// Local apparent sidereal time, in degrees.
///
/// The local mean sidereal time plus the equation of the equinoxes evaluated at the TDB
/// corresponding to `ut1`.
///
/// # See also
/// * [`eqeqx`] – equation of the equinoxes
/// * [`tdb_from_ut1`] – time scale used for the nutation
pub fn last_from_ut1(ut1: MJD, longitude: Degree) -> Degree {
    let tdb = tdb_from_ut1(ut1);
    wrap_pos(lmst_from_ut1(ut1, longitude) + eqeqx(tdb) / RADEG)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_julian_epoch() {
        assert_eq!(epj_from_mjd(T2000), 2000.0);
        assert_relative_eq!(epj_from_mjd(T2000 + 365.25), 2001.0);
        assert_relative_eq!(mjd_from_epj(epj_from_mjd(58000.125)), 58000.125, epsilon = 1e-9);
    }

    #[test]
    fn test_besselian_epoch() {
        assert_eq!(epb_from_mjd(B1900_MJD), 1900.0);
        // B1950.0 is MJD 33281.92345905
        assert_relative_eq!(mjd_from_epb(1950.0), 33281.92345905, epsilon = 1e-6);
        assert_relative_eq!(epb_from_mjd(mjd_from_epb(1875.3)), 1875.3, epsilon = 1e-10);
        // B1950.0 is J1949.9997904423
        assert_relative_eq!(epj_from_epb(1950.0), 1949.9997904423, epsilon = 1e-9);
        assert_relative_eq!(epb_from_epj(epj_from_epb(1950.0)), 1950.0, epsilon = 1e-10);
    }

    #[test]
    fn test_mjd_from_date_str() {
        assert_eq!(mjd_from_date_str("2021-01-01T00:00:00").unwrap(), 59215.0);
        assert_eq!(mjd_from_date_str("2021-01-02T00:00:00").unwrap(), 59216.0);
        assert!(mjd_from_date_str("not a date").is_err());
    }

    #[test]
    fn test_mjd_from_civil() {
        assert_eq!(mjd_from_civil(2021, 1, 1, 0, 0, 0.0).unwrap(), 59215.0);
        assert_relative_eq!(
            mjd_from_civil(2000, 1, 1, 12, 0, 0.0).unwrap(),
            T2000,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            mjd_from_civil(1976, 9, 20, 22, 32, 24.0).unwrap(),
            43041.93916666667,
            epsilon = 1e-8
        );

        let err = mjd_from_civil(2021, 2, 30, 0, 0, 0.0).unwrap_err();
        assert!(matches!(err, CoordConvError::Range(_)));
        let err = mjd_from_civil(2021, 2, 3, 0, 0, 61.0).unwrap_err();
        assert!(matches!(err, CoordConvError::Range(_)));
    }

    #[test]
    fn test_tdb_from_ut1() {
        // 2000-01-01: 32 leap seconds + 32.184 s, TDB - TT below 2 ms
        let dt_sec = (tdb_from_ut1(T2000) - T2000) * 86400.0;
        assert!((dt_sec - 64.184).abs() < 2e-3, "dt = {dt_sec}");

        // 2021-01-01: 37 leap seconds
        let dt_sec = (tdb_from_ut1(59215.0) - 59215.0) * 86400.0;
        assert!((dt_sec - 69.184).abs() < 2e-3, "dt = {dt_sec}");
    }

    #[test]
    fn test_gmst() {
        assert_relative_eq!(gmst_from_ut1(33282.0), 100.075688557397, max_relative = 1e-8);
        // 4.894961212789145 rad
        assert_relative_eq!(gmst_from_ut1(T2000), 280.4606183750, epsilon = 1e-8);
    }

    #[test]
    fn test_lmst_last() {
        let ut1 = 59215.3;
        let lmst = lmst_from_ut1(ut1, -105.82);
        assert_relative_eq!(lmst, wrap_pos(gmst_from_ut1(ut1) - 105.82), epsilon = 1e-12);

        // the equation of the equinoxes stays below ~1.4 seconds of time
        let last = last_from_ut1(ut1, -105.82);
        let diff = crate::vector_math::wrap_ctr(last - lmst);
        assert!(diff.abs() < 0.006, "eqeqx = {diff} deg");
        assert!(diff != 0.0);
    }
}
