//! Gregorian calendar ⇄ Julian Date.
//!
//! Conversions follow Meeus, *Astronomical Algorithms*, chapter 7. Dates before
//! the Gregorian reform (1582-10-15) are rejected rather than silently mapped
//! onto the Julian calendar.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AstroError, AstroResult};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Offset between Julian Date and Modified Julian Date.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// First day of the Gregorian calendar.
const GREGORIAN_START: (i32, u32, u32) = (1582, 10, 15);

/// Last year representable by the civil-time layer.
const LAST_SUPPORTED_YEAR: i32 = 9999;

/// Julian Date as a plain day count.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(f64);

impl JulianDate {
    pub const J2000: JulianDate = JulianDate(J2000_JD);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Modified Julian Date value.
    pub fn mjd(&self) -> f64 {
        self.0 - MJD_OFFSET
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.0 - J2000_JD) / DAYS_PER_JULIAN_CENTURY
    }

    /// Shift by a number of (fractional) days.
    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Shift by a number of SI seconds.
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0 + seconds / SECONDS_PER_DAY)
    }

    /// Julian Date of a UTC timestamp.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        let secs = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9;
        Self(UNIX_EPOCH_JD + secs / SECONDS_PER_DAY)
    }

    /// UTC timestamp of this Julian Date, rounded to the microsecond.
    pub fn to_datetime(&self) -> AstroResult<DateTime<Utc>> {
        let micros = ((self.0 - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1e6).round();
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return Err(AstroError::unsupported_date(format!(
                "Julian Date {} cannot be represented as a civil timestamp",
                self.0
            )));
        }
        DateTime::from_timestamp_micros(micros as i64).ok_or_else(|| {
            AstroError::unsupported_date(format!(
                "Julian Date {} is outside the supported civil range",
                self.0
            ))
        })
    }
}

impl From<f64> for JulianDate {
    fn from(v: f64) -> Self {
        JulianDate::new(v)
    }
}

/// Calendar date with a fractional hour of day, as produced by
/// [`from_julian_date`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: f64,
}

/// Julian Date of a Gregorian calendar date and fractional hour of day.
///
/// # Errors
/// Returns [`AstroError::UnsupportedDate`] for dates before 1582-10-15, after
/// year 9999, for days that do not exist in the given month, and for hours
/// outside `[0, 24)`.
pub fn to_julian_date(year: i32, month: u32, day: u32, hour: f64) -> AstroResult<JulianDate> {
    validate_calendar(year, month, day, hour)?;

    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let jd = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b
        - 1524.5
        + hour / 24.0;

    Ok(JulianDate::new(jd))
}

/// Gregorian calendar date of a Julian Date.
pub fn from_julian_date(jd: JulianDate) -> CalendarDate {
    let shifted = jd.value() + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_fraction = b - d - (30.6001 * e).floor() + f;
    let day = day_fraction.floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    CalendarDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        hour: (day_fraction - day) * 24.0,
    }
}

/// Reject timestamps outside the supported Gregorian range.
pub(crate) fn validate_datetime(dt: &DateTime<Utc>) -> AstroResult<()> {
    validate_calendar(dt.year(), dt.month(), dt.day(), 0.0)
}

fn validate_calendar(year: i32, month: u32, day: u32, hour: f64) -> AstroResult<()> {
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(AstroError::unsupported_date(format!(
            "{year:04}-{month:02}-{day:02} is not a valid calendar date"
        )));
    }
    if (year, month, day) < GREGORIAN_START {
        return Err(AstroError::unsupported_date(format!(
            "{year:04}-{month:02}-{day:02} precedes the Gregorian calendar"
        )));
    }
    if year > LAST_SUPPORTED_YEAR {
        return Err(AstroError::unsupported_date(format!(
            "year {year} is beyond {LAST_SUPPORTED_YEAR}"
        )));
    }
    if !(0.0..24.0).contains(&hour) {
        return Err(AstroError::unsupported_date(format!(
            "hour {hour} is outside [0, 24)"
        )));
    }
    Ok(())
}
