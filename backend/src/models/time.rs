use chrono::{DateTime, Duration, DurationRound, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AstroError, AstroResult};
use crate::time::julian::validate_datetime;
use crate::time::{
    apply_dut1_offset, apply_leap_second_offset, tai_to_tt, to_julian_date, JulianDate,
    TimeCorrections,
};

/// A UTC instant together with the corrections needed to place it on the
/// TAI, TT and UT1 scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInstant {
    utc: DateTime<Utc>,
    corrections: TimeCorrections,
}

impl TimeInstant {
    /// Unchecked constructor. Computations reject out-of-range instants
    /// through [`Self::validate`].
    pub fn new(utc: DateTime<Utc>, corrections: TimeCorrections) -> Self {
        Self { utc, corrections }
    }

    /// Build an instant, rejecting dates before 1582-10-15 or after year 9999.
    pub fn checked(utc: DateTime<Utc>, corrections: TimeCorrections) -> AstroResult<Self> {
        validate_datetime(&utc)?;
        Ok(Self::new(utc, corrections))
    }

    /// Check that the instant lies in the supported Gregorian range.
    pub fn validate(&self) -> AstroResult<()> {
        validate_datetime(&self.utc)
    }

    /// Build an instant from a Gregorian UTC date and fractional hour.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
        corrections: TimeCorrections,
    ) -> AstroResult<Self> {
        // validates the Gregorian range and the hour
        to_julian_date(year, month, day, hour)?;
        let midnight = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| {
                AstroError::unsupported_date(format!("{year:04}-{month:02}-{day:02}"))
            })?
            .and_utc();
        let utc = midnight + Duration::microseconds((hour * 3_600e6).round() as i64);
        Ok(Self::new(utc, corrections))
    }

    /// Current wall-clock instant.
    pub fn now(corrections: TimeCorrections) -> Self {
        Self::new(Utc::now(), corrections)
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn corrections(&self) -> &TimeCorrections {
        &self.corrections
    }

    pub fn jd_utc(&self) -> JulianDate {
        JulianDate::from_datetime(&self.utc)
    }

    /// Modified Julian Date on the UTC scale.
    pub fn mjd_utc(&self) -> qtty::Days {
        qtty::Days::new(self.jd_utc().mjd())
    }

    pub fn jd_tai(&self) -> JulianDate {
        apply_leap_second_offset(self.jd_utc(), &self.corrections)
    }

    pub fn jd_tt(&self) -> JulianDate {
        tai_to_tt(self.jd_tai())
    }

    pub fn jd_ut1(&self) -> JulianDate {
        apply_dut1_offset(self.jd_utc(), &self.corrections)
    }

    /// Shift by a number of fractional days, keeping microsecond precision.
    pub fn add_days(&self, days: f64) -> AstroResult<Self> {
        let micros = (days * 86_400e6).round();
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return Err(AstroError::unsupported_date(format!(
                "cannot shift {} by {days} days",
                self.utc
            )));
        }
        let utc = self
            .utc
            .checked_add_signed(Duration::microseconds(micros as i64))
            .ok_or_else(|| {
                AstroError::unsupported_date(format!(
                    "{} shifted by {days} days leaves the supported range",
                    self.utc
                ))
            })?;
        Self::checked(utc, self.corrections)
    }

    /// The same instant with seconds and sub-seconds dropped.
    pub fn truncated_to_minute(&self) -> Self {
        let utc = self
            .utc
            .duration_trunc(Duration::minutes(1))
            .unwrap_or(self.utc);
        Self::new(utc, self.corrections)
    }

    /// UTC hour and minute, minutes truncated rather than rounded.
    pub fn hour_minute(&self) -> (u32, u32) {
        (self.utc.hour(), self.utc.minute())
    }
}
