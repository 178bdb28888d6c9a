//! UTC → TAI → TT and UTC → UT1 offsets.
//!
//! Both corrections drift over the years and are published by the IERS:
//! TAI−UTC changes when a leap second is inserted, UT1−UTC (DUT1) changes
//! continuously and is kept within ±0.9 s. They are therefore configuration,
//! carried by every [`crate::models::TimeInstant`], never process-wide state.

use serde::{Deserialize, Serialize};

use super::julian::JulianDate;
use crate::error::{AstroError, AstroResult};

/// TT − TAI, fixed by definition.
pub const TT_MINUS_TAI_SECONDS: f64 = 32.184;

/// TAI − UTC in effect since 2017-01-01. Approximate; update from IERS
/// Bulletin C when a new leap second is announced.
pub const DEFAULT_LEAP_SECONDS: f64 = 37.0;

/// UT1 − UTC. Approximate; update from IERS Bulletin A.
pub const DEFAULT_DUT1_SECONDS: f64 = 0.042;

/// |UT1 − UTC| is kept below this by leap-second insertion.
pub const MAX_DUT1_SECONDS: f64 = 0.9;

/// Leap-second and DUT1 corrections used to move between time scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeCorrections {
    /// TAI − UTC in seconds
    pub leap_seconds: f64,
    /// UT1 − UTC in seconds
    pub dut1: f64,
}

impl Default for TimeCorrections {
    fn default() -> Self {
        Self {
            leap_seconds: DEFAULT_LEAP_SECONDS,
            dut1: DEFAULT_DUT1_SECONDS,
        }
    }
}

impl TimeCorrections {
    /// Create corrections, validating that both values are plausible.
    pub fn new(leap_seconds: f64, dut1: f64) -> AstroResult<Self> {
        let corrections = Self { leap_seconds, dut1 };
        corrections.validate()?;
        Ok(corrections)
    }

    pub fn validate(&self) -> AstroResult<()> {
        if !self.leap_seconds.is_finite() || self.leap_seconds < 0.0 {
            return Err(AstroError::configuration(format!(
                "leap seconds must be a non-negative number, got {}",
                self.leap_seconds
            )));
        }
        if !self.dut1.is_finite() || self.dut1.abs() > MAX_DUT1_SECONDS {
            return Err(AstroError::configuration(format!(
                "DUT1 must lie within ±{MAX_DUT1_SECONDS} s, got {}",
                self.dut1
            )));
        }
        Ok(())
    }

    /// TT − UTC in seconds.
    pub fn tt_minus_utc(&self) -> f64 {
        self.leap_seconds + TT_MINUS_TAI_SECONDS
    }
}

/// Shift a UTC Julian Date onto the TAI scale.
pub fn apply_leap_second_offset(jd_utc: JulianDate, corrections: &TimeCorrections) -> JulianDate {
    jd_utc.add_seconds(corrections.leap_seconds)
}

/// Shift a TAI Julian Date onto the TT scale.
pub fn tai_to_tt(jd_tai: JulianDate) -> JulianDate {
    jd_tai.add_seconds(TT_MINUS_TAI_SECONDS)
}

/// Shift a UTC Julian Date onto the UT1 (Earth rotation) scale.
pub fn apply_dut1_offset(jd_utc: JulianDate, corrections: &TimeCorrections) -> JulianDate {
    jd_utc.add_seconds(corrections.dut1)
}
