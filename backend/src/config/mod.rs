//! Engine configuration file support.
//!
//! Settings are read from an `obslog.toml` file and may be overridden by
//! `OBSLOG_*` environment variables. Every section and key is optional;
//! missing values fall back to the defaults shown below.
//!
//! ```toml
//! [observer]
//! latitude = 50.7374
//! longitude = 7.0982
//! elevation_m = 60.0
//!
//! [time]
//! leap_seconds = 37
//! dut1_seconds = 0.042
//!
//! [horizon]
//! refraction = "standard"
//! altitude_deg = 0.0
//!
//! [warnings]
//! moon_illumination_percent = 75
//! moon_separation_deg = 60
//! ```

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::RefractionModel;
use crate::error::{AstroError, AstroResult};
use crate::models::{
    GeodeticLocation, ObserverFrame, PolarMotion, TimeInstant, DEFAULT_ELEVATION_M,
};
use crate::services::VisibilityEngine;
use crate::time::scales::{DEFAULT_DUT1_SECONDS, DEFAULT_LEAP_SECONDS};
use crate::time::TimeCorrections;

/// File name searched by [`EngineConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "obslog.toml";

pub const ENV_LATITUDE: &str = "OBSLOG_LATITUDE";
pub const ENV_LONGITUDE: &str = "OBSLOG_LONGITUDE";
pub const ENV_LEAP_SECONDS: &str = "OBSLOG_LEAP_SECONDS";
pub const ENV_DUT1: &str = "OBSLOG_DUT1";

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub observer: ObserverSettings,
    #[serde(default)]
    pub time: TimeSettings,
    #[serde(default)]
    pub horizon: HorizonSettings,
    #[serde(default)]
    pub warnings: WarningSettings,
}

/// Observer site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverSettings {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default = "default_elevation")]
    pub elevation_m: f64,
    /// Pole offsets from IERS Bulletin A, milliarcseconds.
    #[serde(default)]
    pub polar_motion: PolarMotion,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            elevation_m: default_elevation(),
            polar_motion: PolarMotion::default(),
        }
    }
}

/// Time-scale corrections. Both values change over the years and should be
/// refreshed from the IERS bulletins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSettings {
    #[serde(default = "default_leap_seconds")]
    pub leap_seconds: f64,
    #[serde(default = "default_dut1")]
    pub dut1_seconds: f64,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            leap_seconds: default_leap_seconds(),
            dut1_seconds: default_dut1(),
        }
    }
}

/// Horizon model for rise/set decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizonSettings {
    #[serde(default)]
    pub refraction: RefractionModel,
    /// Apparent altitude of the local horizon (trees, buildings), degrees.
    #[serde(default)]
    pub altitude_deg: f64,
}

/// Thresholds for highlighting Moon-related cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningSettings {
    /// Warn when the Moon is more illuminated than this, percent.
    #[serde(default = "default_illumination_percent")]
    pub moon_illumination_percent: f64,
    /// Warn when a target is closer to the Moon than this, degrees.
    #[serde(default = "default_separation_deg")]
    pub moon_separation_deg: f64,
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            moon_illumination_percent: default_illumination_percent(),
            moon_separation_deg: default_separation_deg(),
        }
    }
}

fn default_elevation() -> f64 {
    DEFAULT_ELEVATION_M
}

fn default_leap_seconds() -> f64 {
    DEFAULT_LEAP_SECONDS
}

fn default_dut1() -> f64 {
    DEFAULT_DUT1_SECONDS
}

fn default_illumination_percent() -> f64 {
    75.0
}

fn default_separation_deg() -> f64 {
    60.0
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if the file was read, parsed and validated
    /// * `Err(AstroError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> AstroResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AstroError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        debug!("loaded configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AstroResult<Self> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| {
            AstroError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `obslog.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if found and parsed successfully
    /// * `Err(AstroError::Configuration)` if no config file found or parse error
    pub fn from_default_location() -> AstroResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Err(AstroError::configuration(format!(
            "No {CONFIG_FILE_NAME} found in standard locations"
        )))
    }

    /// Apply `OBSLOG_*` environment overrides and re-validate.
    pub fn with_env_overrides(mut self) -> AstroResult<Self> {
        if let Some(v) = env_f64(ENV_LATITUDE)? {
            self.observer.latitude = v;
        }
        if let Some(v) = env_f64(ENV_LONGITUDE)? {
            self.observer.longitude = v;
        }
        if let Some(v) = env_f64(ENV_LEAP_SECONDS)? {
            self.time.leap_seconds = v;
        }
        if let Some(v) = env_f64(ENV_DUT1)? {
            self.time.dut1_seconds = v;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every section for values the engine cannot use.
    pub fn validate(&self) -> AstroResult<()> {
        self.location()?;
        self.corrections()?;

        let horizon = self.horizon.altitude_deg;
        if !horizon.is_finite() || !(-10.0..=45.0).contains(&horizon) {
            return Err(AstroError::configuration(format!(
                "horizon.altitude_deg {horizon} is outside [-10, 45]"
            )));
        }

        let illum = self.warnings.moon_illumination_percent;
        if !(0.0..=100.0).contains(&illum) {
            return Err(AstroError::configuration(format!(
                "warnings.moon_illumination_percent {illum} is outside [0, 100]"
            )));
        }
        let sep = self.warnings.moon_separation_deg;
        if !(0.0..=180.0).contains(&sep) {
            return Err(AstroError::configuration(format!(
                "warnings.moon_separation_deg {sep} is outside [0, 180]"
            )));
        }
        Ok(())
    }

    /// Observer site.
    pub fn location(&self) -> AstroResult<GeodeticLocation> {
        GeodeticLocation::new(
            self.observer.latitude,
            self.observer.longitude,
            self.observer.elevation_m,
        )
        .map_err(|e| AstroError::configuration(e.to_string()))
    }

    pub fn corrections(&self) -> AstroResult<TimeCorrections> {
        TimeCorrections::new(self.time.leap_seconds, self.time.dut1_seconds)
    }

    pub fn engine(&self) -> VisibilityEngine {
        VisibilityEngine::new(self.horizon.refraction, self.horizon.altitude_deg)
    }

    /// Configured observer site bound to a UTC timestamp.
    pub fn observer_frame(&self, utc: DateTime<Utc>) -> AstroResult<ObserverFrame> {
        let instant = TimeInstant::checked(utc, self.corrections()?)?;
        let frame = ObserverFrame::new(self.location()?, instant);
        Ok(frame.with_polar_motion(self.observer.polar_motion))
    }
}

fn env_f64(name: &str) -> AstroResult<Option<f64>> {
    match env::var(name) {
        Ok(raw) => f64::from_str(raw.trim())
            .map(Some)
            .map_err(|e| AstroError::configuration(format!("{name}={raw:?}: {e}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AstroError::configuration(format!("{name}: {e}"))),
    }
}
