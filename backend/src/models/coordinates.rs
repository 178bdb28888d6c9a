//! Equatorial and horizontal sky positions.

use qtty::{Degrees, HourAngles};
use serde::{Deserialize, Serialize};

use crate::core::{normalize_degrees, normalize_hours, Vector3, DEGREES_PER_HOUR};
use crate::error::{AstroError, AstroResult};

/// Catalog position, ICRS/J2000. Right ascension is stored in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquatorialPosition {
    ra: HourAngles,
    dec: Degrees,
}

impl EquatorialPosition {
    /// Build from right ascension in hours and declination in degrees.
    /// RA is wrapped into `[0, 24)`.
    pub fn new(ra_hours: f64, dec_deg: f64) -> AstroResult<Self> {
        if !ra_hours.is_finite() {
            return Err(AstroError::invalid_coordinates(format!(
                "right ascension {ra_hours} is not a finite number"
            )));
        }
        if !dec_deg.is_finite() || !(-90.0..=90.0).contains(&dec_deg) {
            return Err(AstroError::invalid_coordinates(format!(
                "declination {dec_deg} is outside [-90, 90]"
            )));
        }
        Ok(Self {
            ra: HourAngles::new(normalize_hours(ra_hours)),
            dec: Degrees::new(dec_deg),
        })
    }

    /// Build from right ascension and declination both in degrees.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> AstroResult<Self> {
        Self::new(ra_deg / DEGREES_PER_HOUR, dec_deg)
    }

    /// Build from nullable repository columns. Either value missing yields
    /// `Ok(None)`; present but out-of-range values are still an error.
    pub fn from_optional(ra_hours: Option<f64>, dec_deg: Option<f64>) -> AstroResult<Option<Self>> {
        match (ra_hours, dec_deg) {
            (Some(ra), Some(dec)) => Self::new(ra, dec).map(Some),
            _ => Ok(None),
        }
    }

    pub fn ra(&self) -> HourAngles {
        self.ra
    }

    pub fn dec(&self) -> Degrees {
        self.dec
    }

    pub fn ra_hours(&self) -> f64 {
        self.ra.value()
    }

    pub fn ra_degrees(&self) -> f64 {
        self.ra.value() * DEGREES_PER_HOUR
    }

    pub fn dec_degrees(&self) -> f64 {
        self.dec.value()
    }

    /// The diametrically opposite point on the sky.
    pub fn antipode(&self) -> Self {
        Self {
            ra: HourAngles::new(normalize_hours(self.ra.value() + 12.0)),
            dec: Degrees::new(-self.dec.value()),
        }
    }

    pub(crate) fn to_unit_vector(&self) -> Vector3 {
        Vector3::from_spherical_deg(self.ra_degrees(), self.dec_degrees())
    }

    pub(crate) fn from_unit_vector(v: &Vector3) -> Self {
        let (lon, lat) = v.to_spherical_deg();
        Self {
            ra: HourAngles::new(normalize_hours(lon / DEGREES_PER_HOUR)),
            dec: Degrees::new(lat.clamp(-90.0, 90.0)),
        }
    }
}

/// Topocentric horizontal position. Azimuth runs from North through East.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    pub azimuth: Degrees,
    pub altitude: Degrees,
}

impl HorizontalPosition {
    pub fn new(azimuth_deg: f64, altitude_deg: f64) -> Self {
        Self {
            azimuth: Degrees::new(normalize_degrees(azimuth_deg)),
            altitude: Degrees::new(altitude_deg),
        }
    }

    pub fn is_above_horizon(&self) -> bool {
        self.altitude.value() > 0.0
    }
}
