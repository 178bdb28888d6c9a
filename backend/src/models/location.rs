use qtty::{Degrees, Meters};
use serde::Serialize;

use crate::error::{AstroError, AstroResult};

/// Observer elevation used when the site does not specify one, meters.
pub const DEFAULT_ELEVATION_M: f64 = 60.0;

/// Geodetic observer site. Longitude is east-positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticLocation {
    latitude: Degrees,
    longitude: Degrees,
    elevation: Meters,
}

impl GeodeticLocation {
    /// Validate and build a site.
    ///
    /// # Errors
    /// [`AstroError::InvalidLocation`] when latitude is outside `[-90, 90]`,
    /// longitude outside `[-180, 180]`, or any value is not finite.
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> AstroResult<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(AstroError::invalid_location(format!(
                "latitude {latitude_deg} is outside [-90, 90]"
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(AstroError::invalid_location(format!(
                "longitude {longitude_deg} is outside [-180, 180]"
            )));
        }
        if !elevation_m.is_finite() {
            return Err(AstroError::invalid_location(format!(
                "elevation {elevation_m} is not a finite number"
            )));
        }
        Ok(Self {
            latitude: Degrees::new(latitude_deg),
            longitude: Degrees::new(longitude_deg),
            elevation: Meters::new(elevation_m),
        })
    }

    /// Site at the default elevation.
    pub fn at_default_elevation(latitude_deg: f64, longitude_deg: f64) -> AstroResult<Self> {
        Self::new(latitude_deg, longitude_deg, DEFAULT_ELEVATION_M)
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    pub fn elevation(&self) -> Meters {
        self.elevation
    }
}
