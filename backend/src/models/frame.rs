//! Observer frame: a site bound to one instant.

use serde::{Deserialize, Serialize};

use super::location::GeodeticLocation;
use super::time::TimeInstant;
use crate::core::{cos_deg, is_negligible, sin_deg, tan_deg, ARCSEC_PER_DEGREE};
use crate::time::local_apparent_sidereal_time;

/// Pole offsets (IERS x_p, y_p) in milliarcseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarMotion {
    pub x_mas: f64,
    pub y_mas: f64,
}

impl PolarMotion {
    pub fn new(x_mas: f64, y_mas: f64) -> Self {
        Self { x_mas, y_mas }
    }

    pub fn is_zero(&self) -> bool {
        self.x_mas == 0.0 && self.y_mas == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverFrame {
    location: GeodeticLocation,
    instant: TimeInstant,
    polar_motion: PolarMotion,
}

impl ObserverFrame {
    pub fn new(location: GeodeticLocation, instant: TimeInstant) -> Self {
        Self {
            location,
            instant,
            polar_motion: PolarMotion::default(),
        }
    }

    pub fn with_polar_motion(mut self, polar_motion: PolarMotion) -> Self {
        self.polar_motion = polar_motion;
        self
    }

    /// The same site bound to another instant.
    pub fn at(&self, instant: TimeInstant) -> Self {
        Self { instant, ..*self }
    }

    pub fn location(&self) -> &GeodeticLocation {
        &self.location
    }

    pub fn instant(&self) -> &TimeInstant {
        &self.instant
    }

    pub fn polar_motion(&self) -> &PolarMotion {
        &self.polar_motion
    }

    /// Latitude and east longitude referred to the instantaneous pole,
    /// degrees.
    pub fn effective_coordinates(&self) -> (f64, f64) {
        let lat = self.location.latitude().value();
        let lon = self.location.longitude().value();
        if self.polar_motion.is_zero() {
            return (lat, lon);
        }

        let x = self.polar_motion.x_mas / 1000.0 / ARCSEC_PER_DEGREE;
        let y = self.polar_motion.y_mas / 1000.0 / ARCSEC_PER_DEGREE;
        let dlat = x * cos_deg(lon) - y * sin_deg(lon);
        // longitude shift diverges at the poles
        let dlon = if is_negligible(cos_deg(lat)) {
            0.0
        } else {
            (x * sin_deg(lon) + y * cos_deg(lon)) * tan_deg(lat)
        };
        ((lat + dlat).clamp(-90.0, 90.0), lon + dlon)
    }

    pub fn effective_latitude(&self) -> f64 {
        self.effective_coordinates().0
    }

    /// Local apparent sidereal time at the site, hours.
    pub fn local_sidereal_time(&self) -> f64 {
        local_apparent_sidereal_time(&self.instant, self.effective_coordinates().1)
    }
}
