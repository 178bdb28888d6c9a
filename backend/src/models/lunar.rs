use qtty::Degrees;
use serde::Serialize;

use super::coordinates::EquatorialPosition;
use super::time::TimeInstant;

/// Moon position and phase at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LunarState {
    pub instant: TimeInstant,
    /// Illuminated fraction of the disk, percent in `[0, 100]`.
    pub illuminated_fraction: f64,
    /// Geocentric (or topocentric, after correction) position, J2000.
    pub position: EquatorialPosition,
    /// Sun–Moon–Earth angle; 0° at full Moon, 180° at new Moon.
    pub phase_angle: Degrees,
    /// Geocentric Sun–Moon elongation.
    pub elongation: Degrees,
    pub distance_km: f64,
    /// Whether `position` has been corrected for the observer's parallax.
    pub topocentric: bool,
}

impl LunarState {
    /// Whether the Moon is past first quarter and before last quarter,
    /// i.e. more than half lit.
    pub fn is_gibbous(&self) -> bool {
        self.illuminated_fraction > 50.0
    }
}
