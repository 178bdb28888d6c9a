//! Standard atmospheric refraction.
//!
//! Two empirical formulas are used, one per direction:
//! - Saemundsson (1986): true (geometric) altitude → refraction,
//! - Bennett (1982): apparent (observed) altitude → refraction.
//!
//! Both assume 1010 hPa and 10 °C. The correction is below 0.1′ above 45°,
//! about 3.5′ at 15° and grows to roughly 34′ at the horizon.

use serde::{Deserialize, Serialize};

use super::angles::tan_deg;

/// Geometric altitudes below this get no refraction correction.
const REFRACTION_FLOOR_DEG: f64 = -1.0;

/// Which refraction model to apply when altitudes feed horizon decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefractionModel {
    /// Purely geometric altitudes.
    None,
    /// Standard atmosphere (1010 hPa, 10 °C).
    #[default]
    Standard,
}

impl RefractionModel {
    /// Apparent altitude for a geometric altitude, degrees.
    pub fn apparent_altitude(self, true_altitude_deg: f64) -> f64 {
        match self {
            RefractionModel::None => true_altitude_deg,
            RefractionModel::Standard => {
                true_altitude_deg + standard_refraction_deg(true_altitude_deg)
            }
        }
    }

    /// Geometric altitude at which an object appears on the given apparent
    /// horizon altitude. This is the `alt0` used by rise/set searches.
    pub fn geometric_horizon(self, apparent_horizon_deg: f64) -> f64 {
        match self {
            RefractionModel::None => apparent_horizon_deg,
            RefractionModel::Standard => {
                apparent_horizon_deg - observed_refraction_deg(apparent_horizon_deg)
            }
        }
    }
}

/// Refraction in degrees for a geometric altitude (Saemundsson).
pub fn standard_refraction_deg(true_altitude_deg: f64) -> f64 {
    if true_altitude_deg < REFRACTION_FLOOR_DEG {
        return 0.0;
    }
    let h = true_altitude_deg;
    let arcmin = 1.02 / tan_deg(h + 10.3 / (h + 5.11));
    (arcmin / 60.0).max(0.0)
}

/// Refraction in degrees for an apparent altitude (Bennett).
pub fn observed_refraction_deg(apparent_altitude_deg: f64) -> f64 {
    if apparent_altitude_deg < REFRACTION_FLOOR_DEG {
        return 0.0;
    }
    let h = apparent_altitude_deg;
    let arcmin = 1.0 / tan_deg(h + 7.31 / (h + 4.4));
    (arcmin / 60.0).max(0.0)
}
