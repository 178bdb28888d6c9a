use serde::{Deserialize, Serialize};

use super::format_optional;
use crate::config::WarningSettings;
use crate::models::{EquatorialPosition, ObservationId, Separation, SessionId};
use crate::services::separation;

use super::sessions::SessionMoon;

/// Observation joined with its object's coordinates and its session's Moon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub id: ObservationId,
    pub session_id: SessionId,
    pub object_name: String,
    pub object_ra_hours: Option<f64>,
    pub object_dec_deg: Option<f64>,
    pub moon: Option<SessionMoon>,
}

impl ObservationRecord {
    /// Angular distance between the target and the session's Moon.
    pub fn moon_separation(&self) -> Separation {
        let target = position(self.object_ra_hours, self.object_dec_deg);
        let moon = self
            .moon
            .and_then(|m| position(Some(m.ra_hours), Some(m.dec_deg)));
        separation(target.as_ref(), moon.as_ref())
    }
}

fn position(ra_hours: Option<f64>, dec_deg: Option<f64>) -> Option<EquatorialPosition> {
    EquatorialPosition::from_optional(ra_hours, dec_deg)
        .ok()
        .flatten()
}

/// One row of the observations table.
#[derive(Debug, Clone, Serialize)]
pub struct ObservationRow {
    pub id: ObservationId,
    pub session_id: SessionId,
    pub object: String,
    pub moon_illumination: String,
    pub separation: Separation,
    /// Separation in degrees with one decimal, blank when not available.
    pub separation_text: String,
    /// Target closer to the Moon than the configured minimum.
    pub separation_warning: bool,
}

/// Route function name constant
pub const GET_OBSERVATION_ROWS: &str = "get_observation_rows";

/// Build the observations table.
pub fn build_observation_rows(
    records: &[ObservationRecord],
    warnings: &WarningSettings,
) -> Vec<ObservationRow> {
    records
        .iter()
        .map(|record| {
            let separation = record.moon_separation();
            ObservationRow {
                id: record.id,
                session_id: record.session_id,
                object: record.object_name.clone(),
                moon_illumination: format_optional(
                    record.moon.map(|m| m.illumination_percent),
                    0,
                ),
                separation,
                separation_text: format_optional(separation.degrees(), 1),
                separation_warning: separation
                    .is_closer_than(warnings.moon_separation_deg)
                    .unwrap_or(false),
            }
        })
        .collect()
}
