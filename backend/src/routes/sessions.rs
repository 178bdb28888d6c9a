use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::format_optional;
use crate::config::WarningSettings;
use crate::error::{AstroError, AstroResult};
use crate::models::{GeodeticLocation, LunarState, ObserverFrame, SessionId, TimeInstant};
use crate::services::compute_moon_state;
use crate::time::TimeCorrections;

/// Local clock time at which the Moon is evaluated for a session night.
pub const SESSION_EVENING_HOUR: u32 = 22;

/// Moon values stored with a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMoon {
    /// Illuminated fraction, percent.
    pub illumination_percent: f64,
    /// Right ascension in hours, J2000.
    pub ra_hours: f64,
    /// Declination in degrees, J2000.
    pub dec_deg: f64,
}

impl From<&LunarState> for SessionMoon {
    fn from(state: &LunarState) -> Self {
        Self {
            illumination_percent: state.illuminated_fraction,
            ra_hours: state.position.ra_hours(),
            dec_deg: state.position.dec_degrees(),
        }
    }
}

/// Observing session as stored by the observation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservingSession {
    pub id: SessionId,
    pub name: String,
    pub start_date: NaiveDate,
    /// Absent for sessions recorded before the Moon columns existed.
    pub moon: Option<SessionMoon>,
    #[serde(default)]
    pub comments: String,
}

/// One row of the sessions table.
#[derive(Debug, Clone, Serialize)]
pub struct SessionRow {
    pub id: SessionId,
    pub name: String,
    pub date: String,
    pub moon_illumination: String,
    pub moon_ra: String,
    pub moon_dec: String,
    /// Moon brighter than the configured threshold.
    pub illumination_warning: bool,
    pub comments: String,
}

/// Route function name constant
pub const GET_SESSION_ROWS: &str = "get_session_rows";

/// Evening of a session date in the given time zone, as a UTC instant.
pub fn session_reference_instant<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
    corrections: TimeCorrections,
) -> AstroResult<TimeInstant> {
    let evening = NaiveTime::from_hms_opt(SESSION_EVENING_HOUR, 0, 0)
        .map(|t| date.and_time(t))
        .ok_or_else(|| AstroError::unsupported_date(format!("no evening on {date}")))?;
    let local = tz.from_local_datetime(&evening).earliest().ok_or_else(|| {
        AstroError::unsupported_date(format!("{evening} does not exist in the local time zone"))
    })?;
    TimeInstant::checked(local.with_timezone(&Utc), corrections)
}

/// Moon values to store with a session starting on `date`.
pub fn session_moon<Tz: TimeZone>(
    location: &GeodeticLocation,
    date: NaiveDate,
    tz: &Tz,
    corrections: TimeCorrections,
) -> AstroResult<SessionMoon> {
    let instant = session_reference_instant(date, tz, corrections)?;
    let state = compute_moon_state(&instant, &ObserverFrame::new(*location, instant));
    Ok(SessionMoon::from(&state))
}

/// Build the sessions table.
pub fn build_session_rows(
    sessions: &[ObservingSession],
    warnings: &WarningSettings,
) -> Vec<SessionRow> {
    sessions
        .iter()
        .map(|session| {
            let moon = session.moon.as_ref();
            let illumination = moon.map(|m| m.illumination_percent);
            SessionRow {
                id: session.id,
                name: session.name.clone(),
                date: session.start_date.format("%Y-%m-%d").to_string(),
                moon_illumination: format_optional(illumination, 0),
                moon_ra: format_optional(moon.map(|m| m.ra_hours), 2),
                moon_dec: format_optional(moon.map(|m| m.dec_deg), 2),
                illumination_warning: illumination
                    .is_some_and(|v| v > warnings.moon_illumination_percent),
                comments: session.comments.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn session(id: i64, moon: Option<SessionMoon>) -> ObservingSession {
        ObservingSession {
            id: SessionId::new(id),
            name: format!("Night {id}"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
            moon,
            comments: String::new(),
        }
    }

    #[test]
    fn test_reference_instant_is_local_evening() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let instant = session_reference_instant(date, &cet, TimeCorrections::default()).unwrap();
        assert_eq!(instant.hour_minute(), (21, 0));
    }

    #[test]
    fn test_full_moon_session_warns() {
        let bonn = GeodeticLocation::at_default_elevation(50.7374, 7.0982).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let moon = session_moon(&bonn, date, &Utc, TimeCorrections::default()).unwrap();
        assert!(moon.illumination_percent > 95.0);
        assert!((0.0..24.0).contains(&moon.ra_hours));

        let rows = build_session_rows(&[session(1, Some(moon))], &WarningSettings::default());
        assert!(rows[0].illumination_warning);
        assert_eq!(rows[0].date, "2024-01-25");
        assert!(!rows[0].moon_illumination.contains('.'));
    }

    #[test]
    fn test_rows_format_and_threshold() {
        let moon = SessionMoon {
            illumination_percent: 75.0,
            ra_hours: 10.123_4,
            dec_deg: -5.678,
        };
        let rows = build_session_rows(
            &[session(1, Some(moon)), session(2, None)],
            &WarningSettings::default(),
        );
        assert_eq!(rows[0].moon_illumination, "75");
        assert_eq!(rows[0].moon_ra, "10.12");
        assert_eq!(rows[0].moon_dec, "-5.68");
        // threshold itself does not warn
        assert!(!rows[0].illumination_warning);

        assert_eq!(rows[1].moon_illumination, "");
        assert!(!rows[1].illumination_warning);
    }
}
