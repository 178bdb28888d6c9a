use chrono::TimeZone;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{format_hh_mm, format_optional};
use crate::models::{
    EquatorialPosition, ObjectId, ObjectVisibility, ObserverFrame, TimeInstant, Visibility,
};
use crate::services::{compute_batch, VisibilityEngine};

/// Catalog entry as stored by the observation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogObject {
    pub id: ObjectId,
    pub name: String,
    /// Right ascension in hours, when known.
    pub ra_hours: Option<f64>,
    /// Declination in degrees, when known.
    pub dec_deg: Option<f64>,
    #[serde(default)]
    pub comments: String,
}

impl CatalogObject {
    /// Catalog position, `None` when either coordinate is missing or out of
    /// range.
    pub fn position(&self) -> Option<EquatorialPosition> {
        match EquatorialPosition::from_optional(self.ra_hours, self.dec_deg) {
            Ok(position) => position,
            Err(e) => {
                warn!("{} ({}): {e}", self.name, self.id);
                None
            }
        }
    }
}

/// One row of the objects table.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectRow {
    pub id: ObjectId,
    pub name: String,
    pub ra: String,
    pub dec: String,
    /// Local time of the next transit, blank when unavailable.
    pub transit: String,
    pub rise: String,
    pub set: String,
    pub comments: String,
    pub visibility: Visibility,
}

/// Position of an object on the polar sky plot.
#[derive(Debug, Clone, Serialize)]
pub struct PolarMarker {
    pub id: ObjectId,
    pub label: String,
    pub azimuth: qtty::Degrees,
    pub altitude: qtty::Degrees,
}

/// Objects table with the markers for everything currently above the horizon.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectsTable {
    pub rows: Vec<ObjectRow>,
    pub markers: Vec<PolarMarker>,
}

/// Route function name constant
pub const GET_OBJECT_ROWS: &str = "get_object_rows";

/// Build the objects table for one site and reference instant.
///
/// # Arguments
/// * `engine` - Horizon model
/// * `frame` - Observer site bound to the reference instant
/// * `objects` - Catalog entries, in display order
/// * `tz` - Time zone used to render the transit, rise and set times
pub fn build_objects_table<Tz>(
    engine: &VisibilityEngine,
    frame: &ObserverFrame,
    objects: &[CatalogObject],
    tz: &Tz,
) -> ObjectsTable
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let targets: Vec<_> = objects.iter().map(CatalogObject::position).collect();
    let results = compute_batch(engine, frame, &targets);

    let mut rows = Vec::with_capacity(objects.len());
    let mut markers = Vec::new();

    for (object, result) in objects.iter().zip(results) {
        // a failed row renders like one without coordinates
        let visibility = result.unwrap_or(Visibility::Unavailable);
        let cell = |pick: fn(&ObjectVisibility) -> Option<TimeInstant>| {
            visibility
                .as_available()
                .and_then(pick)
                .map(|t| format_hh_mm(&t, tz))
                .unwrap_or_default()
        };

        let row = ObjectRow {
            id: object.id,
            name: object.name.clone(),
            ra: format_optional(object.ra_hours, 6),
            dec: format_optional(object.dec_deg, 6),
            transit: cell(|v| Some(v.transit)),
            rise: cell(|v| v.rise()),
            set: cell(|v| v.set()),
            comments: object.comments.clone(),
            visibility,
        };

        if let Some(v) = visibility.as_available() {
            if v.horizontal.is_above_horizon() {
                markers.push(PolarMarker {
                    id: object.id,
                    label: object.name.clone(),
                    azimuth: v.horizontal.azimuth,
                    altitude: v.horizontal.altitude,
                });
            }
        }
        rows.push(row);
    }

    ObjectsTable { rows, markers }
}
