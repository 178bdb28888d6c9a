mod support;

use chrono::{FixedOffset, NaiveDate, Utc};
use obslog_astro::config::EngineConfig;
use obslog_astro::models::{ObjectId, ObservationId, SessionId};
use obslog_astro::routes::constellations::{parse_constellation_lines, project_segments};
use obslog_astro::routes::objects::{build_objects_table, CatalogObject};
use obslog_astro::routes::observations::{build_observation_rows, ObservationRecord};
use obslog_astro::routes::sessions::{build_session_rows, session_moon, ObservingSession};
use obslog_astro::services::VisibilityEngine;
use support::{bonn, bonn_at};

fn catalog() -> Vec<CatalogObject> {
    vec![
        CatalogObject {
            id: ObjectId::new(1),
            name: "M42".to_string(),
            ra_hours: Some(5.588_139),
            dec_deg: Some(-5.391_111),
            comments: "Orion Nebula".to_string(),
        },
        CatalogObject {
            id: ObjectId::new(2),
            name: "Comet".to_string(),
            ra_hours: None,
            dec_deg: None,
            comments: String::new(),
        },
    ]
}

#[test]
fn test_objects_table_json_shape() {
    let cet = FixedOffset::east_opt(3600).unwrap();
    let table = build_objects_table(
        &VisibilityEngine::default(),
        &bonn_at(2024, 1, 15, 21, 0),
        &catalog(),
        &cet,
    );

    let json = serde_json::to_value(&table).unwrap();
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "M42");
    assert_eq!(rows[0]["ra"], "5.588139");
    assert_eq!(rows[0]["dec"], "-5.391111");
    assert_eq!(rows[0]["visibility"]["status"], "available");
    assert_eq!(rows[0]["visibility"]["rise_set"]["kind"], "normal");
    assert_eq!(rows[1]["visibility"]["status"], "unavailable");
    assert_eq!(rows[1]["transit"], "");
    assert_eq!(rows[0]["id"], 1);

    // M42 is near the meridian on a January evening
    let markers = json["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0]["label"], "M42");
    assert!(markers[0]["altitude"].as_f64().unwrap() > 25.0);
}

#[test]
fn test_session_to_observation_flow() {
    let config = EngineConfig::default();
    let date = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
    let moon = session_moon(&bonn(), date, &Utc, config.corrections().unwrap()).unwrap();

    let sessions = build_session_rows(
        &[ObservingSession {
            id: SessionId::new(10),
            name: "Full Moon night".to_string(),
            start_date: date,
            moon: Some(moon),
            comments: String::new(),
        }],
        &config.warnings,
    );
    assert!(sessions[0].illumination_warning);

    // Regulus sits a few degrees from the full Moon on this night,
    // Vega is far away
    let records = [
        ObservationRecord {
            id: ObservationId::new(1),
            session_id: SessionId::new(10),
            object_name: "Regulus".to_string(),
            object_ra_hours: Some(10.139_5),
            object_dec_deg: Some(11.967),
            moon: Some(moon),
        },
        ObservationRecord {
            id: ObservationId::new(2),
            session_id: SessionId::new(10),
            object_name: "Vega".to_string(),
            object_ra_hours: Some(18.615_6),
            object_dec_deg: Some(38.783_7),
            moon: Some(moon),
        },
    ];
    let rows = build_observation_rows(&records, &config.warnings);
    assert!(rows[0].separation_warning);
    assert!(!rows[1].separation_warning);

    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["separation"]["kind"], "degrees");
    assert!(json["separation"]["value"].as_f64().unwrap() < 60.0);
}

#[test]
fn test_constellation_segments_serialize() {
    let lines = parse_constellation_lines("Ori,88.79,7.41,81.28,6.35\n");
    let segments = project_segments(&bonn_at(2024, 1, 15, 21, 0), &lines);
    let json = serde_json::to_value(&segments).unwrap();
    assert_eq!(json[0]["name"], "Ori");
    assert!(json[0]["start"]["altitude"].as_f64().unwrap() > 0.0);
    assert!(json[0]["start"]["azimuth"].as_f64().is_some());
}
