mod support;

use obslog_astro::config::{
    EngineConfig, ENV_DUT1, ENV_LATITUDE, ENV_LEAP_SECONDS, ENV_LONGITUDE,
};
use obslog_astro::core::RefractionModel;
use obslog_astro::AstroError;
use std::io::Write;
use support::with_scoped_env;
use tempfile::NamedTempFile;

const BONN_CONFIG: &str = r#"
[observer]
latitude = 50.7374
longitude = 7.0982

[horizon]
refraction = "none"
altitude_deg = 2.5
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(BONN_CONFIG);
    let config = EngineConfig::from_file(file.path()).unwrap();

    assert_eq!(config.observer.latitude, 50.7374);
    // unspecified values fall back to their defaults
    assert_eq!(config.observer.elevation_m, 60.0);
    assert_eq!(config.time.leap_seconds, 37.0);
    assert_eq!(config.warnings.moon_separation_deg, 60.0);

    let engine = config.engine();
    assert_eq!(engine.refraction, RefractionModel::None);
    assert_eq!(engine.geometric_horizon(), 2.5);
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("obslog.toml")).unwrap_err();
    assert!(matches!(err, AstroError::Configuration { .. }));
}

#[test]
fn test_malformed_file_is_rejected() {
    let file = write_config("[observer\nlatitude = ");
    assert!(EngineConfig::from_file(file.path()).is_err());
}

#[test]
fn test_env_overrides_take_precedence() {
    let file = write_config(BONN_CONFIG);
    let config = with_scoped_env(
        &[
            (ENV_LATITUDE, Some("-33.9249")),
            (ENV_LONGITUDE, Some("18.4241")),
            (ENV_LEAP_SECONDS, Some("36")),
            (ENV_DUT1, None),
        ],
        || {
            EngineConfig::from_file(file.path())
                .and_then(EngineConfig::with_env_overrides)
                .unwrap()
        },
    );

    assert_eq!(config.observer.latitude, -33.9249);
    assert_eq!(config.observer.longitude, 18.4241);
    assert_eq!(config.time.leap_seconds, 36.0);
    assert_eq!(config.time.dut1_seconds, 0.042);
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let result = with_scoped_env(&[(ENV_LATITUDE, Some("north"))], || {
        EngineConfig::default().with_env_overrides()
    });
    assert!(matches!(result, Err(AstroError::Configuration { .. })));

    let result = with_scoped_env(&[(ENV_DUT1, Some("1.5"))], || {
        EngineConfig::default().with_env_overrides()
    });
    assert!(result.is_err());
}
