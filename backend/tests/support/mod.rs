#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use std::sync::Mutex;

use obslog_astro::models::{EquatorialPosition, GeodeticLocation, ObserverFrame, TimeInstant};
use obslog_astro::time::TimeCorrections;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Bonn, the reference site used throughout the tests.
pub const BONN_LATITUDE: f64 = 50.7374;
pub const BONN_LONGITUDE: f64 = 7.0982;

pub fn bonn() -> GeodeticLocation {
    GeodeticLocation::at_default_elevation(BONN_LATITUDE, BONN_LONGITUDE).expect("valid site")
}

/// UTC instant with the default time corrections.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> TimeInstant {
    TimeInstant::new(
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid timestamp"),
        TimeCorrections::default(),
    )
}

pub fn bonn_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> ObserverFrame {
    ObserverFrame::new(bonn(), utc(year, month, day, hour, minute))
}

/// Cape Town, for southern-hemisphere cases.
pub fn cape_town_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> ObserverFrame {
    let site = GeodeticLocation::at_default_elevation(-33.9, 18.4).expect("valid site");
    ObserverFrame::new(site, utc(year, month, day, hour, minute))
}

pub fn position(ra_hours: f64, dec_deg: f64) -> EquatorialPosition {
    EquatorialPosition::new(ra_hours, dec_deg).expect("valid position")
}

/// Runs `f` with `OBSLOG_*` (or any other) environment variables temporarily
/// modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
