//! Table and plot adapters on top of the engine.
//!
//! Each submodule turns engine results into display-ready rows: local-time
//! `HH:MM` strings, fixed-decimal numbers, blank cells for unknown values
//! and warning flags derived from the configured thresholds.

use chrono::TimeZone;
use std::fmt::Display;

use crate::models::TimeInstant;

pub mod constellations;
pub mod objects;
pub mod observations;
pub mod sessions;

/// Local `HH:MM` of an instant, with the minutes truncated.
pub fn format_hh_mm<Tz>(instant: &TimeInstant, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant
        .truncated_to_minute()
        .utc()
        .with_timezone(tz)
        .format("%H:%M")
        .to_string()
}

/// Fixed-decimal rendering of an optional value; blank when absent.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_default()
}
