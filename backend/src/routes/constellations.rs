//! Constellation stick figures for the polar sky plot.
//!
//! Lines come from a CSV file with one segment per line:
//! `name,ra1_deg,dec1_deg,ra2_deg,dec2_deg` (right ascension in degrees).
//! Blank and malformed lines are skipped.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::models::{EquatorialPosition, HorizontalPosition, ObserverFrame};
use crate::services::to_horizontal;

/// One segment of a constellation figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstellationLine {
    pub name: String,
    pub start: EquatorialPosition,
    pub end: EquatorialPosition,
}

/// A segment projected onto the sky of one site, ready to plot.
#[derive(Debug, Clone, Serialize)]
pub struct PlotSegment {
    pub name: String,
    pub start: HorizontalPosition,
    pub end: HorizontalPosition,
}

/// Route function name constant
pub const GET_CONSTELLATION_SEGMENTS: &str = "get_constellation_segments";

/// Parse constellation lines, skipping anything that is not a valid segment.
pub fn parse_constellation_lines(content: &str) -> Vec<ConstellationLine> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                debug!("skipping constellation line {line:?}");
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<ConstellationLine> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, ra1, dec1, ra2, dec2] = parts.as_slice() else {
        return None;
    };
    let number = |s: &str| s.parse::<f64>().ok();
    let start = EquatorialPosition::from_degrees(number(*ra1)?, number(*dec1)?).ok()?;
    let end = EquatorialPosition::from_degrees(number(*ra2)?, number(*dec2)?).ok()?;
    Some(ConstellationLine {
        name: name.to_string(),
        start,
        end,
    })
}

/// Read and parse a constellation CSV file.
pub fn load_constellation_lines<P: AsRef<Path>>(path: P) -> Result<Vec<ConstellationLine>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read constellation file {}", path.display()))?;
    let lines = parse_constellation_lines(&content);
    debug!("loaded {} constellation segments from {}", lines.len(), path.display());
    Ok(lines)
}

/// Project segments for the frame's site and instant.
///
/// Segments with both ends below the horizon are dropped; an end below the
/// horizon is drawn on it (altitude clamped to 0).
pub fn project_segments(frame: &ObserverFrame, lines: &[ConstellationLine]) -> Vec<PlotSegment> {
    lines
        .iter()
        .filter_map(|line| {
            let start = to_horizontal(frame, &line.start);
            let end = to_horizontal(frame, &line.end);
            if start.altitude.value() < 0.0 && end.altitude.value() < 0.0 {
                return None;
            }
            Some(PlotSegment {
                name: line.name.clone(),
                start: clamp_to_horizon(start),
                end: clamp_to_horizon(end),
            })
        })
        .collect()
}

fn clamp_to_horizon(position: HorizontalPosition) -> HorizontalPosition {
    HorizontalPosition::new(
        position.azimuth.value(),
        position.altitude.value().max(0.0),
    )
}
