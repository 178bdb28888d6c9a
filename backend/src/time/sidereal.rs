//! Greenwich and local sidereal time.

use crate::core::{cos_deg, normalize_degrees, DEGREES_PER_HOUR};
use crate::models::TimeInstant;

use super::julian::{JulianDate, J2000_JD};
use super::nutation::{nutation, true_obliquity};

/// Rate at which the hour angle of a fixed star grows, degrees per UT1 day.
pub const SIDEREAL_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;

/// Greenwich mean sidereal time (IAU 1982) at a UT1 Julian Date, degrees.
pub fn gmst_degrees(jd_ut1: JulianDate) -> f64 {
    let d = jd_ut1.value() - J2000_JD;
    let t = jd_ut1.centuries_since_j2000();
    normalize_degrees(
        280.460_618_37 + SIDEREAL_RATE_DEG_PER_DAY * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Equation of the equinoxes Δψ·cos ε, degrees.
pub fn equation_of_equinoxes(jd_tt: JulianDate) -> f64 {
    let n = nutation(jd_tt);
    n.longitude * cos_deg(true_obliquity(jd_tt, &n))
}

/// Greenwich apparent sidereal time, degrees in `[0, 360)`.
pub fn gast_degrees(jd_ut1: JulianDate, jd_tt: JulianDate) -> f64 {
    normalize_degrees(gmst_degrees(jd_ut1) + equation_of_equinoxes(jd_tt))
}

/// Local apparent sidereal time in hours `[0, 24)` for an east-positive
/// longitude in degrees.
pub fn local_apparent_sidereal_time(instant: &TimeInstant, longitude_deg: f64) -> f64 {
    normalize_degrees(gast_degrees(instant.jd_ut1(), instant.jd_tt()) + longitude_deg)
        / DEGREES_PER_HOUR
}
