//! Catalog position → horizontal coordinates.
//!
//! The chain is: mean J2000 → true equator and equinox of date (precession
//! and nutation) → hour angle against the local apparent sidereal time →
//! azimuth/altitude on the observer's horizon. Annual aberration (≤20″) and
//! light-time are not modelled.

use crate::core::{
    asin_deg, atan2_deg, cos_deg, is_negligible, normalize_signed_degrees, sin_deg,
    RefractionModel, DEGREES_PER_HOUR,
};
use crate::models::{EquatorialPosition, HorizontalPosition, ObserverFrame};
use crate::time::precession::j2000_to_date;
use crate::time::JulianDate;

/// Below this `cos(alt)` the target is treated as being at the zenith/nadir.
/// `asin` near ±1 only resolves `cos(alt)` to about 1.5e-8.
const ZENITH_COS_EPSILON: f64 = 1e-7;

/// Position referred to the true equator and equinox of `jd_tt`.
pub fn apparent_place(position: &EquatorialPosition, jd_tt: JulianDate) -> EquatorialPosition {
    EquatorialPosition::from_unit_vector(&j2000_to_date(&position.to_unit_vector(), jd_tt))
}

/// Hour angle `LST − RA` of an already apparent position, degrees in
/// `[-180, 180)`.
pub(crate) fn hour_angle_of_apparent(frame: &ObserverFrame, apparent: &EquatorialPosition) -> f64 {
    normalize_signed_degrees(frame.local_sidereal_time() * DEGREES_PER_HOUR - apparent.ra_degrees())
}

/// Local hour angle of a catalog position at the frame's instant, degrees in
/// `[-180, 180)`. Negative east of the meridian (rising side).
pub fn hour_angle(frame: &ObserverFrame, position: &EquatorialPosition) -> qtty::Degrees {
    let apparent = apparent_place(position, frame.instant().jd_tt());
    qtty::Degrees::new(hour_angle_of_apparent(frame, &apparent))
}

/// Azimuth and altitude from latitude, declination and hour angle, degrees.
///
/// Azimuth is 0 by convention when it is undefined (observer at a pole, or
/// target at the zenith/nadir).
pub(crate) fn horizontal_from_hour_angle(lat: f64, dec: f64, ha: f64) -> (f64, f64) {
    let (sin_lat, cos_lat) = (sin_deg(lat), cos_deg(lat));
    let (sin_dec, cos_dec) = (sin_deg(dec), cos_deg(dec));

    let sin_alt = sin_dec * sin_lat + cos_dec * cos_lat * cos_deg(ha);
    let alt = asin_deg(sin_alt);
    let cos_alt = cos_deg(alt);

    if is_negligible(cos_lat) || cos_alt < ZENITH_COS_EPSILON {
        return (0.0, alt);
    }

    let sin_az = -sin_deg(ha) * cos_dec / cos_alt;
    let cos_az = (sin_dec - sin_alt * sin_lat) / (cos_alt * cos_lat);
    (atan2_deg(sin_az, cos_az), alt)
}

/// Geometric horizontal position of a catalog target at the frame's instant.
///
/// # Arguments
/// * `frame` - Observer site and instant
/// * `position` - Mean J2000 catalog position
///
/// # Returns
/// Azimuth in `[0, 360)` from North through East and geometric altitude.
pub fn to_horizontal(frame: &ObserverFrame, position: &EquatorialPosition) -> HorizontalPosition {
    let apparent = apparent_place(position, frame.instant().jd_tt());
    let ha = hour_angle_of_apparent(frame, &apparent);
    let (az, alt) =
        horizontal_from_hour_angle(frame.effective_latitude(), apparent.dec_degrees(), ha);
    HorizontalPosition::new(az, alt)
}

/// Horizontal position with the altitude corrected by `refraction`.
pub fn to_horizontal_refracted(
    frame: &ObserverFrame,
    position: &EquatorialPosition,
    refraction: RefractionModel,
) -> HorizontalPosition {
    let geometric = to_horizontal(frame, position);
    HorizontalPosition::new(
        geometric.azimuth.value(),
        refraction.apparent_altitude(geometric.altitude.value()),
    )
}
