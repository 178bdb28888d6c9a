//! Low-precision Moon and Sun positions and the Moon's phase.
//!
//! Mean orbital elements after Paul Schlyter's "How to compute planetary
//! positions", with the twelve largest longitude terms, five latitude terms
//! and two distance terms. Positions are good to a few arcminutes, which is
//! plenty for a proximity warning.

use log::debug;
use qtty::Degrees;

use crate::core::{atan2_deg, cos_deg, normalize_degrees, sin_deg, Matrix3, Vector3};
use crate::models::{EquatorialPosition, LunarState, ObserverFrame, TimeInstant};
use crate::time::precession::date_to_j2000;
use crate::time::JulianDate;

use super::transform::{apparent_place, hour_angle_of_apparent};

/// Epoch of the element day count, 1999-12-31 0h TT.
const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137;
pub const ASTRONOMICAL_UNIT_KM: f64 = 149_597_870.7;

/// WGS84 polar/equatorial axis ratio.
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Ecliptic longitude/latitude (degrees) and distance.
#[derive(Debug, Clone, Copy)]
struct EclipticPoint {
    lon: f64,
    lat: f64,
    distance_km: f64,
}

fn day_number(jd_tt: JulianDate) -> f64 {
    jd_tt.value() - ELEMENT_EPOCH_JD
}

/// Eccentric anomaly from the two-term series, degrees.
fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    mean_anomaly
        + e.to_degrees() * sin_deg(mean_anomaly) * (1.0 + e * cos_deg(mean_anomaly))
}

/// True anomaly (degrees) and radius in units of the semi-major axis.
fn true_anomaly(mean_anomaly: f64, e: f64) -> (f64, f64) {
    let ea = eccentric_anomaly(mean_anomaly, e);
    let xv = cos_deg(ea) - e;
    let yv = (1.0 - e * e).sqrt() * sin_deg(ea);
    (atan2_deg(yv, xv), xv.hypot(yv))
}

struct SunElements {
    perihelion: f64,
    eccentricity: f64,
    mean_anomaly: f64,
}

fn sun_elements(d: f64) -> SunElements {
    SunElements {
        perihelion: 282.940_4 + 4.709_35e-5 * d,
        eccentricity: 0.016_709 - 1.151e-9 * d,
        mean_anomaly: normalize_degrees(356.047_0 + 0.985_600_258_5 * d),
    }
}

/// Geocentric ecliptic position of the Sun, equinox of date.
fn sun_position(d: f64) -> EclipticPoint {
    let sun = sun_elements(d);
    let (v, r) = true_anomaly(sun.mean_anomaly, sun.eccentricity);
    EclipticPoint {
        lon: normalize_degrees(v + sun.perihelion),
        lat: 0.0,
        distance_km: r * ASTRONOMICAL_UNIT_KM,
    }
}

/// Geocentric ecliptic position of the Moon, equinox of date.
fn moon_position(d: f64) -> EclipticPoint {
    let node = normalize_degrees(125.122_8 - 0.052_953_808_3 * d);
    let inclination = 5.145_4;
    let perigee = normalize_degrees(318.063_4 + 0.164_357_322_3 * d);
    let semi_major_axis = 60.266_6; // Earth radii
    let e = 0.054_900;
    let mean_anomaly = normalize_degrees(115.365_4 + 13.064_992_950_9 * d);

    let (v, r) = true_anomaly(mean_anomaly, e);
    let r = r * semi_major_axis;
    let u = v + perigee;

    let xh = r * (cos_deg(node) * cos_deg(u) - sin_deg(node) * sin_deg(u) * cos_deg(inclination));
    let yh = r * (sin_deg(node) * cos_deg(u) + cos_deg(node) * sin_deg(u) * cos_deg(inclination));
    let zh = r * sin_deg(u) * sin_deg(inclination);

    let mut lon = atan2_deg(yh, xh);
    let mut lat = atan2_deg(zh, xh.hypot(yh));
    let mut dist = r;

    // fundamental arguments
    let sun = sun_elements(d);
    let ms = sun.mean_anomaly;
    let mm = mean_anomaly;
    let ls = ms + sun.perihelion;
    let lm = mm + perigee + node;
    let dd = lm - ls;
    let f = lm - node;

    lon += -1.274 * sin_deg(mm - 2.0 * dd) // evection
        + 0.658 * sin_deg(2.0 * dd) // variation
        - 0.186 * sin_deg(ms) // yearly equation
        - 0.059 * sin_deg(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_deg(mm - 2.0 * dd + ms)
        + 0.053 * sin_deg(mm + 2.0 * dd)
        + 0.046 * sin_deg(2.0 * dd - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(dd) // parallactic equation
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * dd)
        + 0.011 * sin_deg(mm - 4.0 * dd);

    lat += -0.173 * sin_deg(f - 2.0 * dd)
        - 0.055 * sin_deg(mm - f - 2.0 * dd)
        - 0.046 * sin_deg(mm + f - 2.0 * dd)
        + 0.033 * sin_deg(f + 2.0 * dd)
        + 0.017 * sin_deg(2.0 * mm + f);

    dist += -0.58 * cos_deg(mm - 2.0 * dd) - 0.46 * cos_deg(2.0 * dd);

    EclipticPoint {
        lon: normalize_degrees(lon),
        lat,
        distance_km: dist * EARTH_EQUATORIAL_RADIUS_KM,
    }
}

/// Obliquity of the ecliptic used with the mean elements, degrees.
fn element_obliquity(d: f64) -> f64 {
    23.439_3 - 3.563e-7 * d
}

/// Geocentric Moon state: J2000 position, phase and distance.
pub fn geocentric_moon_state(instant: &TimeInstant) -> LunarState {
    let jd_tt = instant.jd_tt();
    let d = day_number(jd_tt);
    let moon = moon_position(d);
    let sun = sun_position(d);

    // ecliptic of date → mean equator of date → J2000
    let ecliptic = Vector3::from_spherical_deg(moon.lon, moon.lat);
    let equatorial = Matrix3::rot_x(-element_obliquity(d)).apply(&ecliptic);
    let position = EquatorialPosition::from_unit_vector(&date_to_j2000(&equatorial, jd_tt));

    let cos_elongation = cos_deg(moon.lat) * cos_deg(moon.lon - sun.lon);
    let elongation = cos_elongation.clamp(-1.0, 1.0).acos().to_degrees();
    let phase_angle = atan2_deg(
        sun.distance_km * sin_deg(elongation),
        moon.distance_km - sun.distance_km * cos_elongation,
    );
    let illuminated_fraction = ((1.0 + cos_deg(phase_angle)) / 2.0 * 100.0).clamp(0.0, 100.0);

    LunarState {
        instant: *instant,
        illuminated_fraction,
        position,
        phase_angle: Degrees::new(phase_angle),
        elongation: Degrees::new(elongation),
        distance_km: moon.distance_km,
        topocentric: false,
    }
}

/// Moon state as seen from the observer at `instant`.
///
/// # Arguments
/// * `instant` - Time of the evaluation, usually the session date
/// * `frame` - Observer site; its own instant is replaced by `instant`
///
/// # Returns
/// Illuminated fraction and a J2000 position corrected for lunar parallax.
pub fn compute_moon_state(instant: &TimeInstant, frame: &ObserverFrame) -> LunarState {
    let state = geocentric_moon_state(instant).topocentric(&frame.at(*instant));
    debug!(
        "moon at {}: {:.1}% lit, ra {:.3}h dec {:.3}°",
        instant.utc(),
        state.illuminated_fraction,
        state.position.ra_hours(),
        state.position.dec_degrees()
    );
    state
}

impl LunarState {
    /// Correct a geocentric position for the observer's parallax (Meeus,
    /// chapter 40). A state that is already topocentric is returned as is.
    pub fn topocentric(&self, frame: &ObserverFrame) -> LunarState {
        if self.topocentric {
            return *self;
        }

        let location = frame.location();
        let lat = location.latitude().value();
        let height_ratio = location.elevation().value() / (EARTH_EQUATORIAL_RADIUS_KM * 1000.0);

        let u = (EARTH_AXIS_RATIO * lat.to_radians().tan()).atan().to_degrees();
        let rho_sin = EARTH_AXIS_RATIO * sin_deg(u) + height_ratio * sin_deg(lat);
        let rho_cos = cos_deg(u) + height_ratio * cos_deg(lat);
        let sin_parallax = EARTH_EQUATORIAL_RADIUS_KM / self.distance_km;

        // work in the frame of date where the hour angle is defined
        let apparent = apparent_place(&self.position, self.instant.jd_tt());
        let ha = hour_angle_of_apparent(frame, &apparent);
        let dec = apparent.dec_degrees();

        let denom = cos_deg(dec) - rho_cos * sin_parallax * cos_deg(ha);
        let delta_ra = atan2_deg(-rho_cos * sin_parallax * sin_deg(ha), denom);
        let topo_dec = atan2_deg(
            (sin_deg(dec) - rho_sin * sin_parallax) * cos_deg(delta_ra),
            denom,
        );

        let ra_deg = self.position.ra_degrees() + delta_ra;
        let dec_deg = (self.position.dec_degrees() + (topo_dec - dec)).clamp(-90.0, 90.0);
        let corrected = Vector3::from_spherical_deg(ra_deg, dec_deg);

        LunarState {
            position: EquatorialPosition::from_unit_vector(&corrected),
            topocentric: true,
            ..*self
        }
    }
}
