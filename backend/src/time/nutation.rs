//! Nutation and obliquity of the ecliptic.
//!
//! Low-precision series from Meeus chapter 22 (accurate to ~0.5″ in Δψ and
//! ~0.1″ in Δε), which is well inside what a naked-eye or small-telescope
//! observing log needs.

use crate::core::{cos_deg, sin_deg, ARCSEC_PER_DEGREE};

use super::julian::JulianDate;

/// Nutation in longitude and obliquity, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: f64,
    pub obliquity: f64,
}

/// Nutation angles at a TT Julian Date.
pub fn nutation(jd_tt: JulianDate) -> Nutation {
    let t = jd_tt.centuries_since_j2000();

    // longitude of the Moon's ascending node, mean longitudes of Sun and Moon
    let omega = 125.044_52 - 1_934.136_261 * t;
    let l_sun = 280.466_5 + 36_000.769_8 * t;
    let l_moon = 218.316_5 + 481_267.881_3 * t;

    let dpsi = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * l_sun) - 0.23 * sin_deg(2.0 * l_moon)
        + 0.21 * sin_deg(2.0 * omega);
    let deps = 9.20 * cos_deg(omega) + 0.57 * cos_deg(2.0 * l_sun) + 0.10 * cos_deg(2.0 * l_moon)
        - 0.09 * cos_deg(2.0 * omega);

    Nutation {
        longitude: dpsi / ARCSEC_PER_DEGREE,
        obliquity: deps / ARCSEC_PER_DEGREE,
    }
}

/// Mean obliquity of the ecliptic (IAU 1980), degrees.
pub fn mean_obliquity(jd_tt: JulianDate) -> f64 {
    let t = jd_tt.centuries_since_j2000();
    let arcsec = 21.448 - 46.815_0 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / ARCSEC_PER_DEGREE
}

/// True obliquity ε0 + Δε for nutation already evaluated at `jd_tt`, degrees.
pub fn true_obliquity(jd_tt: JulianDate, n: &Nutation) -> f64 {
    mean_obliquity(jd_tt) + n.obliquity
}
