//! Precession (IAU 1976) and nutation rotation matrices.
//!
//! Catalog positions are mean J2000; the engine needs true equator and
//! equinox of date. `j2000_to_date` composes `N · P` and `date_to_j2000`
//! undoes precession only, which is the frame the lunar model reports in.

use crate::core::{Matrix3, Vector3, ARCSEC_PER_DEGREE};

use super::julian::JulianDate;
use super::nutation::{mean_obliquity, nutation, true_obliquity};

/// Precession angles ζ, z, θ in degrees.
fn precession_angles(jd_tt: JulianDate) -> (f64, f64, f64) {
    let t = jd_tt.centuries_since_j2000();
    let (t2, t3) = (t * t, t * t * t);

    let zeta = 2_306.218_1 * t + 0.301_88 * t2 + 0.017_998 * t3;
    let z = 2_306.218_1 * t + 1.094_68 * t2 + 0.018_203 * t3;
    let theta = 2_004.310_9 * t - 0.426_65 * t2 - 0.041_833 * t3;

    (
        zeta / ARCSEC_PER_DEGREE,
        z / ARCSEC_PER_DEGREE,
        theta / ARCSEC_PER_DEGREE,
    )
}

/// Mean J2000 → mean equator and equinox of date.
pub fn precession_matrix(jd_tt: JulianDate) -> Matrix3 {
    let (zeta, z, theta) = precession_angles(jd_tt);
    Matrix3::rot_z(-z)
        .mul(&Matrix3::rot_y(theta))
        .mul(&Matrix3::rot_z(-zeta))
}

/// Mean equator of date → true equator of date.
pub fn nutation_matrix(jd_tt: JulianDate) -> Matrix3 {
    let n = nutation(jd_tt);
    Matrix3::rot_x(-true_obliquity(jd_tt, &n))
        .mul(&Matrix3::rot_z(-n.longitude))
        .mul(&Matrix3::rot_x(mean_obliquity(jd_tt)))
}

/// Mean J2000 unit vector → true equator and equinox of date.
pub fn j2000_to_date(v: &Vector3, jd_tt: JulianDate) -> Vector3 {
    nutation_matrix(jd_tt)
        .mul(&precession_matrix(jd_tt))
        .apply(v)
}

/// Mean equator of date unit vector → mean J2000.
pub fn date_to_j2000(v: &Vector3, jd_tt: JulianDate) -> Vector3 {
    precession_matrix(jd_tt).transpose().apply(v)
}
