//! Degree-based trigonometry and range normalisation.
//!
//! Every formula in the engine is written in degrees because that is the unit
//! catalog data and configuration arrive in. These helpers keep the radian
//! conversion and the range folding in one place.

/// Degrees per hour of right ascension / hour angle.
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Arcseconds per degree.
pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Values whose magnitude is below this are treated as zero in divisions.
pub const GEOMETRY_EPSILON: f64 = 1e-12;

#[inline]
pub fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

#[inline]
pub fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

#[inline]
pub fn tan_deg(x: f64) -> f64 {
    x.to_radians().tan()
}

/// `atan2` returning degrees.
#[inline]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Clamp a cosine/sine-like value into `[-1, 1]` to absorb rounding overshoot.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// `asin` in degrees with the argument clamped into the valid domain.
#[inline]
pub fn asin_deg(x: f64) -> f64 {
    clamp_unit(x).asin().to_degrees()
}

/// `acos` in degrees with the argument clamped into the valid domain.
#[inline]
pub fn acos_deg(x: f64) -> f64 {
    clamp_unit(x).acos().to_degrees()
}

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(x: f64) -> f64 {
    let y = x.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if y >= 360.0 {
        0.0
    } else {
        y
    }
}

/// Wrap an angle into `[-180, 180)`.
#[inline]
pub fn normalize_signed_degrees(x: f64) -> f64 {
    normalize_degrees(x + 180.0) - 180.0
}

/// Wrap a time-of-day or right ascension into `[0, 24)`.
#[inline]
pub fn normalize_hours(x: f64) -> f64 {
    let y = x.rem_euclid(24.0);
    if y >= 24.0 {
        0.0
    } else {
        y
    }
}

/// Whether a denominator is too small to divide by safely.
#[inline]
pub fn is_negligible(x: f64) -> bool {
    x.abs() < GEOMETRY_EPSILON
}
