//! Great-circle distance between two equatorial positions.

use crate::core::{acos_deg, atan2_deg, cos_deg, sin_deg};
use crate::models::{EquatorialPosition, Separation};

/// Above this |cos D| the law of cosines loses precision and the Vincenty
/// form takes over (within ~0.8° of coincident or antipodal).
const COSINE_PRECISION_LIMIT: f64 = 0.9999;

/// Separation in degrees, `[0, 180]`. Exactly symmetric in its arguments.
pub fn separation_degrees(a: &EquatorialPosition, b: &EquatorialPosition) -> f64 {
    // fixed argument order keeps the Vincenty branch symmetric bit for bit
    let (a, b) = if (a.ra_degrees(), a.dec_degrees()) <= (b.ra_degrees(), b.dec_degrees()) {
        (a, b)
    } else {
        (b, a)
    };
    let (ra1, dec1) = (a.ra_degrees(), a.dec_degrees());
    let (ra2, dec2) = (b.ra_degrees(), b.dec_degrees());
    let dra = ra1 - ra2;

    let (sin_d1, cos_d1) = (sin_deg(dec1), cos_deg(dec1));
    let (sin_d2, cos_d2) = (sin_deg(dec2), cos_deg(dec2));

    let cos_d = sin_d1 * sin_d2 + cos_d1 * cos_d2 * cos_deg(dra);
    if cos_d.abs() < COSINE_PRECISION_LIMIT {
        return acos_deg(cos_d);
    }

    let x = cos_d2 * sin_deg(dra);
    let y = cos_d1 * sin_d2 - sin_d1 * cos_d2 * cos_deg(dra);
    atan2_deg(x.hypot(y), cos_d).clamp(0.0, 180.0)
}

/// Separation between two possibly unknown positions.
pub fn separation(a: Option<&EquatorialPosition>, b: Option<&EquatorialPosition>) -> Separation {
    match (a, b) {
        (Some(a), Some(b)) => Separation::Degrees(separation_degrees(a, b)),
        _ => Separation::Undefined,
    }
}
