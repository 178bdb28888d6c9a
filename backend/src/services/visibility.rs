//! Transit, rise and set search.
//!
//! Everything is solved in closed form from the hour angle. The target's
//! apparent place is taken at the reference instant and held fixed; over one
//! sidereal day precession moves it by well under an arcsecond.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{acos_deg, cos_deg, is_negligible, normalize_degrees, sin_deg, RefractionModel};
use crate::error::AstroResult;
use crate::models::{
    EquatorialPosition, ObjectVisibility, ObserverFrame, RiseSet, TimeInstant, Visibility,
};
use crate::time::SIDEREAL_RATE_DEG_PER_DAY;

use super::transform::{apparent_place, hour_angle_of_apparent, to_horizontal};

/// Length of one sidereal day in UT1 days.
pub const SIDEREAL_DAY: f64 = 360.0 / SIDEREAL_RATE_DEG_PER_DAY;

/// Events closer than this to the reference (days, ~0.1 ms) count as "now"
/// and are pushed to the next sidereal day.
const SAME_INSTANT_DAYS: f64 = 1e-9;

/// Horizon model for rise/set decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEngine {
    pub refraction: RefractionModel,
    /// Apparent altitude of the local horizon, degrees.
    pub horizon_altitude_deg: f64,
}

impl Default for VisibilityEngine {
    fn default() -> Self {
        Self {
            refraction: RefractionModel::Standard,
            horizon_altitude_deg: 0.0,
        }
    }
}

impl VisibilityEngine {
    pub fn new(refraction: RefractionModel, horizon_altitude_deg: f64) -> Self {
        Self {
            refraction,
            horizon_altitude_deg,
        }
    }

    /// Geometric altitude `alt0` at which a target counts as rising or
    /// setting, degrees.
    pub fn geometric_horizon(&self) -> f64 {
        self.refraction.geometric_horizon(self.horizon_altitude_deg)
    }

    /// Next transit, rise/set outcome and current position of a target.
    ///
    /// # Arguments
    /// * `frame` - Observer site bound to the reference instant
    /// * `target` - Mean J2000 catalog position
    ///
    /// # Returns
    /// Event instants strictly after the frame's instant. The current
    /// position is geometric, without refraction.
    ///
    /// # Errors
    /// `UnsupportedDate` when the frame's instant precedes the Gregorian
    /// calendar or lies beyond year 9999.
    pub fn compute_visibility(
        &self,
        frame: &ObserverFrame,
        target: &EquatorialPosition,
    ) -> AstroResult<ObjectVisibility> {
        let reference = frame.instant();
        reference.validate()?;
        let apparent = apparent_place(target, reference.jd_tt());
        let ha = hour_angle_of_apparent(frame, &apparent);

        let transit = next_hour_angle(reference, ha, 0.0)?;
        let rise_set = self.rise_set_from(frame, apparent.dec_degrees(), ha)?;

        Ok(ObjectVisibility {
            transit,
            rise_set,
            horizontal: to_horizontal(frame, target),
        })
    }

    /// Like [`Self::compute_visibility`] for a target whose coordinates may
    /// be unknown.
    pub fn compute_for(
        &self,
        frame: &ObserverFrame,
        target: Option<&EquatorialPosition>,
    ) -> AstroResult<Visibility> {
        match target {
            Some(target) => self.compute_visibility(frame, target).map(Visibility::Available),
            None => Ok(Visibility::Unavailable),
        }
    }

    /// Rise/set outcome only.
    pub fn rise_set(
        &self,
        frame: &ObserverFrame,
        target: &EquatorialPosition,
    ) -> AstroResult<RiseSet> {
        frame.instant().validate()?;
        let apparent = apparent_place(target, frame.instant().jd_tt());
        let ha = hour_angle_of_apparent(frame, &apparent);
        self.rise_set_from(frame, apparent.dec_degrees(), ha)
    }

    fn rise_set_from(&self, frame: &ObserverFrame, dec: f64, ha: f64) -> AstroResult<RiseSet> {
        let lat = frame.effective_latitude();
        let alt0 = self.geometric_horizon();

        let denom = cos_deg(lat) * cos_deg(dec);
        let numer = sin_deg(alt0) - sin_deg(lat) * sin_deg(dec);

        if is_negligible(denom) {
            // pole observer or polar target: altitude never changes
            let outcome = if sin_deg(lat) * sin_deg(dec) > sin_deg(alt0) {
                RiseSet::Circumpolar
            } else {
                RiseSet::NeverRises
            };
            debug!("constant altitude at lat {lat:.4}, dec {dec:.4}: {outcome:?}");
            return Ok(outcome);
        }

        let cos_h0 = numer / denom;
        if cos_h0 < -1.0 {
            debug!("circumpolar at lat {lat:.4}, dec {dec:.4}");
            return Ok(RiseSet::Circumpolar);
        }
        if cos_h0 > 1.0 {
            debug!("never rises at lat {lat:.4}, dec {dec:.4}");
            return Ok(RiseSet::NeverRises);
        }

        let h0 = acos_deg(cos_h0);
        let reference = frame.instant();
        Ok(RiseSet::Normal {
            rise: next_hour_angle(reference, ha, -h0)?,
            set: next_hour_angle(reference, ha, h0)?,
        })
    }
}

/// First instant strictly after `reference` at which the hour angle, now
/// `current_ha`, equals `target_ha` (both degrees).
fn next_hour_angle(
    reference: &TimeInstant,
    current_ha: f64,
    target_ha: f64,
) -> AstroResult<TimeInstant> {
    let mut days = normalize_degrees(target_ha - current_ha) / SIDEREAL_RATE_DEG_PER_DAY;
    if days <= SAME_INSTANT_DAYS {
        days += SIDEREAL_DAY;
    }
    reference.add_days(days)
}
