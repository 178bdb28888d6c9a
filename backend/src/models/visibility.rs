use serde::Serialize;

use super::coordinates::HorizontalPosition;
use super::time::TimeInstant;

/// Outcome of the rise/set search for one target and site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiseSet {
    /// Next rise and next set, each strictly after the reference instant.
    Normal { rise: TimeInstant, set: TimeInstant },
    /// Always above the horizon altitude.
    Circumpolar,
    /// Always below the horizon altitude.
    NeverRises,
}

/// Visibility of one target at one site, relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObjectVisibility {
    /// Next upper culmination after the reference instant.
    pub transit: TimeInstant,
    pub rise_set: RiseSet,
    /// Position at the reference instant.
    pub horizontal: HorizontalPosition,
}

impl ObjectVisibility {
    pub fn rise(&self) -> Option<TimeInstant> {
        match self.rise_set {
            RiseSet::Normal { rise, .. } => Some(rise),
            _ => None,
        }
    }

    pub fn set(&self) -> Option<TimeInstant> {
        match self.rise_set {
            RiseSet::Normal { set, .. } => Some(set),
            _ => None,
        }
    }

    pub fn is_circumpolar(&self) -> bool {
        matches!(self.rise_set, RiseSet::Circumpolar)
    }

    pub fn never_rises(&self) -> bool {
        matches!(self.rise_set, RiseSet::NeverRises)
    }
}

/// Visibility of a target whose catalog coordinates may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Visibility {
    Available(ObjectVisibility),
    Unavailable,
}

impl Visibility {
    pub fn as_available(&self) -> Option<&ObjectVisibility> {
        match self {
            Visibility::Available(v) => Some(v),
            Visibility::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Visibility::Available(_))
    }
}

impl From<Option<ObjectVisibility>> for Visibility {
    fn from(v: Option<ObjectVisibility>) -> Self {
        v.map_or(Visibility::Unavailable, Visibility::Available)
    }
}
