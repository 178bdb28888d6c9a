//! Minute-keyed visibility cache.
//!
//! Tables are refreshed far more often than their HH:MM content changes.
//! Entries are keyed by site, target, horizon model, time corrections and the
//! reference instant truncated to the minute; a cached result is the one
//! computed at the start of that minute. When an event of that result has
//! already passed at the actual reference, the result is recomputed at the
//! exact reference and not stored.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::error::AstroResult;
use crate::models::{EquatorialPosition, ObjectVisibility, ObserverFrame, TimeInstant};

use super::visibility::VisibilityEngine;

/// Entries kept before the cache is flushed.
pub const DEFAULT_CAPACITY: usize = 4_096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    site: [u64; 3],
    polar_motion: [u64; 2],
    target: [u64; 2],
    engine: (crate::core::RefractionModel, u64),
    corrections: [u64; 2],
    minute: i64,
}

impl CacheKey {
    fn new(engine: &VisibilityEngine, frame: &ObserverFrame, target: &EquatorialPosition) -> Self {
        let location = frame.location();
        let corrections = frame.instant().corrections();
        let polar = frame.polar_motion();
        Self {
            site: [
                location.latitude().value().to_bits(),
                location.longitude().value().to_bits(),
                location.elevation().value().to_bits(),
            ],
            polar_motion: [polar.x_mas.to_bits(), polar.y_mas.to_bits()],
            target: [target.ra_hours().to_bits(), target.dec_degrees().to_bits()],
            engine: (engine.refraction, engine.horizon_altitude_deg.to_bits()),
            corrections: [corrections.leap_seconds.to_bits(), corrections.dut1.to_bits()],
            minute: frame.instant().utc().timestamp().div_euclid(60),
        }
    }
}

/// Shared cache of visibility results. Clones share the same storage.
#[derive(Clone)]
pub struct VisibilityCache {
    entries: Arc<RwLock<HashMap<CacheKey, ObjectVisibility>>>,
    capacity: usize,
}

impl VisibilityCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Cached result for this minute, computing and storing it on a miss.
    pub fn get_or_compute(
        &self,
        engine: &VisibilityEngine,
        frame: &ObserverFrame,
        target: &EquatorialPosition,
    ) -> AstroResult<ObjectVisibility> {
        let key = CacheKey::new(engine, frame, target);
        let hit = self.entries.read().get(&key).copied();
        let minute_result = match hit {
            Some(hit) => hit,
            None => {
                let minute_frame = frame.at(frame.instant().truncated_to_minute());
                let computed = engine.compute_visibility(&minute_frame, target)?;
                self.insert(key, computed);
                computed
            }
        };

        if has_passed_event(&minute_result, frame.instant()) {
            debug!("cached event already passed at {}, recomputing", frame.instant().utc());
            return engine.compute_visibility(frame, target);
        }
        Ok(minute_result)
    }

    fn insert(&self, key: CacheKey, value: ObjectVisibility) {
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity {
            debug!("visibility cache full ({} entries), flushing", entries.len());
            entries.clear();
        }
        entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Any event at or before `reference`.
fn has_passed_event(visibility: &ObjectVisibility, reference: &TimeInstant) -> bool {
    let reference = reference.utc();
    [Some(visibility.transit), visibility.rise(), visibility.set()]
        .into_iter()
        .flatten()
        .any(|event| event.utc() <= reference)
}

impl Default for VisibilityCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeodeticLocation, TimeInstant};
    use crate::time::TimeCorrections;
    use chrono::{Duration, TimeZone, Utc};

    fn frame(h: u32, m: u32, s: u32) -> ObserverFrame {
        ObserverFrame::new(
            GeodeticLocation::at_default_elevation(50.7374, 7.0982).unwrap(),
            TimeInstant::new(
                Utc.with_ymd_and_hms(2024, 11, 2, h, m, s).unwrap(),
                TimeCorrections::default(),
            ),
        )
    }

    #[test]
    fn test_same_minute_hits() {
        let cache = VisibilityCache::new();
        let engine = VisibilityEngine::default();
        let target = EquatorialPosition::new(5.5, 45.0).unwrap();

        let a = cache.get_or_compute(&engine, &frame(20, 15, 3), &target).unwrap();
        let b = cache.get_or_compute(&engine, &frame(20, 15, 58), &target).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);

        cache.get_or_compute(&engine, &frame(20, 16, 0), &target).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_matches_uncached_result_at_minute_start() {
        let cache = VisibilityCache::new();
        let engine = VisibilityEngine::default();
        let target = EquatorialPosition::new(20.69, 45.28).unwrap();
        let cached = cache.get_or_compute(&engine, &frame(1, 2, 40), &target).unwrap();
        let direct = engine.compute_visibility(&frame(1, 2, 0), &target).unwrap();
        assert_eq!(cached, direct);
    }

    #[test]
    fn test_event_inside_the_minute_is_not_served_after_it_passed() {
        let cache = VisibilityCache::new();
        let engine = VisibilityEngine::default();
        let target = EquatorialPosition::new(20.69, 45.28).unwrap();
        let transit = engine
            .compute_visibility(&frame(1, 0, 0), &target)
            .unwrap()
            .transit;

        // fill the entry for the transit's minute, then ask one second later
        let minute_start = frame(1, 0, 0).at(transit.truncated_to_minute());
        cache.get_or_compute(&engine, &minute_start, &target).unwrap();
        let reference = frame(1, 0, 0).at(TimeInstant::new(
            transit.utc() + Duration::seconds(1),
            TimeCorrections::default(),
        ));
        let cached = cache.get_or_compute(&engine, &reference, &target).unwrap();
        let direct = engine.compute_visibility(&reference, &target).unwrap();

        assert!(cached.transit.utc() > reference.instant().utc());
        assert!(cached.transit.utc() - transit.utc() > Duration::hours(23));
        for event in [cached.rise(), cached.set()].into_iter().flatten() {
            assert!(event.utc() > reference.instant().utc());
        }
        if reference.instant().truncated_to_minute() == *minute_start.instant() {
            assert_eq!(cached, direct);
        }
    }

    #[test]
    fn test_engine_settings_are_part_of_the_key() {
        let cache = VisibilityCache::new();
        let target = EquatorialPosition::new(5.5, 10.0).unwrap();
        let f = frame(12, 0, 0);
        let a = cache
            .get_or_compute(&VisibilityEngine::default(), &f, &target)
            .unwrap();
        let b = cache
            .get_or_compute(
                &VisibilityEngine::new(crate::core::RefractionModel::None, 0.0),
                &f,
                &target,
            )
            .unwrap();
        assert_ne!(a.rise(), b.rise());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_flush() {
        let cache = VisibilityCache::with_capacity(2);
        let engine = VisibilityEngine::default();
        let f = frame(12, 0, 0);
        for ra in [1.0, 2.0, 3.0] {
            let target = EquatorialPosition::new(ra, 0.0).unwrap();
            cache.get_or_compute(&engine, &f, &target).unwrap();
        }
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
