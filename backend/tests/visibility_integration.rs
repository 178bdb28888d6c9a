mod support;

use obslog_astro::core::RefractionModel;
use obslog_astro::models::{RiseSet, TimeInstant, Visibility};
use obslog_astro::services::{
    compute_batch, hour_angle, to_horizontal, VisibilityEngine, SIDEREAL_DAY,
};
use support::{bonn_at, cape_town_at, position};

fn days_between(a: &TimeInstant, b: &TimeInstant) -> f64 {
    (b.utc() - a.utc()).num_milliseconds() as f64 / 86_400_000.0
}

#[test]
fn test_bonn_transit_is_daily_maximum() {
    let frame = bonn_at(2024, 11, 2, 18, 0);
    let target = position(5.5, 45.0);
    let engine = VisibilityEngine::default();

    let vis = engine.compute_visibility(&frame, &target).unwrap();
    assert_eq!(vis.rise_set, RiseSet::Circumpolar);

    let at_transit = frame.at(vis.transit);
    let peak = to_horizontal(&at_transit, &target).altitude.value();
    // upper culmination of Dec +45° at latitude 50.74°
    assert!((peak - (90.0 - 50.7374 + 45.0)).abs() < 0.5, "peak {peak}");
    assert!(hour_angle(&at_transit, &target).value().abs() < 1e-3);

    for step in 0..144 {
        let t = frame.instant().add_days(step as f64 / 144.0).unwrap();
        let alt = to_horizontal(&frame.at(t), &target).altitude.value();
        assert!(alt <= peak + 1e-3, "altitude {alt} at step {step} exceeds {peak}");
    }
}

#[test]
fn test_rise_transit_set_ordering_from_below_horizon() {
    let frame = bonn_at(2024, 7, 1, 22, 30);
    let target = position(5.5, 0.0);
    assert!(to_horizontal(&frame, &target).altitude.value() < 0.0);

    let vis = VisibilityEngine::default()
        .compute_visibility(&frame, &target)
        .unwrap();
    let (rise, set) = (vis.rise().unwrap(), vis.set().unwrap());

    assert!(rise.utc() < vis.transit.utc());
    assert!(vis.transit.utc() < set.utc());
    assert!(days_between(frame.instant(), &set) < SIDEREAL_DAY);

    // an equatorial target spends about half a day above the horizon
    let up = days_between(&rise, &set) * 24.0;
    assert!((12.0..12.5).contains(&up), "up for {up}h");
}

#[test]
fn test_events_lie_on_the_horizon() {
    let frame = bonn_at(2024, 7, 1, 22, 30);
    let target = position(5.5, 20.0);
    let engine = VisibilityEngine::new(RefractionModel::None, 0.0);
    let vis = engine.compute_visibility(&frame, &target).unwrap();

    for event in [vis.rise().unwrap(), vis.set().unwrap()] {
        let alt = to_horizontal(&frame.at(event), &target).altitude.value();
        assert!(alt.abs() < 0.01, "altitude {alt} at event");
    }
}

#[test]
fn test_refraction_lengthens_the_night_arc() {
    let frame = bonn_at(2024, 7, 1, 22, 30);
    let target = position(5.5, 0.0);

    let geometric = VisibilityEngine::new(RefractionModel::None, 0.0)
        .compute_visibility(&frame, &target)
        .unwrap();
    let refracted = VisibilityEngine::new(RefractionModel::Standard, 0.0)
        .compute_visibility(&frame, &target)
        .unwrap();

    assert!(refracted.rise().unwrap().utc() < geometric.rise().unwrap().utc());
    assert!(refracted.set().unwrap().utc() > geometric.set().unwrap().utc());
    assert_eq!(refracted.transit, geometric.transit);
}

#[test]
fn test_circumpolar_and_never_rising() {
    let frame = bonn_at(2024, 3, 20, 21, 0);
    let engine = VisibilityEngine::default();

    // Polaris
    let polaris = engine.rise_set(&frame, &position(2.53, 89.26)).unwrap();
    assert_eq!(polaris, RiseSet::Circumpolar);
    // Canopus never clears the horizon from Bonn
    let canopus = engine.rise_set(&frame, &position(6.40, -52.70)).unwrap();
    assert_eq!(canopus, RiseSet::NeverRises);
}

#[test]
fn test_southern_site_mirrors_the_sky() {
    let frame = cape_town_at(2024, 3, 20, 21, 0);
    let engine = VisibilityEngine::default();

    // south of Dec -56 nothing sets from latitude -33.9
    let south_polar = engine.rise_set(&frame, &position(10.0, -80.0)).unwrap();
    assert_eq!(south_polar, RiseSet::Circumpolar);
    let polaris = engine.rise_set(&frame, &position(2.53, 89.26)).unwrap();
    assert_eq!(polaris, RiseSet::NeverRises);

    let canopus = position(6.40, -52.70);
    let vis = engine.compute_visibility(&frame, &canopus).unwrap();
    assert!(matches!(vis.rise_set, RiseSet::Normal { .. }));
    let peak = to_horizontal(&frame.at(vis.transit), &canopus).altitude.value();
    assert!((peak - 71.2).abs() < 0.5, "Canopus culminates at {peak}");
}

#[test]
fn test_batch_reports_unknown_coordinates_as_unavailable() {
    let frame = bonn_at(2024, 11, 2, 20, 0);
    let results = compute_batch(
        &VisibilityEngine::default(),
        &frame,
        &[Some(position(5.5, 45.0)), None, Some(position(18.6, 38.8))],
    );
    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().unwrap().is_available());
    assert_eq!(*results[1].as_ref().unwrap(), Visibility::Unavailable);
    assert!(results[2].as_ref().unwrap().is_available());
}
