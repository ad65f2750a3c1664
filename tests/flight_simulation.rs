//! Flight bookkeeping for compiled rockets

use liftoff::assembly::{
    Aabb2d, AltitudeTracker, AttachmentResolver, CameraZoom, DragContext, FlightState, PartCatalog,
    PartCategory, PartRegistry, Rocket, RocketCompiler, RocketTuning, Vector, format_altitude,
};
use std::sync::Arc;

/// Capsule over one tank with a big engine hung off the tank
fn thirsty_rocket(tuning: RocketTuning) -> Rocket {
    let catalog = PartCatalog::standard(40.0).unwrap();
    let resolver = AttachmentResolver::default();
    let mut ctx = DragContext::default();
    let menu = Aabb2d::new(Vector::ZERO, Vector::new(200.0, 480.0));
    let mut registry = PartRegistry::new();
    registry.instantiate(Arc::clone(catalog.capsule()), Vector::new(400.0, 200.0));

    let kind = |category: PartCategory| Arc::clone(catalog.kind(category).unwrap());
    let tank = registry.instantiate(kind(PartCategory::Fuel), Vector::new(600.0, 400.0));
    let big = registry.instantiate(kind(PartCategory::EngineBig), Vector::new(600.0, 300.0));

    for (part, pointer) in [
        (tank, Vector::new(400.0, 140.0)),
        (big, Vector::new(400.0, 60.0)),
    ] {
        resolver.begin_drag(&mut ctx, &registry, part).unwrap();
        resolver.drag_to(&ctx, &mut registry, pointer).unwrap();
        resolver.end_drag(&mut ctx, &mut registry, &menu);
    }

    RocketCompiler::new(tuning).compile(&registry).unwrap()
}

#[test]
fn fuel_never_goes_negative() {
    // 1.0 is not a multiple of 0.3, so the last tick overshoots
    let rocket = thirsty_rocket(RocketTuning {
        base_fuel_consumption: 0.15,
        ..Default::default()
    });
    assert!((rocket.fuel_consumption() - 0.3).abs() < 1e-6);

    let mut flight = FlightState::from_rocket(&rocket, 1.2);
    assert!(flight.begin_thrust());

    let mut burning_ticks = 0;
    while flight.tick().is_some() {
        burning_ticks += 1;
        assert!(flight.fuel() >= 0.0);
        assert!(burning_ticks < 10);
    }

    assert_eq!(burning_ticks, 4);
    assert_eq!(flight.fuel(), 0.0);
    assert!(!flight.is_thrusting());
    assert!(!flight.flames_visible());
    assert_eq!(flight.fuel_fraction(), 0.0);

    // An empty rocket cannot be relit
    assert!(!flight.begin_thrust());
    assert_eq!(flight.tick(), None);
}

#[test]
fn burning_fuel_sheds_mass() {
    let rocket = thirsty_rocket(RocketTuning::default());
    let mut flight = FlightState::from_rocket(&rocket, 1.2);
    let start = flight.mass();

    assert!(flight.begin_thrust());
    let force = flight.tick().unwrap();
    assert_eq!(force, Vector::new(0.0, rocket.thrust()));
    assert!((start - flight.mass() - 0.016 * 1.2).abs() < 1e-5);
    assert!(flight.fuel_fraction() < 1.0);
}

#[test]
fn max_altitude_only_rises() {
    let mut tracker = AltitudeTracker::default();
    let samples = [0, 40, 120, 90, 300, 250];
    let records: Vec<bool> = samples.iter().map(|&a| tracker.record(a)).collect();

    assert_eq!(records, vec![false, true, true, false, true, false]);
    assert_eq!(tracker.max(), 300);
    assert!(tracker.is_highlighted());
}

#[test]
fn camera_never_zooms_back_in() {
    let mut zoom = CameraZoom::default();
    for altitude in [50, 150, 1200, 400, 20] {
        zoom = zoom.advance(altitude);
    }
    assert_eq!(zoom, CameraZoom::Far);
    assert_eq!(zoom.scale(), 4.0);
}

#[test]
fn altitude_readout_switches_to_kilometers() {
    assert_eq!(format_altitude(0), "0 m");
    assert_eq!(format_altitude(999), "999 m");
    assert_eq!(format_altitude(1000), "1.0 km");
    assert_eq!(format_altitude(12345), "12.3 km");
}
