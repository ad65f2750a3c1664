//! Per-tick flight bookkeeping for a launched rocket

use bevy::prelude::Component;

use super::compiler::Rocket;
use super::math::{Scalar, Vector};

/// Mass lost per unit of burnt fuel
pub const DEFAULT_BURN_MASS_FACTOR: Scalar = 1.2;

/// Ticks the max-altitude readout stays highlighted after a new record
pub const RECORD_HIGHLIGHT_TICKS: u32 = 30;

/// Distance between the bottom of a resting rocket and the ground line
const GROUND_CLEARANCE: Scalar = 10.0 + 21.0;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct FlightState {
    thrust: Scalar,
    fuel: Scalar,
    max_fuel: Scalar,
    fuel_consumption: Scalar,
    mass: Scalar,
    burn_mass_factor: Scalar,
    thrusting: bool,
    flames_visible: bool,
}

impl FlightState {
    pub fn from_rocket(rocket: &Rocket, burn_mass_factor: Scalar) -> Self {
        Self {
            thrust: rocket.thrust(),
            fuel: rocket.fuel(),
            max_fuel: rocket.max_fuel(),
            fuel_consumption: rocket.fuel_consumption(),
            mass: rocket.mass(),
            burn_mass_factor,
            thrusting: false,
            flames_visible: false,
        }
    }

    /// Starts burning. Returns false when there is nothing left to burn.
    pub fn begin_thrust(&mut self) -> bool {
        if self.fuel <= 0.0 || self.thrusting {
            return false;
        }
        self.thrusting = true;
        self.flames_visible = true;
        true
    }

    /// Advances one fixed tick, returning the upward force to apply
    pub fn tick(&mut self) -> Option<Vector> {
        if !self.thrusting {
            return None;
        }
        if self.fuel <= 0.0 {
            self.stop_thrust();
            return None;
        }

        self.fuel = (self.fuel - self.fuel_consumption).max(0.0);
        self.mass -= self.fuel_consumption * self.burn_mass_factor;
        if self.fuel <= 0.0 {
            self.stop_thrust();
        }

        Some(Vector::new(0.0, self.thrust))
    }

    fn stop_thrust(&mut self) {
        self.thrusting = false;
        self.flames_visible = false;
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    pub fn flames_visible(&self) -> bool {
        self.flames_visible
    }

    pub fn fuel(&self) -> Scalar {
        self.fuel
    }

    /// Remaining fuel in `0..=1`, zero for rockets launched without tanks
    pub fn fuel_fraction(&self) -> Scalar {
        if self.max_fuel <= 0.0 {
            0.0
        } else {
            (self.fuel / self.max_fuel).clamp(0.0, 1.0)
        }
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn thrust(&self) -> Scalar {
        self.thrust
    }
}

/// Altitude of a rocket body centered at `body_y`, in whole scene units
pub fn altitude(body_y: Scalar, half_height: Scalar) -> i64 {
    (body_y - half_height - GROUND_CLEARANCE).round() as i64
}

pub fn format_altitude(altitude: i64) -> String {
    if altitude < 1000 {
        format!("{altitude} m")
    } else {
        let km = (altitude as f64 / 100.0).round() / 10.0;
        format!("{km:.1} km")
    }
}

/// Running maximum altitude with a short highlight after each record
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct AltitudeTracker {
    max: i64,
    highlight: u32,
}

impl AltitudeTracker {
    /// Records a sample, returns true when it set a new maximum
    pub fn record(&mut self, altitude: i64) -> bool {
        if altitude > self.max {
            self.max = altitude;
            self.highlight = RECORD_HIGHLIGHT_TICKS;
            true
        } else {
            self.highlight = self.highlight.saturating_sub(1);
            false
        }
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight > 0
    }
}

/// Camera zoom stages, only ever zooming out during a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum CameraZoom {
    #[default]
    Launch,
    Near,
    Far,
}

impl CameraZoom {
    pub fn for_altitude(altitude: i64) -> Self {
        if altitude > 1000 {
            CameraZoom::Far
        } else if altitude > 100 {
            CameraZoom::Near
        } else {
            CameraZoom::Launch
        }
    }

    /// The stage after observing `altitude`, never going back to a closer one
    pub fn advance(self, altitude: i64) -> Self {
        self.max(Self::for_altitude(altitude))
    }

    pub fn scale(self) -> Scalar {
        match self {
            CameraZoom::Launch => 1.0,
            CameraZoom::Near => 2.0,
            CameraZoom::Far => 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::catalog::{PartCatalog, PartCategory};
    use crate::assembly::compiler::RocketCompiler;
    use crate::assembly::part::{PartRegistry, PointRef};
    use std::sync::Arc;

    fn rocket(with_engine: bool, with_fuel: bool) -> Rocket {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        let capsule = registry.instantiate(Arc::clone(catalog.capsule()), Vector::new(400.0, 200.0));
        let mut bottom = PointRef::new(capsule, 0);
        if with_fuel {
            let tank = registry.instantiate(
                Arc::clone(catalog.kind(PartCategory::Fuel).unwrap()),
                Vector::new(400.0, 140.0),
            );
            registry.bind(bottom, PointRef::new(tank, 0)).unwrap();
            bottom = PointRef::new(tank, 1);
        }
        if with_engine {
            let engine = registry.instantiate(
                Arc::clone(catalog.kind(PartCategory::Engine).unwrap()),
                Vector::new(400.0, 80.0),
            );
            registry.bind(bottom, PointRef::new(engine, 0)).unwrap();
        }
        RocketCompiler::default().compile(&registry).unwrap()
    }

    #[test]
    fn test_tick_before_thrust_is_idle() {
        let mut state = FlightState::from_rocket(&rocket(true, true), DEFAULT_BURN_MASS_FACTOR);
        assert_eq!(state.tick(), None);
        assert_eq!(state.fuel(), 1.0);
        assert!(!state.flames_visible());
    }

    #[test]
    fn test_thrust_burns_fuel_and_mass() {
        let mut state = FlightState::from_rocket(&rocket(true, true), DEFAULT_BURN_MASS_FACTOR);
        assert!(state.begin_thrust());
        assert!(state.flames_visible());

        assert_eq!(state.tick(), Some(Vector::new(0.0, 1400.0)));
        assert!((state.fuel() - 0.992).abs() < 1e-5);
        assert!((state.mass() - (5.0 - 0.008 * 1.2)).abs() < 1e-5);
        assert!((state.fuel_fraction() - 0.992).abs() < 1e-5);
    }

    #[test]
    fn test_thrust_ends_when_fuel_runs_out() {
        let mut state = FlightState::from_rocket(&rocket(true, true), DEFAULT_BURN_MASS_FACTOR);
        state.begin_thrust();

        let mut burns = 0;
        while state.tick().is_some() {
            burns += 1;
            assert!(burns <= 200, "thrust never ended");
        }

        // 1.0 / 0.008 = 125, give or take float rounding
        assert!((125..=126).contains(&burns));
        assert_eq!(state.fuel(), 0.0);
        assert!(!state.is_thrusting());
        assert!(!state.flames_visible());
        assert_eq!(state.tick(), None);
        assert!(!state.begin_thrust());
    }

    #[test]
    fn test_no_fuel_means_no_thrust() {
        let mut state = FlightState::from_rocket(&rocket(true, false), DEFAULT_BURN_MASS_FACTOR);
        assert!(!state.begin_thrust());
        assert_eq!(state.tick(), None);
        assert_eq!(state.fuel_fraction(), 0.0);
    }

    #[test]
    fn test_altitude_at_rest_is_zero() {
        assert_eq!(altitude(51.0, 20.0), 0);
        assert_eq!(altitude(151.4, 20.0), 100);
        assert_eq!(altitude(151.6, 20.0), 101);
    }

    #[test]
    fn test_format_altitude_switches_to_km() {
        assert_eq!(format_altitude(0), "0 m");
        assert_eq!(format_altitude(999), "999 m");
        assert_eq!(format_altitude(1000), "1.0 km");
        assert_eq!(format_altitude(1249), "1.2 km");
        assert_eq!(format_altitude(1250), "1.3 km");
        assert_eq!(format_altitude(12_345), "12.3 km");
    }

    #[test]
    fn test_altitude_tracker_highlights_records() {
        let mut tracker = AltitudeTracker::default();
        assert!(tracker.record(5));
        assert!(tracker.is_highlighted());
        assert_eq!(tracker.max(), 5);

        for _ in 0..RECORD_HIGHLIGHT_TICKS - 1 {
            assert!(!tracker.record(3));
            assert!(tracker.is_highlighted());
        }
        assert!(!tracker.record(3));
        assert!(!tracker.is_highlighted());
        assert_eq!(tracker.max(), 5);
    }

    #[test]
    fn test_camera_zoom_only_zooms_out() {
        let mut zoom = CameraZoom::default();
        assert_eq!(zoom.scale(), 1.0);

        zoom = zoom.advance(100);
        assert_eq!(zoom, CameraZoom::Launch);
        zoom = zoom.advance(101);
        assert_eq!(zoom, CameraZoom::Near);
        zoom = zoom.advance(5000);
        assert_eq!(zoom, CameraZoom::Far);
        zoom = zoom.advance(0);
        assert_eq!(zoom, CameraZoom::Far);
        assert_eq!(zoom.scale(), 4.0);
    }
}
