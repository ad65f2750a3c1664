//! Scenery plugin - Self-contained plugin pattern
//!
//! Decorative backdrops shared by the title and launch screens: randomly
//! scattered sprites, horizontal drifting with wrap-around, and the sky
//! gradient colors. Nothing here collides or affects the flight.

use crate::assembly::Aabb2d;
use crate::prelude::*;
use rand::Rng;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use std::ops::RangeInclusive;

/// Sky color at ground level
const SKY_LOW: Srgba = Srgba::new(0.42, 0.68, 0.98, 1.0);
/// Sky color where the atmosphere ends, fully transparent to show the stars
const SKY_HIGH: Srgba = Srgba::new(0.02, 0.03, 0.12, 0.0);

#[derive(Resource, Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SceneryRng(pub ChaCha8Rng);

impl SceneryRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for SceneryRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// A sprite moving sideways at a constant speed, reappearing on the other
/// side once it leaves `min_x..=max_x`
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub velocity: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl Drift {
    /// Position after `delta_secs`
    pub fn advance(&self, x: f32, delta_secs: f32) -> f32 {
        let span = self.max_x - self.min_x;
        if span <= 0.0 {
            return x;
        }
        let moved = x + self.velocity * delta_secs;
        self.min_x + (moved - self.min_x).rem_euclid(span)
    }
}

/// Placement of one decorative sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speck {
    pub position: Vector,
    pub size: f32,
    /// Alpha in `0.3..=1`
    pub brightness: f32,
}

/// `count` specks spread uniformly over `area`
pub fn scatter(
    rng: &mut impl Rng,
    area: Aabb2d,
    count: usize,
    sizes: RangeInclusive<f32>,
) -> Vec<Speck> {
    (0..count)
        .map(|_| Speck {
            position: Vector::new(
                rng.random_range(area.min.x..=area.max.x),
                rng.random_range(area.min.y..=area.max.y),
            ),
            size: rng.random_range(sizes.clone()),
            brightness: rng.random_range(0.3..=1.0),
        })
        .collect()
}

/// Sky color at `height` in `0..=1` of the atmosphere
pub fn sky_color(height: f32) -> Color {
    let t = height.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| a + (b - a) * t;
    Color::Srgba(Srgba::new(
        lerp(SKY_LOW.red, SKY_HIGH.red),
        lerp(SKY_LOW.green, SKY_HIGH.green),
        lerp(SKY_LOW.blue, SKY_HIGH.blue),
        lerp(SKY_LOW.alpha, SKY_HIGH.alpha),
    ))
}

pub struct SceneryPlugin {
    seed: Option<u64>,
}

impl SceneryPlugin {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Same backdrops on every run
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Default for SceneryPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.seed {
            Some(seed) => SceneryRng::from_seed(seed),
            None => SceneryRng::default(),
        };
        app.insert_resource(rng);
        app.add_systems(Update, drift_scenery);
    }
}

fn drift_scenery(time: Res<Time>, mut drifting: Query<(&Drift, &mut Transform)>) {
    let delta = time.delta_secs();
    for (drift, mut transform) in &mut drifting {
        transform.translation.x = drift.advance(transform.translation.x, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_stays_inside_area() {
        let mut rng = SceneryRng::from_seed(7);
        let area = Aabb2d::new(Vector::new(-100.0, 50.0), Vector::new(100.0, 80.0));
        let specks = scatter(&mut rng.0, area, 200, 1.0..=3.0);

        assert_eq!(specks.len(), 200);
        for speck in &specks {
            assert!(area.contains(speck.position));
            assert!((1.0..=3.0).contains(&speck.size));
            assert!((0.3..=1.0).contains(&speck.brightness));
        }
    }

    #[test]
    fn test_seeded_scatter_repeats() {
        let area = Aabb2d::new(Vector::ZERO, Vector::splat(640.0));
        let a = scatter(&mut SceneryRng::from_seed(42).0, area, 20, 1.0..=2.0);
        let b = scatter(&mut SceneryRng::from_seed(42).0, area, 20, 1.0..=2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_drift_wraps_around() {
        let drift = Drift {
            velocity: 50.0,
            min_x: 0.0,
            max_x: 100.0,
        };
        assert_eq!(drift.advance(10.0, 1.0), 60.0);
        assert_eq!(drift.advance(90.0, 1.0), 40.0);

        let backwards = Drift {
            velocity: -50.0,
            ..drift
        };
        assert_eq!(backwards.advance(10.0, 1.0), 60.0);
    }

    #[test]
    fn test_sky_fades_out_with_height() {
        assert_eq!(sky_color(0.0).alpha(), 1.0);
        assert_eq!(sky_color(1.0).alpha(), 0.0);
        assert_eq!(sky_color(2.0), sky_color(1.0));
        assert!(sky_color(0.5).alpha() > 0.0 && sky_color(0.5).alpha() < 1.0);
    }
}
