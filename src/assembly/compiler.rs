//! Rocket compilation
//!
//! Turns the live attachment tree into a single rigid composite: the parts
//! hanging from the master are copied, recentered on their common bounding
//! box and summed up into mass, thrust and fuel figures.

use bevy::log::info;

use super::aabb2d::Aabb2d;
use super::catalog::PartCategory;
use super::error::AssemblyError;
use super::math::{Scalar, Vector};
use super::part::{PartInstance, PartRegistry};

/// Physical constants used when compiling a rocket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketTuning {
    /// Thrust of one regular engine
    pub base_thrust: Scalar,
    /// Fuel burnt per tick by one regular engine
    pub base_fuel_consumption: Scalar,
    /// Thrust and consumption scale of the big engine
    pub big_engine_multiplier: Scalar,
    pub friction: Scalar,
    pub restitution: Scalar,
    /// Distance of the exhaust flame below an engine's bottom edge
    pub flame_offset: Scalar,
    /// Exhaust particles per second for one regular engine
    pub flame_birth_rate: Scalar,
}

impl Default for RocketTuning {
    fn default() -> Self {
        Self {
            base_thrust: 1400.0,
            base_fuel_consumption: 0.008,
            big_engine_multiplier: 2.0,
            friction: 0.5,
            restitution: 0.3,
            flame_offset: 26.0,
            flame_birth_rate: 250.0,
        }
    }
}

/// Collision shape and physical properties of one compiled part
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyDescriptor {
    pub category: PartCategory,
    /// Part center relative to the rocket center
    pub offset: Vector,
    pub size: Vector,
    /// Rectangle outline relative to the rocket center
    pub vertices: [Vector; 4],
    pub mass: Scalar,
    pub friction: Scalar,
    pub restitution: Scalar,
}

/// Where an engine's exhaust is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrustMarker {
    /// Index into [`Rocket::parts`]
    pub part: usize,
    /// Flame position relative to the engine's center
    pub offset: Vector,
    pub multiplier: Scalar,
    pub birth_rate: Scalar,
}

/// A compiled rocket, independent of the builder it came from
#[derive(Debug, Clone)]
pub struct Rocket {
    parts: Vec<PartInstance>,
    bodies: Vec<RigidBodyDescriptor>,
    thrust_markers: Vec<ThrustMarker>,
    size: Vector,
    mass: Scalar,
    thrust: Scalar,
    fuel: Scalar,
    max_fuel: Scalar,
    fuel_consumption: Scalar,
    friction: Scalar,
    restitution: Scalar,
}

impl Rocket {
    /// Parts with positions relative to the rocket center
    pub fn parts(&self) -> &[PartInstance] {
        &self.parts
    }

    pub fn bodies(&self) -> &[RigidBodyDescriptor] {
        &self.bodies
    }

    pub fn thrust_markers(&self) -> &[ThrustMarker] {
        &self.thrust_markers
    }

    /// Bounding box size of the whole rocket
    pub fn size(&self) -> Vector {
        self.size
    }

    pub fn mass(&self) -> Scalar {
        self.mass
    }

    pub fn thrust(&self) -> Scalar {
        self.thrust
    }

    /// Fuel on board at launch
    pub fn fuel(&self) -> Scalar {
        self.fuel
    }

    pub fn max_fuel(&self) -> Scalar {
        self.max_fuel
    }

    pub fn fuel_consumption(&self) -> Scalar {
        self.fuel_consumption
    }

    pub fn friction(&self) -> Scalar {
        self.friction
    }

    pub fn restitution(&self) -> Scalar {
        self.restitution
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RocketCompiler {
    tuning: RocketTuning,
}

impl RocketCompiler {
    pub fn new(tuning: RocketTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &RocketTuning {
        &self.tuning
    }

    /// Compiles everything attached beneath the master part.
    ///
    /// Fails without touching `registry` when there is not exactly one master.
    pub fn compile(&self, registry: &PartRegistry) -> Result<Rocket, AssemblyError> {
        let master = registry.master()?;
        let mut parts = registry.clone_with_subtree(master)?;

        let bounds = Aabb2d::enclosing(parts.iter().map(PartInstance::extent))
            .ok_or(AssemblyError::EmptyAssembly)?;
        let center = bounds.center();
        for part in &mut parts {
            let recentered = part.position() - center;
            part.set_position(recentered);
        }

        let tuning = &self.tuning;
        let bodies: Vec<RigidBodyDescriptor> = parts
            .iter()
            .map(|part| {
                let extent = part.extent();
                RigidBodyDescriptor {
                    category: part.kind().category(),
                    offset: part.position(),
                    size: extent.size(),
                    vertices: extent.corners(),
                    mass: part.kind().mass(),
                    friction: tuning.friction,
                    restitution: tuning.restitution,
                }
            })
            .collect();

        let mass = parts.iter().map(|part| part.kind().mass()).sum();
        let fuel = parts
            .iter()
            .filter(|part| part.kind().category() == PartCategory::Fuel)
            .count() as Scalar;

        let mut thrust = 0.0;
        let mut fuel_consumption = 0.0;
        let mut thrust_markers = Vec::new();
        for (index, part) in parts.iter().enumerate() {
            let Some(multiplier) = part
                .kind()
                .category()
                .engine_multiplier(tuning.big_engine_multiplier)
            else {
                continue;
            };

            thrust += tuning.base_thrust * multiplier;
            fuel_consumption += tuning.base_fuel_consumption * multiplier;
            thrust_markers.push(ThrustMarker {
                part: index,
                offset: Vector::new(0.0, -part.kind().size().y / 2.0 - tuning.flame_offset),
                multiplier,
                birth_rate: tuning.flame_birth_rate * multiplier,
            });
        }

        let rocket = Rocket {
            parts,
            bodies,
            thrust_markers,
            size: bounds.size(),
            mass,
            thrust,
            fuel,
            max_fuel: fuel,
            fuel_consumption,
            friction: tuning.friction,
            restitution: tuning.restitution,
        };

        info!(
            "Compiled rocket: {} parts, mass {}, thrust {}, fuel {}, consumption {}",
            rocket.parts.len(),
            rocket.mass,
            rocket.thrust,
            rocket.fuel,
            rocket.fuel_consumption
        );

        Ok(rocket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::catalog::PartCatalog;
    use crate::assembly::part::{PartId, PointRef};
    use std::sync::Arc;

    fn spawn(
        registry: &mut PartRegistry,
        catalog: &PartCatalog,
        category: PartCategory,
        position: Vector,
    ) -> PartId {
        registry.instantiate(Arc::clone(catalog.kind(category).unwrap()), position)
    }

    #[test]
    fn test_capsule_tank_engine_stack() {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        let capsule = spawn(&mut registry, &catalog, PartCategory::Capsule, Vector::new(400.0, 200.0));
        let tank = spawn(&mut registry, &catalog, PartCategory::Fuel, Vector::new(400.0, 140.0));
        let engine = spawn(&mut registry, &catalog, PartCategory::Engine, Vector::new(400.0, 80.0));
        registry
            .bind(PointRef::new(capsule, 0), PointRef::new(tank, 0))
            .unwrap();
        registry
            .bind(PointRef::new(tank, 1), PointRef::new(engine, 0))
            .unwrap();

        let rocket = RocketCompiler::default().compile(&registry).unwrap();

        assert_eq!(rocket.bodies().len(), 3);
        assert_eq!(rocket.fuel(), 1.0);
        assert_eq!(rocket.max_fuel(), 1.0);
        assert_eq!(rocket.thrust(), 1400.0);
        assert_eq!(rocket.mass(), 5.0);
        assert!((rocket.fuel_consumption() - 0.008).abs() < 1e-6);
        assert_eq!(rocket.friction(), 0.5);
        assert_eq!(rocket.restitution(), 0.3);
        assert_eq!(rocket.thrust_markers().len(), 1);
        assert_eq!(rocket.thrust_markers()[0].part, 2);
        assert_eq!(rocket.thrust_markers()[0].offset, Vector::new(0.0, -46.0));
    }

    #[test]
    fn test_recenters_on_bounding_box() {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        let capsule = spawn(&mut registry, &catalog, PartCategory::Capsule, Vector::new(400.0, 200.0));
        let tank = spawn(&mut registry, &catalog, PartCategory::Fuel, Vector::new(400.0, 140.0));
        registry
            .bind(PointRef::new(capsule, 0), PointRef::new(tank, 0))
            .unwrap();

        let rocket = RocketCompiler::default().compile(&registry).unwrap();

        // Bounds span y 100..220, centered at 160
        assert_eq!(rocket.size(), Vector::new(40.0, 120.0));
        assert_eq!(rocket.parts()[0].position(), Vector::new(0.0, 40.0));
        assert_eq!(rocket.parts()[1].position(), Vector::new(0.0, -20.0));
        assert_eq!(rocket.bodies()[1].offset, Vector::new(0.0, -20.0));
        assert_eq!(
            rocket.bodies()[1].vertices,
            [
                Vector::new(-20.0, -60.0),
                Vector::new(20.0, -60.0),
                Vector::new(20.0, 20.0),
                Vector::new(-20.0, 20.0),
            ]
        );
        // The builder keeps its own positions
        assert_eq!(registry.get(capsule).unwrap().position(), Vector::new(400.0, 200.0));
    }

    #[test]
    fn test_engine_sizes_scale_thrust_and_consumption() {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        let capsule = spawn(&mut registry, &catalog, PartCategory::Capsule, Vector::new(400.0, 200.0));
        let tank = spawn(&mut registry, &catalog, PartCategory::Fuel, Vector::new(400.0, 140.0));
        let left = spawn(&mut registry, &catalog, PartCategory::Fuel, Vector::new(360.0, 140.0));
        let small = spawn(&mut registry, &catalog, PartCategory::Engine, Vector::new(400.0, 80.0));
        let big = spawn(&mut registry, &catalog, PartCategory::EngineBig, Vector::new(360.0, 60.0));
        registry
            .bind(PointRef::new(capsule, 0), PointRef::new(tank, 0))
            .unwrap();
        registry
            .bind(PointRef::new(tank, 3), PointRef::new(left, 2))
            .unwrap();
        registry
            .bind(PointRef::new(tank, 1), PointRef::new(small, 0))
            .unwrap();
        registry
            .bind(PointRef::new(left, 1), PointRef::new(big, 0))
            .unwrap();

        let rocket = RocketCompiler::default().compile(&registry).unwrap();

        assert_eq!(rocket.thrust(), 4200.0);
        assert!((rocket.fuel_consumption() - 0.024).abs() < 1e-6);
        assert_eq!(rocket.fuel(), 2.0);
        assert_eq!(rocket.thrust_markers().len(), 2);
        let big_marker = rocket
            .thrust_markers()
            .iter()
            .find(|marker| marker.multiplier == 2.0)
            .unwrap();
        assert_eq!(big_marker.birth_rate, 500.0);
    }

    #[test]
    fn test_loose_parts_are_not_compiled() {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        spawn(&mut registry, &catalog, PartCategory::Capsule, Vector::new(400.0, 200.0));
        spawn(&mut registry, &catalog, PartCategory::Fuel, Vector::new(500.0, 140.0));
        spawn(&mut registry, &catalog, PartCategory::Engine, Vector::new(500.0, 60.0));

        let rocket = RocketCompiler::default().compile(&registry).unwrap();

        assert_eq!(rocket.parts().len(), 1);
        assert_eq!(rocket.fuel(), 0.0);
        assert_eq!(rocket.thrust(), 0.0);
        assert_eq!(rocket.mass(), 1.0);
        assert_eq!(rocket.parts()[0].position(), Vector::ZERO);
    }

    #[test]
    fn test_compile_without_master_fails() {
        let registry = PartRegistry::new();
        let err = RocketCompiler::default().compile(&registry).unwrap_err();
        assert_eq!(err, AssemblyError::NoMasterPart { found: 0 });
    }

    #[test]
    fn test_compile_with_two_masters_fails() {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        spawn(&mut registry, &catalog, PartCategory::Capsule, Vector::ZERO);
        spawn(&mut registry, &catalog, PartCategory::Capsule, Vector::ZERO);

        let err = RocketCompiler::default().compile(&registry).unwrap_err();
        assert_eq!(err, AssemblyError::NoMasterPart { found: 2 });
        assert_eq!(registry.len(), 2);
    }
}
