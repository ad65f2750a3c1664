//! End to end assembly scenarios driven through the public library API

use liftoff::assembly::{
    Aabb2d, AssemblyError, AttachDirection, AttachmentResolver, DragContext, DragOutcome,
    DropOutcome, PartCatalog, PartCategory, PartId, PartRegistry, PointRef, RocketCompiler, Vector,
};
use std::sync::Arc;

struct Builder {
    catalog: PartCatalog,
    registry: PartRegistry,
    resolver: AttachmentResolver,
    drag: DragContext,
    menu: Aabb2d,
}

impl Builder {
    fn new() -> Self {
        let catalog = PartCatalog::standard(40.0).unwrap();
        let mut registry = PartRegistry::new();
        registry.instantiate(Arc::clone(catalog.capsule()), Vector::new(400.0, 200.0));
        Self {
            catalog,
            registry,
            resolver: AttachmentResolver::default(),
            drag: DragContext::default(),
            menu: Aabb2d::new(Vector::ZERO, Vector::new(200.0, 480.0)),
        }
    }

    fn capsule(&self) -> PartId {
        self.registry.master().unwrap()
    }

    fn add(&mut self, category: PartCategory) -> PartId {
        let kind = Arc::clone(self.catalog.kind(category).unwrap());
        self.registry.instantiate(kind, Vector::new(600.0, 420.0))
    }

    /// Drags `part` through `path` and drops it at the last position
    fn drag(&mut self, part: PartId, path: &[Vector]) -> (Vec<DragOutcome>, DropOutcome) {
        self.resolver
            .begin_drag(&mut self.drag, &self.registry, part)
            .unwrap();
        let outcomes = path
            .iter()
            .map(|&pointer| {
                self.resolver
                    .drag_to(&self.drag, &mut self.registry, pointer)
                    .unwrap()
            })
            .collect();
        let dropped = self
            .resolver
            .end_drag(&mut self.drag, &mut self.registry, &self.menu);
        (outcomes, dropped)
    }

    fn assert_symmetric(&self) {
        self.registry.verify_bonds().unwrap();
        for part in self.registry.iter() {
            for point in part.points() {
                if let Some(counterpart) = point.counterpart() {
                    let back = self.registry.point(counterpart).unwrap();
                    assert!(back.is_attached());
                    assert_eq!(back.counterpart().map(|p| p.part), Some(part.id()));
                }
            }
        }
    }
}

#[test]
fn capsule_tank_engine_compiles_to_three_bodies() {
    let mut b = Builder::new();
    let tank = b.add(PartCategory::Fuel);
    let engine = b.add(PartCategory::Engine);

    // Tank up point lands 5 units off the capsule's down point at (400, 180)
    let (_, dropped) = b.drag(tank, &[Vector::new(300.0, 300.0), Vector::new(403.0, 136.0)]);
    assert_eq!(dropped, DropOutcome::Placed(tank));
    // Tank down point is now at (400, 100); engine up point sits 20 above its center
    b.drag(engine, &[Vector::new(398.0, 84.0)]);
    b.assert_symmetric();

    let rocket = RocketCompiler::default().compile(&b.registry).unwrap();
    assert_eq!(rocket.bodies().len(), 3);
    assert_eq!(rocket.fuel(), 1.0);
    assert_eq!(rocket.max_fuel(), 1.0);
    assert_eq!(rocket.thrust(), 1400.0);
}

#[test]
fn snapping_threshold_is_strict() {
    let mut b = Builder::new();
    let tank = b.add(PartCategory::Fuel);

    // Up point offset is (0, 40): pointer y = 180 - 40 - 20 puts it exactly 20 away
    let (outcomes, _) = b.drag(tank, &[Vector::new(400.0, 120.0)]);
    assert_eq!(outcomes, vec![DragOutcome::Moved]);
    assert!(b.registry.get(tank).unwrap().bond().is_none());

    let (outcomes, _) = b.drag(tank, &[Vector::new(400.0, 121.0)]);
    assert_eq!(
        outcomes,
        vec![DragOutcome::Snapped {
            parent: PointRef::new(b.capsule(), 0),
            own: PointRef::new(tank, 0),
        }]
    );
}

#[test]
fn pulling_away_breaks_bond_on_both_sides() {
    let mut b = Builder::new();
    let tank = b.add(PartCategory::Fuel);
    b.drag(tank, &[Vector::new(400.0, 140.0)]);
    assert!(b.registry.point(PointRef::new(b.capsule(), 0)).unwrap().is_attached());

    let (outcomes, _) = b.drag(
        tank,
        &[Vector::new(410.0, 140.0), Vector::new(400.0, 115.0)],
    );
    assert_eq!(
        outcomes[0],
        DragOutcome::Held {
            parent: PointRef::new(b.capsule(), 0)
        }
    );
    assert!(matches!(outcomes[1], DragOutcome::Detached { .. }));

    let capsule_point = b.registry.point(PointRef::new(b.capsule(), 0)).unwrap();
    let tank_part = b.registry.get(tank).unwrap();
    assert!(!capsule_point.is_attached());
    assert!(!tank_part.points()[0].is_attached());
    assert_eq!(tank_part.attached_to(), None);
    assert_eq!(tank_part.attached_at(), None);
    b.assert_symmetric();
}

#[test]
fn deleting_a_tank_drops_everything_beneath_it() {
    let mut b = Builder::new();
    let tank = b.add(PartCategory::Fuel);
    let engine = b.add(PartCategory::Engine);
    b.drag(tank, &[Vector::new(400.0, 140.0)]);
    b.drag(engine, &[Vector::new(400.0, 80.0)]);
    assert_eq!(b.registry.active_parts().len(), 3);

    // Dragging the tank drags the engine with it; drop both over the menu
    let (_, dropped) = b.drag(tank, &[Vector::new(400.0, 100.0), Vector::new(100.0, 240.0)]);
    assert_eq!(dropped, DropOutcome::Deleted(tank));

    assert!(!b.registry.contains(tank));
    assert!(b.registry.contains(engine));
    assert!(!b.registry.is_active(engine));
    b.assert_symmetric();

    let rocket = RocketCompiler::default().compile(&b.registry).unwrap();
    assert_eq!(rocket.parts().len(), 1);
    assert_eq!(rocket.thrust(), 0.0);
}

#[test]
fn fuel_count_matches_fuel_parts() {
    let mut b = Builder::new();
    let upper = b.add(PartCategory::Fuel);
    let lower = b.add(PartCategory::Fuel);
    let side = b.add(PartCategory::Fuel);
    let loose = b.add(PartCategory::Fuel);
    b.drag(upper, &[Vector::new(400.0, 140.0)]);
    b.drag(lower, &[Vector::new(400.0, 60.0)]);
    // Upper tank's right point is at (420, 140); a tank's left point is 20 left of center
    b.drag(side, &[Vector::new(440.0, 140.0)]);
    b.drag(loose, &[Vector::new(560.0, 300.0)]);

    assert_eq!(b.registry.len(), 5);
    let rocket = RocketCompiler::default().compile(&b.registry).unwrap();
    assert_eq!(rocket.parts().len(), 4);
    assert_eq!(rocket.fuel(), 3.0);
    assert_eq!(rocket.max_fuel(), 3.0);
    assert_eq!(rocket.mass(), 7.0);
}

#[test]
fn engine_and_big_engine_add_up() {
    let mut b = Builder::new();
    let tank = b.add(PartCategory::Fuel);
    let side = b.add(PartCategory::Fuel);
    let engine = b.add(PartCategory::Engine);
    let big = b.add(PartCategory::EngineBig);
    b.drag(tank, &[Vector::new(400.0, 140.0)]);
    b.drag(side, &[Vector::new(360.0, 140.0)]);
    b.drag(engine, &[Vector::new(400.0, 80.0)]);
    // Big engine is two blocks tall, its up point sits 40 above center
    b.drag(big, &[Vector::new(360.0, 60.0)]);
    assert_eq!(b.registry.active_parts().len(), 5);

    let rocket = RocketCompiler::default().compile(&b.registry).unwrap();
    assert_eq!(rocket.thrust(), 4200.0);
    assert!((rocket.fuel_consumption() - 0.024).abs() < 1e-6);
}

#[test]
fn compile_without_master_fails() {
    let registry = PartRegistry::new();
    assert_eq!(
        RocketCompiler::default().compile(&registry).unwrap_err(),
        AssemblyError::NoMasterPart { found: 0 }
    );
}

#[test]
fn direction_compatibility_is_exact() {
    use AttachDirection::*;

    for a in AttachDirection::ALL {
        assert!(!a.matches(a));
        for b in AttachDirection::ALL {
            assert_eq!(a.matches(b), b.matches(a));
        }
    }
    assert!(Up.matches(Down));
    assert!(Left.matches(Right));
    for (a, b) in [(Up, Left), (Up, Right), (Down, Left), (Down, Right)] {
        assert!(!a.matches(b));
    }
}
