//! Rocket assembly engine
//!
//! Everything needed to snap parts together and turn the result into a
//! flyable rocket, free of rendering and input concerns so it can be driven
//! directly from tests.

pub mod aabb2d;
pub mod catalog;
pub mod compiler;
pub mod direction;
pub mod error;
pub mod flight;
pub mod math;
pub mod part;
pub mod resolver;

pub use aabb2d::Aabb2d;
pub use catalog::{
    MenuSlot, PartCatalog, PartCategory, PartDefinition, PartKind, SnapPointTemplate, define_part,
};
pub use compiler::{Rocket, RocketCompiler, RocketTuning, RigidBodyDescriptor, ThrustMarker};
pub use direction::AttachDirection;
pub use error::{AssemblyError, CatalogError};
pub use flight::{AltitudeTracker, CameraZoom, FlightState, altitude, format_altitude};
pub use math::{Scalar, Vector};
pub use part::{AttachmentPoint, Bond, PartId, PartInstance, PartRegistry, PointRef};
pub use resolver::{
    AttachmentResolver, DEFAULT_SNAP_DISTANCE, DragContext, DragOutcome, DragPhase, DropOutcome,
};
