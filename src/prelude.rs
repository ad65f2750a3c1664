//! Liftoff prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the Liftoff application to reduce import boilerplate.

// External crate re-exports
pub use avian2d::prelude::*;
pub use bevy::prelude::*;

// Internal re-exports - Assembly
pub use crate::assembly::{
    AttachmentResolver, DragContext, PartCatalog, PartId, PartRegistry, Scalar, Vector,
};

// Internal re-exports - Config
pub use crate::config::LiftoffConfig;

// Internal re-exports - States
pub use crate::states::AppState;

// Internal re-exports - Events
pub use crate::events::{PointerEvent, RocketCommand};
