//! Part catalog
//!
//! Every part kind is defined once at startup and shared by all placed
//! instances through an `Arc`. The fixed catalog holds a capsule (the master
//! part every rocket grows from) and three reusable parts offered in the
//! builder menu: a fuel tank, an engine and a big engine.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use super::aabb2d::Aabb2d;
use super::direction::AttachDirection;
use super::error::CatalogError;
use super::math::{Scalar, Vector};

/// What a part does once the rocket is compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    Fuel,
    Engine,
    #[serde(rename = "enginebig")]
    EngineBig,
    Capsule,
}

impl PartCategory {
    pub fn tag(self) -> &'static str {
        match self {
            PartCategory::Fuel => "fuel",
            PartCategory::Engine => "engine",
            PartCategory::EngineBig => "enginebig",
            PartCategory::Capsule => "capsule",
        }
    }

    #[inline]
    pub fn is_engine(self) -> bool {
        matches!(self, PartCategory::Engine | PartCategory::EngineBig)
    }

    /// Thrust and fuel consumption scale for engine parts, `None` otherwise
    pub fn engine_multiplier(self, big_engine_multiplier: Scalar) -> Option<Scalar> {
        match self {
            PartCategory::Engine => Some(1.0),
            PartCategory::EngineBig => Some(big_engine_multiplier),
            PartCategory::Fuel | PartCategory::Capsule => None,
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where a snap point sits on a part, relative to its center in part sizes
/// (`-0.5..=0.5` on each axis), and which way it faces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPointTemplate {
    pub anchor: Vector,
    pub direction: AttachDirection,
}

impl SnapPointTemplate {
    pub const fn new(x: Scalar, y: Scalar, direction: AttachDirection) -> Self {
        Self {
            anchor: Vector::new(x, y),
            direction,
        }
    }
}

/// Input to [`define_part`]
#[derive(Debug, Clone, PartialEq)]
pub struct PartDefinition {
    pub block_width: u32,
    pub block_height: u32,
    pub image: &'static str,
    pub snap_points: Vec<SnapPointTemplate>,
    pub mass: Scalar,
    pub category: PartCategory,
    pub label: &'static str,
    pub is_master: bool,
}

/// Immutable description of a kind of part
#[derive(Debug, Clone, PartialEq)]
pub struct PartKind {
    block_width: u32,
    block_height: u32,
    size: Vector,
    image: String,
    snap_points: Vec<SnapPointTemplate>,
    mass: Scalar,
    category: PartCategory,
    label: String,
    is_master: bool,
}

impl PartKind {
    pub fn block_width(&self) -> u32 {
        self.block_width
    }

    pub fn block_height(&self) -> u32 {
        self.block_height
    }

    /// Visual extent in world units
    #[inline]
    pub fn size(&self) -> Vector {
        self.size
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn snap_points(&self) -> &[SnapPointTemplate] {
        &self.snap_points
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    #[inline]
    pub fn category(&self) -> PartCategory {
        self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.is_master
    }

    /// Offset of a snap point from the part center in world units
    #[inline]
    pub fn snap_offset(&self, template: &SnapPointTemplate) -> Vector {
        self.size * template.anchor
    }

    /// Extent of a part of this kind centered at `position`
    pub fn extent_at(&self, position: Vector) -> Aabb2d {
        Aabb2d::from_center_size(position, self.size)
    }
}

/// Builds a part kind, validating its snap point layout.
///
/// `block_unit` is the world size of one block.
pub fn define_part(definition: PartDefinition, block_unit: Scalar) -> Result<PartKind, CatalogError> {
    let label = definition.label.to_string();

    if definition.block_width == 0 || definition.block_height == 0 {
        return Err(CatalogError::EmptyDimensions { label });
    }

    if definition.is_master {
        let downward = definition
            .snap_points
            .iter()
            .filter(|template| template.direction == AttachDirection::Down)
            .count();
        if downward != 1 {
            return Err(CatalogError::MasterNeedsSingleDownPoint {
                label,
                found: downward,
            });
        }
    } else if definition.snap_points.is_empty() {
        return Err(CatalogError::NoSnapPoints { label });
    }

    Ok(PartKind {
        block_width: definition.block_width,
        block_height: definition.block_height,
        size: Vector::new(
            block_unit * definition.block_width as Scalar,
            block_unit * definition.block_height as Scalar,
        ),
        image: definition.image.to_string(),
        snap_points: definition.snap_points,
        mass: definition.mass,
        category: definition.category,
        label,
        is_master: definition.is_master,
    })
}

/// A reusable part offered in the builder menu
#[derive(Debug, Clone)]
pub struct MenuSlot {
    pub kind: Arc<PartKind>,
    /// Center of the menu icon in builder coordinates
    pub position: Vector,
}

impl MenuSlot {
    /// Extent of the (scaled up) menu icon
    pub fn extent(&self) -> Aabb2d {
        Aabb2d::from_center_size(self.position, self.kind.size() * PartCatalog::MENU_SCALE)
    }
}

/// The fixed set of part kinds
#[derive(Resource, Debug, Clone)]
pub struct PartCatalog {
    capsule: Arc<PartKind>,
    menu: Vec<MenuSlot>,
}

impl PartCatalog {
    /// Menu icons are drawn larger than placed parts
    pub const MENU_SCALE: Scalar = 1.4;

    pub fn standard(block_unit: Scalar) -> Result<Self, CatalogError> {
        use AttachDirection::*;

        let fuel = define_part(
            PartDefinition {
                block_width: 1,
                block_height: 2,
                image: "fuel3.png",
                snap_points: vec![
                    SnapPointTemplate::new(0.0, 0.5, Up),
                    SnapPointTemplate::new(0.0, -0.5, Down),
                    SnapPointTemplate::new(0.5, 0.0, Right),
                    SnapPointTemplate::new(-0.5, 0.0, Left),
                ],
                mass: 2.0,
                category: PartCategory::Fuel,
                label: "Fuel Tank",
                is_master: false,
            },
            block_unit,
        )?;

        let engine = define_part(
            PartDefinition {
                block_width: 1,
                block_height: 1,
                image: "engine3.png",
                snap_points: vec![SnapPointTemplate::new(0.0, 0.5, Up)],
                mass: 2.0,
                category: PartCategory::Engine,
                label: "Engine",
                is_master: false,
            },
            block_unit,
        )?;

        let engine_big = define_part(
            PartDefinition {
                block_width: 1,
                block_height: 2,
                image: "bigrocket.png",
                snap_points: vec![SnapPointTemplate::new(0.0, 0.5, Up)],
                mass: 2.0,
                category: PartCategory::EngineBig,
                label: "Big Engine",
                is_master: false,
            },
            block_unit,
        )?;

        let capsule = define_part(
            PartDefinition {
                block_width: 1,
                block_height: 1,
                image: "capsule3.png",
                snap_points: vec![SnapPointTemplate::new(0.0, -0.5, Down)],
                mass: 1.0,
                category: PartCategory::Capsule,
                label: "Capsule",
                is_master: true,
            },
            block_unit,
        )?;

        Ok(Self {
            capsule: Arc::new(capsule),
            menu: vec![
                MenuSlot {
                    kind: Arc::new(fuel),
                    position: Vector::new(100.0, 120.0),
                },
                MenuSlot {
                    kind: Arc::new(engine),
                    position: Vector::new(60.0, 270.0),
                },
                MenuSlot {
                    kind: Arc::new(engine_big),
                    position: Vector::new(140.0, 270.0),
                },
            ],
        })
    }

    pub fn capsule(&self) -> &Arc<PartKind> {
        &self.capsule
    }

    pub fn menu(&self) -> &[MenuSlot] {
        &self.menu
    }

    /// Looks up a kind by category
    pub fn kind(&self, category: PartCategory) -> Option<&Arc<PartKind>> {
        if category == PartCategory::Capsule {
            return Some(&self.capsule);
        }
        self.menu
            .iter()
            .map(|slot| &slot.kind)
            .find(|kind| kind.category() == category)
    }

    /// The menu slot whose icon contains `point`
    pub fn menu_slot_at(&self, point: Vector) -> Option<&MenuSlot> {
        self.menu.iter().find(|slot| slot.extent().contains(point))
    }
}
