//! Error types for the assembly engine

use std::fmt;

use super::part::{PartId, PointRef};

/// Failures while editing the attachment tree or compiling it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// Compilation needs exactly one master part
    NoMasterPart { found: usize },
    /// The master part produced no parts to compile
    EmptyAssembly,
    /// No part with this id is registered
    UnknownPart(PartId),
    /// The part exists but has no point at this index
    UnknownPoint(PointRef),
    /// The two points do not face each other
    IncompatibleDirections { parent: PointRef, child: PointRef },
    /// The point is already bonded to another point
    PointOccupied(PointRef),
    /// The part already hangs from a parent point
    AlreadyBonded(PartId),
    /// The master part never hangs from another part
    MasterCannotBond(PartId),
    /// A part cannot bond to itself
    SelfAttachment(PartId),
    /// A point and its counterpart disagree about the bond
    AsymmetricBond(PointRef),
    /// Another drag is still active
    DragInProgress { dragged: PartId },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::NoMasterPart { found } => {
                write!(f, "Expected exactly one master part, found {found}")
            }
            AssemblyError::EmptyAssembly => write!(f, "Rocket has no parts to compile"),
            AssemblyError::UnknownPart(id) => write!(f, "Unknown part {id}"),
            AssemblyError::UnknownPoint(point) => write!(f, "Unknown attachment point {point}"),
            AssemblyError::IncompatibleDirections { parent, child } => {
                write!(f, "Attachment points {parent} and {child} do not face each other")
            }
            AssemblyError::PointOccupied(point) => {
                write!(f, "Attachment point {point} is already bonded")
            }
            AssemblyError::AlreadyBonded(id) => write!(f, "Part {id} is already attached"),
            AssemblyError::MasterCannotBond(id) => {
                write!(f, "Master part {id} cannot attach to another part")
            }
            AssemblyError::SelfAttachment(id) => write!(f, "Part {id} cannot attach to itself"),
            AssemblyError::AsymmetricBond(point) => {
                write!(f, "Attachment point {point} has a one-sided bond")
            }
            AssemblyError::DragInProgress { dragged } => {
                write!(f, "Part {dragged} is already being dragged")
            }
        }
    }
}

impl std::error::Error for AssemblyError {}

/// Invalid part definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Parts other than the master need something to attach with
    NoSnapPoints { label: String },
    /// The master attaches the rocket beneath it through a single `Down` point
    MasterNeedsSingleDownPoint { label: String, found: usize },
    /// Width and height are at least one block
    EmptyDimensions { label: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NoSnapPoints { label } => {
                write!(f, "Part '{label}' needs at least one snap point")
            }
            CatalogError::MasterNeedsSingleDownPoint { label, found } => write!(
                f,
                "Master part '{label}' needs exactly one downward snap point, found {found}"
            ),
            CatalogError::EmptyDimensions { label } => {
                write!(f, "Part '{label}' must be at least one block wide and tall")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
