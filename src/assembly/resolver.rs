//! Drag and snap resolution
//!
//! A drag moves one part (and whatever hangs beneath it) with the pointer.
//! While the part is bonded it stays locked to its parent point until the
//! pointer pulls it [`AttachmentResolver::snap_distance`] or further away.
//! While it is loose, every move looks for the first free, compatible point
//! on the active rocket within reach and snaps to it.

use bevy::log::debug;
use bevy::prelude::Resource;

use super::aabb2d::Aabb2d;
use super::error::AssemblyError;
use super::math::{Scalar, Vector};
use super::part::{PartId, PartRegistry, PointRef};

/// Default distance at which points snap together and bonds break
pub const DEFAULT_SNAP_DISTANCE: Scalar = 20.0;

/// Where the current drag stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(PartId),
    Snapped(PartId),
}

/// Per-drag state, passed explicitly into every resolver call
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DragContext {
    dragged: Option<PartId>,
    revealed: Vec<PartId>,
}

impl DragContext {
    pub fn dragged(&self) -> Option<PartId> {
        self.dragged
    }

    /// Parts whose snap points are shown for the current drag
    pub fn revealed(&self) -> &[PartId] {
        &self.revealed
    }

    pub fn phase(&self, registry: &PartRegistry) -> DragPhase {
        match self.dragged {
            None => DragPhase::Idle,
            Some(id) => match registry.get(id).and_then(|part| part.bond()) {
                Some(_) => DragPhase::Snapped(id),
                None => DragPhase::Dragging(id),
            },
        }
    }

    fn clear(&mut self) {
        self.dragged = None;
        self.revealed.clear();
    }
}

/// Result of one pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// No drag in progress
    Idle,
    /// The part followed the pointer without touching any bond
    Moved,
    /// The part is bonded and was held in place at its parent point
    Held { parent: PointRef },
    /// A new bond was made
    Snapped { parent: PointRef, own: PointRef },
    /// The existing bond was pulled apart
    Detached { parent: PointRef, own: PointRef },
}

/// Result of releasing the dragged part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Nothing,
    Placed(PartId),
    /// Dropped over the menu and removed
    Deleted(PartId),
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AttachmentResolver {
    snap_distance: Scalar,
}

impl Default for AttachmentResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SNAP_DISTANCE)
    }
}

impl AttachmentResolver {
    pub fn new(snap_distance: Scalar) -> Self {
        Self { snap_distance }
    }

    pub fn snap_distance(&self) -> Scalar {
        self.snap_distance
    }

    /// Starts dragging `part`.
    ///
    /// Returns the parts whose snap points should be revealed: the dragged
    /// part followed by every active part.
    pub fn begin_drag(
        &self,
        ctx: &mut DragContext,
        registry: &PartRegistry,
        part: PartId,
    ) -> Result<Vec<PartId>, AssemblyError> {
        if let Some(dragged) = ctx.dragged {
            return Err(AssemblyError::DragInProgress { dragged });
        }
        if !registry.contains(part) {
            return Err(AssemblyError::UnknownPart(part));
        }

        let mut revealed = vec![part];
        revealed.extend(
            registry
                .active_parts()
                .into_iter()
                .filter(|&id| id != part),
        );

        ctx.dragged = Some(part);
        ctx.revealed = revealed.clone();
        debug!("Started dragging part {part}");
        Ok(revealed)
    }

    /// Moves the dragged part to `pointer` and resolves snapping
    pub fn drag_to(
        &self,
        ctx: &DragContext,
        registry: &mut PartRegistry,
        pointer: Vector,
    ) -> Result<DragOutcome, AssemblyError> {
        let Some(dragged) = ctx.dragged else {
            return Ok(DragOutcome::Idle);
        };

        registry.set_position(dragged, pointer)?;

        let (bond, is_master) = match registry.get(dragged) {
            Some(part) => (part.bond(), part.is_master()),
            None => return Err(AssemblyError::UnknownPart(dragged)),
        };

        if let Some(bond) = bond {
            let own = PointRef::new(dragged, bond.own_point);
            let parent_position = registry.absolute_position(bond.parent)?;
            let own_position = registry.absolute_position(own)?;

            if parent_position.distance(own_position) < self.snap_distance {
                let offset = registry.point(own)?.offset();
                registry.set_position(dragged, parent_position - offset)?;
                return Ok(DragOutcome::Held {
                    parent: bond.parent,
                });
            }

            registry.unbind(dragged);
            debug!("Part {dragged} pulled away from {}", bond.parent);
            return Ok(DragOutcome::Detached {
                parent: bond.parent,
                own,
            });
        }

        if is_master {
            return Ok(DragOutcome::Moved);
        }

        let Some((parent, own)) = self.find_candidate(registry, dragged) else {
            return Ok(DragOutcome::Moved);
        };

        registry.bind(parent, own)?;
        let parent_position = registry.absolute_position(parent)?;
        let offset = registry.point(own)?.offset();
        registry.set_position(dragged, parent_position - offset)?;
        debug!("Part {dragged} snapped {own} onto {parent}");

        Ok(DragOutcome::Snapped { parent, own })
    }

    /// First free pair of compatible points within reach.
    ///
    /// Active parts are scanned in creation order, then their free points,
    /// then the dragged part's free points; the first pair closer than the
    /// snap distance wins, even if a later pair is closer.
    pub fn find_candidate(
        &self,
        registry: &PartRegistry,
        dragged: PartId,
    ) -> Option<(PointRef, PointRef)> {
        let dragged_part = registry.get(dragged)?;

        for target_id in registry.active_parts() {
            if target_id == dragged {
                continue;
            }
            let Some(target) = registry.get(target_id) else {
                continue;
            };

            for (target_index, target_point) in target.points().iter().enumerate() {
                if target_point.is_attached() {
                    continue;
                }
                let target_position = target_point.absolute_position(target.position());

                for (own_index, own_point) in dragged_part.points().iter().enumerate() {
                    if own_point.is_attached() || !own_point.direction().matches(target_point.direction()) {
                        continue;
                    }

                    let own_position = own_point.absolute_position(dragged_part.position());
                    if own_position.distance(target_position) < self.snap_distance {
                        return Some((
                            PointRef::new(target_id, target_index),
                            PointRef::new(dragged, own_index),
                        ));
                    }
                }
            }
        }

        None
    }

    /// Releases the dragged part.
    ///
    /// A non-master part dropped over `menu` is removed; anything bonded
    /// beneath it drops out of the rocket with it. Bonds made during the drag
    /// are kept otherwise.
    pub fn end_drag(
        &self,
        ctx: &mut DragContext,
        registry: &mut PartRegistry,
        menu: &Aabb2d,
    ) -> DropOutcome {
        let Some(dragged) = ctx.dragged else {
            return DropOutcome::Nothing;
        };
        ctx.clear();

        let Some(part) = registry.get(dragged) else {
            return DropOutcome::Nothing;
        };

        if !part.is_master() && part.extent().intersects(menu) {
            registry.remove(dragged);
            debug!("Part {dragged} dropped on the menu and removed");
            return DropOutcome::Deleted(dragged);
        }

        DropOutcome::Placed(dragged)
    }
}
