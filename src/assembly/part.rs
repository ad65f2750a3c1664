//! Placed parts and the registry that owns them
//!
//! Parts live in a [`PartRegistry`] arena and refer to each other only through
//! [`PartId`] and [`PointRef`] handles. A bond is recorded on both points it
//! joins and, on the child part, as a [`Bond`] naming the parent point and the
//! child's own point. Bonds are always written and cleared on both sides in a
//! single call, so a point is attached exactly when its counterpart points back
//! at it.
//!
//! Which parts belong to the rocket is never stored: it is derived from the
//! bonds by walking down from the master part.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use bevy::prelude::Resource;

use super::aabb2d::Aabb2d;
use super::catalog::PartKind;
use super::direction::AttachDirection;
use super::error::AssemblyError;
use super::math::Vector;

/// Handle of a part in a [`PartRegistry`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(u32);

impl PartId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of one attachment point: the owning part and the point's index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointRef {
    pub part: PartId,
    pub index: usize,
}

impl PointRef {
    pub const fn new(part: PartId, index: usize) -> Self {
        Self { part, index }
    }
}

impl fmt::Display for PointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.part, self.index)
    }
}

/// A directional connector on a part
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentPoint {
    owner: PartId,
    direction: AttachDirection,
    offset: Vector,
    counterpart: Option<PointRef>,
}

impl AttachmentPoint {
    pub fn owner(&self) -> PartId {
        self.owner
    }

    pub fn direction(&self) -> AttachDirection {
        self.direction
    }

    /// Offset from the owning part's center
    pub fn offset(&self) -> Vector {
        self.offset
    }

    /// The point this one is bonded to
    pub fn counterpart(&self) -> Option<PointRef> {
        self.counterpart
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.counterpart.is_some()
    }

    #[inline]
    pub fn absolute_position(&self, part_position: Vector) -> Vector {
        part_position + self.offset
    }
}

/// How a non-master part hangs from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    /// Point on the parent part (`attachedTo`)
    pub parent: PointRef,
    /// Index of the child's own point used for the bond (`attachedAt`)
    pub own_point: usize,
}

/// A part placed in the builder
#[derive(Debug, Clone)]
pub struct PartInstance {
    id: PartId,
    kind: Arc<PartKind>,
    position: Vector,
    points: Vec<AttachmentPoint>,
    is_master: bool,
    bond: Option<Bond>,
}

impl PartInstance {
    fn new(id: PartId, kind: Arc<PartKind>, position: Vector, is_master: bool) -> Self {
        let points = kind
            .snap_points()
            .iter()
            .map(|template| AttachmentPoint {
                owner: id,
                direction: template.direction,
                offset: kind.snap_offset(template),
                counterpart: None,
            })
            .collect();

        Self {
            id,
            kind,
            position,
            points,
            is_master,
            bond: None,
        }
    }

    /// Same kind, position and master flag under a new id, with fresh points
    fn detached_copy(&self, id: PartId) -> Self {
        Self::new(id, Arc::clone(&self.kind), self.position, self.is_master)
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn kind(&self) -> &Arc<PartKind> {
        &self.kind
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn points(&self) -> &[AttachmentPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&AttachmentPoint> {
        self.points.get(index)
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn bond(&self) -> Option<Bond> {
        self.bond
    }

    /// Point on the parent this part is bonded through
    pub fn attached_to(&self) -> Option<PointRef> {
        self.bond.map(|bond| bond.parent)
    }

    /// This part's own point used for the bond
    pub fn attached_at(&self) -> Option<PointRef> {
        self.bond.map(|bond| PointRef::new(self.id, bond.own_point))
    }

    /// Absolute position of one of this part's points
    pub fn point_position(&self, index: usize) -> Option<Vector> {
        self.points
            .get(index)
            .map(|point| point.absolute_position(self.position))
    }

    pub fn extent(&self) -> Aabb2d {
        self.kind.extent_at(self.position)
    }

    /// Hit test against the part's visual extent
    pub fn contains(&self, point: Vector) -> bool {
        self.extent().contains(point)
    }

    pub(crate) fn set_position(&mut self, position: Vector) {
        self.position = position;
    }
}

/// Arena owning every placed part
#[derive(Resource, Debug, Clone, Default)]
pub struct PartRegistry {
    parts: BTreeMap<PartId, PartInstance>,
    next_id: u32,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> PartId {
        let id = PartId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Places a new part of `kind` centered at `position` with unattached points
    pub fn instantiate(&mut self, kind: Arc<PartKind>, position: Vector) -> PartId {
        let id = self.allocate_id();
        let is_master = kind.is_master();
        self.parts
            .insert(id, PartInstance::new(id, kind, position, is_master));
        id
    }

    /// Places a copy of `source`, which may live in another registry: same
    /// kind and position, fresh unattached points, never master
    pub fn clone_part(&mut self, source: &PartInstance) -> PartId {
        let id = self.allocate_id();
        self.parts.insert(
            id,
            PartInstance::new(id, Arc::clone(source.kind()), source.position(), false),
        );
        id
    }

    pub fn get(&self, id: PartId) -> Option<&PartInstance> {
        self.parts.get(&id)
    }

    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts in creation order
    pub fn iter(&self) -> impl Iterator<Item = &PartInstance> {
        self.parts.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = PartId> + '_ {
        self.parts.keys().copied()
    }

    fn part(&self, id: PartId) -> Result<&PartInstance, AssemblyError> {
        self.parts.get(&id).ok_or(AssemblyError::UnknownPart(id))
    }

    pub fn point(&self, point: PointRef) -> Result<&AttachmentPoint, AssemblyError> {
        self.part(point.part)?
            .point(point.index)
            .ok_or(AssemblyError::UnknownPoint(point))
    }

    fn point_mut(&mut self, point: PointRef) -> Result<&mut AttachmentPoint, AssemblyError> {
        self.parts
            .get_mut(&point.part)
            .ok_or(AssemblyError::UnknownPart(point.part))?
            .points
            .get_mut(point.index)
            .ok_or(AssemblyError::UnknownPoint(point))
    }

    /// Point position in world space, recomputed from the owner's current position
    pub fn absolute_position(&self, point: PointRef) -> Result<Vector, AssemblyError> {
        let part = self.part(point.part)?;
        part.point_position(point.index)
            .ok_or(AssemblyError::UnknownPoint(point))
    }

    pub fn masters(&self) -> Vec<PartId> {
        self.iter()
            .filter(|part| part.is_master())
            .map(PartInstance::id)
            .collect()
    }

    /// The single master part
    pub fn master(&self) -> Result<PartId, AssemblyError> {
        match self.masters().as_slice() {
            [master] => Ok(*master),
            others => Err(AssemblyError::NoMasterPart {
                found: others.len(),
            }),
        }
    }

    /// Parts bonded directly beneath `id`, in the order of `id`'s points
    pub fn children(&self, id: PartId) -> Vec<PartId> {
        let Some(part) = self.get(id) else {
            return Vec::new();
        };

        part.points()
            .iter()
            .enumerate()
            .filter_map(|(index, point)| {
                let counterpart = point.counterpart()?;
                let child = self.get(counterpart.part)?;
                let hangs_here = child
                    .bond()
                    .is_some_and(|bond| bond.parent == PointRef::new(id, index));
                hangs_here.then_some(counterpart.part)
            })
            .collect()
    }

    /// `root` followed by everything bonded beneath it, depth first.
    ///
    /// Uses an explicit stack; children are visited in the order of their
    /// parent's points.
    pub fn subtree(&self, root: PartId) -> Vec<PartId> {
        let mut order = Vec::new();
        if !self.contains(root) {
            return order;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        order
    }

    /// Parts reachable from the master, in creation order
    pub fn active_parts(&self) -> Vec<PartId> {
        let reachable: HashSet<PartId> = self
            .masters()
            .into_iter()
            .flat_map(|master| self.subtree(master))
            .collect();

        self.ids().filter(|id| reachable.contains(id)).collect()
    }

    pub fn is_active(&self, id: PartId) -> bool {
        self.active_parts().contains(&id)
    }

    /// Bonds `child` (a point on the part being attached) to `parent`
    pub fn bind(&mut self, parent: PointRef, child: PointRef) -> Result<(), AssemblyError> {
        if parent.part == child.part {
            return Err(AssemblyError::SelfAttachment(child.part));
        }

        let child_part = self.part(child.part)?;
        if child_part.is_master() {
            return Err(AssemblyError::MasterCannotBond(child.part));
        }
        if child_part.bond().is_some() {
            return Err(AssemblyError::AlreadyBonded(child.part));
        }

        let parent_point = self.point(parent)?;
        let child_point = self.point(child)?;
        if parent_point.is_attached() {
            return Err(AssemblyError::PointOccupied(parent));
        }
        if child_point.is_attached() {
            return Err(AssemblyError::PointOccupied(child));
        }
        if !parent_point.direction().matches(child_point.direction()) {
            return Err(AssemblyError::IncompatibleDirections { parent, child });
        }

        self.point_mut(parent)?.counterpart = Some(child);
        self.point_mut(child)?.counterpart = Some(parent);
        if let Some(part) = self.parts.get_mut(&child.part) {
            part.bond = Some(Bond {
                parent,
                own_point: child.index,
            });
        }
        Ok(())
    }

    /// Detaches `child` from its parent, clearing both points
    pub fn unbind(&mut self, child: PartId) -> Option<Bond> {
        let bond = self.parts.get_mut(&child)?.bond.take()?;

        if let Ok(own) = self.point_mut(PointRef::new(child, bond.own_point)) {
            own.counterpart = None;
        }
        if let Ok(parent) = self.point_mut(bond.parent) {
            parent.counterpart = None;
        }
        Some(bond)
    }

    /// Removes a part.
    ///
    /// The part is detached from its parent and its direct children are
    /// detached from it. Those children and everything beneath them stay in
    /// the registry but are no longer reachable from the master.
    pub fn remove(&mut self, id: PartId) -> Option<PartInstance> {
        if !self.contains(id) {
            return None;
        }
        self.unbind(id);
        for child in self.children(id) {
            self.unbind(child);
        }
        self.parts.remove(&id)
    }

    /// Moves `root` to `position`, carrying its subtree along rigidly
    pub fn set_position(&mut self, root: PartId, position: Vector) -> Result<(), AssemblyError> {
        let delta = position - self.part(root)?.position();
        self.translate_subtree(root, delta);
        Ok(())
    }

    pub fn translate_subtree(&mut self, root: PartId, delta: Vector) {
        if delta == Vector::ZERO {
            return;
        }
        for id in self.subtree(root) {
            if let Some(part) = self.parts.get_mut(&id) {
                part.position += delta;
            }
        }
    }

    /// Independent copies of `root` and everything bonded beneath it.
    ///
    /// The copies are renumbered from zero in traversal order, carry fresh
    /// unattached points and share nothing mutable with this registry.
    pub fn clone_with_subtree(&self, root: PartId) -> Result<Vec<PartInstance>, AssemblyError> {
        self.part(root)?;
        Ok(self
            .subtree(root)
            .into_iter()
            .filter_map(|id| self.get(id))
            .enumerate()
            .map(|(index, part)| part.detached_copy(PartId(index as u32)))
            .collect())
    }

    /// Checks that every bond is recorded symmetrically
    pub fn verify_bonds(&self) -> Result<(), AssemblyError> {
        for part in self.iter() {
            for (index, point) in part.points().iter().enumerate() {
                let here = PointRef::new(part.id(), index);
                if let Some(counterpart) = point.counterpart() {
                    let back = self
                        .point(counterpart)
                        .map_err(|_| AssemblyError::AsymmetricBond(here))?;
                    if back.counterpart() != Some(here) {
                        return Err(AssemblyError::AsymmetricBond(here));
                    }
                }
            }

            if let Some(bond) = part.bond() {
                let own = PointRef::new(part.id(), bond.own_point);
                if self.point(own)?.counterpart() != Some(bond.parent) {
                    return Err(AssemblyError::AsymmetricBond(own));
                }
            }
        }
        Ok(())
    }
}
