//! Pointer driven dragging on the assembly screen

use super::{BuildLayout, MenuParts};
use crate::assembly::{AssemblyError, DropOutcome};
use crate::prelude::*;

pub(super) fn handle_pointer_events(
    mut pointer_events: EventReader<PointerEvent>,
    catalog: Res<PartCatalog>,
    menu: Res<MenuParts>,
    resolver: Res<AttachmentResolver>,
    layout: Res<BuildLayout>,
    mut registry: ResMut<PartRegistry>,
    mut drag: ResMut<DragContext>,
) {
    for event in pointer_events.read() {
        let result = match *event {
            PointerEvent::Down(position) => {
                pick_up(position, &catalog, &menu, &resolver, &layout, &mut registry, &mut drag)
            }
            PointerEvent::Moved(position) => {
                drag_part(position, &resolver, &layout, &mut registry, &drag)
            }
            PointerEvent::Up(_) => {
                drop_part(&resolver, &layout, &mut registry, &mut drag);
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!("Ignoring {:?}: {}", event, e);
        }
    }
}

/// Starts a drag on a fresh copy of a menu part or on a placed part under
/// the pointer
fn pick_up(
    position: Vector,
    catalog: &PartCatalog,
    menu: &MenuParts,
    resolver: &AttachmentResolver,
    layout: &BuildLayout,
    registry: &mut PartRegistry,
    drag: &mut DragContext,
) -> Result<(), AssemblyError> {
    if drag.dragged().is_some() {
        return Ok(());
    }

    let part = if let Some(prototype) = menu.prototype_at(catalog, position) {
        let id = registry.clone_part(prototype);
        debug!("Took part {id} ({}) from the menu", prototype.kind().label());
        id
    } else if let Some(id) = part_at(registry, position) {
        id
    } else {
        return Ok(());
    };

    resolver.begin_drag(drag, registry, part)?;
    drag_part(position, resolver, layout, registry, drag)
}

fn drag_part(
    position: Vector,
    resolver: &AttachmentResolver,
    layout: &BuildLayout,
    registry: &mut PartRegistry,
    drag: &DragContext,
) -> Result<(), AssemblyError> {
    let outcome = resolver.drag_to(drag, registry, position)?;
    trace!("Drag to {position}: {outcome:?}");

    let Some(dragged) = drag.dragged() else {
        return Ok(());
    };

    let master = registry
        .get(dragged)
        .filter(|part| part.is_master())
        .map(|part| (part.position(), part.kind().size()));
    if let Some((current, size)) = master {
        let clamped = layout.master_bounds(size).clamp(current);
        if clamped != current {
            registry.set_position(dragged, clamped)?;
        }
    }

    Ok(())
}

fn drop_part(
    resolver: &AttachmentResolver,
    layout: &BuildLayout,
    registry: &mut PartRegistry,
    drag: &mut DragContext,
) {
    match resolver.end_drag(drag, registry, &layout.menu) {
        DropOutcome::Deleted(id) => info!("Removed part {id}"),
        DropOutcome::Placed(id) => debug!("Placed part {id}"),
        DropOutcome::Nothing => {}
    }
}

/// The earliest created part containing `position`, so overlapping parts
/// are picked in creation order
fn part_at(registry: &PartRegistry, position: Vector) -> Option<PartId> {
    registry
        .iter()
        .find(|part| part.contains(position))
        .map(|part| part.id())
}

/// Drops whatever is held when leaving the builder
pub(super) fn cancel_drag(
    resolver: Res<AttachmentResolver>,
    layout: Res<BuildLayout>,
    mut registry: ResMut<PartRegistry>,
    mut drag: ResMut<DragContext>,
) {
    if drag.dragged().is_some() {
        drop_part(&resolver, &layout, &mut registry, &mut drag);
    }
}
