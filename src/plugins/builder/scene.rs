//! Menu and part sprites of the assembly screen

use super::BuildLayout;
use crate::assembly::PartCategory;
use crate::prelude::*;
use std::collections::HashSet;

const MENU_Z: f32 = 0.0;
const MENU_ICON_Z: f32 = 1.0;
const PART_Z: f32 = 2.0;
const DRAGGED_PART_Z: f32 = 10.0;

const MENU_BACKGROUND: Color = Color::srgb(0.12, 0.13, 0.18);
const MENU_LABEL_OFFSET: f32 = 12.0;

pub(super) const INSTRUCTIONS: &str = "Build your own rocket and see how high it flies!";
/// Centered over the build area, just below the top edge
const INSTRUCTIONS_OFFSET: Vec2 = Vec2::new(100.0, -20.0);
const INSTRUCTIONS_FONT_SIZE: f32 = 14.0;

/// Sprite mirroring one entry of the part registry
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartSprite(pub PartId);

#[derive(Component, Debug, Default)]
pub struct MenuIcon;

pub fn part_color(category: PartCategory) -> Color {
    match category {
        PartCategory::Capsule => Color::srgb(0.85, 0.85, 0.9),
        PartCategory::Fuel => Color::srgb(0.9, 0.45, 0.2),
        PartCategory::Engine => Color::srgb(0.45, 0.45, 0.5),
        PartCategory::EngineBig => Color::srgb(0.3, 0.3, 0.35),
    }
}

pub(super) fn spawn_menu(
    mut commands: Commands,
    catalog: Res<PartCatalog>,
    layout: Res<BuildLayout>,
    config: Res<LiftoffConfig>,
) {
    commands.spawn((
        Name::new("Parts Menu"),
        Sprite::from_color(MENU_BACKGROUND, layout.menu.size()),
        Transform::from_translation(layout.menu.center().extend(MENU_Z)),
        StateScoped(AppState::Building),
    ));

    let scene_top_center = Vector::new(layout.scene.center().x, layout.scene.max.y);
    commands.spawn((
        Name::new("Instructions"),
        Text2d::new(INSTRUCTIONS),
        TextFont::from_font_size(INSTRUCTIONS_FONT_SIZE),
        TextColor(Color::WHITE),
        Transform::from_translation((scene_top_center + INSTRUCTIONS_OFFSET).extend(MENU_ICON_Z)),
        StateScoped(AppState::Building),
    ));

    for slot in catalog.menu() {
        let extent = slot.extent();
        commands.spawn((
            Name::new(format!("Menu {}", slot.kind.label())),
            MenuIcon,
            Sprite::from_color(part_color(slot.kind.category()), extent.size()),
            Transform::from_translation(slot.position.extend(MENU_ICON_Z)),
            StateScoped(AppState::Building),
        ));

        let label_position = Vector::new(
            slot.position.x,
            extent.min.y - MENU_LABEL_OFFSET,
        );
        commands.spawn((
            Text2d::new(slot.kind.label()),
            TextFont::from_font_size(config.ui.font_size),
            TextColor(Color::WHITE),
            Transform::from_translation(label_position.extend(MENU_ICON_Z)),
            StateScoped(AppState::Building),
        ));
    }
}

/// Spawns, moves and despawns part sprites to match the registry
pub(super) fn sync_part_sprites(
    mut commands: Commands,
    registry: Res<PartRegistry>,
    drag: Res<DragContext>,
    config: Res<LiftoffConfig>,
    mut sprites: Query<(Entity, &PartSprite, &mut Transform, &mut Sprite)>,
) {
    let mut synced = HashSet::new();

    for (entity, part_sprite, mut transform, mut sprite) in &mut sprites {
        let Some(part) = registry.get(part_sprite.0) else {
            commands.entity(entity).despawn();
            continue;
        };

        let dragged = drag.dragged() == Some(part.id());
        transform.translation = part.position().extend(part_z(part.id(), dragged));
        sprite.color = part_color(part.kind().category()).with_alpha(if dragged {
            config.assembly.drag_alpha
        } else {
            1.0
        });
        synced.insert(part.id());
    }

    for part in registry.iter().filter(|part| !synced.contains(&part.id())) {
        let dragged = drag.dragged() == Some(part.id());
        commands.spawn((
            Name::new(format!("Part {} ({})", part.id(), part.kind().label())),
            PartSprite(part.id()),
            Sprite::from_color(part_color(part.kind().category()), part.kind().size()),
            Transform::from_translation(part.position().extend(part_z(part.id(), dragged))),
            StateScoped(AppState::Building),
        ));
    }
}

/// Later parts draw on top, the dragged one above everything
fn part_z(id: PartId, dragged: bool) -> f32 {
    if dragged {
        DRAGGED_PART_Z
    } else {
        PART_Z + id.index() as f32 * 0.001
    }
}
