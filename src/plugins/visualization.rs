//! Visualization plugin - Self-contained plugin pattern
//!
//! This plugin draws the snap points revealed by a drag as gizmo circles:
//! red where a point is bonded, yellow where it is free.

use crate::prelude::*;
use bevy::color::palettes::css;

const SNAP_POINT_RADIUS: f32 = 4.0;

/// Plugin that shows snap points while a part is being dragged
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            draw_snap_points.run_if(in_state(AppState::Building).and(snap_points_enabled)),
        );
    }
}

fn snap_points_enabled(config: Res<LiftoffConfig>) -> bool {
    config.ui.show_snap_points
}

/// Snap point markers for the revealed parts as `(position, attached)`
pub fn revealed_snap_points(registry: &PartRegistry, drag: &DragContext) -> Vec<(Vector, bool)> {
    drag.revealed()
        .iter()
        .filter_map(|&id| registry.get(id))
        .flat_map(|part| {
            part.points()
                .iter()
                .map(move |point| (point.absolute_position(part.position()), point.is_attached()))
        })
        .collect()
}

fn draw_snap_points(mut gizmos: Gizmos, registry: Res<PartRegistry>, drag: Res<DragContext>) {
    for (position, attached) in revealed_snap_points(&registry, &drag) {
        let color = if attached { css::RED } else { css::YELLOW };
        gizmos.circle_2d(position, SNAP_POINT_RADIUS, color);
    }
}
