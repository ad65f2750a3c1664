//! Altitude readouts and fuel bar shown during a flight

use super::{LaunchedRocket, rocket_altitude};
use crate::assembly::{AltitudeTracker, FlightState, format_altitude};
use crate::prelude::*;

const HUD_MARGIN_PX: f32 = 8.0;
const FUEL_BAR_WIDTH_PX: f32 = 120.0;
const FUEL_BAR_HEIGHT_PX: f32 = 10.0;
const FUEL_BAR_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
const FUEL_BAR_FILL: Color = Color::srgb(0.9, 0.45, 0.2);
const RECORD_COLOR: Color = Color::srgb(1.0, 0.2, 0.2);

#[derive(Component, Debug, Default)]
pub struct AltitudeLabel;

#[derive(Component, Debug, Default)]
pub struct MaxAltitudeLabel;

#[derive(Component, Debug, Default)]
pub struct FuelBarFill;

pub(super) fn spawn_flight_hud(mut commands: Commands, config: Res<LiftoffConfig>) {
    let font = TextFont::from_font_size(config.ui.font_size);

    commands
        .spawn((
            Name::new("Flight HUD"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(HUD_MARGIN_PX),
                right: Val::Px(HUD_MARGIN_PX),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexEnd,
                row_gap: Val::Px(config.ui.button_gap),
                ..default()
            },
            StateScoped(AppState::Launching),
        ))
        .with_children(|parent| {
            parent.spawn((
                AltitudeLabel,
                Text::new(format_altitude(0)),
                font.clone(),
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                MaxAltitudeLabel,
                Text::new(format!("MAX {}", format_altitude(0))),
                font,
                TextColor(Color::WHITE),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(FUEL_BAR_WIDTH_PX),
                        height: Val::Px(FUEL_BAR_HEIGHT_PX),
                        ..default()
                    },
                    BackgroundColor(FUEL_BAR_BACKGROUND),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        FuelBarFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(FUEL_BAR_FILL),
                    ));
                });
        });
}

#[allow(clippy::type_complexity)]
pub(super) fn update_flight_hud(
    rockets: Query<(&Position, &LaunchedRocket, &FlightState, &AltitudeTracker)>,
    mut altitude_labels: Query<&mut Text, (With<AltitudeLabel>, Without<MaxAltitudeLabel>)>,
    mut max_labels: Query<(&mut Text, &mut TextColor), (With<MaxAltitudeLabel>, Without<AltitudeLabel>)>,
    mut fuel_bars: Query<&mut Node, With<FuelBarFill>>,
) {
    let Some((position, rocket, state, tracker)) = rockets.iter().next() else {
        return;
    };

    let altitude = format_altitude(rocket_altitude(position.0, rocket));
    for mut text in &mut altitude_labels {
        text.0.clone_from(&altitude);
    }

    let max = format!("MAX {}", format_altitude(tracker.max()));
    let color = if tracker.is_highlighted() {
        RECORD_COLOR
    } else {
        Color::WHITE
    };
    for (mut text, mut text_color) in &mut max_labels {
        text.0.clone_from(&max);
        text_color.0 = color;
    }

    for mut node in &mut fuel_bars {
        node.width = Val::Percent(state.fuel_fraction() * 100.0);
    }
}
