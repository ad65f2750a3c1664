//! Centralized event definitions
//!
//! Input is translated into these events by the controls plugin so the
//! builder and launch plugins never look at raw mouse, touch or keyboard
//! state.

use crate::assembly::Vector;
use bevy::prelude::*;

/// Commands triggered by buttons or keyboard shortcuts
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RocketCommand {
    /// Leave the title screen for the builder
    Build,
    /// Compile and launch while building, ignite the engines while flying
    Launch,
    /// One screen back: flight to builder, builder to title, title quits
    Back,
    Quit,
}

/// The first pointer (mouse button or touch) in scene coordinates
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vector),
    Moved(Vector),
    Up(Vector),
}

impl PointerEvent {
    pub fn position(&self) -> Vector {
        match *self {
            PointerEvent::Down(position)
            | PointerEvent::Moved(position)
            | PointerEvent::Up(position) => position,
        }
    }
}

/// Drops commands left over from the previous screen so a single LAUNCH or
/// BACK press is not handled again after the state change
pub fn clear_stale_commands(mut events: ResMut<Events<RocketCommand>>) {
    events.clear();
}
