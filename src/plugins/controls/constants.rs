//! Shared styling constants for controls UI
//!
//! Sizes come from [`crate::config::UiConfig`]; these are the colors every
//! control button shares.

use bevy::prelude::Color;

pub const BUTTON_COLOR_NORMAL: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);
pub const BUTTON_COLOR_HOVERED: Color = Color::srgba(1.0, 1.0, 1.0, 0.18);
pub const BUTTON_COLOR_PRESSED: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);
