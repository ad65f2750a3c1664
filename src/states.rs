use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Title screen with the BUILD button
    #[default]
    Intro,
    /// Assembling a rocket from parts
    Building,
    /// Flying the compiled rocket
    Launching,
}
