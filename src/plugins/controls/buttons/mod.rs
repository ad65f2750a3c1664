mod back;
mod build;
mod launch;

pub use back::BackButton;
pub use build::BuildButton;
pub use launch::LaunchButton;
