pub mod builder;
pub mod camera;
pub mod controls;
pub mod intro;
pub mod launch;
pub mod scenery;
pub mod visualization;
