//! Numeric types shared by the assembly engine

/// Scalar type for part geometry and flight values
pub type Scalar = f32;

/// 2D vector type for positions, offsets and forces
pub type Vector = bevy::math::Vec2;
