//! Axis-aligned rectangles in scene coordinates

use super::math::Vector;

/// Axis-aligned rectangle used for part extents, hit tests and the menu region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2d {
    pub min: Vector,
    pub max: Vector,
}

impl Aabb2d {
    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vector, size: Vector) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Smallest box enclosing every box in the iterator, `None` when empty
    pub fn enclosing(boxes: impl IntoIterator<Item = Aabb2d>) -> Option<Self> {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }

    #[inline]
    pub fn center(&self) -> Vector {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn union(&self, other: &Aabb2d) -> Aabb2d {
        Aabb2d::new(self.min.min(other.min), self.max.max(other.max))
    }

    #[inline]
    pub fn contains(&self, point: Vector) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb2d) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Corners in counter-clockwise order starting at `min`
    pub fn corners(&self) -> [Vector; 4] {
        [
            self.min,
            Vector::new(self.max.x, self.min.y),
            self.max,
            Vector::new(self.min.x, self.max.y),
        ]
    }

    /// Clamps `point` so it lies inside the box
    pub fn clamp(&self, point: Vector) -> Vector {
        point.clamp(self.min, self.max)
    }
}
