use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of an object in its local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// A cube of edge length `size` centered on the origin.
    #[must_use]
    pub fn cube(size: f32) -> Self {
        let half = Vec3::splat(size * 0.5);
        Self::new(-half, half)
    }

    /// A degenerate box at the origin, used for objects without geometry.
    #[must_use]
    pub fn point() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::point()
    }
}

/// Average of a set of corner points.
///
/// Returns `Vec3::ZERO` for an empty slice.
#[must_use]
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}
