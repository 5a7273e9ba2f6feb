use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform component
///
/// Position, rotation and scale (TRS) of a scene object. Objects in the
/// in-memory scene have no hierarchy, so the composed matrix is also the
/// world matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Overwrites position/rotation/scale by decomposing `mat`.
    ///
    /// Shear, if present, is lost in the decomposition.
    pub fn apply_matrix(&mut self, mat: Affine3A) {
        let (scale, rotation, translation) = mat.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.position = translation;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
