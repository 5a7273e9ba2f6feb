use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::rig::identity::{Identifier, UNASSIGNED};
use crate::scene::geometry::BoundingBox;
use crate::scene::transform::Transform;

/// Default focus distance of a freshly created camera.
pub const DEFAULT_CAMERA_FOCUS: f32 = 10.0;

/// What an object is, as far as rigs care.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Transform only, no geometry.
    Empty,
    /// Geometry with local-space bounds.
    Mesh { bounds: BoundingBox },
    /// A camera; each camera carries its own rig.
    Camera { focus_distance: f32 },
}

/// An object stored in the in-memory [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    /// Identifier tag used by rigs to follow the object across renames.
    /// `0` until a rig first targets it.
    pub identifier: Identifier,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::new(),
            identifier: UNASSIGNED,
        }
    }

    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Empty)
    }

    #[must_use]
    pub fn mesh(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self::new(name, ObjectKind::Mesh { bounds })
    }

    #[must_use]
    pub fn camera(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ObjectKind::Camera {
                focus_distance: DEFAULT_CAMERA_FOCUS,
            },
        )
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_camera(&self) -> bool {
        matches!(self.kind, ObjectKind::Camera { .. })
    }

    /// Local-space bounds. Objects without geometry report a point box.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        match self.kind {
            ObjectKind::Mesh { bounds } => bounds,
            ObjectKind::Empty | ObjectKind::Camera { .. } => BoundingBox::point(),
        }
    }

    #[must_use]
    pub fn focus_distance(&self) -> Option<f32> {
        match self.kind {
            ObjectKind::Camera { focus_distance } => Some(focus_distance),
            _ => None,
        }
    }
}
