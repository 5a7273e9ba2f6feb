//! Scene collaborator
//!
//! Rigs read and write the host scene only through [`SceneAccess`]:
//! - [`SceneAccess`]: object lookup, transforms, bounds and identifier tags
//! - [`Scene`]: an in-memory implementation backed by a slot map
//! - [`SceneObject`]: a named object with a [`Transform`] and optional bounds
//! - [`BoundingBox`]: local-space axis-aligned bounds

pub mod access;
pub mod geometry;
pub mod object;
pub mod scene;
pub mod transform;

pub use access::SceneAccess;
pub use geometry::BoundingBox;
pub use object::{ObjectKind, SceneObject};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectKey;
}
