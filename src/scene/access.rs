use std::fmt::Debug;
use std::hash::Hash;

use glam::{Affine3A, Vec3};

use crate::rig::identity::Identifier;

/// The view of the host scene that camera rigs are allowed to see.
///
/// Rigs never own scene objects. Everything they need (lookups, transforms,
/// bounds, the identifier tag) goes through this trait, and everything they
/// produce (the camera pose) is written back through it.
///
/// Enumeration order of [`trackable_objects`](Self::trackable_objects) and
/// [`find_objects_by_identifier`](Self::find_objects_by_identifier) is treated
/// as significant: when several objects compete for one identifier the first
/// one wins ties.
pub trait SceneAccess {
    /// Opaque, copyable handle to a live object.
    type Handle: Copy + Eq + Hash + Debug;

    /// Returns the object currently carrying `name`, if any.
    fn find_object_by_name(&self, name: &str) -> Option<Self::Handle>;

    /// Returns every live object whose identifier tag equals `id`.
    fn find_objects_by_identifier(&self, id: Identifier) -> Vec<Self::Handle>;

    /// Returns every object that can be used as a target.
    fn trackable_objects(&self) -> Vec<Self::Handle>;

    /// Returns every camera object; each one owns exactly one rig.
    fn cameras(&self) -> Vec<Self::Handle>;

    fn object_name(&self, handle: Self::Handle) -> Option<&str>;

    /// Reads the identifier tag. Unassigned tags read as `0`.
    fn identifier_tag(&self, handle: Self::Handle) -> Identifier;

    fn set_identifier_tag(&mut self, handle: Self::Handle, id: Identifier);

    fn world_transform(&self, handle: Self::Handle) -> Option<Affine3A>;

    /// The 8 corners of the object's local-space axis-aligned bounds.
    fn bounding_box_corners(&self, handle: Self::Handle) -> Option<[Vec3; 8]>;

    fn set_world_transform(&mut self, handle: Self::Handle, transform: Affine3A);

    fn set_focus_distance(&mut self, handle: Self::Handle, distance: f32);

    /// Returns `true` while the handle refers to a live object.
    fn contains(&self, handle: Self::Handle) -> bool {
        self.object_name(handle).is_some()
    }
}
