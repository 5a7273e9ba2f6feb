use glam::{Affine3A, Vec3};
use slotmap::SlotMap;

use crate::rig::identity::Identifier;
use crate::scene::ObjectKey;
use crate::scene::access::SceneAccess;
use crate::scene::object::{ObjectKind, SceneObject};

/// In-memory object store
///
/// A flat, insertion-ordered set of named objects. It stands in for the host
/// application's scene and reproduces the host behaviors rigs have to cope
/// with:
///
/// - names are unique; a clashing name gets a `.001`, `.002`, ... suffix
/// - objects can be renamed or removed at any time
/// - duplicating an object copies its identifier tag along with everything
///   else, so the copy collides with the original until a rig heals it
#[derive(Debug, Default, Clone)]
pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
    order: Vec<ObjectKey>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Adds an object, renaming it if its name is already taken.
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectKey {
        object.name = self.unique_name(&object.name);
        let key = self.objects.insert(object);
        self.order.push(key);
        key
    }

    pub fn add_empty(&mut self, name: &str, position: Vec3) -> ObjectKey {
        self.add_object(SceneObject::empty(name).with_position(position))
    }

    pub fn add_camera(&mut self, name: &str) -> ObjectKey {
        self.add_object(SceneObject::camera(name))
    }

    /// Removes an object. Returns the removed data, or `None` for stale keys.
    pub fn remove_object(&mut self, key: ObjectKey) -> Option<SceneObject> {
        let object = self.objects.remove(key)?;
        self.order.retain(|&k| k != key);
        Some(object)
    }

    /// Renames an object and returns the name it actually received.
    pub fn rename(&mut self, key: ObjectKey, name: &str) -> Option<&str> {
        if !self.objects.contains_key(key) {
            return None;
        }
        let current = &self.objects[key].name;
        if current != name {
            let unique = self.unique_name(name);
            self.objects[key].name = unique;
        }
        Some(self.objects[key].name.as_str())
    }

    /// Copies an object, identifier tag included.
    pub fn duplicate_object(&mut self, key: ObjectKey) -> Option<ObjectKey> {
        let copy = self.objects.get(key)?.clone();
        Some(self.add_object(copy))
    }

    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.order.iter().map(move |&key| (key, &self.objects[key]))
    }

    fn is_name_taken(&self, name: &str) -> bool {
        self.objects.values().any(|object| object.name == name)
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.is_name_taken(name) {
            return name.to_string();
        }
        let base = strip_numeric_suffix(name);
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !self.is_name_taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

/// `"Cube.004"` -> `"Cube"`. Names without a three-digit suffix are returned as-is.
fn strip_numeric_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, digits))
            if !base.is_empty() && digits.len() == 3 && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => name,
    }
}

impl SceneAccess for Scene {
    type Handle = ObjectKey;

    fn find_object_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.iter().find(|(_, object)| object.name == name).map(|(key, _)| key)
    }

    fn find_objects_by_identifier(&self, id: Identifier) -> Vec<ObjectKey> {
        self.iter()
            .filter(|(_, object)| object.identifier == id)
            .map(|(key, _)| key)
            .collect()
    }

    fn trackable_objects(&self) -> Vec<ObjectKey> {
        self.order.clone()
    }

    fn cameras(&self) -> Vec<ObjectKey> {
        self.iter()
            .filter(|(_, object)| object.is_camera())
            .map(|(key, _)| key)
            .collect()
    }

    fn object_name(&self, handle: ObjectKey) -> Option<&str> {
        self.objects.get(handle).map(|object| object.name.as_str())
    }

    fn identifier_tag(&self, handle: ObjectKey) -> Identifier {
        self.objects.get(handle).map_or(0, |object| object.identifier)
    }

    fn set_identifier_tag(&mut self, handle: ObjectKey, id: Identifier) {
        if let Some(object) = self.objects.get_mut(handle) {
            object.identifier = id;
        }
    }

    fn world_transform(&self, handle: ObjectKey) -> Option<Affine3A> {
        self.objects.get(handle).map(|object| object.transform.matrix())
    }

    fn bounding_box_corners(&self, handle: ObjectKey) -> Option<[Vec3; 8]> {
        self.objects.get(handle).map(|object| object.bounds().corners())
    }

    fn set_world_transform(&mut self, handle: ObjectKey, transform: Affine3A) {
        if let Some(object) = self.objects.get_mut(handle) {
            object.transform.apply_matrix(transform);
        }
    }

    fn set_focus_distance(&mut self, handle: ObjectKey, distance: f32) {
        if let Some(object) = self.objects.get_mut(handle)
            && let ObjectKind::Camera { focus_distance } = &mut object.kind
        {
            *focus_distance = distance;
        }
    }

    fn contains(&self, handle: ObjectKey) -> bool {
        self.objects.contains_key(handle)
    }
}
