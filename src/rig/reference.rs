//! Durable references to scene objects
//!
//! A [`TargetRef`] remembers both the name and the identifier tag of the
//! object it points at. Lookups prefer the name; reconciliation trusts the
//! identifier and rewrites the stored name to follow renames made outside
//! the rig.

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::rig::identity::{self, Identifier, UNASSIGNED, UNRESOLVED};
use crate::scene::SceneAccess;

/// A (name, identifier) pair pointing at a scene object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub name: String,
    pub identifier: Identifier,
}

impl TargetRef {
    #[must_use]
    pub fn new(name: impl Into<String>, identifier: Identifier) -> Self {
        Self {
            name: name.into(),
            identifier,
        }
    }

    /// The state a reference is left in once its object is gone.
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            name: String::new(),
            identifier: UNRESOLVED,
        }
    }

    /// Builds a reference from an object's current name and tag.
    #[must_use]
    pub fn from_object<S: SceneAccess + ?Sized>(scene: &S, handle: S::Handle) -> Option<Self> {
        let name = scene.object_name(handle)?;
        Some(Self::new(name, scene.identifier_tag(handle)))
    }

    #[inline]
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.identifier == UNRESOLVED
    }

    /// Finds the referenced object.
    ///
    /// An object carrying the stored name wins; otherwise the first object
    /// carrying the stored identifier is returned.
    #[must_use]
    pub fn resolve<S: SceneAccess + ?Sized>(&self, scene: &S) -> Option<S::Handle> {
        if self.is_unresolved() {
            return None;
        }
        if !self.name.is_empty()
            && let Some(handle) = scene.find_object_by_name(&self.name)
        {
            return Some(handle);
        }
        if self.identifier == UNASSIGNED {
            return None;
        }
        scene.find_objects_by_identifier(self.identifier).into_iter().next()
    }

    /// Re-binds the reference against the current scene.
    ///
    /// - no object carries the identifier: the reference becomes unresolved
    /// - one object carries it: name and identifier snap to that object
    /// - several objects carry it: the one still named like the reference
    ///   (or the first one, if none is) keeps the identifier, every other
    ///   holder is given a fresh one
    ///
    /// A reference restored without an identifier binds by name once and
    /// stamps the object with a new identifier.
    ///
    /// Returns the object the reference is bound to afterwards.
    pub fn reconcile<S, R>(&mut self, scene: &mut S, rng: &mut R) -> Option<S::Handle>
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        if self.identifier == UNASSIGNED {
            return match scene.find_object_by_name(&self.name) {
                Some(handle) => {
                    let id = identity::ensure_identifier(scene, handle, rng);
                    self.identifier = id;
                    Some(handle)
                }
                None => {
                    self.mark_unresolved();
                    None
                }
            };
        }

        let holders = if self.is_unresolved() {
            Vec::new()
        } else {
            scene.find_objects_by_identifier(self.identifier)
        };

        let canonical = match holders.as_slice() {
            [] => {
                self.mark_unresolved();
                return None;
            }
            [only] => *only,
            [first, ..] => {
                let canonical = holders
                    .iter()
                    .copied()
                    .find(|&handle| scene.object_name(handle) == Some(self.name.as_str()))
                    .unwrap_or(*first);

                log::debug!(
                    "Identifier {} shared by {} objects, keeping {canonical:?}",
                    self.identifier,
                    holders.len()
                );
                for &other in holders.iter().filter(|&&handle| handle != canonical) {
                    identity::reassign_identifier(scene, other, rng);
                }
                canonical
            }
        };

        self.snap_to(&*scene, canonical);
        Some(canonical)
    }

    fn snap_to<S: SceneAccess + ?Sized>(&mut self, scene: &S, handle: S::Handle) {
        if let Some(name) = scene.object_name(handle)
            && name != self.name
        {
            log::debug!("Target renamed: '{}' -> '{name}'", self.name);
            self.name = name.to_string();
        }
        self.identifier = scene.identifier_tag(handle);
    }

    fn mark_unresolved(&mut self) {
        if !self.is_unresolved() {
            log::debug!("Target '{}' ({}) no longer resolves", self.name, self.identifier);
        }
        *self = Self::unresolved();
    }
}

impl Default for TargetRef {
    fn default() -> Self {
        Self::unresolved()
    }
}
