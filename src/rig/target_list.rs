//! Ordered target list
//!
//! Slots carry an explicit `index` that defines traversal order. Between
//! healing passes indices may be sparse; [`TargetList::heal_and_normalize`]
//! drops dead slots and renumbers the survivors to `0..N-1`, keeping their
//! relative order.

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::errors::{MocamError, Result};
use crate::rig::identity;
use crate::rig::reference::TargetRef;
use crate::scene::SceneAccess;

/// One entry of a rig's target list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSlot {
    pub target: TargetRef,
    pub index: usize,
}

/// An ordered, self-healing sequence of [`TargetSlot`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetList {
    slots: Vec<TargetSlot>,
}

impl TargetList {
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Wraps previously persisted slots. Indices are normalized on the next heal.
    #[must_use]
    pub fn from_slots(slots: Vec<TargetSlot>) -> Self {
        Self { slots }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[TargetSlot] {
        &self.slots
    }

    /// Appends `handle` at the end of the list, tagging it with an identifier
    /// if it has none yet. Returns the new slot's index.
    pub fn add<S, R>(&mut self, scene: &mut S, handle: S::Handle, rng: &mut R) -> Result<usize>
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        if !scene.contains(handle) {
            return Err(MocamError::UnresolvedObject(format!("{handle:?}")));
        }
        let id = identity::ensure_identifier(scene, handle, rng);
        // A copy made by the host still shares its source's tag. Slots already
        // bound to that tag pick their holder first.
        for slot in self.slots.iter_mut().filter(|slot| slot.target.identifier == id) {
            slot.target.reconcile(scene, rng);
        }
        if scene.find_objects_by_identifier(scene.identifier_tag(handle)).len() > 1 {
            identity::reassign_identifier(scene, handle, rng);
        }
        let target = TargetRef::from_object(&*scene, handle)
            .ok_or_else(|| MocamError::UnresolvedObject(format!("{handle:?}")))?;

        let index = self.slots.len();
        self.slots.push(TargetSlot { target, index });
        Ok(index)
    }

    /// Reconciles every reference, drops the ones that no longer resolve and
    /// renumbers the rest densely.
    ///
    /// Returns the number of slots that were dropped.
    pub fn heal_and_normalize<S, R>(&mut self, scene: &mut S, rng: &mut R) -> usize
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        for slot in &mut self.slots {
            slot.target.reconcile(scene, rng);
        }

        let before = self.slots.len();
        self.slots.retain(|slot| !slot.target.is_unresolved());
        let pruned = before - self.slots.len();
        if pruned > 0 {
            log::debug!("Pruned {pruned} unresolved target(s)");
        }

        self.renumber();
        pruned
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TargetSlot> {
        self.slots.iter().find(|slot| slot.index == index)
    }

    /// Removes the slot at `index` and closes the gap.
    pub fn remove(&mut self, index: usize) -> Result<TargetSlot> {
        let position = self.position_of(index, "remove target")?;
        let slot = self.slots.remove(position);
        self.renumber();
        Ok(slot)
    }

    /// Exchanges the positions of two slots.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let pa = self.position_of(a, "swap target")?;
        let pb = self.position_of(b, "swap target")?;
        if pa == pb {
            return Ok(());
        }
        self.slots[pa].index = b;
        self.slots[pb].index = a;
        self.slots.swap(pa, pb);
        Ok(())
    }

    /// Live objects of every slot, in index order.
    #[must_use]
    pub fn resolved_targets<S: SceneAccess + ?Sized>(&self, scene: &S) -> Vec<(S::Handle, usize)> {
        let mut ordered: Vec<&TargetSlot> = self.slots.iter().collect();
        ordered.sort_by_key(|slot| slot.index);
        ordered
            .into_iter()
            .filter_map(|slot| slot.target.resolve(scene).map(|handle| (handle, slot.index)))
            .collect()
    }

    fn position_of(&self, index: usize, context: &'static str) -> Result<usize> {
        self.slots
            .iter()
            .position(|slot| slot.index == index)
            .ok_or(MocamError::InvalidIndex {
                context,
                index,
                len: self.slots.len(),
            })
    }

    fn renumber(&mut self) {
        self.slots.sort_by_key(|slot| slot.index);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.index = i;
        }
    }
}
