//! Object identifiers
//!
//! Every object a rig targets carries a small integer tag. Names can change
//! behind the rig's back; the tag does not, which is what lets a target
//! survive a rename.
//!
//! Identifiers are drawn at random rather than from a counter so that tags
//! written by independent sessions into one scene are unlikely to collide.
//! The random source is always passed in, so tests can seed it.

use std::ops::RangeInclusive;

use rand::RngExt;

use crate::scene::SceneAccess;

pub type Identifier = i64;

/// Tag value of an object no rig has targeted yet.
pub const UNASSIGNED: Identifier = 0;

/// Identifier stored in a reference that no longer matches any object.
pub const UNRESOLVED: Identifier = -1;

/// Range identifiers are drawn from. Never contains [`UNASSIGNED`] or [`UNRESOLVED`].
pub const IDENTIFIER_RANGE: RangeInclusive<Identifier> = 1..=1_000_000;

const MAX_DRAWS: usize = 16;

/// Draws an identifier that no live object currently carries.
///
/// After `MAX_DRAWS` clashing draws the last one is returned anyway; the
/// next reconciliation pass splits any collision that results.
pub fn fresh_identifier<S, R>(scene: &S, rng: &mut R) -> Identifier
where
    S: SceneAccess + ?Sized,
    R: RngExt,
{
    let mut id = rng.random_range(IDENTIFIER_RANGE);
    for _ in 1..MAX_DRAWS {
        if scene.find_objects_by_identifier(id).is_empty() {
            break;
        }
        id = rng.random_range(IDENTIFIER_RANGE);
    }
    id
}

/// Returns the object's identifier, assigning a fresh one if it has none.
pub fn ensure_identifier<S, R>(scene: &mut S, handle: S::Handle, rng: &mut R) -> Identifier
where
    S: SceneAccess + ?Sized,
    R: RngExt,
{
    let current = scene.identifier_tag(handle);
    if current != UNASSIGNED {
        return current;
    }
    let id = fresh_identifier(&*scene, rng);
    scene.set_identifier_tag(handle, id);
    log::debug!("Assigned identifier {id} to {handle:?}");
    id
}

/// Gives `handle` a new identifier unconditionally.
///
/// Used to split objects that share one identifier after a duplication.
pub fn reassign_identifier<S, R>(scene: &mut S, handle: S::Handle, rng: &mut R) -> Identifier
where
    S: SceneAccess + ?Sized,
    R: RngExt,
{
    let old = scene.identifier_tag(handle);
    let id = fresh_identifier(&*scene, rng);
    scene.set_identifier_tag(handle, id);
    log::debug!("Reassigned identifier of {handle:?}: {old} -> {id}");
    id
}
