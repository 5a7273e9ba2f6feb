//! Target Reference Tests
//!
//! Tests for:
//! - Identifier assignment on first use
//! - Resolution by name and by identifier
//! - Reconciliation after renames, deletions and duplications

use glam::Vec3;
use mocam::rig::identity::{self, UNASSIGNED, UNRESOLVED};
use mocam::rig::TargetRef;
use mocam::scene::{Scene, SceneAccess};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

fn tagged_ref(scene: &mut Scene, rng: &mut StdRng, name: &str) -> (mocam::ObjectKey, TargetRef) {
    let key = scene.add_empty(name, Vec3::ZERO);
    identity::ensure_identifier(scene, key, rng);
    let target = TargetRef::from_object(&*scene, key).unwrap();
    (key, target)
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn new_objects_are_unassigned() {
    let mut scene = Scene::new();
    let key = scene.add_empty("A", Vec3::ZERO);
    assert_eq!(scene.identifier_tag(key), UNASSIGNED);
}

#[test]
fn ensure_identifier_assigns_distinct_ids() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let keys: Vec<_> = (0..50)
        .map(|i| scene.add_empty(&format!("Obj{i}"), Vec3::ZERO))
        .collect();

    for &key in &keys {
        identity::ensure_identifier(&mut scene, key, &mut rng);
    }

    let mut ids: Vec<_> = keys.iter().map(|&k| scene.identifier_tag(k)).collect();
    assert!(ids.iter().all(|&id| id > 0));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), keys.len());
}

// ============================================================================
// Resolve
// ============================================================================

#[test]
fn resolve_prefers_name() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (key, target) = tagged_ref(&mut scene, &mut rng, "Cube");

    assert_eq!(target.resolve(&scene), Some(key));
}

#[test]
fn resolve_falls_back_to_identifier() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (key, target) = tagged_ref(&mut scene, &mut rng, "Cube");

    scene.rename(key, "Box");

    assert_eq!(target.resolve(&scene), Some(key));
}

#[test]
fn resolve_unresolved_is_none() {
    let mut scene = Scene::new();
    scene.add_empty("", Vec3::ZERO);
    assert_eq!(TargetRef::unresolved().resolve(&scene), None);
}

// ============================================================================
// Reconcile
// ============================================================================

#[test]
fn reconcile_follows_rename() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (key, mut target) = tagged_ref(&mut scene, &mut rng, "Cube");
    let id = target.identifier;

    scene.rename(key, "Renamed");
    let bound = target.reconcile(&mut scene, &mut rng);

    assert_eq!(bound, Some(key));
    assert_eq!(target.name, "Renamed");
    assert_eq!(target.identifier, id);
}

#[test]
fn reconcile_deleted_object_becomes_unresolved() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (key, mut target) = tagged_ref(&mut scene, &mut rng, "Cube");

    scene.remove_object(key);
    let bound = target.reconcile(&mut scene, &mut rng);

    assert_eq!(bound, None);
    assert!(target.is_unresolved());
    assert_eq!(target.name, "");
    assert_eq!(target.identifier, UNRESOLVED);
}

#[test]
fn reconcile_ignores_new_object_with_old_name() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (key, mut target) = tagged_ref(&mut scene, &mut rng, "Cube");

    scene.remove_object(key);
    scene.add_empty("Cube", Vec3::ONE);

    assert_eq!(target.reconcile(&mut scene, &mut rng), None);
    assert!(target.is_unresolved());
}

#[test]
fn reconcile_splits_duplicates_keeping_name_match() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (original, mut target) = tagged_ref(&mut scene, &mut rng, "Cube");
    let id = target.identifier;

    let copy = scene.duplicate_object(original).unwrap();
    assert_eq!(scene.identifier_tag(copy), id);

    let bound = target.reconcile(&mut scene, &mut rng);

    assert_eq!(bound, Some(original));
    assert_eq!(target.name, "Cube");
    assert_eq!(target.identifier, id);
    assert_eq!(scene.identifier_tag(original), id);
    assert_ne!(scene.identifier_tag(copy), id);
    assert_ne!(scene.identifier_tag(copy), UNASSIGNED);
}

#[test]
fn reconcile_duplicates_without_name_match_keeps_first() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (original, mut target) = tagged_ref(&mut scene, &mut rng, "Cube");
    let id = target.identifier;

    let copy = scene.duplicate_object(original).unwrap();
    scene.rename(original, "Left");
    scene.rename(copy, "Right");

    let bound = target.reconcile(&mut scene, &mut rng);

    assert_eq!(bound, Some(original));
    assert_eq!(target.name, "Left");
    assert_eq!(target.identifier, id);
    assert_ne!(scene.identifier_tag(copy), id);
}

#[test]
fn reconcile_leaves_identifiers_unique() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let (original, mut target) = tagged_ref(&mut scene, &mut rng, "Cube");
    for _ in 0..5 {
        scene.duplicate_object(original);
    }

    target.reconcile(&mut scene, &mut rng);

    let mut ids: Vec<_> = scene.iter().map(|(_, object)| object.identifier).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), scene.len());
}

#[test]
fn reconcile_binds_untagged_reference_by_name() {
    let mut scene = Scene::new();
    let mut rng = rng();
    let key = scene.add_empty("Legacy", Vec3::ZERO);
    let mut target = TargetRef::new("Legacy", UNASSIGNED);

    let bound = target.reconcile(&mut scene, &mut rng);

    assert_eq!(bound, Some(key));
    assert_ne!(target.identifier, UNASSIGNED);
    assert_eq!(scene.identifier_tag(key), target.identifier);
}
