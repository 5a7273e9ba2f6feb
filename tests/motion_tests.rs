//! Motion Calculator Tests
//!
//! Tests for:
//! - Empty and single-target timelines
//! - Load-phase interpolation and stay-phase holding
//! - Bounding-box centroid anchors and the view offset
//! - Focus distance modes

use glam::{Affine3A, Mat4, Quat, Vec3};
use mocam::rig::{CameraRig, MotionCalculator, Pose, TransitionEntry};
use mocam::scene::{BoundingBox, Scene, SceneObject, Transform};
use mocam::settings::{FocusMode, MotionSettings};
use mocam::ObjectKey;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f32::consts::FRAC_PI_2;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

const OFFSET: Vec3 = Vec3::new(0.0, 0.0, 10.0);

fn calculator() -> MotionCalculator {
    MotionCalculator::new(&MotionSettings {
        view_offset: OFFSET,
        ..Default::default()
    })
}

/// Two unit cubes, at x = 0 and x = 10, with a `(0, 5) -> (10, 5)` schedule:
/// frames 0..5 sit on target 0, 5..15 travel, 15..20 hold on target 1.
fn two_targets() -> (Scene, CameraRig, ObjectKey, ObjectKey) {
    let mut scene = Scene::new();
    let mut rng = StdRng::seed_from_u64(3);
    let a = scene.add_object(SceneObject::mesh("A", BoundingBox::cube(1.0)));
    let b = scene.add_object(
        SceneObject::mesh("B", BoundingBox::cube(1.0)).with_position(Vec3::new(10.0, 0.0, 0.0)),
    );

    let mut rig = CameraRig::default();
    rig.add_targets(&mut scene, &[a, b], &mut rng).unwrap();
    *rig.transitions.entry_for(0) = TransitionEntry::new(0.0, 5.0);
    *rig.transitions.entry_for(1) = TransitionEntry::new(10.0, 5.0);
    rig.set_active(true);
    (scene, rig, a, b)
}

fn pose_at(scene: &Scene, rig: &CameraRig, frame: f32) -> Pose {
    calculator().compute(frame, &rig.targets, &rig.transitions, scene)
}

// ============================================================================
// Degenerate timelines
// ============================================================================

#[test]
fn empty_rig_is_identity() {
    let scene = Scene::new();
    let rig = CameraRig::default();

    for frame in [-10.0, 0.0, 250.0] {
        let pose = pose_at(&scene, &rig, frame);
        assert_eq!(pose.world_transform, Affine3A::IDENTITY);
        assert_eq!(pose.focus_distance, 10.0);
    }
}

#[test]
fn single_target_always_snaps() {
    let mut scene = Scene::new();
    let mut rng = StdRng::seed_from_u64(3);
    let a = scene.add_empty("A", Vec3::new(1.0, 2.0, 3.0));
    let mut rig = CameraRig::default();
    rig.add_target(&mut scene, a, &mut rng).unwrap();
    *rig.transitions.entry_for(0) = TransitionEntry::new(30.0, 30.0);
    rig.transitions.entry_for(5);

    for frame in [-5.0, 0.0, 15.0, 59.0, 60.0, 1000.0] {
        let pose = pose_at(&scene, &rig, frame);
        assert!(vec3_approx(pose.position(), Vec3::new(1.0, 2.0, 13.0)), "frame {frame}");
    }
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn first_segment_snaps_to_first_target() {
    let (scene, rig, _, _) = two_targets();
    let pose = pose_at(&scene, &rig, 2.0);
    assert!(vec3_approx(pose.position(), OFFSET));
}

#[test]
fn load_start_is_exactly_previous_target() {
    let (scene, rig, _, _) = two_targets();
    let pose = pose_at(&scene, &rig, 5.0);
    assert_eq!(pose.world_transform, Affine3A::from_translation(OFFSET));
    assert_eq!(pose.as_mat4(), Mat4::from_translation(OFFSET));
}

#[test]
fn load_midpoint_is_mean_of_centroids() {
    let (scene, rig, _, _) = two_targets();
    let pose = pose_at(&scene, &rig, 10.0);
    assert!(vec3_approx(pose.position(), Vec3::new(5.0, 0.0, 10.0)));
}

#[test]
fn load_end_reaches_next_target() {
    let (scene, rig, _, _) = two_targets();
    let expected = Affine3A::from_translation(Vec3::new(10.0, 0.0, 0.0)) * Affine3A::from_translation(OFFSET);

    for frame in [15.0, 17.5, 19.9] {
        let pose = pose_at(&scene, &rig, frame);
        assert_eq!(pose.world_transform, expected, "frame {frame}");
    }
}

#[test]
fn past_the_end_holds_last_target() {
    let (scene, rig, _, _) = two_targets();
    let pose = pose_at(&scene, &rig, 500.0);
    assert!(vec3_approx(pose.position(), Vec3::new(10.0, 0.0, 10.0)));
}

#[test]
fn interpolation_is_linear_in_frame() {
    let (scene, rig, _, _) = two_targets();
    for step in 0..=10 {
        let frame = 5.0 + step as f32;
        let pose = pose_at(&scene, &rig, frame);
        assert!(
            vec3_approx(pose.position(), Vec3::new(step as f32, 0.0, 10.0)),
            "frame {frame}: {:?}",
            pose.position()
        );
    }
}

#[test]
fn rotation_is_interpolated() {
    let (mut scene, rig, _, b) = two_targets();
    scene.get_mut(b).unwrap().transform.rotation = Quat::from_rotation_y(FRAC_PI_2);

    let pose = pose_at(&scene, &rig, 10.0);
    let (_, rotation, _) = pose.world_transform.to_scale_rotation_translation();

    assert!(rotation.angle_between(Quat::from_rotation_y(FRAC_PI_2 * 0.5)) < 1e-3);
}

#[test]
fn compute_is_pure() {
    let (scene, rig, _, _) = two_targets();
    let calc = calculator();
    let first = calc.compute(8.25, &rig.targets, &rig.transitions, &scene);
    let second = calc.compute(8.25, &rig.targets, &rig.transitions, &scene);
    assert_eq!(first, second);
}

// ============================================================================
// Anchors & offsets
// ============================================================================

#[test]
fn anchor_uses_bounding_box_centroid() {
    let mut scene = Scene::new();
    let mut rng = StdRng::seed_from_u64(3);
    let tower = scene.add_object(
        SceneObject::mesh("Tower", BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 8.0, 2.0)))
            .with_position(Vec3::new(5.0, 0.0, 0.0)),
    );
    let mut rig = CameraRig::default();
    rig.add_target(&mut scene, tower, &mut rng).unwrap();

    let pose = pose_at(&scene, &rig, 0.0);

    assert!(vec3_approx(pose.position(), Vec3::new(6.0, 4.0, 11.0)));
}

#[test]
fn view_offset_follows_target_orientation() {
    let mut scene = Scene::new();
    let mut rng = StdRng::seed_from_u64(3);
    let mut transform = Transform::new();
    transform.rotation = Quat::from_rotation_y(FRAC_PI_2);
    let a = scene.add_object(SceneObject::empty("A").with_transform(transform));
    let mut rig = CameraRig::default();
    rig.add_target(&mut scene, a, &mut rng).unwrap();

    let pose = pose_at(&scene, &rig, 0.0);

    assert!(vec3_approx(pose.position(), Vec3::new(10.0, 0.0, 0.0)));
}

#[test]
fn moving_target_is_reread_every_call() {
    let (mut scene, rig, a, _) = two_targets();
    let before = pose_at(&scene, &rig, 0.0);
    scene.get_mut(a).unwrap().transform.position = Vec3::new(0.0, 3.0, 0.0);
    let after = pose_at(&scene, &rig, 0.0);

    assert!(vec3_approx(before.position(), Vec3::new(0.0, 0.0, 10.0)));
    assert!(vec3_approx(after.position(), Vec3::new(0.0, 3.0, 10.0)));
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn focus_modes() {
    let (scene, rig, _, _) = two_targets();

    let fixed = MotionCalculator::new(&MotionSettings {
        focus: FocusMode::Fixed(3.5),
        ..Default::default()
    });
    let standoff = MotionCalculator::new(&MotionSettings {
        view_offset: Vec3::new(0.0, 6.0, 8.0),
        focus: FocusMode::Standoff,
        ..Default::default()
    });
    let mut overridden = calculator();
    overridden.set_focus_distance(42.0);

    assert_eq!(fixed.compute(0.0, &rig.targets, &rig.transitions, &scene).focus_distance, 3.5);
    assert!((standoff.compute(0.0, &rig.targets, &rig.transitions, &scene).focus_distance - 10.0).abs() < EPSILON);
    assert_eq!(overridden.compute(0.0, &rig.targets, &rig.transitions, &scene).focus_distance, 42.0);
}
