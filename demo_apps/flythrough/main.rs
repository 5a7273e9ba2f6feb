//! Fly-through demo
//!
//! Builds a small scene with three boxes, points an active camera rig at
//! them and prints the camera pose every few frames. Midway through it
//! renames one target and deletes another to show the rig healing itself.
//!
//! Run with `RUST_LOG=debug` to see the healing events.

use glam::Vec3;
use mocam::{BoundingBox, MotionSettings, RigSystem, Scene, SceneObject};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene = Scene::new();
    let camera = scene.add_camera("Camera");
    let targets = [
        scene.add_object(SceneObject::mesh("Tower", BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 8.0, 2.0)))),
        scene.add_object(SceneObject::mesh("Bridge", BoundingBox::cube(4.0)).with_position(Vec3::new(20.0, 0.0, 0.0))),
        scene.add_object(SceneObject::mesh("Gate", BoundingBox::cube(2.0)).with_position(Vec3::new(20.0, 0.0, -30.0))),
    ];

    let settings = MotionSettings {
        default_load_frames: 24.0,
        default_stay_frames: 12.0,
        identifier_seed: Some(2014),
        ..Default::default()
    };
    let mut rigs = RigSystem::new(settings);
    rigs.activate_camera(camera);
    rigs.add_targets(&mut scene, camera, &targets)?;
    if let Some(rig) = rigs.rig(camera) {
        log::info!(
            "Timeline covers {} frames",
            rig.transitions.total_frames(rig.targets.len())
        );
    }

    for frame in 0..=120 {
        if frame == 50 {
            scene.rename(targets[1], "Old Bridge");
            log::info!("Renamed 'Bridge' to 'Old Bridge'");
        }
        if frame == 90 {
            scene.remove_object(targets[2]);
            log::info!("Deleted 'Gate'");
        }

        for (_, pose) in rigs.on_tick(&mut scene, frame as f32) {
            if frame % 10 == 0 {
                let p = pose.position();
                log::info!(
                    "frame {frame:>3}: camera at ({:>7.2}, {:>7.2}, {:>7.2}) focus {:.1}",
                    p.x,
                    p.y,
                    p.z,
                    pose.focus_distance
                );
            }
        }
    }

    let names: Vec<String> = rigs
        .resolved_targets(&scene, camera)?
        .into_iter()
        .filter_map(|(handle, _)| scene.get(handle).map(|object| object.name.clone()))
        .collect();
    log::info!("Remaining targets: {names:?}");
    Ok(())
}
