#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Mocam
//!
//! Drives cameras through an ordered list of scene objects. Each camera owns
//! a rig holding its targets and per-target load/stay timings; once per frame
//! the rig heals its target references and writes a pose computed purely
//! from the frame number.
//!
//! ```rust,ignore
//! use mocam::{RigSystem, Scene, SceneObject, BoundingBox};
//!
//! let mut scene = Scene::new();
//! let camera = scene.add_camera("Camera");
//! let a = scene.add_object(SceneObject::mesh("A", BoundingBox::cube(1.0)));
//! let b = scene.add_object(SceneObject::mesh("B", BoundingBox::cube(1.0)));
//!
//! let mut rigs = RigSystem::default();
//! rigs.activate_camera(camera);
//! rigs.add_targets(&mut scene, camera, &[a, b])?;
//!
//! for frame in 0..120 {
//!     rigs.on_tick(&mut scene, frame as f32);
//! }
//! ```

pub mod errors;
pub mod persist;
pub mod rig;
pub mod scene;
pub mod settings;
pub mod system;

pub use errors::{MocamError, Result};
pub use persist::RigState;
pub use rig::{CameraRig, MotionCalculator, Pose, TargetList, TargetRef, TransitionEntry, TransitionSchedule};
pub use scene::{BoundingBox, ObjectKey, Scene, SceneAccess, SceneObject, Transform};
pub use settings::{FocusMode, MotionSettings};
pub use system::RigSystem;
