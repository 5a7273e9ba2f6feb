//! Rig System
//!
//! [`RigSystem`] owns one [`CameraRig`] per camera object and runs the
//! per-frame pass over them. The host calls [`RigSystem::on_tick`] once per
//! frame change; the system then, in camera enumeration order:
//!
//! 1. creates dormant rigs for cameras it has not seen and drops rigs whose
//!    camera is gone
//! 2. for every active rig, heals its target list, computes the pose for the
//!    frame and writes it to the camera
//!
//! Everything happens synchronously inside the call. One rig never observes
//! another rig half-way through its update.
//!
//! The system also owns the random source used for identifier assignment,
//! so every identifier handed out by one system comes from one stream.

use std::fmt::Debug;
use std::hash::Hash;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;

use crate::errors::{MocamError, Result};
use crate::persist::RigState;
use crate::rig::{CameraRig, MotionCalculator, Pose};
use crate::scene::SceneAccess;
use crate::settings::MotionSettings;

/// Scheduler and lifecycle manager for all camera rigs of a scene.
pub struct RigSystem<H> {
    rigs: FxHashMap<H, CameraRig>,
    selected_camera_name: Option<String>,
    settings: MotionSettings,
    calculator: MotionCalculator,
    rng: StdRng,
}

impl<H: Copy + Eq + Hash + Debug> RigSystem<H> {
    #[must_use]
    pub fn new(settings: MotionSettings) -> Self {
        let seed = settings.identifier_seed.unwrap_or_else(rand::random);
        Self {
            rigs: FxHashMap::default(),
            selected_camera_name: None,
            calculator: MotionCalculator::new(&settings),
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    #[must_use]
    pub fn calculator(&self) -> &MotionCalculator {
        &self.calculator
    }

    /// Mutable access to the pose calculator, e.g. to override the focus distance.
    pub fn calculator_mut(&mut self) -> &mut MotionCalculator {
        &mut self.calculator
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rigs.is_empty()
    }

    #[must_use]
    pub fn rig(&self, camera: H) -> Option<&CameraRig> {
        self.rigs.get(&camera)
    }

    pub fn rig_mut(&mut self, camera: H) -> Option<&mut CameraRig> {
        self.rigs.get_mut(&camera)
    }

    fn rig_or_err(&mut self, camera: H) -> Result<&mut CameraRig> {
        self.rigs
            .get_mut(&camera)
            .ok_or_else(|| MocamError::UnknownCamera(format!("{camera:?}")))
    }

    fn new_rig(&self) -> CameraRig {
        CameraRig::new(self.settings.default_transition())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Makes the rig set match the scene's cameras.
    ///
    /// New cameras get a dormant rig; rigs of vanished cameras are dropped.
    pub fn sync_cameras<S>(&mut self, scene: &S)
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        let cameras = scene.cameras();

        let before = self.rigs.len();
        self.rigs.retain(|camera, _| cameras.contains(camera));
        let dropped = before - self.rigs.len();
        if dropped > 0 {
            log::debug!("Dropped {dropped} rig(s) of removed cameras");
        }

        for camera in cameras {
            if !self.rigs.contains_key(&camera) {
                log::debug!("Created rig for camera {camera:?}");
                let rig = self.new_rig();
                self.rigs.insert(camera, rig);
            }
        }
    }

    /// Drops the rig of a camera the host just destroyed.
    pub fn on_camera_removed(&mut self, camera: H) -> Option<CameraRig> {
        let rig = self.rigs.remove(&camera);
        if rig.is_some() {
            log::debug!("Destroyed rig of camera {camera:?}");
        }
        rig
    }

    /// Registers `camera` (typically just created by the host) with an active rig.
    pub fn activate_camera(&mut self, camera: H) -> &mut CameraRig {
        let rig = self.new_rig();
        let rig = self.rigs.entry(camera).or_insert(rig);
        rig.set_active(true);
        rig
    }

    pub fn set_active(&mut self, camera: H, active: bool) -> Result<()> {
        self.rig_or_err(camera)?.set_active(active);
        Ok(())
    }

    #[must_use]
    pub fn is_active(&self, camera: H) -> bool {
        self.rigs.get(&camera).is_some_and(CameraRig::is_active)
    }

    /// Replaces the rig of `camera` with persisted state.
    pub fn restore_rig(&mut self, camera: H, state: RigState) {
        let rig = CameraRig::from_state(state, self.settings.default_transition());
        self.rigs.insert(camera, rig);
    }

    #[must_use]
    pub fn save_rig(&self, camera: H) -> Option<RigState> {
        self.rigs.get(&camera).map(CameraRig::to_state)
    }

    // ========================================================================
    // Camera Selection
    // ========================================================================

    /// Chooses which camera [`selected_camera`](Self::selected_camera) reports
    /// when the scene holds several.
    pub fn select_camera<S>(&mut self, scene: &S, name: &str) -> Result<()>
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        let is_camera = scene
            .find_object_by_name(name)
            .is_some_and(|handle| scene.cameras().contains(&handle));
        if !is_camera {
            log::warn!("Attempted to select '{name}', which is not a camera.");
            return Err(MocamError::UnknownCamera(name.to_string()));
        }
        self.selected_camera_name = Some(name.to_string());
        Ok(())
    }

    /// The camera a UI should display: none without cameras, the only camera
    /// if there is one, otherwise the camera selected by name.
    #[must_use]
    pub fn selected_camera<S>(&self, scene: &S) -> Option<H>
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        let cameras = scene.cameras();
        match cameras.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => {
                let name = self.selected_camera_name.as_deref()?;
                scene
                    .find_object_by_name(name)
                    .filter(|handle| cameras.contains(handle))
            }
        }
    }

    // ========================================================================
    // Target Editing
    // ========================================================================

    pub fn add_target<S>(&mut self, scene: &mut S, camera: H, target: H) -> Result<usize>
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        let rig = self
            .rigs
            .get_mut(&camera)
            .ok_or_else(|| MocamError::UnknownCamera(format!("{camera:?}")))?;
        rig.add_target(scene, target, &mut self.rng)
    }

    /// Adds every object in `targets`, in order.
    pub fn add_targets<S>(&mut self, scene: &mut S, camera: H, targets: &[H]) -> Result<()>
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        let rig = self
            .rigs
            .get_mut(&camera)
            .ok_or_else(|| MocamError::UnknownCamera(format!("{camera:?}")))?;
        rig.add_targets(scene, targets, &mut self.rng)
    }

    pub fn remove_target(&mut self, camera: H, index: usize) -> Result<()> {
        self.rig_or_err(camera)?.targets.remove(index)?;
        Ok(())
    }

    pub fn swap_targets(&mut self, camera: H, a: usize, b: usize) -> Result<()> {
        self.rig_or_err(camera)?.targets.swap(a, b)
    }

    pub fn resolved_targets<S>(&self, scene: &S, camera: H) -> Result<Vec<(H, usize)>>
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        let rig = self
            .rigs
            .get(&camera)
            .ok_or_else(|| MocamError::UnknownCamera(format!("{camera:?}")))?;
        Ok(rig.targets.resolved_targets(scene))
    }

    // ========================================================================
    // Per-frame Update
    // ========================================================================

    /// Runs one frame for every active rig. Returns the poses written, in
    /// camera enumeration order.
    pub fn on_tick<S>(&mut self, scene: &mut S, frame: f32) -> Vec<(H, Pose)>
    where
        S: SceneAccess<Handle = H> + ?Sized,
    {
        self.sync_cameras(&*scene);

        let mut poses = Vec::new();
        for camera in scene.cameras() {
            let Some(rig) = self.rigs.get_mut(&camera) else {
                continue;
            };
            if let Some(pose) = rig.update(camera, scene, frame, &self.calculator, &mut self.rng) {
                poses.push((camera, pose));
            }
        }
        log::trace!("frame {frame}: updated {} rig(s)", poses.len());
        poses
    }
}

impl<H: Copy + Eq + Hash + Debug> Default for RigSystem<H> {
    fn default() -> Self {
        Self::new(MotionSettings::default())
    }
}
