use rand::RngExt;

use crate::errors::Result;
use crate::rig::motion::{MotionCalculator, Pose};
use crate::rig::schedule::{TransitionEntry, TransitionSchedule};
use crate::rig::target_list::TargetList;
use crate::scene::SceneAccess;

/// Per-camera state: the target list, its transition timings and whether the
/// rig is driving the camera at all.
///
/// A dormant rig (`active == false`) keeps its data but neither heals nor
/// writes poses.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub targets: TargetList,
    pub transitions: TransitionSchedule,
    active: bool,
}

impl CameraRig {
    #[must_use]
    pub fn new(default_transition: TransitionEntry) -> Self {
        Self {
            targets: TargetList::new(),
            transitions: TransitionSchedule::new(default_transition),
            active: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Appends one target and makes sure it has a transition entry.
    pub fn add_target<S, R>(&mut self, scene: &mut S, handle: S::Handle, rng: &mut R) -> Result<usize>
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        let index = self.targets.add(scene, handle, rng)?;
        self.transitions.ensure_len(self.targets.len());
        Ok(index)
    }

    /// Appends several targets in the given order, e.g. the host's selection.
    ///
    /// Stops at the first object the scene does not know; targets added
    /// before it are kept.
    pub fn add_targets<S, R>(&mut self, scene: &mut S, handles: &[S::Handle], rng: &mut R) -> Result<()>
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        for &handle in handles {
            self.add_target(scene, handle, rng)?;
        }
        Ok(())
    }

    /// Heals the target list and grows the schedule to match.
    pub fn heal<S, R>(&mut self, scene: &mut S, rng: &mut R)
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        self.targets.heal_and_normalize(scene, rng);
        self.transitions.ensure_len(self.targets.len());
    }

    /// Runs one tick for this rig: heal, compute the pose at `frame` and
    /// write it to `camera`.
    ///
    /// Returns the pose written, or `None` if the rig is dormant.
    pub fn update<S, R>(
        &mut self,
        camera: S::Handle,
        scene: &mut S,
        frame: f32,
        calculator: &MotionCalculator,
        rng: &mut R,
    ) -> Option<Pose>
    where
        S: SceneAccess + ?Sized,
        R: RngExt,
    {
        if !self.active {
            return None;
        }
        self.heal(scene, rng);

        let pose = calculator.compute(frame, &self.targets, &self.transitions, &*scene);
        scene.set_world_transform(camera, pose.world_transform);
        scene.set_focus_distance(camera, pose.focus_distance);
        Some(pose)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(TransitionSchedule::default().default_entry())
    }
}
