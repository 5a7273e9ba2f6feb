//! Frame-to-pose calculation
//!
//! The timeline of a rig is a chain of `[load][stay]` segments, one per
//! target. Segment `i` travels from target `i-1` to target `i` during its
//! load phase and holds at target `i` during its stay phase. The first
//! segment has no predecessor, so the camera simply sits at target 0 until
//! it ends; past the last segment the camera holds at the last target.
//!
//! Evaluation is a pure function of the frame, the healed target list, the
//! schedule and the live transforms read from the scene. Nothing carries
//! over from one call to the next.

use glam::{Affine3A, Mat4, Vec3};

use crate::rig::schedule::TransitionSchedule;
use crate::rig::target_list::TargetList;
use crate::rig::values::Interpolatable;
use crate::scene::SceneAccess;
use crate::scene::geometry::centroid;
use crate::settings::MotionSettings;

/// Camera output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub world_transform: Affine3A,
    pub focus_distance: f32,
}

impl Pose {
    /// The pose of a rig with nothing to look at.
    #[must_use]
    pub fn identity(focus_distance: f32) -> Self {
        Self {
            world_transform: Affine3A::IDENTITY,
            focus_distance,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.world_transform.translation)
    }

    #[inline]
    #[must_use]
    pub fn as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_transform)
    }
}

/// Where a frame falls on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelinePhase {
    /// No targets.
    Empty,
    /// Inside the first segment; there is no predecessor to travel from.
    Start,
    /// Travelling from target `from` to target `to`, `t` in `[0, 1]`.
    Load { from: usize, to: usize, t: f32 },
    /// Holding at target `at`.
    Stay { at: usize },
    /// Past the end of the last segment, holding at target `at`.
    End { at: usize },
}

impl TimelinePhase {
    /// Locates `frame` on the timeline of `target_count` targets.
    ///
    /// Only the first `target_count` schedule entries are considered. An
    /// entry the schedule does not have yet is read as the schedule's
    /// default entry.
    #[must_use]
    pub fn locate(frame: f32, target_count: usize, schedule: &TransitionSchedule) -> Self {
        if target_count == 0 {
            return Self::Empty;
        }

        let mut frame_counter = 0.0_f32;
        for i in 0..target_count {
            let entry = schedule
                .get(i)
                .copied()
                .unwrap_or_else(|| schedule.default_entry());
            let load = entry.load_frames.max(0.0);
            let stay = entry.stay_frames.max(0.0);
            let segment_start = frame_counter;
            frame_counter += load + stay;

            if frame_counter <= frame {
                continue;
            }
            if i == 0 {
                return Self::Start;
            }

            let frame_in_segment = frame - segment_start;
            if frame_in_segment < load {
                let t = (frame_in_segment / load).clamp(0.0, 1.0);
                return Self::Load { from: i - 1, to: i, t };
            }
            return Self::Stay { at: i };
        }

        Self::End {
            at: target_count - 1,
        }
    }
}

/// Maps a frame number to a camera [`Pose`].
#[derive(Debug, Clone, PartialEq)]
pub struct MotionCalculator {
    view_offset: Affine3A,
    focus_distance: f32,
}

impl MotionCalculator {
    #[must_use]
    pub fn new(settings: &MotionSettings) -> Self {
        Self {
            view_offset: Affine3A::from_translation(settings.view_offset),
            focus_distance: settings.focus_distance(),
        }
    }

    #[must_use]
    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }

    /// Overrides the focus distance written with every pose.
    pub fn set_focus_distance(&mut self, distance: f32) {
        self.focus_distance = distance;
    }

    /// Computes the camera pose at `frame`.
    ///
    /// `targets` is expected to be healed already.
    #[must_use]
    pub fn compute<S: SceneAccess + ?Sized>(
        &self,
        frame: f32,
        targets: &TargetList,
        schedule: &TransitionSchedule,
        scene: &S,
    ) -> Pose {
        let handles: Vec<S::Handle> = targets
            .resolved_targets(scene)
            .into_iter()
            .map(|(handle, _)| handle)
            .collect();
        let mut anchors = AnchorCache::new(scene, &handles);

        let phase = TimelinePhase::locate(frame, handles.len(), schedule);
        log::trace!("frame {frame}: {phase:?}");

        let anchor = match phase {
            TimelinePhase::Empty => return Pose::identity(self.focus_distance),
            TimelinePhase::Start => anchors.get(0),
            TimelinePhase::Stay { at } | TimelinePhase::End { at } => anchors.get(at),
            TimelinePhase::Load { from, to, t } => {
                let start = anchors.get(from);
                let end = anchors.get(to);
                blend(&start, &end, t)
            }
        };

        Pose {
            world_transform: anchor * self.view_offset,
            focus_distance: self.focus_distance,
        }
    }
}

impl Default for MotionCalculator {
    fn default() -> Self {
        Self::new(&MotionSettings::default())
    }
}

/// Interpolates two transforms component-wise.
///
/// Translation and scale are lerped, rotation is slerped. The end points are
/// returned untouched so that `t = 0` and `t = 1` reproduce the targets
/// exactly.
fn blend(start: &Affine3A, end: &Affine3A, t: f32) -> Affine3A {
    if t <= 0.0 {
        return *start;
    }
    if t >= 1.0 {
        return *end;
    }
    let (s0, r0, p0) = start.to_scale_rotation_translation();
    let (s1, r1, p1) = end.to_scale_rotation_translation();
    Affine3A::from_scale_rotation_translation(
        Interpolatable::interpolate_linear(s0, s1, t),
        Interpolatable::interpolate_linear(r0, r1, t),
        Interpolatable::interpolate_linear(p0, p1, t),
    )
}

/// Per-call cache of target anchors.
///
/// An anchor is the target's world transform moved to the centroid of its
/// bounding box. Targets may move between frames, so the cache lives for a
/// single [`MotionCalculator::compute`] call.
struct AnchorCache<'a, S: SceneAccess + ?Sized> {
    scene: &'a S,
    handles: &'a [S::Handle],
    anchors: Vec<Option<Affine3A>>,
}

impl<'a, S: SceneAccess + ?Sized> AnchorCache<'a, S> {
    fn new(scene: &'a S, handles: &'a [S::Handle]) -> Self {
        Self {
            scene,
            handles,
            anchors: vec![None; handles.len()],
        }
    }

    fn get(&mut self, index: usize) -> Affine3A {
        if let Some(anchor) = self.anchors[index] {
            return anchor;
        }
        let anchor = target_anchor(self.scene, self.handles[index]);
        self.anchors[index] = Some(anchor);
        anchor
    }
}

/// World transform of `handle` composed with a translation to its bounds' centroid.
fn target_anchor<S: SceneAccess + ?Sized>(scene: &S, handle: S::Handle) -> Affine3A {
    let Some(world) = scene.world_transform(handle) else {
        log::warn!("Target {handle:?} has no world transform");
        return Affine3A::IDENTITY;
    };
    let center = scene
        .bounding_box_corners(handle)
        .map_or(Vec3::ZERO, |corners| centroid(&corners));
    world * Affine3A::from_translation(center)
}
