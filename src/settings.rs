//! Rig Settings
//!
//! [`MotionSettings`] collects the knobs shared by every rig in a
//! [`RigSystem`](crate::system::RigSystem): where the camera sits relative
//! to a target, how the focus distance is chosen, the timings new transition
//! entries start with, and the seed used for identifier assignment.
//!
//! ```rust,ignore
//! use mocam::settings::{FocusMode, MotionSettings};
//!
//! let settings = MotionSettings {
//!     focus: FocusMode::Standoff,
//!     identifier_seed: Some(7),
//!     ..Default::default()
//! };
//! ```
//!
//! Settings are plain serde data and can be loaded from JSON with
//! [`MotionSettings::from_json`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::rig::schedule::TransitionEntry;

/// How a rig chooses the camera focus distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FocusMode {
    /// Always focus at the given distance.
    Fixed(f32),
    /// Focus at the standoff distance, i.e. the length of the view offset.
    Standoff,
}

impl Default for FocusMode {
    fn default() -> Self {
        Self::Fixed(10.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    /// Translation from a target's anchor to the camera, in the target's
    /// local frame. The camera looks down its own -Z axis, so a positive Z
    /// offset places it in front of the target looking back at it.
    pub view_offset: Vec3,
    pub focus: FocusMode,
    /// Travel time given to newly created transition entries.
    pub default_load_frames: f32,
    /// Hold time given to newly created transition entries.
    pub default_stay_frames: f32,
    /// Seed for identifier assignment. `None` picks a random seed.
    pub identifier_seed: Option<u64>,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            view_offset: Vec3::new(0.0, 0.0, 10.0),
            focus: FocusMode::default(),
            default_load_frames: 20.0,
            default_stay_frames: 20.0,
            identifier_seed: None,
        }
    }
}

impl MotionSettings {
    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn default_transition(&self) -> TransitionEntry {
        TransitionEntry::new(self.default_load_frames, self.default_stay_frames)
    }

    #[must_use]
    pub fn focus_distance(&self) -> f32 {
        match self.focus {
            FocusMode::Fixed(distance) => distance,
            FocusMode::Standoff => self.view_offset.length(),
        }
    }
}
