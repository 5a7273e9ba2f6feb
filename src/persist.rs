//! Persisted Rig State
//!
//! The data a host stores alongside each camera so a rig can be rebuilt
//! later: the active flag, the target slots as `{name, identifier, index}`
//! records and the transition timings. Identifier tags on the target objects
//! themselves are stored by the host with the objects.
//!
//! # Example
//!
//! ```rust,ignore
//! let json = persist::save_rig(&rig)?;
//! let restored = persist::load_rig(&json, settings.default_transition())?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::rig::identity::Identifier;
use crate::rig::{CameraRig, TargetList, TargetRef, TargetSlot, TransitionEntry, TransitionSchedule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetState {
    pub name: String,
    pub identifier: Identifier,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigState {
    pub active: bool,
    pub targets: Vec<TargetState>,
    pub transitions: Vec<TransitionEntry>,
}

impl From<&TargetSlot> for TargetState {
    fn from(slot: &TargetSlot) -> Self {
        Self {
            name: slot.target.name.clone(),
            identifier: slot.target.identifier,
            index: slot.index,
        }
    }
}

impl From<TargetState> for TargetSlot {
    fn from(state: TargetState) -> Self {
        Self {
            target: TargetRef::new(state.name, state.identifier),
            index: state.index,
        }
    }
}

impl CameraRig {
    #[must_use]
    pub fn to_state(&self) -> RigState {
        RigState {
            active: self.is_active(),
            targets: self.targets.slots().iter().map(TargetState::from).collect(),
            transitions: self.transitions.entries().to_vec(),
        }
    }

    /// Rebuilds a rig. Target indices are normalized on the first heal.
    #[must_use]
    pub fn from_state(state: RigState, default_transition: TransitionEntry) -> Self {
        let slots = state.targets.into_iter().map(TargetSlot::from).collect();
        let mut rig = Self::new(default_transition);
        rig.targets = TargetList::from_slots(slots);
        rig.transitions = TransitionSchedule::from_entries(state.transitions, default_transition);
        rig.set_active(state.active);
        rig
    }
}

pub fn save_rig(rig: &CameraRig) -> Result<String> {
    Ok(serde_json::to_string(&rig.to_state())?)
}

pub fn load_rig(json: &str, default_transition: TransitionEntry) -> Result<CameraRig> {
    let state: RigState = serde_json::from_str(json)?;
    Ok(CameraRig::from_state(state, default_transition))
}
