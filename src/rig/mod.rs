//! Camera rigs
//!
//! A rig turns an ordered list of scene objects into a camera path:
//! - [`identity`]: identifier tags that let targets survive renames
//! - [`TargetRef`]: a (name, identifier) reference that heals itself
//! - [`TargetList`]: the ordered target slots of one rig
//! - [`TransitionSchedule`]: load/stay timings per target
//! - [`MotionCalculator`]: frame number to camera [`Pose`]
//! - [`CameraRig`]: all of the above for one camera

pub mod camera_rig;
pub mod identity;
pub mod motion;
pub mod reference;
pub mod schedule;
pub mod target_list;
mod values;

pub use camera_rig::CameraRig;
pub use identity::Identifier;
pub use motion::{MotionCalculator, Pose, TimelinePhase};
pub use reference::TargetRef;
pub use schedule::{TransitionEntry, TransitionSchedule};
pub use target_list::{TargetList, TargetSlot};
pub use values::Interpolatable;
