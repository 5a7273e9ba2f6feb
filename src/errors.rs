//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`MocamError`] covers the failures a caller can act on:
//! - Out-of-range target or transition indices
//! - Operations addressed to a camera that has no rig
//! - Objects the scene collaborator does not know about
//! - Persistence encode/decode errors
//!
//! Conditions the rig heals by itself (dead targets, duplicated identifiers,
//! empty timelines) are never reported here; they are logged and recovered.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mocam::errors::{MocamError, Result};
//!
//! fn reorder(rig: &mut CameraRig) -> Result<()> {
//!     rig.targets.swap(0, 1)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Mocam crate.
#[derive(Error, Debug)]
pub enum MocamError {
    // ========================================================================
    // Target List Errors
    // ========================================================================
    /// A target or transition index is outside the current list.
    #[error("Index out of bounds: {context} (index: {index}, len: {len})")]
    InvalidIndex {
        /// Description of what was being accessed
        context: &'static str,
        /// The invalid index
        index: usize,
        /// Length of the list at the time of the call
        len: usize,
    },

    /// The object handed to the rig is not known to the scene.
    #[error("Object is not present in the scene: {0}")]
    UnresolvedObject(String),

    // ========================================================================
    // Rig Errors
    // ========================================================================
    /// No rig is registered for the given camera.
    #[error("No camera rig for: {0}")]
    UnknownCamera(String),

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// JSON encode or decode error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, MocamError>`.
pub type Result<T> = std::result::Result<T, MocamError>;
