//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`ScatterError`] covers all failure modes including:
//! - A source node without readable geometry (fatal for a run)
//! - A frame schedule that runs off the timeline (fatal for a run)
//! - Rejected channel writes during commit (collected, never fatal)
//! - Scene document loading and validation errors
//!
//! Note that an empty target list is not an error: a run over zero targets
//! completes as a no-op and says so through
//! [`RunOutcome::NoTargets`](crate::scatter::RunOutcome::NoTargets).
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, ScatterError>`.
//!
//! ```rust,ignore
//! use scatter::errors::{ScatterError, Result};
//!
//! fn load_scene() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::animation::Axis;

/// The main error type for the scatter crate.
#[derive(Error, Debug)]
pub enum ScatterError {
    // ========================================================================
    // Run Errors
    // ========================================================================
    /// The source node has no point sequence to sample.
    #[error("Source '{source_name}' has no geometry to sample")]
    NoGeometry {
        /// Name of the offending source node
        source_name: String,
    },

    /// A single axis write on a target was refused by the scene.
    #[error("Write rejected: '{target}' location {axis} at frame {frame}")]
    WriteRejected {
        /// Name of the target node
        target: String,
        /// The rejected channel
        axis: Axis,
        /// Frame the keyframe was meant for
        frame: i32,
    },

    /// A scheduled frame does not fit the keyframe timeline.
    #[error("Frame for time slot {slot} is outside ±{max}", max = crate::settings::MAX_FRAME)]
    FrameOutOfRange {
        /// Time slot whose frame overflowed
        slot: usize,
    },

    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// A node name could not be resolved.
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Two nodes share a name.
    #[error("Duplicate node name: {0}")]
    DuplicateName(String),

    /// A scene document is structurally invalid.
    #[error("Invalid scene document: {0}")]
    InvalidDocument(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ScatterError {
    /// Returns `true` for errors that abort a run before anything is written.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::WriteRejected { .. })
    }
}

/// Alias for `Result<T, ScatterError>`.
pub type Result<T> = std::result::Result<T, ScatterError>;
