//! Scatter Settings
//!
//! [`ScatterSettings`] is the immutable configuration record of one scatter
//! run. Every field is read before the run starts.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scatter::settings::{ScatterSettings, KeyMode};
//! use scatter::animation::AxisMask;
//!
//! // Defaults: all axes, world space, no shuffling, one frame between keys
//! let settings = ScatterSettings::default();
//!
//! // Drive only the ground plane, randomize who lands where
//! let settings = ScatterSettings {
//!     axes: AxisMask::X | AxisMask::Y,
//!     shuffle_association: true,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::AxisMask;
use crate::errors::Result;

/// Largest frame magnitude a key may be scheduled at. Track times are `f32`,
/// which holds every integer up to 2^24 exactly.
pub const MAX_FRAME: i32 = 1 << 24;

/// How values are committed to targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Set positions only; no keyframes are inserted.
    Position,
    /// Set positions and key every target at the start frame.
    Keyframe,
    /// Set positions and key each target at its own scheduled frame.
    #[default]
    Offset,
}

impl KeyMode {
    /// Whether commits in this mode insert keyframes.
    #[inline]
    #[must_use]
    pub fn inserts_keys(self) -> bool {
        !matches!(self, Self::Position)
    }
}

/// Configuration of one scatter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    /// Location channels to write
    pub axes: AxisMask,
    /// Transform source vertices into world space before writing
    pub world_space: bool,
    /// Randomize which target receives which vertex
    pub shuffle_association: bool,
    /// Randomize the order in which targets are keyed
    pub shuffle_timing: bool,
    /// Frames between consecutive time slots. Zero and negative are allowed.
    pub frame_step: i32,
    /// Frame of time slot 0
    pub start_frame: i32,
    pub mode: KeyMode,
    /// Seed for both shuffles. `None` draws fresh seeds each run.
    pub seed: Option<u64>,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            axes: AxisMask::all(),
            world_space: true,
            shuffle_association: false,
            shuffle_timing: false,
            frame_step: 1,
            start_frame: 0,
            mode: KeyMode::Offset,
            seed: None,
        }
    }
}

/// Per-invocation overrides layered over loaded settings, as command-line
/// flags supply them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// When non-empty, exactly these axes are enabled.
    pub axes: AxisMask,
    /// `Some(true)` forces world space, `Some(false)` local space.
    pub world_space: Option<bool>,
    /// Turns association shuffling on; never turns it off.
    pub shuffle_association: bool,
    /// Turns timing shuffling on; never turns it off.
    pub shuffle_timing: bool,
    pub frame_step: Option<i32>,
    pub start_frame: Option<i32>,
    pub mode: Option<KeyMode>,
    pub seed: Option<u64>,
}

impl ScatterSettings {
    /// Applies `overrides` on top of these settings.
    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if !overrides.axes.is_empty() {
            self.axes = overrides.axes;
        }
        if let Some(world_space) = overrides.world_space {
            self.world_space = world_space;
        }
        self.shuffle_association |= overrides.shuffle_association;
        self.shuffle_timing |= overrides.shuffle_timing;

        if let Some(step) = overrides.frame_step {
            self.frame_step = step;
        }
        if let Some(start) = overrides.start_frame {
            self.start_frame = start;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    /// Loads settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Frame of time slot `slot` under these settings, or `None` when it
    /// falls outside `±MAX_FRAME`.
    ///
    /// [`KeyMode::Keyframe`] and [`KeyMode::Position`] collapse every slot
    /// onto `start_frame`.
    #[must_use]
    pub fn frame_for_slot(&self, slot: usize) -> Option<i32> {
        let start = i64::from(self.start_frame);
        let frame = match self.mode {
            KeyMode::Offset => i64::try_from(slot)
                .ok()?
                .checked_mul(i64::from(self.frame_step))?
                .checked_add(start)?,
            KeyMode::Keyframe | KeyMode::Position => start,
        };
        if frame.unsigned_abs() > u64::from(MAX_FRAME.unsigned_abs()) {
            return None;
        }
        i32::try_from(frame).ok()
    }
}
