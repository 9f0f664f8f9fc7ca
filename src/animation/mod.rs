//! Location animation data.
//!
//! - [`KeyframeTrack`]: a sorted scalar track with linear/step sampling
//! - [`Axis`] / [`AxisMask`]: location channel selection
//! - [`LocationTracks`]: the per-axis tracks owned by every node

pub mod channel;
pub mod tracks;

pub use channel::{Axis, AxisMask, LocationTracks};
pub use tracks::{InterpolationMode, KeyframeTrack};
