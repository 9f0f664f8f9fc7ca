//! Commit: writes scheduled values to targets, one axis at a time.
//!
//! A rejected axis never stops the run. The failure is recorded and the
//! next axis (then the next pairing) is attempted.

use crate::animation::{Axis, AxisMask};
use crate::errors::{Result, ScatterError};
use crate::scatter::compute::ScheduledKey;
use crate::scene::NodeKey;

/// A single-axis write on one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWrite {
    pub target: NodeKey,
    pub axis: Axis,
    pub value: f32,
    pub frame: i32,
    /// Insert a keyframe at `frame` after setting the value
    pub keyed: bool,
}

/// The side of the host that accepts location writes.
///
/// An implementation either applies the whole write (value and, when
/// `keyed`, the keyframe) or rejects it without side effects.
pub trait ChannelWriter {
    fn write_channel(&mut self, write: &ChannelWrite) -> Result<()>;
}

/// A write that the host refused.
#[derive(Debug)]
pub struct WriteFailure {
    pub target: NodeKey,
    pub axis: Axis,
    pub frame: i32,
    pub error: ScatterError,
}

/// Totals of one commit pass.
#[derive(Debug, Default)]
pub struct CommitSummary {
    /// Accepted axis writes
    pub writes: usize,
    /// Keyframes inserted (a subset of `writes`)
    pub keyframes: usize,
    pub failures: Vec<WriteFailure>,
}

/// Writes every enabled axis of every key through `writer`.
pub fn commit<W: ChannelWriter + ?Sized>(
    writer: &mut W,
    keys: &[ScheduledKey],
    axes: AxisMask,
    keyed: bool,
) -> CommitSummary {
    let mut summary = CommitSummary::default();

    for key in keys {
        for axis in axes.axes() {
            let write = ChannelWrite {
                target: key.target,
                axis,
                value: key.position[axis.index()],
                frame: key.frame,
                keyed,
            };

            match writer.write_channel(&write) {
                Ok(()) => {
                    summary.writes += 1;
                    if keyed {
                        summary.keyframes += 1;
                    }
                }
                Err(error) => {
                    log::warn!("{error}; continuing");
                    summary.failures.push(WriteFailure {
                        target: key.target,
                        axis,
                        frame: key.frame,
                        error,
                    });
                }
            }
        }
    }

    summary
}
