use std::fmt;
use std::ops::{Index, IndexMut};

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::tracks::KeyframeTrack;

/// One component of a node's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a `Vec3` (0, 1 or 2).
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    #[must_use]
    pub fn mask(self) -> AxisMask {
        match self {
            Axis::X => AxisMask::X,
            Axis::Y => AxisMask::Y,
            Axis::Z => AxisMask::Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

bitflags! {
    /// A set of location axes.
    ///
    /// Serialized as a list of axis names, e.g. `["x", "z"]`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(from = "Vec<Axis>", into = "Vec<Axis>")]
    pub struct AxisMask: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
    }
}

impl AxisMask {
    #[inline]
    #[must_use]
    pub fn has(self, axis: Axis) -> bool {
        self.contains(axis.mask())
    }

    /// Enabled axes in x, y, z order.
    pub fn axes(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |&axis| self.has(axis))
    }
}

impl FromIterator<Axis> for AxisMask {
    fn from_iter<I: IntoIterator<Item = Axis>>(iter: I) -> Self {
        iter.into_iter().fold(AxisMask::empty(), |acc, axis| acc | axis.mask())
    }
}

impl From<Vec<Axis>> for AxisMask {
    fn from(axes: Vec<Axis>) -> Self {
        axes.into_iter().collect()
    }
}

impl From<AxisMask> for Vec<Axis> {
    fn from(mask: AxisMask) -> Self {
        mask.axes().collect()
    }
}

/// The three location tracks of one node, one per axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationTracks {
    tracks: [KeyframeTrack; 3],
}

impl LocationTracks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of keys across all axes.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.tracks.iter().map(KeyframeTrack::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(KeyframeTrack::is_empty)
    }

    /// Evaluates the animated location at `time`.
    ///
    /// Axes without keys fall back to the matching component of `rest`.
    #[must_use]
    pub fn evaluate(&self, time: f32, rest: Vec3) -> Vec3 {
        let mut out = rest;
        for axis in Axis::ALL {
            if let Some(value) = self[axis].sample(time) {
                out[axis.index()] = value;
            }
        }
        out
    }
}

impl Index<Axis> for LocationTracks {
    type Output = KeyframeTrack;

    #[inline]
    fn index(&self, axis: Axis) -> &KeyframeTrack {
        &self.tracks[axis.index()]
    }
}

impl IndexMut<Axis> for LocationTracks {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut KeyframeTrack {
        &mut self.tracks[axis.index()]
    }
}
