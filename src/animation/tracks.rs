// src/animation/tracks.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

/// A scalar keyframe track.
///
/// `times` is kept sorted in ascending order; `values[i]` is the key at
/// `times[i]`. Keys are only ever added, never removed, by this crate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeTrack {
    pub times: Vec<f32>,
    pub values: Vec<f32>,
    pub interpolation: InterpolationMode,
}

impl KeyframeTrack {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<f32>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Builds a track from unordered `(time, value)` pairs.
    /// Later pairs win when two share a time.
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut track = Self::default();
        for (time, value) in keys {
            track.insert(time, value);
        }
        track
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Inserts a key, keeping `times` sorted.
    ///
    /// A key that already exists at exactly `time` has its value replaced,
    /// matching how a host keyframe insert behaves on an occupied frame.
    pub fn insert(&mut self, time: f32, value: f32) {
        // partition_point finds the first index where t >= time
        let idx = self.times.partition_point(|&t| t < time);

        if self.times.get(idx).is_some_and(|&t| t == time) {
            self.values[idx] = value;
        } else {
            self.times.insert(idx, time);
            self.values.insert(idx, value);
        }
    }

    /// Returns the value of the key at exactly `time`, if any.
    #[must_use]
    pub fn key_at(&self, time: f32) -> Option<f32> {
        let idx = self.times.partition_point(|&t| t < time);
        match self.times.get(idx) {
            Some(&t) if t == time => Some(self.values[idx]),
            _ => None,
        }
    }

    /// Iterates `(time, value)` pairs in time order.
    pub fn keys(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Evaluates the track at `time`, or `None` for an empty track.
    ///
    /// Times before the first key clamp to the first value, times after the
    /// last key clamp to the last value.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<f32> {
        if self.times.is_empty() {
            return None;
        }

        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);

        if next_idx == 0 {
            return Some(self.values[0]);
        }
        let len = self.times.len();
        if next_idx >= len {
            return Some(self.values[len - 1]);
        }

        let index = next_idx - 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        // Prevent division by zero
        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        let v0 = self.values[index];
        Some(match self.interpolation {
            InterpolationMode::Step => v0,
            InterpolationMode::Linear => v0 + (self.values[next_idx] - v0) * t,
        })
    }
}
