//! Keyframe timelines
//!
//! A timeline is a list of `(time, value)` pairs over one loop of playback,
//! with `time` a fraction in `[0, 1]`. Times never decrease; two equal times
//! in a row make an instant jump.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline<T> {
    keyframes: Vec<Keyframe<T>>,
    /// Keyframes sit on equal time slices, one per frame
    uniform: bool,
}

/// Position of frame `index` within a loop of `frame_count` frames.
/// Zero when there are fewer than two frames.
#[inline]
pub fn time_fraction(index: usize, frame_count: usize) -> f32 {
    if frame_count <= 1 {
        0.0
    } else {
        index as f32 / (frame_count - 1) as f32
    }
}

impl<T> Timeline<T> {
    /// One value per frame on equal slices
    pub fn uniform(values: Vec<T>) -> Self {
        let n = values.len();
        let keyframes = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Keyframe {
                time: time_fraction(i, n),
                value,
            })
            .collect();
        Self {
            keyframes,
            uniform: true,
        }
    }

    /// Explicit key times.
    ///
    /// Panics if a time is outside `[0, 1]` or goes backwards; callers build
    /// these from clamped fractions, so that is a bug, not bad input.
    pub fn keyed(pairs: impl IntoIterator<Item = (f32, T)>) -> Self {
        let mut keyframes: Vec<Keyframe<T>> = Vec::new();
        for (time, value) in pairs {
            assert!(
                (0.0..=1.0).contains(&time),
                "key time {} outside the loop",
                time
            );
            if let Some(last) = keyframes.last() {
                assert!(
                    time >= last.time,
                    "key time {} before previous {}",
                    time,
                    last.time
                );
            }
            keyframes.push(Keyframe { time, value });
        }
        Self {
            keyframes,
            uniform: false,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn times(&self) -> impl Iterator<Item = f32> + '_ {
        self.keyframes.iter().map(|k| k.time)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.keyframes.iter().map(|k| &k.value)
    }
}
