//! Keyframe encoding
//!
//! Turns a recorded run into timelines that a looping, declarative
//! animation can play back without simulating anything.

pub mod encode;
pub mod timeline;

pub use encode::{Animation, BrickTrack, ParticleTrack, burst_window, encode};
pub use timeline::{Keyframe, Timeline, time_fraction};
