//! Simulation and animation tuning
//!
//! One immutable value passed into the mapper, simulator and encoder.
//! Defaults come from [`crate::consts`]; any field may be overridden from a
//! JSON file or the command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Grid ===
    /// Edge length of one day cell
    pub cell_size: f32,
    /// Space between neighbouring cells
    pub cell_gap: f32,
    /// Inset of the playfield from every canvas edge
    pub padding: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Distance travelled per frame (never changes during a run)
    pub ball_speed: f32,
    /// Launch height, measured up from the canvas bottom
    pub ball_start_offset: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle and the bottom padding
    pub paddle_margin: f32,
    /// Empty space between the last brick row and the paddle lane
    pub brick_clearance: f32,

    // === Timing ===
    /// Hard cap on simulated frames
    pub max_frames: u32,
    pub seconds_per_frame: f32,

    // === Effects ===
    pub particle_count: u32,
    /// How far fragments travel from the brick center
    pub particle_distance: f32,
    pub particle_radius: f32,
    /// Wall-clock length of a burst before it fades out
    pub burst_seconds: f32,
    /// Opacity of bricks the ball passes through in ghost mode
    pub ghost_opacity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            cell_gap: CELL_GAP,
            padding: PADDING,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_start_offset: BALL_START_OFFSET,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            brick_clearance: BRICK_CLEARANCE,

            max_frames: MAX_FRAMES,
            seconds_per_frame: SECONDS_PER_FRAME,

            particle_count: PARTICLE_COUNT,
            particle_distance: PARTICLE_DISTANCE,
            particle_radius: PARTICLE_RADIUS,
            burst_seconds: BURST_SECONDS,
            ghost_opacity: GHOST_OPACITY,
        }
    }
}

impl Config {
    /// Load a (possibly partial) config from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every size and rate that the simulator divides by or moves with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("cell_size", self.cell_size),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("ball_start_offset", self.ball_start_offset),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("seconds_per_frame", self.seconds_per_frame),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let non_negative = [
            ("cell_gap", self.cell_gap),
            ("padding", self.padding),
            ("paddle_margin", self.paddle_margin),
            ("brick_clearance", self.brick_clearance),
            ("particle_distance", self.particle_distance),
            ("particle_radius", self.particle_radius),
            ("burst_seconds", self.burst_seconds),
            ("ghost_opacity", self.ghost_opacity),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.max_frames == 0 {
            return Err(ConfigError::ZeroFrameCap);
        }
        Ok(())
    }

    /// Horizontal distance between the left edges of neighbouring cells
    #[inline]
    pub fn cell_pitch(&self) -> f32 {
        self.cell_size + self.cell_gap
    }
}
