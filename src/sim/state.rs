//! Simulation entities and frame snapshots
//!
//! Everything mutable lives only for one `simulate` call. Snapshots are deep
//! copies and never borrow from the running state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ConfigError;

/// Whether a brick still blocks the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickStatus {
    Visible,
    Hidden,
}

/// A brick: one day cell as a static rectangular collider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub x: f32,
    pub y: f32,
    /// Intensity bucket 0..=4, looked up in the palette when drawing
    pub color_bucket: u8,
    /// The day had at least one contribution
    pub active: bool,
    pub status: BrickStatus,
}

impl Brick {
    pub fn new(x: f32, y: f32, color_bucket: u8, active: bool) -> Self {
        Self {
            x,
            y,
            color_bucket,
            active,
            status: BrickStatus::Visible,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.status == BrickStatus::Visible
    }

    /// Can the ball still hit this brick? In ghost mode, inactive bricks are
    /// passed through.
    #[inline]
    pub fn is_clearable(&self, ghost_mode: bool) -> bool {
        self.is_visible() && (self.active || !ghost_mode)
    }

    pub fn center(&self, size: f32) -> Vec2 {
        Vec2::new(self.x + size / 2.0, self.y + size / 2.0)
    }
}

/// Canvas size and paddle lane for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Top edge of the paddle
    pub paddle_y: f32,
}

impl Geometry {
    /// Reject any geometry the simulation can't run in
    pub fn validate(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;

        let (width, height) = (self.canvas_width, self.canvas_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCanvas { width, height });
        }

        let interior_w = width - 2.0 * config.padding;
        let interior_h = height - 2.0 * config.padding;
        if interior_w < 2.0 * config.ball_radius || interior_h < 2.0 * config.ball_radius {
            return Err(ConfigError::BallTooLarge);
        }
        if config.paddle_width > interior_w {
            return Err(ConfigError::PaddleTooWide {
                paddle_width: config.paddle_width,
                interior: interior_w,
            });
        }

        let paddle_y = self.paddle_y;
        if !(paddle_y.is_finite() && paddle_y > config.padding && paddle_y <= height - config.padding)
        {
            return Err(ConfigError::PaddleOutOfBounds { paddle_y, height });
        }

        let ball_bottom = self.canvas_height - config.ball_start_offset + config.ball_radius;
        if ball_bottom >= paddle_y {
            return Err(ConfigError::BallBelowPaddle {
                ball_bottom,
                paddle_y,
            });
        }
        Ok(())
    }

    /// Left and right limits for the ball center
    #[inline]
    pub fn ball_x_range(&self, config: &Config) -> (f32, f32) {
        (
            config.padding + config.ball_radius,
            self.canvas_width - config.padding - config.ball_radius,
        )
    }

    /// Top and bottom limits for the ball center
    #[inline]
    pub fn ball_y_range(&self, config: &Config) -> (f32, f32) {
        (
            config.padding + config.ball_radius,
            self.canvas_height - config.padding - config.ball_radius,
        )
    }

    /// Left and right limits for the paddle's left edge
    #[inline]
    pub fn paddle_x_range(&self, config: &Config) -> (f32, f32) {
        (
            config.padding,
            self.canvas_width - config.padding - config.paddle_width,
        )
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Launch from mid-canvas, `ball_start_offset` above the bottom, at -45°
    pub fn launch(geometry: &Geometry, config: &Config) -> Self {
        let angle = crate::consts::LAUNCH_ANGLE;
        Self {
            pos: Vec2::new(
                geometry.canvas_width / 2.0,
                geometry.canvas_height - config.ball_start_offset,
            ),
            vel: Vec2::new(angle.cos(), angle.sin()) * config.ball_speed,
            radius: config.ball_radius,
        }
    }
}

/// The paddle. Only x moves, and only by tracking the ball.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn centered(geometry: &Geometry, config: &Config) -> Self {
        Self {
            x: (geometry.canvas_width - config.paddle_width) / 2.0,
            y: geometry.paddle_y,
            width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    /// Center under `ball_x`, kept inside the walls
    pub fn track(&mut self, ball_x: f32, geometry: &Geometry, config: &Config) {
        let (min_x, max_x) = geometry.paddle_x_range(config);
        self.x = (ball_x - self.width / 2.0).clamp(min_x, max_x);
    }
}

/// One tick of visible state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub ball_x: f32,
    pub ball_y: f32,
    pub paddle_x: f32,
    /// Per-brick visibility, in brick order
    pub brick_statuses: Vec<BrickStatus>,
    /// Brick destroyed on this tick
    pub hit: Option<usize>,
}
