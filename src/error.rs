//! Configuration and input errors
//!
//! Everything that can go wrong before a simulation starts. Once the
//! geometry is accepted, simulation and encoding always succeed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas must have positive, finite dimensions (got {width}x{height})")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("{name} must be positive and finite (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("paddle width {paddle_width} does not fit the playfield interior ({interior})")]
    PaddleTooWide { paddle_width: f32, interior: f32 },
    #[error("paddle y {paddle_y} must lie inside the canvas (height {height})")]
    PaddleOutOfBounds { paddle_y: f32, height: f32 },
    #[error("ball must start above the paddle (ball bottom {ball_bottom}, paddle top {paddle_y})")]
    BallBelowPaddle { ball_bottom: f32, paddle_y: f32 },
    #[error("ball does not fit between the walls")]
    BallTooLarge,
    #[error("frame cap must be at least 1")]
    ZeroFrameCap,
    #[error("palette needs exactly 5 colors (got {0})")]
    PaletteSize(usize),
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("unknown palette: {0}")]
    UnknownPalette(String),
}
