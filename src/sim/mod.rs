//! Deterministic simulation module
//!
//! The brick-breaker game itself. This module must be pure and deterministic:
//! - One tick per animation frame, no sub-stepping
//! - No RNG and no wall-clock time
//! - Stable iteration order (brick order from the grid mapper)
//! - No rendering or I/O

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circle_rect_intersects, first_brick_hit};
pub use state::{Ball, Brick, BrickStatus, FrameSnapshot, Geometry, Paddle};
pub use tick::{SimState, Simulation, Termination, simulate, tick};
