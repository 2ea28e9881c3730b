//! Fixed-step simulation
//!
//! One call to [`tick`] is one animation frame. [`simulate`] runs ticks until
//! every clearable brick is gone or the frame cap is hit, recording a
//! snapshot after each one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{crosses_paddle, first_brick_hit, wall_contact};
use super::state::{Ball, Brick, BrickStatus, FrameSnapshot, Geometry, Paddle};
use crate::config::Config;
use crate::error::ConfigError;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No bricks to begin with; nothing was simulated
    Empty,
    /// Every clearable brick was destroyed
    Cleared,
    /// The frame cap truncated the run
    FrameCap,
}

/// Output of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub frames: Vec<FrameSnapshot>,
    pub termination: Termination,
}

impl Simulation {
    pub fn hit_frame_cap(&self) -> bool {
        self.termination == Termination::FrameCap
    }

    /// Number of bricks destroyed over the whole run
    pub fn hits(&self) -> usize {
        self.frames.iter().filter(|f| f.hit.is_some()).count()
    }
}

/// Mutable state for one run
#[derive(Debug, Clone)]
pub struct SimState {
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    /// Clearable bricks still standing
    pub remaining: usize,
    pub ghost_mode: bool,
}

impl SimState {
    pub fn new(bricks: &[Brick], geometry: &Geometry, config: &Config, ghost_mode: bool) -> Self {
        let bricks = bricks.to_vec();
        let remaining = bricks.iter().filter(|b| b.is_clearable(ghost_mode)).count();
        Self {
            ball: Ball::launch(geometry, config),
            paddle: Paddle::centered(geometry, config),
            bricks,
            remaining,
            ghost_mode,
        }
    }

    /// Deep copy of everything a frame shows
    pub fn snapshot(&self, hit: Option<usize>) -> FrameSnapshot {
        FrameSnapshot {
            ball_x: self.ball.pos.x,
            ball_y: self.ball.pos.y,
            paddle_x: self.paddle.x,
            brick_statuses: self.bricks.iter().map(|b| b.status).collect(),
            hit,
        }
    }
}

/// Advance the state by one frame. Returns the index of the brick destroyed
/// this frame, if any.
///
/// Order: paddle tracks the pre-move ball, the move is projected, walls and
/// paddle are checked against the projection, the move is committed, bricks
/// are checked, and any wall overshoot is folded back into the playfield.
pub fn tick(state: &mut SimState, geometry: &Geometry, config: &Config) -> Option<usize> {
    state.paddle.track(state.ball.pos.x, geometry, config);

    let radius = state.ball.radius;
    let mut next = state.ball.pos + state.ball.vel;

    let contact = wall_contact(next, radius, geometry, config);
    if contact.side {
        state.ball.vel.x = -state.ball.vel.x;
    }
    if contact.top {
        state.ball.vel.y = -state.ball.vel.y;
    }

    if crosses_paddle(&state.ball, next, &state.paddle) {
        // Force upward rather than flip, so a second contact can't send it back down
        state.ball.vel.y = -state.ball.vel.y.abs();
        next.y = state.paddle.y - radius;
    }

    state.ball.pos = next;

    let hit = first_brick_hit(
        state.ball.pos,
        radius,
        &state.bricks,
        config.cell_size,
        state.ghost_mode,
    );
    if let Some(index) = hit {
        state.ball.vel.y = -state.ball.vel.y;
        state.bricks[index].status = BrickStatus::Hidden;
        state.remaining -= 1;
        log::trace!("brick {} destroyed, {} left", index, state.remaining);
    }

    state.ball.pos = fold_into_playfield(state.ball.pos, geometry, config);

    hit
}

/// Reflect an overshoot past a side or the top wall back across that wall,
/// then clamp. A corner bounce never leaves the ball parked on the corner.
fn fold_into_playfield(pos: Vec2, geometry: &Geometry, config: &Config) -> Vec2 {
    let (min_x, max_x) = geometry.ball_x_range(config);
    let (min_y, max_y) = geometry.ball_y_range(config);

    let mut folded = pos;
    if folded.x < min_x {
        folded.x = 2.0 * min_x - folded.x;
    } else if folded.x > max_x {
        folded.x = 2.0 * max_x - folded.x;
    }
    if folded.y < min_y {
        folded.y = 2.0 * min_y - folded.y;
    }
    Vec2::new(folded.x.clamp(min_x, max_x), folded.y.clamp(min_y, max_y))
}

/// Run the game to completion and record every frame.
///
/// A run that starts with no clearable bricks (ghost mode with only inactive
/// days) can't clear and bounces until the frame cap.
pub fn simulate(
    bricks: &[Brick],
    geometry: &Geometry,
    ghost_mode: bool,
    config: &Config,
) -> Result<Simulation, ConfigError> {
    geometry.validate(config)?;

    if bricks.is_empty() {
        log::debug!("no bricks, nothing to simulate");
        return Ok(Simulation {
            frames: Vec::new(),
            termination: Termination::Empty,
        });
    }

    let mut state = SimState::new(bricks, geometry, config, ghost_mode);
    let can_clear = state.remaining > 0;
    let cap = config.max_frames as usize;
    let mut frames = Vec::new();

    let termination = loop {
        if can_clear && state.remaining == 0 {
            break Termination::Cleared;
        }
        if frames.len() >= cap {
            log::warn!(
                "frame cap {} reached with {} clearable bricks left",
                cap,
                state.remaining
            );
            break Termination::FrameCap;
        }
        let hit = tick(&mut state, geometry, config);
        frames.push(state.snapshot(hit));
    };

    log::debug!(
        "simulated {} frames over {} bricks ({:?})",
        frames.len(),
        bricks.len(),
        termination
    );
    Ok(Simulation {
        frames,
        termination,
    })
}
