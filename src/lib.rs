//! Calendar Breakout - a contribution calendar as a self-playing brick breaker
//!
//! Core modules:
//! - `grid`: Activity grid input and the grid-to-brick mapping
//! - `sim`: Deterministic simulation (ball, paddle, brick collisions)
//! - `anim`: Keyframe encoding of a recorded run
//! - `svg`: SMIL markup for the encoded animation
//! - `palette`: Brick palettes and scene colors
//! - `platform`: Browser bindings

pub mod anim;
pub mod config;
pub mod error;
pub mod grid;
pub mod palette;
pub mod platform;
pub mod sim;
pub mod svg;

pub use anim::{Animation, encode};
pub use config::Config;
pub use error::ConfigError;
pub use grid::{CalendarGrid, Cell, bricks_from_grid, layout_for_columns};
pub use palette::{Color, Colors, Palette, PaletteChoice, PalettePreset};
pub use sim::{Geometry, Simulation, Termination, simulate};

/// Default tuning; see [`Config`] for what each value means
pub mod consts {
    /// Grid cells
    pub const CELL_SIZE: f32 = 12.0;
    pub const CELL_GAP: f32 = 3.0;
    pub const PADDING: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Pixels per frame
    pub const BALL_SPEED: f32 = 10.0;
    pub const BALL_START_OFFSET: f32 = 60.0;
    /// Launch direction (radians, screen space with y down)
    pub const LAUNCH_ANGLE: f32 = -std::f32::consts::FRAC_PI_4;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_MARGIN: f32 = 10.0;
    pub const BRICK_CLEARANCE: f32 = 100.0;

    /// Safety bound on run length (~11 minutes at 30 fps)
    pub const MAX_FRAMES: u32 = 20_000;
    pub const SECONDS_PER_FRAME: f32 = 1.0 / 30.0;

    /// Brick burst
    pub const PARTICLE_COUNT: u32 = 8;
    pub const PARTICLE_DISTANCE: f32 = 20.0;
    pub const PARTICLE_RADIUS: f32 = 1.5;
    pub const BURST_SECONDS: f32 = 0.5;

    pub const GHOST_OPACITY: f32 = 0.35;
}

/// How to turn a grid into an animation
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Let the ball pass through days without activity
    pub ghost_mode: bool,
    pub palette: PaletteChoice,
    /// Explicit canvas; sized from the grid when `None`
    pub geometry: Option<Geometry>,
    pub config: Config,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ghost_mode: true,
            palette: PaletteChoice::default(),
            geometry: None,
            config: Config::default(),
        }
    }
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct Rendered {
    pub geometry: Geometry,
    pub simulation: Simulation,
    pub animation: Animation,
    pub palette: Palette,
    pub colors: Colors,
}

impl Rendered {
    pub fn to_svg(&self, config: &Config) -> String {
        svg::write_svg(&self.animation, &self.geometry, &self.colors, config)
    }
}

/// Map, simulate and encode. Only configuration problems are errors; a run
/// truncated by the frame cap still succeeds (see [`Simulation::hit_frame_cap`]).
pub fn run(grid: &CalendarGrid, options: &RunOptions) -> Result<Rendered, ConfigError> {
    let config = &options.config;
    config.validate()?;

    let palette = options.palette.resolve(grid)?;
    let colors = options.palette.colors();
    let geometry = options
        .geometry
        .unwrap_or_else(|| layout_for_columns(grid.columns(), config));

    let bricks = bricks_from_grid(grid, config);
    let simulation = simulate(&bricks, &geometry, options.ghost_mode, config)?;
    let animation = encode(
        &simulation.frames,
        &bricks,
        &palette,
        &colors,
        options.ghost_mode,
        config,
    );

    Ok(Rendered {
        geometry,
        simulation,
        animation,
        palette,
        colors,
    })
}

/// [`run`], then write the SVG
pub fn render_svg(grid: &CalendarGrid, options: &RunOptions) -> Result<String, ConfigError> {
    Ok(run(grid, options)?.to_svg(&options.config))
}
