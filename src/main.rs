//! Calendar Breakout entry point
//!
//! Reads a contribution grid from JSON and writes the looping SVG.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use calendar_breakout::{CalendarGrid, Config, PaletteChoice, RunOptions, run};
    use clap::Parser;

    /// Turn a contribution calendar into a self-playing brick breaker SVG.
    #[derive(Debug, Parser)]
    #[command(
        name = "calendar-breakout",
        version,
        about = "Turn a contribution calendar into a self-playing brick breaker SVG.",
        long_about = "Reads a grid of week columns ({\"weeks\": [[{\"level\": 0-4, \"count\": n, \"color\": \"#hex\"} | null, ...], ...]}) \
            and simulates a ball and paddle clearing every day as a brick. The run is recorded \
            frame by frame and written as an SVG that loops forever.\n\n\
            Set RUST_LOG=debug for a simulation summary."
    )]
    pub struct Args {
        /// Grid JSON file
        #[arg(value_name = "GRID")]
        pub grid: PathBuf,

        /// Output SVG path (stdout if not set)
        #[arg(short, long, value_name = "FILE")]
        pub output: Option<PathBuf>,

        /// Brick palette: derived (from the grid), light, dark, or five comma-separated hex colors.
        #[arg(short, long, default_value = "derived")]
        pub palette: String,

        /// Let the ball bounce off days without activity instead of passing through them.
        #[arg(long)]
        pub no_ghost: bool,

        /// JSON config file; missing fields use defaults.
        #[arg(short, long, value_name = "FILE")]
        pub config: Option<PathBuf>,

        /// Hard cap on simulated frames.
        #[arg(long, value_name = "N")]
        pub max_frames: Option<u32>,

        /// Playback time per simulated frame.
        #[arg(long, value_name = "SECONDS")]
        pub seconds_per_frame: Option<f32>,

        /// Also write every frame snapshot as JSON (for debugging).
        #[arg(long, value_name = "FILE")]
        pub dump_frames: Option<PathBuf>,
    }

    fn load_config(args: &Args) -> Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(n) = args.max_frames {
            config.max_frames = n;
        }
        if let Some(s) = args.seconds_per_frame {
            config.seconds_per_frame = s;
        }
        Ok(config)
    }

    pub fn main() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let json = std::fs::read_to_string(&args.grid)
            .with_context(|| format!("reading grid {}", args.grid.display()))?;
        let grid: CalendarGrid = serde_json::from_str(&json)
            .with_context(|| format!("parsing grid {}", args.grid.display()))?;
        log::info!(
            "Loaded {} weeks, {} days",
            grid.columns(),
            grid.cells().count()
        );

        let options = RunOptions {
            ghost_mode: !args.no_ghost,
            palette: PaletteChoice::from_str(&args.palette)?,
            geometry: None,
            config: load_config(&args)?,
        };
        let rendered = run(&grid, &options)?;

        let sim = &rendered.simulation;
        log::info!(
            "Simulated {} frames, {} bricks broken ({:?}), {:.1}s loop",
            sim.frames.len(),
            sim.hits(),
            sim.termination,
            rendered.animation.duration
        );
        if sim.hit_frame_cap() {
            log::warn!("Animation truncated at {} frames", options.config.max_frames);
        }

        if let Some(path) = &args.dump_frames {
            let dump = serde_json::to_string(&sim.frames)?;
            std::fs::write(path, dump)
                .with_context(|| format!("writing frames {}", path.display()))?;
            log::info!("Frames written to {}", path.display());
        }

        let svg = rendered.to_svg(&options.config);
        match &args.output {
            Some(path) => {
                std::fs::write(path, &svg)
                    .with_context(|| format!("writing {}", path.display()))?;
                log::info!("SVG written to {} ({} bytes)", path.display(), svg.len());
            }
            None => print!("{}", svg),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
