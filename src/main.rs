//! Plans a route for the robot from the top-left to the bottom-right corner of the grid,
//! avoiding the obstacles listed in a CSV file, and animates it in the terminal.
//!
//! ```bash
//! # Obstacles from ./obstacle.csv, 500 ms per frame
//! cargo run --release
//!
//! # Another file, faster animation, with debug logging
//! RUST_LOG=debug cargo run --release -- --obstacles maze.csv --frame-delay-ms 100
//! ```
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use robot_pathfinding::config::{DEFAULT_FRAME_DELAY_MS, DEFAULT_OBSTACLE_FILE};
use robot_pathfinding::{
    load_obstacles, Plan, Planner, PlannerConfig, TerminalRenderer, Termination, GRID_SIZE,
    START, TARGET,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TerminationArg {
    /// Stop once the target is settled (always optimal)
    Settle,
    /// Stop on the first improvement of the target's cost
    Relax,
}

impl From<TerminationArg> for Termination {
    fn from(arg: TerminationArg) -> Self {
        match arg {
            TerminationArg::Settle => Termination::OnSettle,
            TerminationArg::Relax => Termination::OnRelax,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Animate the shortest robot path through a grid of obstacles")]
struct Args {
    /// CSV file with a header row and one `x,y` obstacle per row
    #[arg(short, long, default_value = DEFAULT_OBSTACLE_FILE)]
    obstacles: PathBuf,

    /// Pause after each animation frame, in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    frame_delay_ms: u64,

    /// When the search may stop after seeing the target
    #[arg(long, value_enum, default_value_t = TerminationArg::Settle)]
    termination: TerminationArg,

    /// Do not clear the terminal between frames
    #[arg(long)]
    no_clear: bool,
}

impl From<Args> for PlannerConfig {
    fn from(args: Args) -> Self {
        PlannerConfig {
            obstacles: args.obstacles,
            frame_delay: Duration::from_millis(args.frame_delay_ms),
            termination: args.termination.into(),
            clear_screen: !args.no_clear,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config = PlannerConfig::from(Args::parse());
    info!("Configuration: {:?}", config);

    let grid = load_obstacles(&config.obstacles, GRID_SIZE).with_context(|| {
        format!(
            "failed to load obstacles from {}",
            config.obstacles.display()
        )
    })?;
    let planner = Planner::new(grid).with_termination(config.termination);

    let mut renderer =
        TerminalRenderer::stdout(config.frame_delay).with_clear_screen(config.clear_screen);
    match planner.plan(START, TARGET) {
        Plan::Path { cells, cost } => {
            info!("Animating {} cells, cost {:.3}", cells.len(), cost);
            renderer.reached().context("failed to write to the terminal")?;
            renderer
                .animate(planner.grid(), TARGET, &cells)
                .context("failed to draw the path")?;
        }
        Plan::NoPath => {
            renderer
                .no_path(planner.grid(), TARGET)
                .context("failed to draw the grid")?;
        }
    }
    Ok(())
}
