//! Terminal animation of the robot walking its path.
use crossterm::{cursor, queue, terminal};
use log::trace;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::obstacle_grid::ObstacleGrid;
use crate::{Cell, START};

const ROBOT: &str = "🤖";
const OBSTACLE: &str = "🚫";
const DOOR: &str = "🚪";
const EMPTY: &str = "⬛";

pub const NO_PATH_MESSAGE: &str = "NO PATH FOUND TO TARGET";
pub const REACHED_MESSAGE: &str = "Reached target";

/// Draws one frame: a glyph per cell, rows top to bottom, followed by a blank line. The robot
/// is drawn over anything else, then obstacles, then the target.
pub fn frame(grid: &ObstacleGrid, target: Cell, robot: Cell) -> String {
    let size = grid.size() as i32;
    let mut out = String::new();
    for y in 0..size {
        for x in 0..size {
            let cell = Cell::new(x, y);
            let glyph = if cell == robot {
                ROBOT
            } else if grid.is_blocked(cell) {
                OBSTACLE
            } else if cell == target {
                DOOR
            } else {
                EMPTY
            };
            out.push_str(glyph);
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Writes frames to a terminal (or any writer), pausing `frame_delay` after each one.
pub struct TerminalRenderer<W: Write> {
    out: W,
    frame_delay: Duration,
    clear_screen: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(frame_delay: Duration) -> Self {
        TerminalRenderer::new(io::stdout(), frame_delay)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, frame_delay: Duration) -> Self {
        TerminalRenderer {
            out,
            frame_delay,
            clear_screen: true,
        }
    }

    /// Configure whether the screen is cleared before each frame.
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, grid: &ObstacleGrid, target: Cell, robot: Cell) -> io::Result<()> {
        if self.clear_screen {
            queue!(
                self.out,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        self.out.write_all(frame(grid, target, robot).as_bytes())?;
        self.out.flush()
    }

    /// Announces that a path to the target was found.
    pub fn reached(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", REACHED_MESSAGE)?;
        self.out.flush()
    }

    /// Shows the robot on each cell of `path` in turn.
    pub fn animate(&mut self, grid: &ObstacleGrid, target: Cell, path: &[Cell]) -> io::Result<()> {
        for (step, &cell) in path.iter().enumerate() {
            trace!("Frame {} of {}: robot at {}", step + 1, path.len(), cell);
            self.draw(grid, target, cell)?;
            if !self.frame_delay.is_zero() {
                thread::sleep(self.frame_delay);
            }
        }
        Ok(())
    }

    /// Shows the starting grid once and reports that the target cannot be reached.
    pub fn no_path(&mut self, grid: &ObstacleGrid, target: Cell) -> io::Result<()> {
        let mut text = frame(grid, target, START);
        text.push_str(NO_PATH_MESSAGE);
        text.push('\n');
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}
