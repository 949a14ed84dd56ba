//! Generate levels for a gravity sliding-block puzzle
//!
//! Every slide pushes all goal and movable pieces as far as they go
//! towards one edge of a square board; stationary blocks never move. A
//! level is solved when the goal piece `P` rests in the middle of the
//! bottom row. Levels are certified by a breadth-first search that finds
//! the minimum number of slides.
//!
//! # Examples
//! ## Solving a fixed level
//! ```
//! use slide_level::Grid;
//!
//! let rows = "
//! \"P   \",
//! \"  M \",
//! \"    \",
//! \"S  S\",";
//! let grid = Grid::parse_rows(rows.trim()).unwrap();
//! let report = grid.solve();
//! report.print_report();
//! // up, right, down
//! assert_eq!(report.moves(), Some(3));
//! ```
//!
//! ## Generating a level
//! ```
//! use slide_level::{LevelGenerator, Requirements};
//!
//! let mut gen = LevelGenerator::new(Some(5));
//! let level = gen.generate_level(&Requirements::new(5, 3), |_| ()).unwrap();
//! assert!(level.report.moves().unwrap() >= 3);
//! print!("{}", level.grid);
//! ```

use std::thread;
use std::time::Duration;

pub mod grid;
pub mod level_generator;
pub mod moves;
pub mod search;
#[cfg(test)]
mod testing;

pub use grid::{Cell, Grid, Point};
pub use level_generator::{Attempt, GeneratedLevel, LevelGenerator, Requirements};
pub use moves::Direction;
pub use search::{solve, Outcome, SearchLimits, SearchReport};

/// Replay a solution on the terminal
///
/// ## Arguments
/// - `start`: Grid before the first slide.
/// - `path`: Slides to apply.
/// - `step_ms`: Time step for each frame, milliseconds.
pub fn playback(start: &Grid, path: &[Direction], step_ms: u64) {
    fn print_frame(grid: &Grid, caption: &str) {
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", caption);
        print!("{}", grid);
    }

    let mut grid = start.clone();
    print_frame(&grid, "start");

    for (step, direction) in path.iter().enumerate() {
        thread::sleep(Duration::from_millis(step_ms));
        grid.slide_in_place(*direction);
        print_frame(&grid, &format!("{}: {}", step + 1, direction));
    }
}
