//! CLI for level solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use slide_level::{playback, solve, Grid, Outcome, SearchLimits};

/// Minimum number of slides that solve a rendered level
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the slides of one shortest solution
    #[arg(long)]
    path: bool,

    /// Display solution on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 300)]
    frame_length: u64,

    /// Abort the search after this many distinct states
    #[arg(long)]
    max_states: Option<usize>,

    /// File, where to read the level. Use `-` for stdin.
    file: PathBuf,
}

/// Read level from file, print output
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rows = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Could not read {}", args.file.display()))?
    };
    let grid = Grid::parse_rows(&rows)?;
    let report = solve(
        &grid,
        &SearchLimits {
            max_states: args.max_states,
        },
    );

    if let Outcome::Solved { path, .. } = &report.outcome {
        if args.playback {
            playback(&grid, path, args.frame_length);
            return Ok(());
        }
        if args.path {
            println!("Solution: {}", path.iter().join(", "));
        }
    }
    report.print_report();
    Ok(())
}
