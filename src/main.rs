//! CLI for level generation

use std::num::NonZeroUsize;

use clap::Parser;
use slide_level::{LevelGenerator, Requirements, SearchLimits};

/// Generate a sliding-block level that needs at least `min_moves` slides
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board side length
    size: NonZeroUsize,

    /// Minimum number of moves the level must require
    min_moves: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many generated levels
    #[arg(long, default_value_t = Requirements::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Abort any single search after this many distinct states
    #[arg(long)]
    max_states: Option<usize>,
}

/// Generate levels until one is hard enough, print it
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.use_stderr() => {
            // Bad arguments: show usage and quit without generating
            print!("{}", err.render());
            return Ok(());
        }
        Err(err) => err.exit(),
    };

    let requirements = Requirements {
        max_attempts: args.max_attempts,
        limits: SearchLimits {
            max_states: args.max_states,
        },
        ..Requirements::new(args.size.get(), args.min_moves)
    };

    let mut gen = LevelGenerator::new(args.seed);
    let level = gen.generate_level(&requirements, |attempt| attempt.report.print_report())?;

    print!("{}", level.grid);
    println!();
    Ok(())
}
