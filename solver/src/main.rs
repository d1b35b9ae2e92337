use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;

use tiltboard::{input, SearchLimits, Solver};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Find the shortest tilt sequences which sink every ball", long_about = None)]
struct Args {
    /// File containing the table: size, ball count and wall count, then balls, holes and walls
    #[clap(short, long)]
    file: PathBuf,

    /// Show the table, its roll graph and search statistics
    #[clap(short, long)]
    debug: bool,

    /// Give up on sequences longer than this
    #[clap(long)]
    max_moves: Option<usize>,

    /// Stop searching after this many milliseconds
    #[clap(long)]
    time_limit: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let board = input::parse(&text)?;

    let mut limits = SearchLimits::default();
    if let Some(max_moves) = args.max_moves {
        limits = limits.with_max_moves(max_moves);
    }
    if let Some(millis) = args.time_limit {
        limits = limits.with_time_limit(Duration::from_millis(millis));
    }

    let solver = Solver::new(&board, limits);
    if args.debug {
        println!("{}", board);
        println!("{}", solver.graph());
    }

    let started = Instant::now();
    let solution = solver.solve().map_err(|failure| anyhow::anyhow!("solver failure: {:?}", failure))?;
    if args.debug {
        print!("{}", solution.stats());
        println!("solved in {:?}\n", started.elapsed());
    }

    if solution.is_empty() {
        if solution.is_exhaustive() {
            bail!("the table cannot be cleared");
        }
        bail!("no solution found within the given limits");
    }

    if !solution.is_exhaustive() {
        log::warn!("search was cut short; more solutions of the same length may exist");
    }

    print!("{}", solution);
    Ok(())
}
