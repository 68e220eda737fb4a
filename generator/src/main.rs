use std::num::NonZero;

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pipelayer::{randomize_level, Difficulty, LevelBuilder, DEFAULT_DIMS};

/// Generate a pipe puzzle and print it scrambled.
#[derive(Parser)]
#[command(name = "generator", version, about)]
struct Cli {
    /// Playable rows
    #[arg(long, default_value_t = DEFAULT_DIMS.0)]
    rows: NonZero<usize>,
    /// Playable columns
    #[arg(long, default_value_t = DEFAULT_DIMS.1)]
    cols: NonZero<usize>,
    /// Seed for a reproducible board; random when absent
    #[arg(long)]
    seed: Option<u64>,
    /// Shuffle intensity preset
    #[arg(long, default_value_t = Difficulty::default())]
    difficulty: Difficulty,
    /// Explicit share of tiles to scramble, overriding the difficulty
    #[arg(long)]
    mutation_fraction: Option<f64>,
    /// Give up after this many fresh generation attempts
    #[arg(long)]
    max_attempts: Option<NonZero<usize>>,
    /// Also print the solved board
    #[arg(long)]
    solved: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut builder = LevelBuilder::with_dims((cli.rows, cli.cols));
    if let Some(attempts) = cli.max_attempts {
        builder.max_attempts(attempts);
    }
    if let Some(reasons) = builder.is_valid() {
        bail!("invalid level settings: {:?}", reasons);
    }

    let solved = builder.build(&mut rng)?;
    if cli.solved {
        println!("{}", solved);
    }

    let fraction = cli.mutation_fraction.unwrap_or(cli.difficulty.mutation_fraction());
    let scrambled = randomize_level(&solved, fraction, &mut rng)?;
    print!("{}", scrambled);
    println!("complete: {}", scrambled.is_complete());

    Ok(())
}
