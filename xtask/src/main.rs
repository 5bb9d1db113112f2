// Host tooling: unwrap/expect/panic acceptable outside the engine crates.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod shuffle;
mod walk;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Navigation engine development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a local music folder in navigation order
    Walk(walk::WalkArgs),
    /// Print one full shuffle cycle and check its coverage
    Shuffle {
        /// Number of positions in the cycle
        #[arg(long)]
        period: u16,
        /// Seed of the generator's random source
        #[arg(long, default_value_t = navigation::NavConfig::DEFAULT_SEED)]
        seed: u64,
    },
    /// Run all tests (unit, integration and doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Walk(args) => walk::run(&args),
        Commands::Shuffle { period, seed } => shuffle::run(period, seed),
        Commands::Test { unit, integration } => test::run(unit, integration),
    }
}
