mod console;
mod display;
mod parallel;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mahjong_engine::PolicyKind;
use parallel::SimConfig;
use repl::Repl;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(name = "mahjong")]
#[command(about = "Four-player Mahjong simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play at an interactive table
    Play {
        /// Seat controlled from the terminal (omit to watch the policies play)
        #[arg(long = "human-seat")]
        human_seat: Option<usize>,

        /// Random seed (defaults to current time)
        #[arg(short = 's', long = "seed")]
        seed: Option<u64>,

        /// Policy for the other seats
        #[arg(long = "policy", default_value = "tile_count")]
        policy: PolicyKind,

        /// Worker threads for the sim command (0 = auto)
        #[arg(short = 't', long = "threads", default_value = "0")]
        threads: usize,
    },
    /// Simulate rounds in parallel and print statistics
    Sim {
        /// Number of rounds to simulate
        #[arg(short = 'n', long = "rounds", default_value = "1000")]
        rounds: usize,

        /// Random seed (defaults to current time)
        #[arg(short = 's', long = "seed")]
        seed: Option<u64>,

        /// Number of worker threads (0 = auto)
        #[arg(short = 't', long = "threads", default_value = "0")]
        threads: usize,

        /// Rounds per parallel batch (0 = auto)
        #[arg(long = "batch-size", default_value = "0")]
        batch_size: usize,

        /// Policy for every seat
        #[arg(long = "policy", default_value = "tile_count")]
        policy: PolicyKind,
    },
}

/// Current time in microseconds
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            human_seat,
            seed,
            policy,
            threads,
        } => {
            let seed = seed.unwrap_or_else(time_seed);
            let mut repl = Repl::new(seed, policy, human_seat, threads)
                .context("Failed to set up the table")?;
            repl.run().context("Failed to read from the terminal")?;
        }
        Command::Sim {
            rounds,
            seed,
            threads,
            batch_size,
            policy,
        } => {
            let config = SimConfig {
                rounds,
                seed: seed.unwrap_or_else(time_seed),
                num_threads: threads,
                batch_size,
                policy,
            };
            eprintln!(
                "Seed {}, {} threads, policy {}",
                config.seed,
                config.actual_threads(),
                config.policy
            );
            let start = Instant::now();
            let stats = parallel::run(&config).context("Simulation failed")?;
            stats.report(start.elapsed());
        }
    }
    Ok(())
}
