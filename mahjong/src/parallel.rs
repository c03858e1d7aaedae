//! Parallel Monte-Carlo simulation over independent rounds.
//!
//! The supervisor draws one seed per round from its own generator and hands
//! the seeds to rayon workers. Each worker deals and plays a whole round from
//! its seed alone, so workers share nothing and the results, sorted back
//! into serial order, do not depend on the thread count.

use mahjong_engine::{Game, GameConfig, GameError, Policy, PolicyKind, RoundOutcome, N_SEATS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Duration;

/// Settings for a simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of rounds to play
    pub rounds: usize,
    /// Seed for the per-round seed generator
    pub seed: u64,
    /// Number of worker threads (0 = auto-detect)
    pub num_threads: usize,
    /// Rounds handed to the pool at once (0 = auto)
    pub batch_size: usize,
    /// Policy used by every seat
    pub policy: PolicyKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            rounds: 1000,
            seed: 0,
            num_threads: 0,
            batch_size: 0,
            policy: PolicyKind::TileCount,
        }
    }
}

impl SimConfig {
    pub fn actual_threads(&self) -> usize {
        if self.num_threads > 0 {
            self.num_threads
        } else {
            rayon::current_num_threads()
        }
    }

    pub fn actual_batch_size(&self) -> usize {
        if self.batch_size > 0 {
            self.batch_size
        } else {
            self.actual_threads() * 64
        }
    }
}

/// A seed and the serial number it was issued under
#[derive(Clone, Copy)]
struct WorkUnit {
    serial_number: u64,
    seed: u64,
}

/// Result of one simulated round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub serial_number: u64,
    pub outcome: RoundOutcome,
    /// Capped round score per seat
    pub awarded: [u32; N_SEATS],
}

pub struct Supervisor {
    generator: ChaCha8Rng,
    policy: PolicyKind,
    next_serial: u64,
}

impl Supervisor {
    pub fn new(config: &SimConfig) -> Self {
        if config.num_threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.num_threads)
                .build_global()
                .ok(); // Pool may already be initialized
        }

        Supervisor {
            generator: ChaCha8Rng::seed_from_u64(config.seed),
            policy: config.policy,
            next_serial: 0,
        }
    }

    fn generate_batch(&mut self, count: usize) -> Vec<WorkUnit> {
        let mut units = Vec::with_capacity(count);
        for _ in 0..count {
            units.push(WorkUnit {
                serial_number: self.next_serial,
                seed: self.generator.random(),
            });
            self.next_serial += 1;
        }
        units
    }

    /// Play `count` rounds in parallel, results in serial order
    pub fn process_batch(&mut self, count: usize) -> Result<Vec<RoundResult>, GameError> {
        let policy = self.policy;
        let units = self.generate_batch(count);

        let mut results = units
            .into_par_iter()
            .map(|unit| simulate_round(unit, policy))
            .collect::<Result<Vec<_>, _>>()?;

        results.sort_by_key(|r| r.serial_number);
        Ok(results)
    }
}

fn simulate_round(unit: WorkUnit, policy: PolicyKind) -> Result<RoundResult, GameError> {
    let policies: [Box<dyn Policy>; N_SEATS] =
        std::array::from_fn(|seat| policy.build(unit.seed.wrapping_add(seat as u64 + 1)));
    let mut game = Game::new(GameConfig::with_seed(unit.seed), policies)?;
    let settlement = game.play_round()?;
    Ok(RoundResult {
        serial_number: unit.serial_number,
        outcome: settlement.outcome,
        awarded: settlement.awarded,
    })
}

/// Totals over a simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    pub rounds: u64,
    pub wins: [u64; N_SEATS],
    pub exhausted: u64,
    pub wall_wins: u64,
    pub total_awarded: [u64; N_SEATS],
}

impl SimStats {
    pub fn record(&mut self, result: &RoundResult) {
        self.rounds += 1;
        match result.outcome {
            RoundOutcome::Win { seat, source } => {
                self.wins[seat] += 1;
                if source == mahjong_engine::TileSource::Wall {
                    self.wall_wins += 1;
                }
            }
            RoundOutcome::Exhausted => self.exhausted += 1,
        }
        for (total, &awarded) in self.total_awarded.iter_mut().zip(&result.awarded) {
            *total += u64::from(awarded);
        }
    }

    pub fn average_score(&self, seat: usize) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.total_awarded[seat] as f64 / self.rounds as f64
    }

    /// Print the summary to stderr
    pub fn report(&self, elapsed: Duration) {
        eprintln!("Simulated {} rounds", self.rounds);
        for seat in 0..N_SEATS {
            eprintln!(
                "  Player {}: {:>6} wins, average score {:.1}",
                seat,
                self.wins[seat],
                self.average_score(seat)
            );
        }
        eprintln!(
            "  Exhausted: {}, won from the wall: {}",
            self.exhausted, self.wall_wins
        );
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            eprintln!(
                "Time: {:.2}s ({:.0} rounds/sec)",
                secs,
                self.rounds as f64 / secs
            );
        }
    }
}

/// Run the whole simulation, batch by batch
pub fn run(config: &SimConfig) -> Result<SimStats, GameError> {
    let mut supervisor = Supervisor::new(config);
    let batch_size = config.actual_batch_size();
    let mut stats = SimStats::default();
    let mut remaining = config.rounds;

    log::info!(
        "simulating {} rounds on {} threads, policy {}",
        config.rounds,
        config.actual_threads(),
        config.policy
    );

    while remaining > 0 {
        let count = remaining.min(batch_size);
        for result in supervisor.process_batch(count)? {
            stats.record(&result);
        }
        remaining -= count;
    }
    Ok(stats)
}
