//! Multi-round game: owns the current round, the seat policies and the
//! running totals, and handles settlement and wind rotation between rounds.

use crate::round::{Round, RoundOutcome, TurnEvent, N_SEATS};
use crate::{GameError, Policy};
use mahjong_core::{TileSet, Wind};
use mahjong_score::{round_end_score, ScoreBreakdown, SCORE_CAP};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Settings for a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for every shuffle in the game
    pub seed: u64,
    /// Ceiling on each round score added to a running total
    pub score_cap: u32,
    /// Seat that draws first; defaults to the seat holding the East wind
    pub starting_seat: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: 0,
            score_cap: SCORE_CAP,
            starting_seat: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        GameConfig {
            seed,
            ..Default::default()
        }
    }
}

/// Scores of a finished round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: RoundOutcome,
    /// Full-hand score per seat
    pub breakdowns: Vec<ScoreBreakdown>,
    /// Capped amounts added to the running totals
    pub awarded: [u32; N_SEATS],
}

pub struct Game {
    config: GameConfig,
    round: Round,
    policies: [Box<dyn Policy>; N_SEATS],
    scores: [u64; N_SEATS],
    wins: [u32; N_SEATS],
    exhausted: u32,
    round_number: u32,
    rng: ChaCha8Rng,
    round_wind: Wind,
    seat_winds: [Wind; N_SEATS],
    settled: bool,
}

impl Game {
    /// Start a game and deal its first round
    pub fn new(config: GameConfig, policies: [Box<dyn Policy>; N_SEATS]) -> Result<Self, GameError> {
        if let Some(seat) = config.starting_seat {
            if seat >= N_SEATS {
                return Err(GameError::InvalidSeat(seat));
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let round_wind = Wind::East;
        let seat_winds = Wind::ALL;
        let round = deal_round(&config, &mut rng, round_wind, seat_winds)?;
        log::info!("new game with seed {}", config.seed);
        Ok(Game {
            config,
            round,
            policies,
            scores: [0; N_SEATS],
            wins: [0; N_SEATS],
            exhausted: 0,
            round_number: 1,
            rng,
            round_wind,
            seat_winds,
            settled: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Mutable access for interactive drivers calling the phase-checked
    /// round operations directly
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn scores(&self) -> [u64; N_SEATS] {
        self.scores
    }

    pub fn wins(&self) -> [u32; N_SEATS] {
        self.wins
    }

    /// Rounds that ended with an empty tile set
    pub fn exhausted_rounds(&self) -> u32 {
        self.exhausted
    }

    /// 1 for the first round
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round_wind(&self) -> Wind {
        self.round_wind
    }

    pub fn seat_winds(&self) -> [Wind; N_SEATS] {
        self.seat_winds
    }

    pub fn policy_name(&self, seat: usize) -> Result<&str, GameError> {
        self.policies
            .get(seat)
            .map(|p| p.name())
            .ok_or(GameError::InvalidSeat(seat))
    }

    pub fn set_policy(&mut self, seat: usize, policy: Box<dyn Policy>) -> Result<(), GameError> {
        let slot = self.policies.get_mut(seat).ok_or(GameError::InvalidSeat(seat))?;
        *slot = policy;
        Ok(())
    }

    /// Advance the current round by one transition
    pub fn step(&mut self) -> Result<TurnEvent, GameError> {
        self.round.step(&mut self.policies)
    }

    /// Play the current round to the end and settle it
    pub fn play_round(&mut self) -> Result<Settlement, GameError> {
        let outcome = self.round.play(&mut self.policies)?;
        match self.settle() {
            Some(settlement) => Ok(settlement),
            None => Ok(self.score_round(outcome)),
        }
    }

    /// Score the finished round and add the capped scores to the totals.
    ///
    /// Returns None while the round is running or once it has been settled.
    pub fn settle(&mut self) -> Option<Settlement> {
        let outcome = self.round.outcome()?;
        if self.settled {
            return None;
        }
        let settlement = self.score_round(outcome);
        for (total, awarded) in self.scores.iter_mut().zip(settlement.awarded) {
            *total += u64::from(awarded);
        }
        match outcome.winner() {
            Some(seat) => self.wins[seat] += 1,
            None => self.exhausted += 1,
        }
        self.settled = true;
        log::info!(
            "round {} settled: {:?}, awarded {:?}, totals {:?}",
            self.round_number,
            outcome,
            settlement.awarded,
            self.scores
        );
        Some(settlement)
    }

    fn score_round(&self, outcome: RoundOutcome) -> Settlement {
        let winner = outcome.winner();
        let breakdowns: Vec<ScoreBreakdown> = self
            .round
            .players()
            .iter()
            .map(|p| round_end_score(&p.hand, self.round_wind, p.seat_wind, winner == Some(p.seat)))
            .collect();
        let mut awarded = [0; N_SEATS];
        for (slot, breakdown) in awarded.iter_mut().zip(&breakdowns) {
            *slot = breakdown.capped(self.config.score_cap);
        }
        Settlement {
            outcome,
            breakdowns,
            awarded,
        }
    }

    /// Rotate the winds, reshuffle and deal a new round. Totals carry over;
    /// a finished round that was not settled yet is settled first.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        if self.round.is_finished() {
            self.settle();
        }
        self.round_wind = self.round_wind.next();
        for wind in self.seat_winds.iter_mut() {
            *wind = wind.previous();
        }
        self.round = deal_round(&self.config, &mut self.rng, self.round_wind, self.seat_winds)?;
        self.round_number += 1;
        self.settled = false;
        log::info!(
            "round {}: round wind {}, seat winds {:?}",
            self.round_number,
            self.round_wind,
            self.seat_winds
        );
        Ok(())
    }

    /// Back to a fresh game from the configured seed
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.round_wind = Wind::East;
        self.seat_winds = Wind::ALL;
        self.round = deal_round(&self.config, &mut self.rng, self.round_wind, self.seat_winds)?;
        self.scores = [0; N_SEATS];
        self.wins = [0; N_SEATS];
        self.exhausted = 0;
        self.round_number = 1;
        self.settled = false;
        log::info!("game reset to seed {}", self.config.seed);
        Ok(())
    }
}

fn deal_round(
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    round_wind: Wind,
    seat_winds: [Wind; N_SEATS],
) -> Result<Round, GameError> {
    let first_seat = match config.starting_seat {
        Some(seat) => seat,
        None => seat_winds
            .iter()
            .position(|&w| w == Wind::East)
            .unwrap_or(0),
    };
    Round::deal(TileSet::shuffled(rng), round_wind, seat_winds, first_seat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FirstOptionPolicy, PolicyKind};

    fn policies(kind: PolicyKind, seed: u64) -> [Box<dyn Policy>; N_SEATS] {
        [
            kind.build(seed),
            kind.build(seed + 1),
            kind.build(seed + 2),
            kind.build(seed + 3),
        ]
    }

    #[test]
    fn test_first_round_setup() {
        let game = Game::new(GameConfig::with_seed(5), policies(PolicyKind::First, 0)).unwrap();
        assert_eq!(game.round_number(), 1);
        assert_eq!(game.round_wind(), Wind::East);
        assert_eq!(game.seat_winds(), Wind::ALL);
        assert_eq!(game.round().current_seat(), Some(0));
        assert_eq!(game.scores(), [0; N_SEATS]);
    }

    #[test]
    fn test_settle_once() {
        let mut game = Game::new(GameConfig::with_seed(11), policies(PolicyKind::TileCount, 7)).unwrap();
        assert!(game.settle().is_none());
        while !game.round().is_finished() {
            game.step().unwrap();
        }

        let settlement = game.settle().unwrap();
        assert!(game.settle().is_none());
        for (seat, &awarded) in settlement.awarded.iter().enumerate() {
            assert!(awarded <= SCORE_CAP);
            assert_eq!(game.scores()[seat], u64::from(awarded));
        }
        let recorded = game.wins().iter().sum::<u32>() + game.exhausted_rounds();
        assert_eq!(recorded, 1);
    }

    #[test]
    fn test_only_winner_gets_bonuses() {
        let mut game = Game::new(GameConfig::with_seed(3), policies(PolicyKind::TileCount, 1)).unwrap();
        let settlement = game.play_round().unwrap();
        for (seat, breakdown) in settlement.breakdowns.iter().enumerate() {
            if settlement.outcome.winner() == Some(seat) {
                assert!(!breakdown.bonuses.is_empty());
            } else {
                assert!(breakdown.bonuses.is_empty());
            }
        }
    }

    #[test]
    fn test_next_round_rotates_winds() {
        let mut game = Game::new(GameConfig::with_seed(1), policies(PolicyKind::First, 0)).unwrap();
        game.play_round().unwrap();
        let totals = game.scores();
        game.next_round().unwrap();

        assert_eq!(game.round_number(), 2);
        assert_eq!(game.round_wind(), Wind::South);
        assert_eq!(
            game.seat_winds(),
            [Wind::North, Wind::East, Wind::South, Wind::West]
        );
        // Seat 1 now holds the East wind and draws first
        assert_eq!(game.round().current_seat(), Some(1));
        assert_eq!(game.scores(), totals);
        assert!(game.settle().is_none());
    }

    #[test]
    fn test_next_round_settles_finished_round() {
        let mut game = Game::new(GameConfig::with_seed(11), policies(PolicyKind::TileCount, 7)).unwrap();
        while !game.round().is_finished() {
            game.step().unwrap();
        }
        let outcome = game.round().outcome().unwrap();
        game.next_round().unwrap();

        let recorded = game.wins().iter().sum::<u32>() + game.exhausted_rounds();
        assert_eq!(recorded, 1);
        match outcome.winner() {
            Some(seat) => {
                assert_eq!(game.wins()[seat], 1);
                assert!(game.scores()[seat] > 0);
            }
            None => assert_eq!(game.exhausted_rounds(), 1),
        }
    }

    #[test]
    fn test_reset_replays_seed() {
        let config = GameConfig::with_seed(21);
        let mut game = Game::new(config.clone(), policies(PolicyKind::First, 0)).unwrap();
        let first_deal: Vec<_> = game.round().players().iter().map(|p| p.hand.clone()).collect();

        game.play_round().unwrap();
        game.next_round().unwrap();
        game.reset().unwrap();

        let replayed: Vec<_> = game.round().players().iter().map(|p| p.hand.clone()).collect();
        assert_eq!(first_deal, replayed);
        assert_eq!(game.scores(), [0; N_SEATS]);
        assert_eq!(game.round_number(), 1);
    }

    #[test]
    fn test_starting_seat_override() {
        let config = GameConfig {
            starting_seat: Some(2),
            ..GameConfig::with_seed(4)
        };
        let game = Game::new(config, policies(PolicyKind::First, 0)).unwrap();
        assert_eq!(game.round().current_seat(), Some(2));

        let config = GameConfig {
            starting_seat: Some(4),
            ..Default::default()
        };
        assert_eq!(
            Game::new(config, policies(PolicyKind::First, 0)).err(),
            Some(GameError::InvalidSeat(4))
        );
    }

    #[test]
    fn test_set_policy() {
        let mut game = Game::new(GameConfig::default(), policies(PolicyKind::Random, 0)).unwrap();
        game.set_policy(3, Box::new(FirstOptionPolicy)).unwrap();
        assert_eq!(game.policy_name(3), Ok("first"));
        assert_eq!(
            game.set_policy(4, Box::new(FirstOptionPolicy)),
            Err(GameError::InvalidSeat(4))
        );
    }
}
