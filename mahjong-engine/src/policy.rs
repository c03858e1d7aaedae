//! Decision policies
//!
//! The engine only enumerates what is legal; a policy picks one of the
//! legal options and returns its index. Policies may read the snapshot but
//! never touch the round itself.

use crate::{DecisionKind, PickupAction, StateView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chooses among legal options for one seat
pub trait Policy: Send {
    /// Return an index into `legal_options`. The engine rejects indices out
    /// of range with `GameError::InvalidPolicySelection`.
    fn select_action(
        &mut self,
        kind: DecisionKind,
        legal_options: &[usize],
        state: &StateView,
    ) -> usize;

    /// Short name used in logs and statistics
    fn name(&self) -> &str;
}

/// Always takes the first option: the first concealed tile, never claims
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOptionPolicy;

impl Policy for FirstOptionPolicy {
    fn select_action(&mut self, _kind: DecisionKind, _options: &[usize], _state: &StateView) -> usize {
        0
    }

    fn name(&self) -> &str {
        "first"
    }
}

/// Uniform choice among the options
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        RandomPolicy {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _kind: DecisionKind, options: &[usize], _state: &StateView) -> usize {
        if options.is_empty() {
            return 0;
        }
        self.rng.random_range(0..options.len())
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Heuristic based on tile counts.
///
/// Discards the tile with the lowest
/// `1000 * copies in hand + 100 * (4 - copies seen) + 10 * is_honor + tiles of its suit in hand`,
/// so lone tiles whose other copies are still out go first. For pickups it
/// takes the strongest claim, but passes on a chow with probability
/// `1 - chow_rate`. With probability `randomness` any decision is uniform.
pub struct TileCountPolicy {
    rng: ChaCha8Rng,
    pub chow_rate: f64,
    pub randomness: f64,
}

impl TileCountPolicy {
    pub const DEFAULT_CHOW_RATE: f64 = 0.5;
    pub const DEFAULT_RANDOMNESS: f64 = 0.05;

    pub fn new(seed: u64) -> Self {
        TileCountPolicy {
            rng: ChaCha8Rng::seed_from_u64(seed),
            chow_rate: Self::DEFAULT_CHOW_RATE,
            randomness: Self::DEFAULT_RANDOMNESS,
        }
    }

    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness.clamp(0.0, 1.0);
        self
    }

    pub fn with_chow_rate(mut self, chow_rate: f64) -> Self {
        self.chow_rate = chow_rate.clamp(0.0, 1.0);
        self
    }

    /// Heuristic keep-value of the tile at hand position `position`; lower
    /// values are discarded first
    pub fn discard_score(state: &StateView, position: usize) -> usize {
        let Some(hand_tile) = state.hand.get(position) else {
            return usize::MAX;
        };
        let tile = hand_tile.tile;
        1000 * state.hand.count(tile)
            + 100 * 4usize.saturating_sub(state.count_seen(tile))
            + 10 * tile.is_honor() as usize
            + state.hand.count_suit(tile.suit)
    }

    fn choose_discard(&mut self, options: &[usize], state: &StateView) -> usize {
        let scores: Vec<usize> = options
            .iter()
            .map(|&p| Self::discard_score(state, p))
            .collect();
        let Some(&lowest) = scores.iter().min() else {
            return 0;
        };
        let tied: Vec<usize> = (0..options.len()).filter(|&i| scores[i] == lowest).collect();
        tied[self.rng.random_range(0..tied.len())]
    }

    fn choose_pickup(&mut self, options: &[usize]) -> usize {
        let Some((best, &code)) = options.iter().enumerate().max_by_key(|&(_, &c)| c) else {
            return 0;
        };
        if code == PickupAction::Chow.code() && !self.rng.random_bool(self.chow_rate) {
            return options
                .iter()
                .position(|&c| c == PickupAction::None.code())
                .unwrap_or(best);
        }
        best
    }
}

impl Policy for TileCountPolicy {
    fn select_action(&mut self, kind: DecisionKind, options: &[usize], state: &StateView) -> usize {
        if options.is_empty() {
            return 0;
        }
        if self.rng.random_bool(self.randomness) {
            return self.rng.random_range(0..options.len());
        }
        match kind {
            DecisionKind::Discard => self.choose_discard(options, state),
            DecisionKind::Pickup => self.choose_pickup(options),
            DecisionKind::Chow => self.rng.random_range(0..options.len()),
        }
    }

    fn name(&self) -> &str {
        "tile_count"
    }
}

/// Built-in policies selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    First,
    Random,
    TileCount,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::First, PolicyKind::Random, PolicyKind::TileCount];

    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::First => "first",
            PolicyKind::Random => "random",
            PolicyKind::TileCount => "tile_count",
        }
    }

    /// Create a policy seeded with `seed`
    pub fn build(&self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::First => Box::new(FirstOptionPolicy),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::TileCount => Box::new(TileCountPolicy::new(seed)),
        }
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = PolicyKind::ALL.iter().map(|k| k.name()).collect();
                format!("Unknown policy '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_core::{parse_hand, DiscardPile, Hand, Wind};

    fn view_with_hand(text: &str) -> StateView {
        StateView {
            seat: 0,
            hand: parse_hand(text).unwrap(),
            visible: vec![Hand::new(); 4],
            discards: DiscardPile::new(),
            round_wind: Wind::East,
            seat_wind: Wind::East,
            tiles_remaining: 70,
            claimed_tile: None,
            chow_options: Vec::new(),
        }
    }

    #[test]
    fn test_discard_prefers_lone_tile() {
        let state = view_with_hand("c1 c1 c2 c2 b5 b5 dr");
        let mut policy = TileCountPolicy::new(1).with_randomness(0.0);
        let options = state.hand.valid_discards();
        let choice = policy.select_action(DecisionKind::Discard, &options, &state);
        assert_eq!(options[choice], 6);
    }

    #[test]
    fn test_discard_score_formula() {
        let state = view_with_hand("c1 c1 c2 dr");
        // c1: two in hand, two seen, numeric, three circles
        assert_eq!(TileCountPolicy::discard_score(&state, 0), 2000 + 200 + 3);
        // dr: one in hand, one seen, honor, one dragon
        assert_eq!(TileCountPolicy::discard_score(&state, 3), 1000 + 300 + 10 + 1);
        assert_eq!(TileCountPolicy::discard_score(&state, 9), usize::MAX);
    }

    #[test]
    fn test_pickup_takes_strongest_claim() {
        let state = view_with_hand("c1");
        let mut policy = TileCountPolicy::new(3).with_randomness(0.0);
        let options = [0, 2, 3];
        assert_eq!(policy.select_action(DecisionKind::Pickup, &options, &state), 2);
    }

    #[test]
    fn test_chow_rate_bounds() {
        let state = view_with_hand("c1");
        let options = [0, 1];

        let mut always = TileCountPolicy::new(5).with_randomness(0.0).with_chow_rate(1.0);
        let mut never = TileCountPolicy::new(5).with_randomness(0.0).with_chow_rate(0.0);
        for _ in 0..20 {
            assert_eq!(always.select_action(DecisionKind::Pickup, &options, &state), 1);
            assert_eq!(never.select_action(DecisionKind::Pickup, &options, &state), 0);
        }
    }

    #[test]
    fn test_random_policy_in_range() {
        let state = view_with_hand("c1");
        let mut policy = RandomPolicy::new(11);
        let options = [4, 7, 9];
        for _ in 0..100 {
            assert!(policy.select_action(DecisionKind::Discard, &options, &state) < 3);
        }
    }

    #[test]
    fn test_policy_kind_from_str() {
        assert_eq!("tile_count".parse::<PolicyKind>(), Ok(PolicyKind::TileCount));
        assert_eq!("random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert!("human".parse::<PolicyKind>().is_err());
        assert_eq!(PolicyKind::First.build(0).name(), "first");
    }
}
