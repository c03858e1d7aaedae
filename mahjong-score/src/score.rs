use crate::table::{lookup, VisibilityClass};
use mahjong_core::{HandTile, Meld, MeldKind, Suit, Wind};

/// A score as base points plus a doubling exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    pub base: u32,
    pub exponent: u32,
}

impl Score {
    pub const ZERO: Score = Score {
        base: 0,
        exponent: 0,
    };

    pub fn new(base: u32, exponent: u32) -> Self {
        Score { base, exponent }
    }

    /// `base * 2^exponent`, saturating at `u64::MAX`
    pub fn value(&self) -> u64 {
        let base = self.base as u64;
        if base == 0 {
            return 0;
        }
        if self.exponent >= 64 {
            return u64::MAX;
        }
        base.saturating_mul(1u64 << self.exponent)
    }
}

impl std::ops::Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score {
            base: self.base + other.base,
            exponent: self.exponent + other.exponent,
        }
    }
}

impl std::ops::AddAssign for Score {
    fn add_assign(&mut self, other: Score) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::ZERO, |a, b| a + b)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({} doubled {} times)",
            self.value(),
            self.base,
            self.exponent
        )
    }
}

/// Number of wind matches (0-2) for a wind pong or kong: one for the round
/// wind, one for the seat wind. Every other meld has no wind relevance.
pub fn wind_relevance(kind: MeldKind, tiles: &[HandTile], round_wind: Wind, seat_wind: Wind) -> u32 {
    if !matches!(kind, MeldKind::Pong | MeldKind::Kong) {
        return 0;
    }
    let Some(wind) = tiles.first().and_then(|t| t.tile.as_wind()) else {
        return 0;
    };
    (wind == round_wind) as u32 + (wind == seat_wind) as u32
}

/// Score of one candidate meld of `hand_tiles`
pub fn meld_score(hand_tiles: &[HandTile], meld: &Meld, round_wind: Wind, seat_wind: Wind) -> Score {
    let tiles = meld.tiles(hand_tiles);
    let suit = tiles.first().map(|t| t.tile.suit).unwrap_or(Suit::Circles);
    let mut score = lookup(meld.kind, suit, VisibilityClass::of(&tiles));
    score.exponent += wind_relevance(meld.kind, &tiles, round_wind, seat_wind);
    score
}
