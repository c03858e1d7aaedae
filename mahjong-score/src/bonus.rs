//! Round-end scoring: meld score plus the winner's bonuses, and the cap
//! applied when scores are added to a running game total.

use crate::search::best_selection;
use crate::{Score, Selection};
use mahjong_core::{Hand, Wind};

/// Flat base points for declaring Mahjong
pub const MAHJONG_BONUS: u32 = 20;
/// Flat base points for a winning hand with no exposed tile
pub const CONCEALED_BONUS: u32 = 20;
/// Extra doublings for a hand of a single numeric suit
pub const SINGLE_SUIT_EXPONENT: u32 = 3;
/// Extra doublings for a hand of winds and dragons only
pub const HONORS_ONLY_EXPONENT: u32 = 4;
/// Extra doublings when a single numeric suit remains once honors are set aside
pub const ONE_NUMERIC_SUIT_EXPONENT: u32 = 2;
/// Extra doublings when every numeric tile is a 1 or a 9
pub const TERMINALS_EXPONENT: u32 = 4;
/// Ceiling applied to each round score added to a running total
pub const SCORE_CAP: u32 = 3000;

/// A bonus awarded to the winner of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bonus {
    Mahjong,
    Concealed,
    SingleSuit,
    HonorsOnly,
    OneNumericSuit,
    Terminals,
}

impl Bonus {
    /// Points and doublings this bonus adds
    pub fn score(&self) -> Score {
        match self {
            Bonus::Mahjong => Score::new(MAHJONG_BONUS, 0),
            Bonus::Concealed => Score::new(CONCEALED_BONUS, 0),
            Bonus::SingleSuit => Score::new(0, SINGLE_SUIT_EXPONENT),
            Bonus::HonorsOnly => Score::new(0, HONORS_ONLY_EXPONENT),
            Bonus::OneNumericSuit => Score::new(0, ONE_NUMERIC_SUIT_EXPONENT),
            Bonus::Terminals => Score::new(0, TERMINALS_EXPONENT),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Bonus::Mahjong => "Mahjong",
            Bonus::Concealed => "Concealed hand",
            Bonus::SingleSuit => "Single suit",
            Bonus::HonorsOnly => "Honors only",
            Bonus::OneNumericSuit => "One numeric suit",
            Bonus::Terminals => "Terminals only",
        }
    }
}

impl std::fmt::Display for Bonus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let score = self.score();
        if score.base > 0 {
            write!(f, "{} +{}", self.name(), score.base)
        } else {
            write!(f, "{} x2^{}", self.name(), score.exponent)
        }
    }
}

/// Bonuses a winning hand earns. The Mahjong bonus is always present.
pub fn winner_bonuses(hand: &Hand) -> Vec<Bonus> {
    let mut bonuses = vec![Bonus::Mahjong];

    if hand.is_concealed() {
        bonuses.push(Bonus::Concealed);
    }

    let suits = hand.suits();
    let numeric = hand.numeric_suits();

    if suits.len() == 1 && numeric.len() == 1 {
        bonuses.push(Bonus::SingleSuit);
    }
    if !suits.is_empty() && numeric.is_empty() {
        bonuses.push(Bonus::HonorsOnly);
    }
    if numeric.len() == 1 {
        bonuses.push(Bonus::OneNumericSuit);
    }

    let ranks = hand.numeric_ranks();
    if !ranks.is_empty() && ranks.iter().all(|&r| r == 1 || r == 9) {
        bonuses.push(Bonus::Terminals);
    }

    bonuses
}

/// Full-hand score at the end of a round
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    /// Best meld selection and its score
    pub selection: Selection,
    /// Winner bonuses (empty for every other seat)
    pub bonuses: Vec<Bonus>,
    /// Meld score plus bonuses
    pub total: Score,
}

impl ScoreBreakdown {
    /// Uncapped value of the total
    pub fn value(&self) -> u64 {
        self.total.value()
    }

    /// Value of the total limited to `cap`
    pub fn capped(&self, cap: u32) -> u32 {
        capped(self.total.value(), cap)
    }
}

/// Score a hand at round end. Only the winner receives bonuses.
pub fn round_end_score(hand: &Hand, round_wind: Wind, seat_wind: Wind, is_winner: bool) -> ScoreBreakdown {
    let selection = best_selection(hand, round_wind, seat_wind);
    let bonuses = if is_winner {
        winner_bonuses(hand)
    } else {
        Vec::new()
    };
    let total = selection.score + bonuses.iter().map(|b| b.score()).sum::<Score>();
    ScoreBreakdown {
        selection,
        bonuses,
        total,
    }
}

/// Limit a score value to `cap`
pub fn capped(value: u64, cap: u32) -> u32 {
    value.min(cap as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_core::parse_hand;

    #[test]
    fn test_mixed_winner() {
        let hand = parse_hand("c1 c2 c3 b4* b5* b6* k7 k8 k9 we we we dr dr").unwrap();
        assert_eq!(winner_bonuses(&hand), vec![Bonus::Mahjong]);

        // East wind pong for an East seat in an East round: 8 x2^3, dragon pair 2
        let breakdown = round_end_score(&hand, Wind::East, Wind::East, true);
        assert_eq!(breakdown.total, Score::new(30, 3));
        assert_eq!(breakdown.value(), 240);
    }

    #[test]
    fn test_concealed_single_suit() {
        let hand = parse_hand("c1 c1 c1 c2 c3 c4 c5 c6 c7 c8 c8 c8 c9 c9").unwrap();
        assert_eq!(
            winner_bonuses(&hand),
            vec![
                Bonus::Mahjong,
                Bonus::Concealed,
                Bonus::SingleSuit,
                Bonus::OneNumericSuit
            ]
        );
    }

    #[test]
    fn test_honors_only() {
        let hand = parse_hand("we we we ws ws ws dr dr dr dg dg dg dw dw").unwrap();
        let bonuses = winner_bonuses(&hand);
        assert!(bonuses.contains(&Bonus::HonorsOnly));
        assert!(!bonuses.contains(&Bonus::SingleSuit));
        assert!(!bonuses.contains(&Bonus::OneNumericSuit));
        assert!(!bonuses.contains(&Bonus::Terminals));
    }

    #[test]
    fn test_one_suit_with_honors_and_terminals() {
        let hand = parse_hand("b1 b1 b1 b9* b9* b9* dr dr dr wn wn wn we we").unwrap();
        assert_eq!(
            winner_bonuses(&hand),
            vec![Bonus::Mahjong, Bonus::OneNumericSuit, Bonus::Terminals]
        );
    }

    #[test]
    fn test_non_winner_gets_no_bonus() {
        let hand = parse_hand("c1 c1 c1 c2 c3 c4 c5 c6 c7 c8 c8 c8 c9 c9").unwrap();
        let breakdown = round_end_score(&hand, Wind::East, Wind::South, false);
        assert!(breakdown.bonuses.is_empty());
        assert_eq!(breakdown.total, breakdown.selection.score);
    }

    #[test]
    fn test_cap() {
        assert_eq!(capped(12, SCORE_CAP), 12);
        assert_eq!(capped(u64::MAX, SCORE_CAP), 3000);
        let hand = parse_hand("we we we we ws ws ws ws dr dr dr dr").unwrap();
        let breakdown = round_end_score(&hand, Wind::East, Wind::East, true);
        assert!(breakdown.value() > SCORE_CAP as u64);
        assert_eq!(breakdown.capped(SCORE_CAP), SCORE_CAP);
    }
}
