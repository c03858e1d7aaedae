//! Fixed per-meld score table
//!
//! Keyed by meld kind, suit and visibility class. Winds and dragons share the
//! honor rows; the three numeric suits share the numeric rows. Combinations
//! the enumerator never produces (an open pair, a mixed pong) score zero.

use crate::Score;
use mahjong_core::{HandTile, MeldKind, Suit};

/// Visibility of the tiles making up a meld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VisibilityClass {
    Hidden = 0,
    Open = 1,
    Mixed = 2,
}

impl VisibilityClass {
    /// Classify a group of tiles
    pub fn of(tiles: &[HandTile]) -> Self {
        let hidden = tiles.iter().filter(|t| t.hidden).count();
        if hidden == tiles.len() {
            VisibilityClass::Hidden
        } else if hidden == 0 {
            VisibilityClass::Open
        } else {
            VisibilityClass::Mixed
        }
    }
}

const fn s(base: u32, exponent: u32) -> Score {
    Score { base, exponent }
}

const Z: Score = Score::ZERO;

/// Indexed as `[kind][honor][visibility]`: honor 0 is a numeric suit,
/// 1 a wind or dragon; visibility as `VisibilityClass`.
const SCORE_TABLE: [[[Score; 3]; 2]; 4] = [
    // Pair
    [[Z, Z, Z], [s(2, 0), Z, Z]],
    // Chow
    [[Z, Z, Z], [Z, Z, Z]],
    // Pong
    [[s(4, 0), s(8, 0), Z], [s(8, 1), s(16, 1), Z]],
    // Kong
    [
        [s(8, 1), s(16, 1), s(16, 1)],
        [s(16, 2), s(32, 2), s(32, 2)],
    ],
];

/// Table entry for a meld, before any wind bonus
pub fn lookup(kind: MeldKind, suit: Suit, visibility: VisibilityClass) -> Score {
    SCORE_TABLE[kind as usize][suit.is_honor() as usize][visibility as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_core::{Tile, Wind};

    #[test]
    fn test_pong_values() {
        assert_eq!(lookup(MeldKind::Pong, Suit::Circles, VisibilityClass::Hidden), s(4, 0));
        assert_eq!(lookup(MeldKind::Pong, Suit::Bamboos, VisibilityClass::Open), s(8, 0));
        assert_eq!(lookup(MeldKind::Pong, Suit::Winds, VisibilityClass::Hidden), s(8, 1));
        assert_eq!(lookup(MeldKind::Pong, Suit::Dragons, VisibilityClass::Open), s(16, 1));
    }

    #[test]
    fn test_kong_values() {
        assert_eq!(lookup(MeldKind::Kong, Suit::Characters, VisibilityClass::Hidden), s(8, 1));
        assert_eq!(lookup(MeldKind::Kong, Suit::Characters, VisibilityClass::Mixed), s(16, 1));
        assert_eq!(lookup(MeldKind::Kong, Suit::Dragons, VisibilityClass::Mixed), s(32, 2));
    }

    #[test]
    fn test_pairs_and_chows() {
        assert_eq!(lookup(MeldKind::Pair, Suit::Circles, VisibilityClass::Hidden), Z);
        assert_eq!(lookup(MeldKind::Pair, Suit::Winds, VisibilityClass::Hidden), s(2, 0));
        for suit in Suit::NUMERIC {
            for vis in [VisibilityClass::Hidden, VisibilityClass::Open] {
                assert_eq!(lookup(MeldKind::Chow, suit, vis), Z);
            }
        }
    }

    #[test]
    fn test_revealing_never_lowers_base() {
        for kind in [MeldKind::Pong, MeldKind::Kong] {
            for suit in Suit::ALL {
                let hidden = lookup(kind, suit, VisibilityClass::Hidden);
                let open = lookup(kind, suit, VisibilityClass::Open);
                assert!(open.base >= hidden.base, "{:?} {:?}", kind, suit);
            }
        }
    }

    #[test]
    fn test_visibility_class() {
        let t = Tile::wind(Wind::East);
        assert_eq!(
            VisibilityClass::of(&[HandTile::hidden(t), HandTile::hidden(t)]),
            VisibilityClass::Hidden
        );
        assert_eq!(
            VisibilityClass::of(&[HandTile::open(t), HandTile::open(t)]),
            VisibilityClass::Open
        );
        assert_eq!(
            VisibilityClass::of(&[HandTile::open(t), HandTile::hidden(t)]),
            VisibilityClass::Mixed
        );
    }
}
