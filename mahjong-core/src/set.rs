use crate::hand::HAND_SIZE;
use crate::{Hand, Suit, Tile};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of tiles in a full set: 4 copies of each of the 34 kinds
pub const TOTAL_TILES: usize = 136;

/// Fisher-Yates shuffle driven directly by `random_range`.
///
/// Kept local so the tile order for a given seed does not depend on how
/// `rand::seq::SliceRandom` is implemented in a particular rand release.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// The undrawn tiles of a round. Tiles are drawn from the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// A complete, unshuffled set of 136 tiles
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(TOTAL_TILES);
        for _ in 0..4 {
            for suit in Suit::ALL {
                for rank in suit.min_rank()..suit.min_rank() + suit.n_ranks() {
                    tiles.push(Tile { suit, rank });
                }
            }
        }
        TileSet { tiles }
    }

    /// A set that yields `tiles` in the given order on successive draws
    pub fn from_draw_order(tiles: Vec<Tile>) -> Self {
        let mut tiles = tiles;
        tiles.reverse();
        TileSet { tiles }
    }

    /// A complete set shuffled with `rng`
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut set = TileSet::new();
        set.shuffle(rng);
        set
    }

    /// A complete set shuffled by a ChaCha8 generator seeded with `seed`
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        TileSet::shuffled(&mut rng)
    }

    /// Shuffle the remaining tiles
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        fisher_yates_shuffle(&mut self.tiles, rng);
    }

    /// Draw the next tile, or None if the set is exhausted
    pub fn pop_tile(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Draw a concealed 13-tile hand, or None if fewer than 13 tiles remain
    pub fn deal_hand(&mut self) -> Option<Hand> {
        if self.tiles.len() < HAND_SIZE {
            return None;
        }
        let start = self.tiles.len() - HAND_SIZE;
        let mut dealt: Vec<Tile> = self.tiles.split_off(start);
        dealt.reverse();
        Some(Hand::from_hidden(dealt))
    }

    /// Remaining tiles, last one drawn first
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles left
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set() {
        let set = TileSet::new();
        assert_eq!(set.len(), TOTAL_TILES);
        for kind in Tile::all_kinds() {
            assert_eq!(set.tiles().iter().filter(|&&t| t == kind).count(), 4);
        }
    }

    #[test]
    fn test_pop_until_empty() {
        let mut set = TileSet::from_draw_order(vec![Tile::from_index(0).unwrap()]);
        assert_eq!(set.pop_tile(), Tile::from_index(0));
        assert_eq!(set.pop_tile(), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_draw_order() {
        let order: Vec<Tile> = (0..3).filter_map(Tile::from_index).collect();
        let mut set = TileSet::from_draw_order(order.clone());
        let drawn: Vec<Tile> = std::iter::from_fn(|| set.pop_tile()).collect();
        assert_eq!(drawn, order);
    }

    #[test]
    fn test_deal_hand_matches_draws() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let set = TileSet::shuffled(&mut rng);

        let mut by_deal = set.clone();
        let hand = by_deal.deal_hand().unwrap();

        let mut by_draw = set;
        let drawn: Vec<Tile> = (0..HAND_SIZE).filter_map(|_| by_draw.pop_tile()).collect();

        assert_eq!(hand.hidden_tiles(), drawn);
        assert_eq!(by_deal, by_draw);
    }

    #[test]
    fn test_deal_hand_short_set() {
        let mut set = TileSet::from_draw_order((0..12).filter_map(Tile::from_index).collect());
        assert!(set.deal_hand().is_none());
        assert_eq!(set.len(), 12);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = TileSet::shuffled(&mut ChaCha8Rng::seed_from_u64(42));
        let b = TileSet::shuffled(&mut ChaCha8Rng::seed_from_u64(42));
        let c = TileSet::shuffled(&mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_eq!(a, TileSet::from_seed(42));
        assert_ne!(a, c);
        assert_ne!(a, TileSet::new());

        let mut sorted = a.tiles().to_vec();
        sorted.sort();
        let mut fresh = TileSet::new().tiles().to_vec();
        fresh.sort();
        assert_eq!(sorted, fresh);
    }
}
