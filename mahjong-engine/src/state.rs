use mahjong_core::{ClaimMeld, DiscardPile, Hand, Tile, Wind, TOTAL_TILES};

/// Read-only snapshot of a round from one seat's point of view.
///
/// Other seats only show their exposed tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateView {
    pub seat: usize,
    /// The seat's own hand, concealed tiles included
    pub hand: Hand,
    /// Exposed tiles of every seat, indexed by seat
    pub visible: Vec<Hand>,
    pub discards: DiscardPile,
    pub round_wind: Wind,
    pub seat_wind: Wind,
    /// Tiles left in the set
    pub tiles_remaining: usize,
    /// Discard under consideration during a pickup or chow decision
    pub claimed_tile: Option<Tile>,
    /// Candidate chows during a chow decision
    pub chow_options: Vec<ClaimMeld>,
}

impl StateView {
    /// Copies of `tile` this seat knows about: its own hand, other seats'
    /// exposed tiles and the discard pile
    pub fn count_seen(&self, tile: Tile) -> usize {
        let others: usize = self
            .visible
            .iter()
            .enumerate()
            .filter(|&(seat, _)| seat != self.seat)
            .map(|(_, hand)| hand.count(tile))
            .sum();
        self.hand.count(tile) + others + self.discards.count(tile)
    }

    /// Number of tiles this seat has not seen yet
    pub fn n_unused_tiles(&self) -> usize {
        let others: usize = self
            .visible
            .iter()
            .enumerate()
            .filter(|&(seat, _)| seat != self.seat)
            .map(|(_, hand)| hand.len())
            .sum();
        TOTAL_TILES.saturating_sub(self.hand.len() + others + self.discards.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_core::{parse_hand, parse_tile};

    fn view() -> StateView {
        let mut discards = DiscardPile::new();
        discards.add(parse_tile("c5").unwrap());
        discards.add(parse_tile("we").unwrap());
        StateView {
            seat: 1,
            hand: parse_hand("c5 c6 c7 we*").unwrap(),
            visible: vec![
                parse_hand("c4* c5* c6*").unwrap(),
                parse_hand("we*").unwrap(),
                Hand::new(),
                parse_hand("dr* dr* dr* dr*").unwrap(),
            ],
            discards,
            round_wind: Wind::East,
            seat_wind: Wind::South,
            tiles_remaining: 80,
            claimed_tile: None,
            chow_options: Vec::new(),
        }
    }

    #[test]
    fn test_count_seen() {
        let view = view();
        // Own c5, one exposed by seat 0, one discarded
        assert_eq!(view.count_seen(parse_tile("c5").unwrap()), 3);
        // Own exposed we is not counted twice
        assert_eq!(view.count_seen(parse_tile("we").unwrap()), 2);
        assert_eq!(view.count_seen(parse_tile("b1").unwrap()), 0);
    }

    #[test]
    fn test_unused_tiles() {
        assert_eq!(view().n_unused_tiles(), 136 - (4 + 3 + 4 + 2));
    }
}
