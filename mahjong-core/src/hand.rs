use crate::{Suit, Tile};

/// Number of tiles held while waiting for a draw
pub const HAND_SIZE: usize = 13;

/// Number of tiles held between a draw (or pickup) and the following discard
pub const FULL_HAND_SIZE: usize = 14;

/// A tile inside a hand together with its visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandTile {
    pub tile: Tile,
    /// False once the tile has been exposed as part of a claimed meld
    pub hidden: bool,
}

impl HandTile {
    /// A concealed tile
    pub fn hidden(tile: Tile) -> Self {
        HandTile { tile, hidden: true }
    }

    /// An exposed tile
    pub fn open(tile: Tile) -> Self {
        HandTile {
            tile,
            hidden: false,
        }
    }
}

impl std::fmt::Display for HandTile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let visibility = if self.hidden { "Hidden" } else { "Open" };
        write!(f, "{} ({})", self.tile, visibility)
    }
}

/// Represents one player's hand of 13 tiles (14 right after a draw or pickup)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hand {
    tiles: Vec<HandTile>,
}

impl Hand {
    /// Create a new empty hand
    pub fn new() -> Self {
        Hand { tiles: Vec::new() }
    }

    /// Create a hand from tiles with explicit visibility
    pub fn from_tiles(tiles: Vec<HandTile>) -> Self {
        Hand { tiles }
    }

    /// Create a fully concealed hand
    pub fn from_hidden<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        Hand {
            tiles: tiles.into_iter().map(HandTile::hidden).collect(),
        }
    }

    /// Get all tiles in the hand
    pub fn tiles(&self) -> &[HandTile] {
        &self.tiles
    }

    /// Tile at a position
    pub fn get(&self, index: usize) -> Option<&HandTile> {
        self.tiles.get(index)
    }

    /// Get the number of tiles in the hand
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the hand is empty
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Add a concealed tile (a draw from the set)
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(HandTile::hidden(tile));
    }

    /// Add a tile with explicit visibility
    pub fn push(&mut self, tile: HandTile) {
        self.tiles.push(tile);
    }

    /// Remove and return the tile at `index`.
    ///
    /// Only concealed tiles may be discarded; returns None (and leaves the
    /// hand untouched) for an open tile or an index out of range.
    pub fn discard(&mut self, index: usize) -> Option<Tile> {
        match self.tiles.get(index) {
            Some(t) if t.hidden => Some(self.tiles.remove(index).tile),
            _ => None,
        }
    }

    /// Positions of the tiles that may be discarded
    pub fn valid_discards(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    /// All concealed tiles, in hand order
    pub fn hidden_tiles(&self) -> Vec<Tile> {
        self.tiles
            .iter()
            .filter(|t| t.hidden)
            .map(|t| t.tile)
            .collect()
    }

    /// All exposed tiles, in hand order
    pub fn visible_tiles(&self) -> Vec<Tile> {
        self.tiles
            .iter()
            .filter(|t| !t.hidden)
            .map(|t| t.tile)
            .collect()
    }

    /// A hand holding only the exposed tiles; what the other players see
    pub fn visible_hand(&self) -> Hand {
        Hand {
            tiles: self.tiles.iter().filter(|t| !t.hidden).copied().collect(),
        }
    }

    /// Mark the tiles at `positions` as exposed. Out of range positions are ignored.
    pub fn reveal(&mut self, positions: &[usize]) {
        for &p in positions {
            if let Some(t) = self.tiles.get_mut(p) {
                t.hidden = false;
            }
        }
    }

    /// Positions of distinct concealed tiles matching `tiles`, one per entry.
    /// Returns None if the hand does not hold all of them.
    pub fn find_hidden(&self, tiles: &[Tile]) -> Option<Vec<usize>> {
        let mut positions: Vec<usize> = Vec::with_capacity(tiles.len());
        for tile in tiles {
            let p = self
                .tiles
                .iter()
                .enumerate()
                .position(|(i, t)| t.hidden && t.tile == *tile && !positions.contains(&i))?;
            positions.push(p);
        }
        Some(positions)
    }

    /// Expose a claimed meld: the concealed `from_hand` tiles are revealed and
    /// the claimed discard joins the hand as an open tile.
    ///
    /// Returns false, leaving the hand untouched, if any of `from_hand` is not
    /// held concealed.
    pub fn expose_meld(&mut self, discard: Tile, from_hand: &[Tile]) -> bool {
        match self.find_hidden(from_hand) {
            Some(positions) => {
                self.reveal(&positions);
                self.tiles.push(HandTile::open(discard));
                true
            }
            None => false,
        }
    }

    /// Number of tiles equal to `tile`, concealed or not
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| t.tile == tile).count()
    }

    /// Number of concealed tiles equal to `tile`
    pub fn count_hidden(&self, tile: Tile) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.hidden && t.tile == tile)
            .count()
    }

    /// Count tiles of a specific suit
    pub fn count_suit(&self, suit: Suit) -> usize {
        self.tiles.iter().filter(|t| t.tile.suit == suit).count()
    }

    /// Distinct suits present, in suit order
    pub fn suits(&self) -> Vec<Suit> {
        Suit::ALL
            .iter()
            .copied()
            .filter(|&s| self.count_suit(s) > 0)
            .collect()
    }

    /// Distinct numeric suits present, in suit order
    pub fn numeric_suits(&self) -> Vec<Suit> {
        self.suits().into_iter().filter(|s| s.is_numeric()).collect()
    }

    /// Ranks of all numeric tiles, in hand order
    pub fn numeric_ranks(&self) -> Vec<u8> {
        self.tiles
            .iter()
            .filter(|t| t.tile.suit.is_numeric())
            .map(|t| t.tile.rank)
            .collect()
    }

    /// True if no tile has been exposed
    pub fn is_concealed(&self) -> bool {
        self.tiles.iter().all(|t| t.hidden)
    }

    /// True if the hand holds `tile`
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.iter().any(|t| t.tile == tile)
    }

    /// Sort the hand by suit and rank. The sort is stable, so equal tiles keep
    /// their relative order (open tiles stay behind or ahead of concealed
    /// copies as they were).
    pub fn sort(&mut self) {
        self.tiles.sort_by_key(|t| t.tile);
    }

    /// Get a sorted copy of the hand
    pub fn sorted(&self) -> Hand {
        let mut hand = self.clone();
        hand.sort();
        hand
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, t) in self.tiles.iter().enumerate() {
            writeln!(f, "{:>2}: {}", i, t)?;
        }
        Ok(())
    }
}
