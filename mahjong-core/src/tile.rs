use crate::Wind;

/// Number of distinct tile kinds (3 x 9 numeric + 4 winds + 3 dragons)
pub const N_TILE_KINDS: usize = 34;

/// Represents the five tile suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Suit {
    Circles = 0,
    Bamboos = 1,
    Characters = 2,
    Winds = 3,
    Dragons = 4,
}

impl Suit {
    /// All suits in standard order
    pub const ALL: [Suit; 5] = [
        Suit::Circles,
        Suit::Bamboos,
        Suit::Characters,
        Suit::Winds,
        Suit::Dragons,
    ];

    /// The three suits with ranks 1-9
    pub const NUMERIC: [Suit; 3] = [Suit::Circles, Suit::Bamboos, Suit::Characters];

    /// Convert from numeric index (0-4)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Suit::Circles),
            1 => Some(Suit::Bamboos),
            2 => Some(Suit::Characters),
            3 => Some(Suit::Winds),
            4 => Some(Suit::Dragons),
            _ => None,
        }
    }

    /// True for Circles, Bamboos and Characters
    pub fn is_numeric(&self) -> bool {
        matches!(self, Suit::Circles | Suit::Bamboos | Suit::Characters)
    }

    /// True for Winds and Dragons
    pub fn is_honor(&self) -> bool {
        !self.is_numeric()
    }

    /// Number of distinct ranks in this suit
    pub fn n_ranks(&self) -> u8 {
        match self {
            Suit::Winds => 4,
            Suit::Dragons => 3,
            _ => 9,
        }
    }

    /// Lowest rank value of this suit (1 for numeric suits, 0 for honors)
    pub fn min_rank(&self) -> u8 {
        if self.is_numeric() {
            1
        } else {
            0
        }
    }

    /// Get the suit name ("Circles", "Winds", ...)
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Circles => "Circles",
            Suit::Bamboos => "Bamboos",
            Suit::Characters => "Characters",
            Suit::Winds => "Winds",
            Suit::Dragons => "Dragons",
        }
    }

    /// Single lowercase letter used in compact tile notation (c, b, k, w, d)
    pub fn to_char(&self) -> char {
        match self {
            Suit::Circles => 'c',
            Suit::Bamboos => 'b',
            Suit::Characters => 'k',
            Suit::Winds => 'w',
            Suit::Dragons => 'd',
        }
    }

    /// Inverse of `to_char`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'c' => Some(Suit::Circles),
            'b' => Some(Suit::Bamboos),
            'k' => Some(Suit::Characters),
            'w' => Some(Suit::Winds),
            'd' => Some(Suit::Dragons),
            _ => None,
        }
    }
}

/// The three dragons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Dragon {
    Red = 0,
    Green = 1,
    White = 2,
}

impl Dragon {
    pub const ALL: [Dragon; 3] = [Dragon::Red, Dragon::Green, Dragon::White];

    /// Convert from index (0-2)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Dragon::Red),
            1 => Some(Dragon::Green),
            2 => Some(Dragon::White),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dragon::Red => "Red",
            Dragon::Green => "Green",
            Dragon::White => "White",
        }
    }

    /// Single lowercase letter used in compact tile notation
    pub fn to_char(&self) -> char {
        match self {
            Dragon::Red => 'r',
            Dragon::Green => 'g',
            Dragon::White => 'w',
        }
    }
}

/// A single Mahjong tile.
///
/// Numeric suits use ranks 1-9. Wind tiles store the wind index (East=0 ..
/// North=3) and dragon tiles the dragon index (Red=0 .. White=2) as rank.
/// Equality is by suit and rank only; visibility belongs to the hand holding
/// the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    pub suit: Suit,
    pub rank: u8,
}

impl Tile {
    /// Create a tile, returning None if the rank is outside the suit's range
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        let min = suit.min_rank();
        if rank < min || rank >= min + suit.n_ranks() {
            return None;
        }
        Some(Tile { suit, rank })
    }

    /// Wind tile for the given wind
    pub fn wind(wind: Wind) -> Self {
        Tile {
            suit: Suit::Winds,
            rank: wind.index(),
        }
    }

    /// Dragon tile for the given dragon
    pub fn dragon(dragon: Dragon) -> Self {
        Tile {
            suit: Suit::Dragons,
            rank: dragon as u8,
        }
    }

    /// Create a tile from a kind index (0-33)
    /// Index is calculated as: circles 0-8, bamboos 9-17, characters 18-26,
    /// winds 27-30, dragons 31-33
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0..=26 => Tile::new(Suit::from_index(index / 9)?, index % 9 + 1),
            27..=30 => Tile::new(Suit::Winds, index - 27),
            31..=33 => Tile::new(Suit::Dragons, index - 31),
            _ => None,
        }
    }

    /// Convert tile to kind index (0-33)
    pub fn to_index(&self) -> u8 {
        match self.suit {
            Suit::Winds => 27 + self.rank,
            Suit::Dragons => 31 + self.rank,
            suit => (suit as u8) * 9 + self.rank - 1,
        }
    }

    /// Every tile kind in index order
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        (0..N_TILE_KINDS as u8).filter_map(Tile::from_index)
    }

    /// True for wind and dragon tiles
    pub fn is_honor(&self) -> bool {
        self.suit.is_honor()
    }

    /// True for numeric tiles of rank 1 or 9
    pub fn is_terminal(&self) -> bool {
        self.suit.is_numeric() && (self.rank == 1 || self.rank == 9)
    }

    /// The wind this tile shows, if it is a wind tile
    pub fn as_wind(&self) -> Option<Wind> {
        match self.suit {
            Suit::Winds => Wind::from_index(self.rank),
            _ => None,
        }
    }

    /// Name of the rank as displayed ("5", "East", "Red")
    pub fn rank_name(&self) -> String {
        match self.suit {
            Suit::Winds => Wind::from_index(self.rank)
                .map(|w| w.name().to_string())
                .unwrap_or_default(),
            Suit::Dragons => Dragon::from_index(self.rank)
                .map(|d| d.name().to_string())
                .unwrap_or_default(),
            _ => self.rank.to_string(),
        }
    }

    /// Compact notation token without visibility marker (e.g. "c5", "we", "dr")
    pub fn code(&self) -> String {
        let rank = match self.suit {
            Suit::Winds => Wind::from_index(self.rank).map(|w| w.to_char()),
            Suit::Dragons => Dragon::from_index(self.rank).map(|d| d.to_char()),
            _ => char::from_digit(self.rank as u32, 10),
        };
        format!("{}{}", self.suit.to_char(), rank.unwrap_or('?'))
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.suit.name(), self.rank_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_index_conversion() {
        // Test all 34 kinds
        for i in 0..34 {
            let tile = Tile::from_index(i).unwrap();
            assert_eq!(tile.to_index(), i);
        }
        assert_eq!(Tile::from_index(34), None);
        assert_eq!(Tile::all_kinds().count(), N_TILE_KINDS);
    }

    #[test]
    fn test_rank_ranges() {
        assert!(Tile::new(Suit::Circles, 0).is_none());
        assert!(Tile::new(Suit::Circles, 9).is_some());
        assert!(Tile::new(Suit::Circles, 10).is_none());
        assert!(Tile::new(Suit::Winds, 3).is_some());
        assert!(Tile::new(Suit::Winds, 4).is_none());
        assert!(Tile::new(Suit::Dragons, 3).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::new(Suit::Circles, 5).unwrap().to_string(), "Circles 5");
        assert_eq!(Tile::wind(Wind::East).to_string(), "Winds East");
        assert_eq!(Tile::dragon(Dragon::Red).to_string(), "Dragons Red");
    }

    #[test]
    fn test_honor_and_terminal() {
        assert!(Tile::wind(Wind::North).is_honor());
        assert!(Tile::dragon(Dragon::White).is_honor());
        assert!(!Tile::wind(Wind::North).is_terminal());
        assert!(Tile::new(Suit::Bamboos, 1).unwrap().is_terminal());
        assert!(Tile::new(Suit::Characters, 9).unwrap().is_terminal());
        assert!(!Tile::new(Suit::Characters, 5).unwrap().is_terminal());
    }

    #[test]
    fn test_ordering_by_suit_then_rank() {
        let c9 = Tile::new(Suit::Circles, 9).unwrap();
        let b1 = Tile::new(Suit::Bamboos, 1).unwrap();
        let east = Tile::wind(Wind::East);
        let red = Tile::dragon(Dragon::Red);
        assert!(c9 < b1);
        assert!(b1 < east);
        assert!(east < red);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Tile::new(Suit::Characters, 7).unwrap().code(), "k7");
        assert_eq!(Tile::wind(Wind::South).code(), "ws");
        assert_eq!(Tile::dragon(Dragon::Green).code(), "dg");
    }
}
