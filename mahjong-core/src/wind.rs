/// Represents the four winds, used both as seat winds and as the round wind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Wind {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    /// All winds in play order
    pub const ALL: [Wind; 4] = [Wind::East, Wind::South, Wind::West, Wind::North];

    /// Convert from index (0-3)
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Wind::East),
            1 => Some(Wind::South),
            2 => Some(Wind::West),
            3 => Some(Wind::North),
            _ => None,
        }
    }

    /// Index of the wind (East=0 .. North=3)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Next wind in play order (East -> South -> West -> North -> East).
    /// The round wind moves this way between rounds.
    pub fn next(&self) -> Wind {
        Wind::ALL[(self.index() as usize + 1) % 4]
    }

    /// Previous wind in play order. Seat winds move this way between rounds.
    pub fn previous(&self) -> Wind {
        Wind::ALL[(self.index() as usize + 3) % 4]
    }

    /// Get the wind name ("East", "South", ...)
    pub fn name(&self) -> &'static str {
        match self {
            Wind::East => "East",
            Wind::South => "South",
            Wind::West => "West",
            Wind::North => "North",
        }
    }

    /// Single lowercase letter used in compact tile notation
    pub fn to_char(&self) -> char {
        match self {
            Wind::East => 'e',
            Wind::South => 's',
            Wind::West => 'w',
            Wind::North => 'n',
        }
    }
}

impl std::fmt::Display for Wind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
