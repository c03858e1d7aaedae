use crate::{DecisionKind, Phase};

/// Errors raised by the round and game engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A policy returned an index outside its list of legal options
    InvalidPolicySelection {
        seat: usize,
        kind: DecisionKind,
        index: usize,
        n_options: usize,
    },
    /// An operation was attempted in the wrong phase of the round
    WrongPhase { expected: &'static str, found: Phase },
    /// A seat number outside 0-3
    InvalidSeat(usize),
    /// A discard of an open tile or of a position outside the hand
    InvalidDiscard { seat: usize, index: usize },
    /// A claim that the seat is not allowed to make on the current discard
    IllegalClaim { seat: usize },
    /// The tile set cannot supply the opening hands
    NotEnoughTiles { needed: usize, available: usize },
    /// The round is already over
    RoundFinished,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GameError::InvalidPolicySelection {
                seat,
                kind,
                index,
                n_options,
            } => write!(
                f,
                "Policy for seat {} chose option {} of {} for a {} decision",
                seat, index, n_options, kind
            ),
            GameError::WrongPhase { expected, found } => {
                write!(f, "Cannot {} while the round is in phase {:?}", expected, found)
            }
            GameError::InvalidSeat(seat) => write!(f, "Invalid seat {}", seat),
            GameError::InvalidDiscard { seat, index } => {
                write!(f, "Seat {} cannot discard the tile at position {}", seat, index)
            }
            GameError::IllegalClaim { seat } => {
                write!(f, "Seat {} cannot make that claim on the current discard", seat)
            }
            GameError::NotEnoughTiles { needed, available } => write!(
                f,
                "Dealing needs {} tiles but only {} are available",
                needed, available
            ),
            GameError::RoundFinished => write!(f, "The round is finished"),
        }
    }
}

impl std::error::Error for GameError {}
