//! Core Mahjong types
//!
//! Tiles, winds, hands with per-tile visibility, the 136-tile set, the discard
//! pile, and the meld enumerator that decides whether a 14-tile hand wins.

mod discard;
mod hand;
mod meld;
mod notation;
mod set;
mod tile;
mod wind;

pub use discard::DiscardPile;
pub use hand::{Hand, HandTile, FULL_HAND_SIZE, HAND_SIZE};
pub use meld::{
    claimable_melds, is_winning_hand, winning_covers, ClaimMeld, Meld, MeldCandidates, MeldKind,
    WINNING_MELD_COUNT,
};
pub use notation::{
    format_hand, format_tiles, parse_hand, parse_hand_tile, parse_tile, parse_tiles,
    NotationError,
};
pub use set::{fisher_yates_shuffle, TileSet, TOTAL_TILES};
pub use tile::{Dragon, Suit, Tile, N_TILE_KINDS};
pub use wind::Wind;
