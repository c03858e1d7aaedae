//! Compact tile notation
//!
//! Tokens are separated by whitespace: `c1`-`c9` circles, `b1`-`b9` bamboos,
//! `k1`-`k9` characters, `we ws ww wn` winds, `dr dg dw` dragons. A trailing
//! `*` marks an open tile, e.g. `"c1 c2 c3 dr* dr* dr*"`.

use crate::{Dragon, Hand, HandTile, Suit, Tile, Wind};

/// Error type for tile notation parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotationError {
    pub message: String,
}

impl std::fmt::Display for NotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Tile notation error: {}", self.message)
    }
}

impl std::error::Error for NotationError {}

/// Parse a single token such as "c5", "wn" or "dg*"
pub fn parse_hand_tile(token: &str) -> Result<HandTile, NotationError> {
    let (body, hidden) = match token.strip_suffix('*') {
        Some(body) => (body, false),
        None => (token, true),
    };

    let mut chars = body.chars();
    let (Some(suit_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
    else {
        return Err(NotationError {
            message: format!("Expected two characters, got '{}'", token),
        });
    };

    let suit = Suit::from_char(suit_char).ok_or_else(|| NotationError {
        message: format!("Unknown suit '{}' in '{}'", suit_char, token),
    })?;

    let tile = match suit {
        Suit::Winds => Wind::ALL
            .iter()
            .find(|w| w.to_char() == rank_char)
            .map(|&w| Tile::wind(w)),
        Suit::Dragons => Dragon::ALL
            .iter()
            .find(|d| d.to_char() == rank_char)
            .map(|&d| Tile::dragon(d)),
        _ => rank_char
            .to_digit(10)
            .and_then(|r| Tile::new(suit, r as u8)),
    };

    let tile = tile.ok_or_else(|| NotationError {
        message: format!("Invalid rank '{}' in '{}'", rank_char, token),
    })?;

    Ok(HandTile { tile, hidden })
}

/// Parse a single tile token, rejecting the open marker
pub fn parse_tile(token: &str) -> Result<Tile, NotationError> {
    let hand_tile = parse_hand_tile(token)?;
    if !hand_tile.hidden {
        return Err(NotationError {
            message: format!("Unexpected open marker in '{}'", token),
        });
    }
    Ok(hand_tile.tile)
}

/// Parse whitespace-separated tile tokens without visibility markers
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>, NotationError> {
    input.split_whitespace().map(parse_tile).collect()
}

/// Parse whitespace-separated tokens into a hand, honoring `*` open markers
pub fn parse_hand(input: &str) -> Result<Hand, NotationError> {
    let tiles = input
        .split_whitespace()
        .map(parse_hand_tile)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Hand::from_tiles(tiles))
}

/// Format tiles as space-separated tokens
pub fn format_tiles(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.code()).collect::<Vec<_>>().join(" ")
}

/// Format a hand as space-separated tokens, open tiles marked with `*`
pub fn format_hand(hand: &Hand) -> String {
    hand.tiles()
        .iter()
        .map(|t| {
            if t.hidden {
                t.tile.code()
            } else {
                format!("{}*", t.tile.code())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        let hand = parse_hand("c1 b9* k5 we wn* dr dw").unwrap();
        assert_eq!(hand.len(), 7);
        assert_eq!(hand.tiles()[0], HandTile::hidden(Tile::new(Suit::Circles, 1).unwrap()));
        assert_eq!(hand.tiles()[1], HandTile::open(Tile::new(Suit::Bamboos, 9).unwrap()));
        assert_eq!(hand.tiles()[3].tile, Tile::wind(Wind::East));
        assert_eq!(hand.tiles()[4], HandTile::open(Tile::wind(Wind::North)));
        assert_eq!(hand.tiles()[6].tile, Tile::dragon(Dragon::White));
    }

    #[test]
    fn test_format_round_trip() {
        let input = "c1 c2 c3 b4* b4* b4* we dg";
        assert_eq!(format_hand(&parse_hand(input).unwrap()), input);
        assert_eq!(format_tiles(&parse_tiles("k9 ww dr").unwrap()), "k9 ww dr");
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(parse_tile("c0").is_err());
        assert!(parse_tile("x1").is_err());
        assert!(parse_tile("wx").is_err());
        assert!(parse_tile("c10").is_err());
        assert!(parse_tile("c").is_err());
        assert!(parse_tile("c1*").is_err());
        assert!(parse_hand("c1 zz").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_hand("").unwrap().is_empty());
        assert!(parse_tiles("   ").unwrap().is_empty());
    }
}
