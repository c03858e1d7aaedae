//! Meld enumeration and win detection
//!
//! A meld is a set of hand positions. Every candidate pair, chow, pong and
//! kong of a hand is listed by a plain nested scan; the candidates then serve
//! as rows of an exact cover problem over the 14 positions of a full hand.

use crate::hand::FULL_HAND_SIZE;
use crate::{Hand, HandTile, Tile};
use exact_cover::find_exact_covers;

/// Number of melds in a winning cover (four sets plus a pair)
pub const WINNING_MELD_COUNT: usize = 5;

/// The four meld types, in enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MeldKind {
    Pair = 0,
    Chow = 1,
    Pong = 2,
    Kong = 3,
}

impl MeldKind {
    pub const ALL: [MeldKind; 4] = [
        MeldKind::Pair,
        MeldKind::Chow,
        MeldKind::Pong,
        MeldKind::Kong,
    ];

    /// Number of tiles in a meld of this kind
    pub fn size(&self) -> usize {
        match self {
            MeldKind::Pair => 2,
            MeldKind::Chow | MeldKind::Pong => 3,
            MeldKind::Kong => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeldKind::Pair => "pair",
            MeldKind::Chow => "chow",
            MeldKind::Pong => "pong",
            MeldKind::Kong => "kong",
        }
    }
}

impl std::fmt::Display for MeldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A candidate meld: a kind plus the ascending hand positions it uses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meld {
    pub kind: MeldKind,
    pub positions: Vec<usize>,
}

impl Meld {
    /// Bitmask of the positions used (positions must be below 32)
    pub fn mask(&self) -> u32 {
        self.positions.iter().fold(0, |m, &p| m | (1 << p))
    }

    /// True if the two melds share a position
    pub fn overlaps(&self, other: &Meld) -> bool {
        self.mask() & other.mask() != 0
    }

    /// The hand tiles this meld refers to
    pub fn tiles(&self, hand_tiles: &[HandTile]) -> Vec<HandTile> {
        self.positions.iter().map(|&p| hand_tiles[p]).collect()
    }
}

/// Every candidate meld of a list of tiles, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeldCandidates {
    /// Two identical concealed tiles
    pub pairs: Vec<Meld>,
    /// Three consecutive ranks of one numeric suit, same visibility
    pub chows: Vec<Meld>,
    /// Three identical tiles, same visibility
    pub pongs: Vec<Meld>,
    /// Four identical tiles, any visibility
    pub kongs: Vec<Meld>,
}

impl MeldCandidates {
    /// List all candidate melds of `tiles`.
    ///
    /// Within each kind, melds appear in lexicographic order of positions.
    pub fn enumerate(tiles: &[HandTile]) -> Self {
        debug_assert!(tiles.len() <= 32, "meld masks hold at most 32 positions");

        let mut candidates = MeldCandidates::default();
        let n = tiles.len();

        for i in 0..n {
            for j in i + 1..n {
                let (a, b) = (tiles[i], tiles[j]);
                if a.tile == b.tile && a.hidden && b.hidden {
                    candidates.pairs.push(Meld {
                        kind: MeldKind::Pair,
                        positions: vec![i, j],
                    });
                }

                for k in j + 1..n {
                    let c = tiles[k];
                    let same_visibility = a.hidden == b.hidden && b.hidden == c.hidden;

                    if same_visibility && a.tile == b.tile && b.tile == c.tile {
                        candidates.pongs.push(Meld {
                            kind: MeldKind::Pong,
                            positions: vec![i, j, k],
                        });
                    }
                    if same_visibility && is_run(a.tile, b.tile, c.tile) {
                        candidates.chows.push(Meld {
                            kind: MeldKind::Chow,
                            positions: vec![i, j, k],
                        });
                    }

                    for l in k + 1..n {
                        let d = tiles[l];
                        if a.tile == b.tile && b.tile == c.tile && c.tile == d.tile {
                            candidates.kongs.push(Meld {
                                kind: MeldKind::Kong,
                                positions: vec![i, j, k, l],
                            });
                        }
                    }
                }
            }
        }

        candidates
    }

    /// Total number of candidates
    pub fn len(&self) -> usize {
        self.pairs.len() + self.chows.len() + self.pongs.len() + self.kongs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All candidates in the order pairs, chows, pongs, kongs
    pub fn iter(&self) -> impl Iterator<Item = &Meld> {
        self.pairs
            .iter()
            .chain(self.chows.iter())
            .chain(self.pongs.iter())
            .chain(self.kongs.iter())
    }

    /// All candidates concatenated in the order pairs, chows, pongs, kongs
    pub fn combinations(&self) -> Vec<Meld> {
        self.iter().cloned().collect()
    }

    /// Union of the positions used by any candidate, as a bitmask
    pub fn coverage(&self) -> u32 {
        self.iter().fold(0, |m, meld| m | meld.mask())
    }
}

/// Three tiles of one numeric suit with consecutive ranks, in any order
fn is_run(a: Tile, b: Tile, c: Tile) -> bool {
    if !a.suit.is_numeric() || a.suit != b.suit || b.suit != c.suit {
        return false;
    }
    let mut ranks = [a.rank, b.rank, c.rank];
    ranks.sort_unstable();
    ranks[1] == ranks[0] + 1 && ranks[2] == ranks[1] + 1
}

/// Every exact cover of a 14-tile hand made of five melds including a pair.
///
/// Returns an empty list for hands of any other size, hands without a
/// concealed pair, and hands where some position belongs to no candidate.
pub fn winning_covers(hand: &Hand) -> Vec<Vec<Meld>> {
    let tiles = hand.tiles();
    if tiles.len() != FULL_HAND_SIZE {
        return Vec::new();
    }

    let candidates = MeldCandidates::enumerate(tiles);
    if candidates.pairs.is_empty() {
        return Vec::new();
    }

    let full_mask = (1u32 << FULL_HAND_SIZE) - 1;
    if candidates.coverage() != full_mask {
        return Vec::new();
    }

    let combinations = candidates.combinations();
    let rows: Vec<&[usize]> = combinations.iter().map(|m| m.positions.as_slice()).collect();
    let covers = find_exact_covers(&rows, FULL_HAND_SIZE)
        .expect("meld positions always lie within the hand");

    log::trace!(
        "win check: {} candidates, {} exact covers",
        combinations.len(),
        covers.len()
    );

    covers
        .into_iter()
        .filter(|cover| {
            cover.len() == WINNING_MELD_COUNT
                && cover.iter().any(|&r| combinations[r].kind == MeldKind::Pair)
        })
        .map(|cover| cover.into_iter().map(|r| combinations[r].clone()).collect())
        .collect()
}

/// True if the hand is a complete 14-tile winning hand
pub fn is_winning_hand(hand: &Hand) -> bool {
    !winning_covers(hand).is_empty()
}

impl Hand {
    /// Candidate melds of this hand
    pub fn melds(&self) -> MeldCandidates {
        MeldCandidates::enumerate(self.tiles())
    }

    /// True if the hand is a complete 14-tile winning hand
    pub fn is_winning(&self) -> bool {
        is_winning_hand(self)
    }
}

/// A meld that claiming a discarded tile would complete
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClaimMeld {
    pub kind: MeldKind,
    /// The discarded tile being claimed
    pub discard: Tile,
    /// Concealed tiles from the claimant's hand that join the discard, sorted
    pub from_hand: Vec<Tile>,
}

impl ClaimMeld {
    /// All tiles of the meld, sorted
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = self.from_hand.clone();
        tiles.push(self.discard);
        tiles.sort();
        tiles
    }
}

impl std::fmt::Display for ClaimMeld {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let codes: Vec<String> = self.tiles().iter().map(|t| t.code()).collect();
        write!(f, "{} {}", self.kind, codes.join(" "))
    }
}

/// Chows, pongs and kongs the hand could form by claiming `discard`.
///
/// Candidates are enumerated over the concealed tiles plus the discard; a
/// meld is claimable when it contains the discard. Melds built from equal
/// tiles are listed once, sorted by kind and then by tiles, so chows come
/// out in order of starting rank.
pub fn claimable_melds(hand: &Hand, discard: Tile) -> Vec<ClaimMeld> {
    let mut tiles: Vec<HandTile> = hand
        .hidden_tiles()
        .into_iter()
        .map(HandTile::hidden)
        .collect();
    let discard_pos = tiles.len();
    tiles.push(HandTile::hidden(discard));

    let candidates = MeldCandidates::enumerate(&tiles);
    let mut claims: Vec<ClaimMeld> = candidates
        .iter()
        .filter(|m| m.kind != MeldKind::Pair && m.positions.contains(&discard_pos))
        .map(|m| {
            let mut from_hand: Vec<Tile> = m
                .positions
                .iter()
                .filter(|&&p| p != discard_pos)
                .map(|&p| tiles[p].tile)
                .collect();
            from_hand.sort();
            ClaimMeld {
                kind: m.kind,
                discard,
                from_hand,
            }
        })
        .collect();

    claims.sort();
    claims.dedup();
    claims
}
