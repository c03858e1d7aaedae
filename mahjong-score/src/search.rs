//! Maximum-value meld selection
//!
//! Include/exclude backtracking over the candidate melds in enumeration
//! order (pairs, chows, pongs, kongs). Positions already taken are tracked in
//! a bitmask. Selections are compared on base points only; the exponent
//! travels with whichever selection wins. On equal base the selection that
//! includes the current candidate is kept.

use crate::score::meld_score;
use crate::Score;
use mahjong_core::{Hand, Meld, MeldCandidates, Wind};
use rustc_hash::FxHashMap;

/// Best non-overlapping set of melds found for a hand
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub score: Score,
    pub melds: Vec<Meld>,
}

#[derive(Clone, Default)]
struct Best {
    score: Score,
    picks: Vec<usize>,
}

/// Search state over one hand's candidates
pub struct MaxScoreSearch {
    melds: Vec<Meld>,
    masks: Vec<u32>,
    scores: Vec<Score>,
    memo: Option<FxHashMap<(usize, u32), Best>>,
    nodes: u64,
}

impl MaxScoreSearch {
    /// Prepare a search over every candidate meld of `hand`
    pub fn new(hand: &Hand, round_wind: Wind, seat_wind: Wind) -> Self {
        let melds = MeldCandidates::enumerate(hand.tiles()).combinations();
        let masks = melds.iter().map(|m| m.mask()).collect();
        let scores = melds
            .iter()
            .map(|m| meld_score(hand.tiles(), m, round_wind, seat_wind))
            .collect();
        MaxScoreSearch {
            melds,
            masks,
            scores,
            memo: Some(FxHashMap::default()),
            nodes: 0,
        }
    }

    /// Enable or disable the transposition table keyed on
    /// `(next candidate, used positions)`
    pub fn with_memo(mut self, enabled: bool) -> Self {
        self.memo = if enabled {
            Some(FxHashMap::default())
        } else {
            None
        };
        self
    }

    /// Number of candidate melds considered
    pub fn n_candidates(&self) -> usize {
        self.melds.len()
    }

    /// Run the search
    pub fn run(mut self) -> Selection {
        let best = self.search(0, 0);
        log::trace!(
            "max score: {} candidates, {} nodes, best {:?}",
            self.melds.len(),
            self.nodes,
            best.score
        );
        Selection {
            score: best.score,
            melds: best.picks.iter().map(|&i| self.melds[i].clone()).collect(),
        }
    }

    fn search(&mut self, next: usize, used: u32) -> Best {
        if next == self.melds.len() {
            return Best::default();
        }
        if let Some(found) = self.memo.as_ref().and_then(|m| m.get(&(next, used))) {
            return found.clone();
        }
        self.nodes += 1;

        let mut best = None;
        if self.masks[next] & used == 0 {
            let mut with = self.search(next + 1, used | self.masks[next]);
            with.score += self.scores[next];
            with.picks.insert(0, next);
            best = Some(with);
        }

        let skip = self.search(next + 1, used);
        let best = match best {
            Some(with) if with.score.base >= skip.score.base => with,
            _ => skip,
        };

        if let Some(memo) = self.memo.as_mut() {
            memo.insert((next, used), best.clone());
        }
        best
    }
}

/// Highest-scoring set of non-overlapping melds in `hand`
pub fn best_selection(hand: &Hand, round_wind: Wind, seat_wind: Wind) -> Selection {
    MaxScoreSearch::new(hand, round_wind, seat_wind).run()
}

/// Score of the highest-scoring set of non-overlapping melds in `hand`
pub fn max_score(hand: &Hand, round_wind: Wind, seat_wind: Wind) -> Score {
    best_selection(hand, round_wind, seat_wind).score
}

/// Score of the exposed tiles only; what the other players can see
pub fn visible_score(hand: &Hand, round_wind: Wind, seat_wind: Wind) -> Score {
    max_score(&hand.visible_hand(), round_wind, seat_wind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_core::{parse_hand, MeldKind};

    #[test]
    fn test_empty_hand() {
        assert_eq!(max_score(&Hand::new(), Wind::East, Wind::East), Score::ZERO);
    }

    #[test]
    fn test_kong_beats_overlapping_pong() {
        let hand = parse_hand("c5 c5 c5 c5").unwrap();
        let selection = best_selection(&hand, Wind::East, Wind::East);
        assert_eq!(selection.score, Score::new(8, 1));
        assert_eq!(selection.melds.len(), 1);
        assert_eq!(selection.melds[0].kind, MeldKind::Kong);
    }

    #[test]
    fn test_disjoint_melds_add_up() {
        // Hidden numeric pong 4, hidden dragon pong 8 x2, honor pair 2
        let hand = parse_hand("b7 b7 b7 dg dg dg wn wn").unwrap();
        let score = max_score(&hand, Wind::East, Wind::South);
        assert_eq!(score, Score::new(14, 1));
        assert_eq!(score.value(), 28);
    }

    #[test]
    fn test_two_pairs_beat_one_pong_when_larger() {
        // Four honor tiles: kong 16/2 beats two pairs (4) and a pong (8)
        let hand = parse_hand("dr dr dr dr").unwrap();
        assert_eq!(max_score(&hand, Wind::East, Wind::East), Score::new(16, 2));
    }

    #[test]
    fn test_selection_is_disjoint() {
        let hand = parse_hand("c1 c1 c1 c2 c3 c4 c4 c4 we we we dr dr dr").unwrap();
        let selection = best_selection(&hand, Wind::East, Wind::East);
        let mut used = 0u32;
        for meld in &selection.melds {
            assert_eq!(used & meld.mask(), 0);
            used |= meld.mask();
        }
    }

    #[test]
    fn test_memo_matches_plain_search() {
        let hands = [
            "c1 c1 c1 c2 c3 c4 c4 c4 we we we dr dr dr",
            "b2 b2 b3 b3 b4 b4 b4 b5 b5 b6 b6 b6 dw dw",
            "c9* c9* c9* k1 k1 k1 k1 ws ws ws wn wn dg dg",
        ];
        for text in hands {
            let hand = parse_hand(text).unwrap();
            for (round, seat) in [(Wind::East, Wind::East), (Wind::South, Wind::North)] {
                let with = MaxScoreSearch::new(&hand, round, seat).with_memo(true).run();
                let without = MaxScoreSearch::new(&hand, round, seat).with_memo(false).run();
                assert_eq!(with, without, "{}", text);
            }
        }
    }

    #[test]
    fn test_visible_score_uses_open_tiles_only() {
        let hand = parse_hand("k3* k3* k3* dr dr dr").unwrap();
        assert_eq!(visible_score(&hand, Wind::East, Wind::East), Score::new(8, 0));
        assert_eq!(max_score(&hand, Wind::East, Wind::East), Score::new(16, 1));
    }
}
