//! Mahjong scoring
//!
//! Every candidate meld gets a (base, exponent) score from a fixed table, with
//! one extra doubling per wind match on wind pongs and kongs. A hand's score
//! is the best non-overlapping meld selection, and its value is
//! `base * 2^exponent`. Bonuses are added for the winner at round end only.

mod bonus;
mod score;
mod search;
mod table;

pub use bonus::{
    capped, round_end_score, winner_bonuses, Bonus, ScoreBreakdown, CONCEALED_BONUS,
    HONORS_ONLY_EXPONENT, MAHJONG_BONUS, ONE_NUMERIC_SUIT_EXPONENT, SCORE_CAP,
    SINGLE_SUIT_EXPONENT, TERMINALS_EXPONENT,
};
pub use score::{meld_score, wind_relevance, Score};
pub use search::{best_selection, max_score, visible_score, MaxScoreSearch, Selection};
pub use table::{lookup, VisibilityClass};
