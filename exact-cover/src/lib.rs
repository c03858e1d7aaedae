//! Exact cover solver using Knuth's Dancing Links
//!
//! Each row is a subset of the columns `0..n_columns`. The solver returns every
//! selection of rows whose subsets cover each column exactly once.
//!
//! The algorithm uses:
//! - A toroidal doubly-linked sparse matrix stored as an arena of nodes
//!   addressed by index, so covering and uncovering only relinks indices
//! - Minimum-remaining-values column choice, lowest column id on ties
//! - Full enumeration: the search keeps backtracking after each solution

mod dlx;
mod error;

pub use dlx::{find_exact_covers, DancingLinks, SearchStats};
pub use error::CoverError;
