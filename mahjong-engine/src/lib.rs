//! Four-seat Mahjong engine
//!
//! A [`Round`] is a small state machine (draw, discard, claim resolution)
//! driven one transition at a time by [`Round::step`]. Every decision is
//! delegated to a [`Policy`] per seat, which sees only a [`StateView`]
//! snapshot. A [`Game`] chains rounds, settles scores and rotates winds.

mod action;
mod error;
mod game;
mod player;
mod policy;
pub mod round;
mod state;

pub use action::{resolve_claims, DecisionKind, PickupAction};
pub use error::GameError;
pub use game::{Game, GameConfig, Settlement};
pub use player::Player;
pub use policy::{FirstOptionPolicy, Policy, PolicyKind, RandomPolicy, TileCountPolicy};
pub use round::{Phase, Round, RoundOutcome, TileSource, TurnEvent, N_SEATS};
pub use state::StateView;
