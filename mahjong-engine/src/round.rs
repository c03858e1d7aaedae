//! Turn and pickup state machine for one round
//!
//! A round cycles through three phases: a seat draws, the same seat
//! discards, and every other seat may claim the discard. The strongest claim
//! (kong, then pong, then chow) takes the tile and that seat discards next,
//! skipping the seats in between. Without a claim the next seat draws.
//! The round ends when a hand reaching 14 tiles wins, or when a draw is due
//! and the set is empty.

use crate::action::resolve_claims;
use crate::{DecisionKind, GameError, PickupAction, Player, Policy, StateView};
use mahjong_core::{ClaimMeld, DiscardPile, Hand, MeldKind, Tile, TileSet, Wind, HAND_SIZE};

/// Number of seats at the table
pub const N_SEATS: usize = 4;

/// Where a round currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitDraw { seat: usize },
    AwaitDiscard { seat: usize },
    AwaitPickup { tile: Tile, discarder: usize },
    Finished,
}

/// Where the winning tile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    Wall,
    Discard { from: usize },
}

/// The result of a single state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Drew {
        seat: usize,
        tile: Tile,
    },
    Discarded {
        seat: usize,
        tile: Tile,
    },
    Claimed {
        seat: usize,
        action: PickupAction,
        tile: Tile,
        from: usize,
    },
    NoClaim {
        tile: Tile,
        discarder: usize,
    },
    Won {
        seat: usize,
        tile: Tile,
        source: TileSource,
    },
    Exhausted,
}

impl std::fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TurnEvent::Drew { seat, tile } => write!(f, "Player {} draws {}", seat, tile),
            TurnEvent::Discarded { seat, tile } => write!(f, "Player {} discards {}", seat, tile),
            TurnEvent::Claimed {
                seat,
                action,
                tile,
                from,
            } => write!(
                f,
                "Player {} claims {} from player {} for a {}",
                seat, tile, from, action
            ),
            TurnEvent::NoClaim { tile, .. } => write!(f, "Nobody claims {}", tile),
            TurnEvent::Won { seat, tile, source } => match source {
                TileSource::Wall => write!(f, "Player {} wins drawing {}", seat, tile),
                TileSource::Discard { from } => write!(
                    f,
                    "Player {} wins with {} discarded by player {}",
                    seat, tile, from
                ),
            },
            TurnEvent::Exhausted => write!(f, "The tile set is exhausted"),
        }
    }
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win { seat: usize, source: TileSource },
    Exhausted,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<usize> {
        match self {
            RoundOutcome::Win { seat, .. } => Some(*seat),
            RoundOutcome::Exhausted => None,
        }
    }
}

/// One round: four hands, the remaining tiles and the discard pile
#[derive(Debug, Clone)]
pub struct Round {
    players: Vec<Player>,
    set: TileSet,
    discards: DiscardPile,
    round_wind: Wind,
    phase: Phase,
    outcome: Option<RoundOutcome>,
}

impl Round {
    /// Deal 13 tiles to each seat in seat order; `first_seat` draws first
    pub fn deal(
        mut set: TileSet,
        round_wind: Wind,
        seat_winds: [Wind; N_SEATS],
        first_seat: usize,
    ) -> Result<Self, GameError> {
        let needed = N_SEATS * HAND_SIZE;
        if set.len() < needed {
            return Err(GameError::NotEnoughTiles {
                needed,
                available: set.len(),
            });
        }
        let mut hands: Vec<Hand> = Vec::with_capacity(N_SEATS);
        for _ in 0..N_SEATS {
            let mut hand = set
                .deal_hand()
                .expect("set was checked to hold every opening hand");
            hand.sort();
            hands.push(hand);
        }
        Round::with_hands(hands, set, round_wind, seat_winds, first_seat)
    }

    /// Start a round from given hands, e.g. a prepared position
    pub fn with_hands(
        hands: Vec<Hand>,
        set: TileSet,
        round_wind: Wind,
        seat_winds: [Wind; N_SEATS],
        first_seat: usize,
    ) -> Result<Self, GameError> {
        if first_seat >= N_SEATS {
            return Err(GameError::InvalidSeat(first_seat));
        }
        if hands.len() != N_SEATS {
            return Err(GameError::InvalidSeat(hands.len()));
        }
        let players = hands
            .into_iter()
            .enumerate()
            .map(|(seat, hand)| Player::new(seat, seat_winds[seat], hand))
            .collect();
        Ok(Round {
            players,
            set,
            discards: DiscardPile::new(),
            round_wind,
            phase: Phase::AwaitDraw { seat: first_seat },
            outcome: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Seat that has to act next, None during pickup resolution or once finished
    pub fn current_seat(&self) -> Option<usize> {
        match self.phase {
            Phase::AwaitDraw { seat } | Phase::AwaitDiscard { seat } => Some(seat),
            _ => None,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Result<&Player, GameError> {
        self.players.get(seat).ok_or(GameError::InvalidSeat(seat))
    }

    /// Sort a seat's hand; positions change, nothing else does
    pub fn sort_hand(&mut self, seat: usize) -> Result<(), GameError> {
        let player = self
            .players
            .get_mut(seat)
            .ok_or(GameError::InvalidSeat(seat))?;
        player.hand.sort();
        Ok(())
    }

    pub fn set(&self) -> &TileSet {
        &self.set
    }

    pub fn discards(&self) -> &DiscardPile {
        &self.discards
    }

    pub fn round_wind(&self) -> Wind {
        self.round_wind
    }

    /// Snapshot of the round as seen from `seat`
    pub fn view(&self, seat: usize) -> Result<StateView, GameError> {
        let player = self.player(seat)?;
        Ok(StateView {
            seat,
            hand: player.hand.clone(),
            visible: self.players.iter().map(|p| p.hand.visible_hand()).collect(),
            discards: self.discards.clone(),
            round_wind: self.round_wind,
            seat_wind: player.seat_wind,
            tiles_remaining: self.set.len(),
            claimed_tile: match self.phase {
                Phase::AwaitPickup { tile, .. } => Some(tile),
                _ => None,
            },
            chow_options: Vec::new(),
        })
    }

    /// Melds `seat` may claim on the current discard (empty outside pickup)
    pub fn claim_options(&self, seat: usize) -> Result<Vec<ClaimMeld>, GameError> {
        let player = self.player(seat)?;
        match self.phase {
            Phase::AwaitPickup { tile, discarder } => Ok(player.claim_melds(tile, discarder)),
            _ => Ok(Vec::new()),
        }
    }

    /// Advance exactly one transition, consulting the policies as needed
    pub fn step(&mut self, policies: &mut [Box<dyn Policy>; N_SEATS]) -> Result<TurnEvent, GameError> {
        match self.phase {
            Phase::AwaitDraw { seat } => self.draw(seat),
            Phase::AwaitDiscard { seat } => {
                let options = self.players[seat].hand.valid_discards();
                let view = self.view(seat)?;
                let choice = select(
                    policies[seat].as_mut(),
                    seat,
                    DecisionKind::Discard,
                    &options,
                    &view,
                )?;
                self.discard(seat, options[choice])
            }
            Phase::AwaitPickup { .. } => self.resolve_pickup(policies),
            Phase::Finished => Err(GameError::RoundFinished),
        }
    }

    /// Run the round to the end
    pub fn play(&mut self, policies: &mut [Box<dyn Policy>; N_SEATS]) -> Result<RoundOutcome, GameError> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.step(policies)?;
        }
    }

    /// `seat` draws from the set. Ends the round on a win or when the set is empty.
    pub fn draw(&mut self, seat: usize) -> Result<TurnEvent, GameError> {
        self.expect_phase(Phase::AwaitDraw { seat }, "draw")?;

        let Some(tile) = self.set.pop_tile() else {
            log::debug!("set exhausted before player {} could draw", seat);
            self.finish(RoundOutcome::Exhausted);
            return Ok(TurnEvent::Exhausted);
        };

        let hand = &mut self.players[seat].hand;
        hand.add(tile);
        hand.sort();
        log::debug!("player {} draws {} ({} left)", seat, tile, self.set.len());

        if hand.is_winning() {
            let source = TileSource::Wall;
            self.finish(RoundOutcome::Win { seat, source });
            return Ok(TurnEvent::Won { seat, tile, source });
        }

        self.phase = Phase::AwaitDiscard { seat };
        Ok(TurnEvent::Drew { seat, tile })
    }

    /// `seat` discards the concealed tile at hand position `index`
    pub fn discard(&mut self, seat: usize, index: usize) -> Result<TurnEvent, GameError> {
        self.expect_phase(Phase::AwaitDiscard { seat }, "discard")?;

        let tile = self.players[seat]
            .hand
            .discard(index)
            .ok_or(GameError::InvalidDiscard { seat, index })?;
        self.discards.add(tile);
        log::debug!("player {} discards {}", seat, tile);

        self.phase = Phase::AwaitPickup {
            tile,
            discarder: seat,
        };
        Ok(TurnEvent::Discarded { seat, tile })
    }

    /// `seat` claims the current discard to complete `meld`
    pub fn claim(&mut self, seat: usize, meld: &ClaimMeld) -> Result<TurnEvent, GameError> {
        let Phase::AwaitPickup { tile, discarder } = self.phase else {
            return Err(self.wrong_phase("claim"));
        };
        if !self.claim_options(seat)?.contains(meld) {
            return Err(GameError::IllegalClaim { seat });
        }
        let action = PickupAction::for_meld(meld.kind).ok_or(GameError::IllegalClaim { seat })?;

        let hand = &mut self.players[seat].hand;
        if !hand.expose_meld(tile, &meld.from_hand) {
            return Err(GameError::IllegalClaim { seat });
        }
        hand.sort();
        self.discards.pop();
        log::debug!(
            "player {} claims {} from player {} for a {}",
            seat,
            tile,
            discarder,
            action
        );

        if hand.is_winning() {
            let source = TileSource::Discard { from: discarder };
            self.finish(RoundOutcome::Win { seat, source });
            return Ok(TurnEvent::Won { seat, tile, source });
        }

        self.phase = Phase::AwaitDiscard { seat };
        Ok(TurnEvent::Claimed {
            seat,
            action,
            tile,
            from: discarder,
        })
    }

    /// Nobody claims the current discard; the next seat draws
    pub fn pass(&mut self) -> Result<TurnEvent, GameError> {
        let Phase::AwaitPickup { tile, discarder } = self.phase else {
            return Err(self.wrong_phase("pass"));
        };
        self.phase = Phase::AwaitDraw {
            seat: (discarder + 1) % N_SEATS,
        };
        log::debug!("nobody claims {}", tile);
        Ok(TurnEvent::NoClaim { tile, discarder })
    }

    /// Poll every other seat in seat order, then apply the strongest claim
    fn resolve_pickup(&mut self, policies: &mut [Box<dyn Policy>; N_SEATS]) -> Result<TurnEvent, GameError> {
        let Phase::AwaitPickup { tile, discarder } = self.phase else {
            return Err(self.wrong_phase("resolve claims"));
        };

        let mut choices: Vec<(usize, PickupAction)> = Vec::new();
        let mut melds_by_seat: Vec<Vec<ClaimMeld>> = vec![Vec::new(); N_SEATS];

        for seat in 0..N_SEATS {
            if seat == discarder {
                continue;
            }
            let melds = self.players[seat].claim_melds(tile, discarder);
            let actions = Player::pickup_actions(&melds);
            if actions.len() == 1 {
                continue;
            }

            let options: Vec<usize> = actions.iter().map(|a| a.code()).collect();
            let view = self.view(seat)?;
            let choice = select(
                policies[seat].as_mut(),
                seat,
                DecisionKind::Pickup,
                &options,
                &view,
            )?;
            choices.push((seat, actions[choice]));
            melds_by_seat[seat] = melds;
        }

        let Some((seat, action)) = resolve_claims(&choices) else {
            return self.pass();
        };

        let kind = action.meld_kind().ok_or(GameError::IllegalClaim { seat })?;
        let candidates: Vec<ClaimMeld> = melds_by_seat[seat]
            .iter()
            .filter(|m| m.kind == kind)
            .cloned()
            .collect();

        let meld = if kind == MeldKind::Chow && candidates.len() > 1 {
            let options: Vec<usize> = (0..candidates.len()).collect();
            let mut view = self.view(seat)?;
            view.chow_options = candidates.clone();
            let choice = select(
                policies[seat].as_mut(),
                seat,
                DecisionKind::Chow,
                &options,
                &view,
            )?;
            candidates[choice].clone()
        } else {
            candidates
                .into_iter()
                .next()
                .ok_or(GameError::IllegalClaim { seat })?
        };

        self.claim(seat, &meld)
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win { seat, .. } => log::debug!("player {} wins the round", seat),
            RoundOutcome::Exhausted => log::debug!("round ends without a winner"),
        }
        self.phase = Phase::Finished;
        self.outcome = Some(outcome);
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.wrong_phase(action))
        }
    }

    fn wrong_phase(&self, action: &'static str) -> GameError {
        match self.phase {
            Phase::Finished => GameError::RoundFinished,
            found => GameError::WrongPhase {
                expected: action,
                found,
            },
        }
    }
}

/// Ask a policy and check that its answer indexes into `options`
fn select(
    policy: &mut dyn Policy,
    seat: usize,
    kind: DecisionKind,
    options: &[usize],
    view: &StateView,
) -> Result<usize, GameError> {
    let index = policy.select_action(kind, options, view);
    if index >= options.len() {
        return Err(GameError::InvalidPolicySelection {
            seat,
            kind,
            index,
            n_options: options.len(),
        });
    }
    Ok(index)
}
