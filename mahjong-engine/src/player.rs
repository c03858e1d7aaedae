use crate::round::N_SEATS;
use crate::PickupAction;
use mahjong_core::{claimable_melds, ClaimMeld, Hand, MeldKind, Tile, Wind};

/// One seat at the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub seat: usize,
    pub seat_wind: Wind,
    pub hand: Hand,
}

impl Player {
    pub fn new(seat: usize, seat_wind: Wind, hand: Hand) -> Self {
        Player {
            seat,
            seat_wind,
            hand,
        }
    }

    /// True if this seat plays immediately after `discarder`
    pub fn follows(&self, discarder: usize) -> bool {
        self.seat == (discarder + 1) % N_SEATS
    }

    /// Melds this seat may complete with `tile` discarded by `discarder`.
    /// Only the next seat may chow; nobody claims their own discard.
    ///
    /// A claim must leave a concealed tile to discard afterwards. Claiming
    /// every concealed tile can never win either, since a winning hand needs
    /// a concealed pair.
    pub fn claim_melds(&self, tile: Tile, discarder: usize) -> Vec<ClaimMeld> {
        if self.seat == discarder {
            return Vec::new();
        }
        let may_chow = self.follows(discarder);
        let concealed = self.hand.valid_discards().len();
        claimable_melds(&self.hand, tile)
            .into_iter()
            .filter(|m| m.kind != MeldKind::Chow || may_chow)
            .filter(|m| m.from_hand.len() < concealed)
            .collect()
    }

    /// Legal pickup actions for the claim melds, `None` first, ascending
    pub fn pickup_actions(melds: &[ClaimMeld]) -> Vec<PickupAction> {
        let mut actions = vec![PickupAction::None];
        for meld in melds {
            if let Some(action) = PickupAction::for_meld(meld.kind) {
                if !actions.contains(&action) {
                    actions.push(action);
                }
            }
        }
        actions.sort();
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_core::{parse_hand, parse_tile};

    #[test]
    fn test_only_next_seat_may_chow() {
        let hand = parse_hand("b3 b4 c9 c9").unwrap();
        let b5 = parse_tile("b5").unwrap();

        let next = Player::new(2, Wind::West, hand.clone());
        assert_eq!(next.claim_melds(b5, 1).len(), 1);

        let across = Player::new(3, Wind::North, hand);
        assert!(across.claim_melds(b5, 1).is_empty());
    }

    #[test]
    fn test_own_discard_not_claimable() {
        let player = Player::new(0, Wind::East, parse_hand("c9 c9").unwrap());
        assert!(player.claim_melds(parse_tile("c9").unwrap(), 0).is_empty());
    }

    #[test]
    fn test_wraparound_successor() {
        let player = Player::new(0, Wind::East, Hand::new());
        assert!(player.follows(3));
        assert!(!player.follows(0));
    }

    #[test]
    fn test_claim_keeps_a_concealed_tile() {
        let k1 = parse_tile("k1").unwrap();
        // Kong would expose the last three concealed tiles
        let player = Player::new(1, Wind::South, parse_hand("c5* c5* c5* k1 k1 k1").unwrap());
        let melds = player.claim_melds(k1, 0);
        assert_eq!(melds.len(), 1);
        assert_eq!(melds[0].kind, MeldKind::Pong);
        assert_eq!(Player::pickup_actions(&melds), vec![PickupAction::None, PickupAction::Pong]);

        // Pong would expose both concealed tiles
        let player = Player::new(1, Wind::South, parse_hand("c5* c5* c5* k1 k1").unwrap());
        assert!(player.claim_melds(k1, 0).is_empty());
    }

    #[test]
    fn test_pickup_actions() {
        let player = Player::new(1, Wind::South, parse_hand("k4 k4 k4 k5 k6").unwrap());
        let melds = player.claim_melds(parse_tile("k4").unwrap(), 0);
        assert_eq!(
            Player::pickup_actions(&melds),
            vec![
                PickupAction::None,
                PickupAction::Chow,
                PickupAction::Pong,
                PickupAction::Kong
            ]
        );
        assert_eq!(Player::pickup_actions(&[]), vec![PickupAction::None]);
    }
}
