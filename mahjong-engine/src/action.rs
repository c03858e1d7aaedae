use mahjong_core::MeldKind;

/// A claim on a discarded tile. Variants are ordered by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PickupAction {
    None = 0,
    Chow = 1,
    Pong = 2,
    Kong = 3,
}

impl PickupAction {
    pub const ALL: [PickupAction; 4] = [
        PickupAction::None,
        PickupAction::Chow,
        PickupAction::Pong,
        PickupAction::Kong,
    ];

    /// Convert from the option code passed to policies (0-3)
    pub fn from_code(code: usize) -> Option<Self> {
        PickupAction::ALL.get(code).copied()
    }

    /// Option code passed to policies
    pub fn code(&self) -> usize {
        *self as usize
    }

    /// Claim needed to complete a meld of `kind`; pairs are never claimed
    pub fn for_meld(kind: MeldKind) -> Option<Self> {
        match kind {
            MeldKind::Pair => None,
            MeldKind::Chow => Some(PickupAction::Chow),
            MeldKind::Pong => Some(PickupAction::Pong),
            MeldKind::Kong => Some(PickupAction::Kong),
        }
    }

    /// Meld completed by this claim
    pub fn meld_kind(&self) -> Option<MeldKind> {
        match self {
            PickupAction::None => None,
            PickupAction::Chow => Some(MeldKind::Chow),
            PickupAction::Pong => Some(MeldKind::Pong),
            PickupAction::Kong => Some(MeldKind::Kong),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PickupAction::None => "none",
            PickupAction::Chow => "chow",
            PickupAction::Pong => "pong",
            PickupAction::Kong => "kong",
        }
    }
}

impl std::fmt::Display for PickupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of decision a policy is asked to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    /// Options are hand positions of concealed tiles
    Discard,
    /// Options are `PickupAction` codes, always including `None`
    Pickup,
    /// Options index into `StateView::chow_options`
    Chow,
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            DecisionKind::Discard => "Discard",
            DecisionKind::Pickup => "Pickup",
            DecisionKind::Chow => "Chow",
        };
        write!(f, "{}", name)
    }
}

/// Pick the winning claim: highest priority first, lowest seat among equals.
///
/// `claims` pairs a seat with the action it chose; `None` entries never win.
pub fn resolve_claims(claims: &[(usize, PickupAction)]) -> Option<(usize, PickupAction)> {
    let mut best: Option<(usize, PickupAction)> = None;
    for &(seat, action) in claims {
        if action == PickupAction::None {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_seat, best_action)) => {
                action > best_action || (action == best_action && seat < best_seat)
            }
        };
        if better {
            best = Some((seat, action));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(PickupAction::Kong > PickupAction::Pong);
        assert!(PickupAction::Pong > PickupAction::Chow);
        assert!(PickupAction::Chow > PickupAction::None);
    }

    #[test]
    fn test_codes() {
        for action in PickupAction::ALL {
            assert_eq!(PickupAction::from_code(action.code()), Some(action));
        }
        assert_eq!(PickupAction::from_code(4), None);
    }

    #[test]
    fn test_kong_beats_pong_beats_chow() {
        let claims = [
            (1, PickupAction::Chow),
            (2, PickupAction::Pong),
            (3, PickupAction::Kong),
        ];
        assert_eq!(resolve_claims(&claims), Some((3, PickupAction::Kong)));
        assert_eq!(resolve_claims(&claims[..2]), Some((2, PickupAction::Pong)));
        assert_eq!(resolve_claims(&claims[..1]), Some((1, PickupAction::Chow)));
    }

    #[test]
    fn test_no_claims() {
        assert_eq!(resolve_claims(&[]), None);
        assert_eq!(
            resolve_claims(&[(0, PickupAction::None), (2, PickupAction::None)]),
            None
        );
    }

    #[test]
    fn test_ties_go_to_lowest_seat() {
        let claims = [(3, PickupAction::Pong), (0, PickupAction::Pong)];
        assert_eq!(resolve_claims(&claims), Some((0, PickupAction::Pong)));
    }
}
