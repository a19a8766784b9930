//! Slow states keying the matrix planes.

use super::Side;

/// Which sides are currently slowed. Each variant owns one matrix plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlowState {
    /// Nobody is slowed.
    Neither,
    /// Only the attacker is slowed.
    Attacker,
    /// Only the defender is slowed.
    Defender,
    /// Both sides are slowed.
    Both,
}

impl SlowState {
    /// Every state, ordered so that slowing transitions always lead to a
    /// state earlier in the list. Walking planes in this order never
    /// revisits mass moved during the same blow.
    pub const DESCENDING: [SlowState; 4] = [
        SlowState::Both,
        SlowState::Defender,
        SlowState::Attacker,
        SlowState::Neither,
    ];

    /// Build a state from the two slowed flags.
    pub fn new(attacker_slowed: bool, defender_slowed: bool) -> Self {
        match (attacker_slowed, defender_slowed) {
            (false, false) => Self::Neither,
            (true, false) => Self::Attacker,
            (false, true) => Self::Defender,
            (true, true) => Self::Both,
        }
    }

    /// Whether `side` is slowed in this state.
    pub fn is_slowed(self, side: Side) -> bool {
        match side {
            Side::Attacker => matches!(self, Self::Attacker | Self::Both),
            Side::Defender => matches!(self, Self::Defender | Self::Both),
        }
    }

    /// The state reached when `side` becomes slowed.
    pub fn with_slowed(self, side: Side) -> Self {
        match side {
            Side::Attacker => Self::new(true, self.is_slowed(Side::Defender)),
            Side::Defender => Self::new(self.is_slowed(Side::Attacker), true),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Neither => 0,
            Self::Attacker => 1,
            Self::Defender => 2,
            Self::Both => 3,
        }
    }
}
