//! The agent's protocol phase.

use std::fmt;

/// The agent's position in the leader-election state machine.
///
/// Numeric values match the spec's phase numbering; `4` is reserved and
/// intentionally has no variant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Not yet participating.
    #[default]
    Idle = 0,
    /// Traversing the ring collecting participant ids.
    Collect = 1,
    /// Committing a random contribution.
    Setup = 2,
    /// Revealing contributions and checking commitments.
    Reveal = 3,
    /// Leader broadcast received; the agent has finished.
    Finalized = 5,
}

impl Phase {
    /// The numeric phase value as used by the spec (0,1,2,3,5 — 4 is unused).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Collect => "collect",
            Phase::Setup => "setup",
            Phase::Reveal => "reveal",
            Phase::Finalized => "finalized",
        };
        write!(f, "{name}")
    }
}
