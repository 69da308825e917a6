//! The five-kind message taxonomy exchanged around the ring.

use std::collections::HashSet;

use ring_core::AgentId;

/// A `(contributor, revealed value)` pair accumulated during REVEAL.
pub type RevealPair = (AgentId, u32);

/// Phase-specific message content.
///
/// Dispatch on `Payload` is a `match`, not virtual dispatch on a message
/// object — there are exactly five kinds and they never grow a new variant
/// at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// Accumulate participant ids while traversing the ring.
    Collect { id_set: HashSet<AgentId> },

    /// Acknowledge membership; triggers the local commit.
    Setup { id_set: HashSet<AgentId> },

    /// Deliver the sender's commitment to its successor.
    Commit { n_rand: u32 },

    /// Accumulate `(id, n_rand_reveal)` pairs around the ring.
    Reveal {
        id_set: HashSet<AgentId>,
        pairs: Vec<RevealPair>,
        last_author: Option<AgentId>,
    },

    /// Broadcast the elected leader around the ring.
    Choose {
        id_set: HashSet<AgentId>,
        pairs: Vec<RevealPair>,
        leader: AgentId,
    },
}

impl Payload {
    /// Short tag for logging — avoids formatting the (potentially large)
    /// `id_set`/`pairs` payloads at call sites that only want the kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Collect { .. } => "COLLECT",
            Payload::Setup { .. } => "SETUP",
            Payload::Commit { .. } => "COMMIT",
            Payload::Reveal { .. } => "REVEAL",
            Payload::Choose { .. } => "CHOOSE",
        }
    }
}

/// An in-flight protocol message: who sent it, and what it carries.
///
/// The `dest` of a message is implicit in transport addressing (it is always
/// the sender's successor, except for the `CHOOSE` hop computed in
/// [`crate::agent::Agent`]'s handlers) so it is not stored on `Message`
/// itself — `ring-transport::PendingMessage` is what carries `dest`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// The id carried in `sender_id` by the spec: for COLLECT/SETUP/REVEAL/
    /// CHOOSE this is the *originator* of the traversal, not necessarily the
    /// immediate relay hop. For COMMIT it is the committing agent itself.
    pub sender_id: AgentId,
    pub payload: Payload,
}

impl Message {
    pub fn new(sender_id: AgentId, payload: Payload) -> Self {
        Self { sender_id, payload }
    }
}
