//! Effects produced by an agent's message handlers.
//!
//! Mirrors the `Intent` pattern used elsewhere in the `dt-*` family:
//! handlers never mutate a sibling agent or the model directly, they return
//! a list of effects that the driving model applies in a dedicated step.

use ring_core::AgentId;

use crate::message::Payload;

/// An action requested by [`crate::agent::Agent::handle_message`] or
/// [`crate::agent::Agent::start_protocol`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Send `payload` to `dest` via the transport (subject to its delivery
    /// model — one round for the sync transport, a random delay for async).
    ///
    /// `sender_id` is the logical sender carried in the resulting
    /// [`crate::message::Message`] — for a forwarded COLLECT/SETUP/REVEAL/
    /// CHOOSE this is the *originator*, preserved unchanged hop to hop, not
    /// the relaying agent's own id. A forwarded COMMIT is the one exception
    /// in the other direction: it preserves the *original committer's* id
    /// rather than adopting the relay's, which is what makes it die out
    /// after a single additional hop once it no longer matches the next
    /// agent's predecessor.
    Send {
        dest: AgentId,
        sender_id: AgentId,
        payload: Payload,
    },

    /// Record that `agent` has confirmed the election outcome.
    ///
    /// The model accumulates these into `received_leader_reports`; the run
    /// is complete once that set reaches cardinality `N` (§4.5, §6 of
    /// SPEC_FULL.md).
    ReportLeader(AgentId),

    /// A commitment mismatch was detected: raise the global abort flag.
    Abort { expected: u32, revealed: u32 },
}
