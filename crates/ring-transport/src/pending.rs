//! A scheduled, not-yet-delivered message.

use std::cmp::Ordering;

use ring_core::{AgentId, Tick};
use ring_protocol::Message;

/// A message in flight between two agents, due for delivery at `deliver_at`.
///
/// Ordered by `(deliver_at, seq)` only — `seq` is the monotonically
/// increasing send order, used purely to break ties deterministically when
/// two messages are due on the same tick. Pushed into a
/// `BinaryHeap<Reverse<PendingMessage>>` by [`crate::async_transport::AsyncTransport`],
/// the same min-heap idiom `dt-spatial`'s Dijkstra router uses for its
/// priority queue.
#[derive(Clone, Debug)]
pub struct PendingMessage {
    pub deliver_at: Tick,
    pub seq: u64,
    pub source: AgentId,
    pub dest: AgentId,
    pub message: Message,
}

impl PartialEq for PendingMessage {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PendingMessage {}

impl PartialOrd for PendingMessage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingMessage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PendingMessage {
    fn key(&self) -> (Tick, u64) {
        (self.deliver_at, self.seq)
    }
}
