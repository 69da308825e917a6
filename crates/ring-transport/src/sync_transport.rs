//! Double-buffered transport for the synchronous variant.
//!
//! Every tick is one full round: all messages sent during round `t` are
//! delivered at the start of round `t + 1`, and nothing is delivered
//! early. This is modeled as two per-agent mailbox generations — `current`
//! (drained this tick) and `next` (filled by this tick's sends) — swapped at
//! the end of each tick.

use std::collections::VecDeque;

use ring_core::AgentId;
use ring_protocol::Message;

/// Round-delayed delivery: everything sent this tick arrives next tick.
pub struct SyncTransport {
    current: Vec<VecDeque<Message>>,
    next: Vec<VecDeque<Message>>,
}

impl SyncTransport {
    pub fn new(agent_count: usize) -> Self {
        Self {
            current: (0..agent_count).map(|_| VecDeque::new()).collect(),
            next: (0..agent_count).map(|_| VecDeque::new()).collect(),
        }
    }

    /// Queue `message` for delivery to `dest` next round.
    pub fn send(&mut self, dest: AgentId, message: Message) {
        self.next[dest.index()].push_back(message);
    }

    /// Drain every message currently addressed to `agent` for this round.
    ///
    /// The sync transport delivers the whole inbox per tick (SPEC_FULL §4.2),
    /// unlike the async transport's one-message-per-tick rule.
    pub fn drain(&mut self, agent: AgentId) -> Vec<Message> {
        self.current[agent.index()].drain(..).collect()
    }

    /// Swap the two generations: `next` becomes deliverable, `current` is
    /// cleared for the round just finished. Call once per tick, after every
    /// agent has drained its `current` inbox.
    pub fn advance_round(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// `true` once every mailbox (both generations) is empty.
    pub fn is_idle(&self) -> bool {
        self.current.iter().all(VecDeque::is_empty) && self.next.iter().all(VecDeque::is_empty)
    }
}
