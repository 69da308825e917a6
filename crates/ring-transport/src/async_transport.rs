//! Priority-queue transport for the asynchronous variant.
//!
//! Every send is scheduled for delivery after a random delay in
//! `1..=max_delay` ticks, drawn from the shared [`SimRng`]. Messages are
//! held in a `BinaryHeap<Reverse<PendingMessage>>` — the same min-heap idiom
//! `dt-spatial::router::DijkstraRouter` uses for Dijkstra's frontier — keyed
//! by `(deliver_at, seq)` so delivery order is deterministic for a given
//! seed even when two messages land on the same tick.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ring_core::{AgentId, SimRng, Tick};
use ring_protocol::Message;

use crate::error::{TransportError, TransportResult};
use crate::pending::PendingMessage;

pub struct AsyncTransport {
    max_delay: u32,
    next_seq: u64,
    queue: BinaryHeap<Reverse<PendingMessage>>,
}

impl AsyncTransport {
    pub fn new(max_delay: u32) -> TransportResult<Self> {
        if max_delay < 1 {
            return Err(TransportError::InvalidMaxDelay(max_delay));
        }
        Ok(Self {
            max_delay,
            next_seq: 0,
            queue: BinaryHeap::new(),
        })
    }

    /// Schedule `message` for delivery to `dest` after a random delay.
    pub fn send(&mut self, now: Tick, source: AgentId, dest: AgentId, message: Message, rng: &mut SimRng) {
        let delay = rng.gen_range(1..=self.max_delay);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(PendingMessage {
            deliver_at: now.offset(u64::from(delay)),
            seq,
            source,
            dest,
            message,
        }));
    }

    /// Pop and return every message due at or before `now`, in
    /// `(deliver_at, seq)` order, for the model to deposit into each
    /// recipient's own inbox — it does not itself limit processing to one
    /// message. The one-message-per-tick rule (SPEC_FULL §4.4/§5) is
    /// enforced per agent by the model, which pops at most one message off
    /// each agent's inbox per tick after this drain.
    pub fn drain_due(&mut self, now: Tick) -> Vec<(AgentId, Message)> {
        let mut due = Vec::new();
        while matches!(self.queue.peek(), Some(Reverse(pm)) if pm.deliver_at <= now) {
            let Reverse(pm) = self.queue.pop().expect("peeked Some above");
            due.push((pm.dest, pm.message));
        }
        due
    }

    /// The tick of the earliest pending message, if any — used by the model
    /// to fast-forward when no message is due yet.
    pub fn next_due(&self) -> Option<Tick> {
        self.queue.peek().map(|Reverse(pm)| pm.deliver_at)
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}
