//! `ring-protocol` — the per-agent leader-election state machine.
//!
//! This is the core of the `ring-election` simulator: the message taxonomy,
//! the phase handlers (COLLECT, SETUP, COMMIT, REVEAL, CHOOSE), and the
//! commit/reveal bookkeeping that detects a cheating agent.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|--------------------------------------------------------------|
//! | [`phase`]   | `Phase` — the agent's protocol phase                         |
//! | [`message`] | `Payload`, `Message` — the five-kind message taxonomy         |
//! | [`effect`]  | `Effect` — what a handler asks the model to do                |
//! | [`agent`]   | `Agent` — per-agent state and the handler dispatch            |
//!
//! # Design
//!
//! `Agent::handle_message` is a pure function of `(&mut self, Message, …) ->
//! Vec<Effect>`. It never reaches into another agent's state directly —
//! every cross-agent action (forwarding a message, reporting completion to
//! the model, signalling an abort) is expressed as an [`Effect`] that the
//! driving model (`ring-sim`) applies. This mirrors the intent/apply split
//! the wider `dt-*` family uses for its behavior models.
//!
//! The same `Agent` type and handlers serve both the synchronous and the
//! asynchronous transport — only the draining rule (drain-all vs. one message
//! per tick) and `is_malicious` (always `false` under the sync transport)
//! differ between the two.

pub mod agent;
pub mod effect;
pub mod message;
pub mod phase;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use effect::Effect;
pub use message::{Message, Payload};
pub use phase::Phase;
