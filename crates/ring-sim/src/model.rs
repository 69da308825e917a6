//! The synchronous and asynchronous election models.
//!
//! Kept as two concrete structs rather than one model generic over a
//! `Transport` trait: the two transports' tick loops differ enough (whole-
//! inbox drain plus a round-advance vs. drain-due-into-inboxes, one pop per
//! agent, then fast-forward-or-not) that a shared trait would mostly be a
//! dispatch indirection with little code actually reused between the two
//! `run` bodies. See DESIGN.md (O2).

use std::collections::HashSet;

use ring_core::{AgentId, SimRng, Tick};
use ring_protocol::{Agent, Effect, Message};
use ring_transport::{AsyncTransport, SyncTransport};

use crate::builder::RingConfig;
use crate::observer::RingObserver;
use crate::ring::{build_ring, choose_starter};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A leader was elected and every agent reported the outcome.
    Elected { leader: AgentId, tick: Tick },
    /// A commitment mismatch was detected; the election was abandoned.
    Aborted { tick: Tick },
    /// `max_ticks` elapsed with no finalized election.
    TimedOut,
}

/// Shared per-run bookkeeping used by both models' tick loops.
struct RunState {
    config: RingConfig,
    rng: SimRng,
    agents: Vec<Agent>,
    starter: AgentId,
    received_leader_reports: HashSet<AgentId>,
    aborted: Option<(u32, u32)>,
}

impl RunState {
    fn new(config: RingConfig) -> Self {
        let mut rng = SimRng::new(config.seed);
        let agents = build_ring(&config, &mut rng);
        let starter = choose_starter(&config, &mut rng);
        Self {
            config,
            rng,
            agents,
            starter,
            received_leader_reports: HashSet::new(),
            aborted: None,
        }
    }

    fn is_done(&self) -> bool {
        self.aborted.is_some()
            || self.received_leader_reports.len() as u32 >= self.config.agent_count
    }

    /// Apply one agent's returned effects, routing `Send` through `send` and
    /// recording `ReportLeader`/`Abort` locally.
    fn apply(&mut self, effects: Vec<Effect>, mut send: impl FnMut(AgentId, Message)) {
        for effect in effects {
            match effect {
                Effect::Send {
                    dest,
                    sender_id,
                    payload,
                } => send(dest, Message::new(sender_id, payload)),
                Effect::ReportLeader(id) => {
                    self.received_leader_reports.insert(id);
                }
                Effect::Abort { expected, revealed } => {
                    self.aborted = Some((expected, revealed));
                }
            }
        }
    }

    fn leader(&self) -> Option<AgentId> {
        self.agents[self.starter.index()].leader
    }

    fn force_punish_all(&mut self) {
        for agent in &mut self.agents {
            agent.force_punish();
        }
    }
}

// ── Synchronous model ───────────────────────────────────────────────────────

/// Fully synchronous variant: one round per tick, full inbox drain, no
/// message reordering or delay beyond the fixed one-round lag
/// (SPEC_FULL §4.2). Always honest — `config.malicious_nodes` is ignored.
pub struct SyncModel {
    state: RunState,
    transport: SyncTransport,
}

impl SyncModel {
    pub fn new(config: RingConfig) -> Self {
        let mut honest_config = config;
        honest_config.malicious_nodes = 0;
        let state = RunState::new(honest_config);
        let transport = SyncTransport::new(state.config.agent_count as usize);
        Self { state, transport }
    }

    pub fn run<O: RingObserver>(&mut self, observer: &mut O) -> Outcome {
        let effects = self.state.agents[self.state.starter.index()].start_protocol();
        let transport = &mut self.transport;
        self.state
            .apply(effects, |dest, msg| transport.send(dest, msg));

        for tick in 0..self.state.config.max_ticks {
            let now = Tick(tick);
            observer.on_tick_start(now);

            if self.state.is_done() {
                break;
            }

            let n = self.state.config.agent_count;
            for i in 0..n {
                let agent_id = AgentId(i);
                let inbox = self.transport.drain(agent_id);
                for msg in inbox {
                    let effects =
                        self.state.agents[agent_id.index()].handle_message(msg, n, &mut self.state.rng);
                    let transport = &mut self.transport;
                    self.state
                        .apply(effects, |dest, out| transport.send(dest, out));
                    if self.state.aborted.is_some() {
                        break;
                    }
                }
                if self.state.aborted.is_some() {
                    break;
                }
            }

            self.transport.advance_round();
            observer.on_tick_end(now);

            if let Some((expected, revealed)) = self.state.aborted {
                observer.on_abort(now, expected, revealed);
                self.state.force_punish_all();
                return Outcome::Aborted { tick: now };
            }
            if self.state.is_done() {
                let leader = self.state.leader().expect("done implies a leader was set");
                observer.on_election(now, leader);
                return Outcome::Elected { leader, tick: now };
            }
        }

        Outcome::TimedOut
    }

    /// Read-only view of every agent's final state, for inspection by tests
    /// and the CLI's summary table.
    pub fn agents(&self) -> &[Agent] {
        &self.state.agents
    }
}

// ── Asynchronous model ──────────────────────────────────────────────────────

/// Asynchronous variant: messages are delivered after a random per-message
/// delay, and each agent pops at most one message off its own inbox per
/// tick, with Byzantine agents among `config.malicious_nodes`
/// (SPEC_FULL §4.4/§5).
pub struct AsyncModel {
    state: RunState,
    transport: AsyncTransport,
}

impl AsyncModel {
    pub fn new(config: RingConfig) -> crate::error::RingResult<Self> {
        let state = RunState::new(config);
        let transport = AsyncTransport::new(config.max_message_delay)?;
        Ok(Self { state, transport })
    }

    pub fn run<O: RingObserver>(&mut self, observer: &mut O) -> Outcome {
        let effects = self.state.agents[self.state.starter.index()].start_protocol();
        self.schedule(Tick(0), effects);

        let mut tick = 0u64;
        while tick < self.state.config.max_ticks {
            let now = Tick(tick);
            observer.on_tick_start(now);

            if self.state.is_done() {
                break;
            }

            // Deliver every message due this tick into its recipient's own
            // inbox (mirrors the network's drain-all-due-messages step),
            // then give each agent one pop off its own inbox (SPEC_FULL
            // §4.4/§5: "every agent executes one step" per tick, not the
            // model processing a single message system-wide).
            for (dest, msg) in self.transport.drain_due(now) {
                self.state.agents[dest.index()].inbox.push_back(msg);
            }

            let n = self.state.config.agent_count;
            for i in 0..n {
                let agent_id = AgentId(i);
                if let Some(msg) = self.state.agents[agent_id.index()].inbox.pop_front() {
                    let effects = self.state.agents[agent_id.index()]
                        .handle_message(msg, n, &mut self.state.rng);
                    self.schedule(now, effects);
                    if self.state.aborted.is_some() {
                        break;
                    }
                }
            }

            observer.on_tick_end(now);

            if let Some((expected, revealed)) = self.state.aborted {
                observer.on_abort(now, expected, revealed);
                self.state.force_punish_all();
                return Outcome::Aborted { tick: now };
            }
            if self.state.is_done() {
                let leader = self.state.leader().expect("done implies a leader was set");
                observer.on_election(now, leader);
                return Outcome::Elected { leader, tick: now };
            }

            // Fast-forward straight to the next scheduled delivery, but only
            // when no agent is still sitting on an undelivered inbox message
            // — otherwise those messages would be skipped over entirely.
            let any_pending = self.state.agents.iter().any(|a| !a.inbox.is_empty());
            tick = if any_pending {
                tick + 1
            } else {
                match self.transport.next_due() {
                    Some(next) if next.0 > tick + 1 => next.0,
                    _ => tick + 1,
                }
            };
        }

        Outcome::TimedOut
    }

    fn schedule(&mut self, now: Tick, effects: Vec<Effect>) {
        let transport = &mut self.transport;
        let rng = &mut self.state.rng;
        let mut reports = Vec::new();
        let mut abort = None;
        for effect in effects {
            match effect {
                Effect::Send {
                    dest,
                    sender_id,
                    payload,
                } => {
                    transport.send(now, sender_id, dest, Message::new(sender_id, payload), rng);
                }
                Effect::ReportLeader(id) => reports.push(id),
                Effect::Abort { expected, revealed } => abort = Some((expected, revealed)),
            }
        }
        for id in reports {
            self.state.received_leader_reports.insert(id);
        }
        if let Some(a) = abort {
            self.state.aborted = Some(a);
        }
    }

    /// Read-only view of every agent's final state, for inspection by tests
    /// and the CLI's summary table.
    pub fn agents(&self) -> &[Agent] {
        &self.state.agents
    }
}
