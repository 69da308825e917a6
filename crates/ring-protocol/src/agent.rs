//! Per-agent protocol state and handler dispatch.

use std::collections::{HashMap, HashSet, VecDeque};

use ring_core::{AgentId, SimRng};

use crate::effect::Effect;
use crate::message::{Message, Payload, RevealPair};
use crate::phase::Phase;

/// One participant in the leader-election ring.
///
/// `successor`/`predecessor` are non-owning [`AgentId`] handles into the
/// ring's flat agent store (`ring-sim::Ring`) — never raw references, so the
/// ring never needs `Rc`/`RefCell` to form its cycle (SPEC_FULL §9).
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub successor: AgentId,
    pub predecessor: AgentId,

    pub phase: Phase,
    /// Largest originator id acknowledged so far. `-1` (no `AgentId` can
    /// equal it) until the agent sees its first COLLECT.
    pub highest: i64,
    pub id_set: HashSet<AgentId>,

    pub n_rand_commit: Option<u32>,
    pub n_rand_reveal: Option<u32>,
    pub commit_records: HashMap<AgentId, u32>,
    pub commit_from_predecessor: Option<u32>,

    pub inbox: VecDeque<Message>,
    pub leader: Option<AgentId>,
    pub is_malicious: bool,
}

impl Agent {
    /// Construct a fresh, idle agent. `is_malicious` is fixed for the life
    /// of the run — the synchronous transport always constructs its agents
    /// with `is_malicious = false` (SPEC_FULL §6: malicious nodes are an
    /// async-only configuration axis).
    pub fn new(id: AgentId, successor: AgentId, predecessor: AgentId, is_malicious: bool) -> Self {
        Self {
            id,
            successor,
            predecessor,
            phase: Phase::Idle,
            highest: -1,
            id_set: HashSet::new(),
            n_rand_commit: None,
            n_rand_reveal: None,
            commit_records: HashMap::new(),
            commit_from_predecessor: None,
            inbox: VecDeque::new(),
            leader: None,
            is_malicious,
        }
    }

    /// `true` once this agent has recorded either a leader or the abort
    /// sentinel (which is also `None` — see `Phase::Finalized`).
    pub fn is_finalized(&self) -> bool {
        self.phase == Phase::Finalized
    }

    /// Begin the election as the chosen starter. No-op if already started
    /// (mirrors `UponWaking`'s idempotence in the reference model).
    pub fn start_protocol(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Idle {
            return vec![];
        }
        tracing::info!(agent = %self.id, "waking up and starting protocol");
        self.highest = self.id.as_i64();
        self.phase = Phase::Collect;
        self.id_set.insert(self.id);
        vec![Effect::Send {
            dest: self.successor,
            sender_id: self.id,
            payload: Payload::Collect {
                id_set: self.id_set.clone(),
            },
        }]
    }

    /// Unconditionally force the punish sentinel. Called by the model once
    /// per agent after the global abort flag is observed — agents never
    /// poll the flag themselves (SPEC_FULL §4.5, §9).
    pub fn force_punish(&mut self) {
        self.leader = None;
    }

    /// Dispatch one inbound message to its phase handler.
    pub fn handle_message(&mut self, msg: Message, n: u32, rng: &mut SimRng) -> Vec<Effect> {
        match &msg.payload {
            Payload::Collect { .. } => self.on_collect(msg, n),
            Payload::Setup { .. } => self.on_setup(msg, n, rng),
            Payload::Commit { .. } => self.on_commit(msg),
            Payload::Reveal { .. } => self.on_reveal(msg, n, rng),
            Payload::Choose { .. } => self.on_choose(msg),
        }
    }

    // ── COLLECT ────────────────────────────────────────────────────────────

    fn on_collect(&mut self, msg: Message, n: u32) -> Vec<Effect> {
        let originator = msg.sender_id;
        let Payload::Collect { id_set } = msg.payload else {
            unreachable!("dispatched as Collect")
        };

        if originator.as_i64() > self.highest && self.phase <= Phase::Collect {
            self.highest = originator.as_i64();
            let mut forwarded = id_set;
            forwarded.insert(self.id);
            vec![Effect::Send {
                dest: self.successor,
                sender_id: originator,
                payload: Payload::Collect { id_set: forwarded },
            }]
        } else if originator == self.id && id_set.len() as u32 == n {
            self.phase = Phase::Setup;
            self.id_set = id_set.clone();
            tracing::info!(agent = %self.id, "full ring collected, entering SETUP phase");
            vec![Effect::Send {
                dest: self.successor,
                sender_id: self.id,
                payload: Payload::Setup { id_set },
            }]
        } else {
            vec![]
        }
    }

    // ── SETUP ──────────────────────────────────────────────────────────────

    fn on_setup(&mut self, msg: Message, n: u32, rng: &mut SimRng) -> Vec<Effect> {
        let originator = msg.sender_id;
        let Payload::Setup { id_set } = msg.payload else {
            unreachable!("dispatched as Setup")
        };

        if originator.as_i64() != self.highest {
            return vec![];
        }
        if self.id_set.is_empty() {
            self.id_set = id_set.clone();
        }

        let mut effects = Vec::new();

        if self.phase < Phase::Setup || (self.is_malicious && self.id == originator) {
            self.phase = Phase::Setup;
            let commit = rng.gen_range(0..n);
            self.n_rand_commit = Some(commit);
            if self.is_malicious {
                let diff = rng.gen_range(1..n);
                let reveal = (commit + diff) % n;
                self.n_rand_reveal = Some(reveal);
                tracing::warn!(
                    agent = %self.id, commit, reveal,
                    "malicious agent committing one value, will reveal another"
                );
            } else {
                self.n_rand_reveal = Some(commit);
            }
            effects.push(Effect::Send {
                dest: self.successor,
                sender_id: self.id,
                payload: Payload::Commit { n_rand: commit },
            });
        }

        if self.id != originator {
            effects.push(Effect::Send {
                dest: self.successor,
                sender_id: originator,
                payload: Payload::Setup { id_set },
            });
        } else {
            self.phase = Phase::Reveal;
            tracing::info!(agent = %self.id, "all commitments sent, entering REVEAL phase");
            effects.push(Effect::Send {
                dest: self.successor,
                sender_id: self.id,
                payload: Payload::Reveal {
                    id_set: self.id_set.clone(),
                    pairs: vec![],
                    last_author: None,
                },
            });
        }

        effects
    }

    // ── COMMIT ─────────────────────────────────────────────────────────────

    fn on_commit(&mut self, msg: Message) -> Vec<Effect> {
        let sender = msg.sender_id;
        let Payload::Commit { n_rand } = msg.payload else {
            unreachable!("dispatched as Commit")
        };

        if sender != self.predecessor {
            return vec![];
        }
        self.commit_from_predecessor = Some(n_rand);
        self.commit_records.insert(sender, n_rand);
        // Preserve the original committer's id rather than adopting our own:
        // the next hop's `on_commit` will then reject it (sender no longer
        // matches its predecessor), which is what stops a COMMIT from
        // circulating past one extra hop.
        vec![Effect::Send {
            dest: self.successor,
            sender_id: sender,
            payload: Payload::Commit { n_rand },
        }]
    }

    // ── REVEAL ─────────────────────────────────────────────────────────────

    fn on_reveal(&mut self, msg: Message, n: u32, rng: &mut SimRng) -> Vec<Effect> {
        let originator = msg.sender_id;
        let Payload::Reveal {
            id_set,
            mut pairs,
            last_author,
        } = msg.payload
        else {
            unreachable!("dispatched as Reveal")
        };

        if self.id_set.is_empty() || id_set != self.id_set {
            return vec![];
        }

        // Integrity check 1: every pair we have a recorded commitment for
        // must match that commitment.
        for (pid, revealed) in &pairs {
            if let Some(&expected) = self.commit_records.get(pid) {
                if *revealed != expected {
                    tracing::error!(
                        agent = %self.id, cheater = %pid, expected, revealed,
                        "commitment mismatch detected, aborting election"
                    );
                    return vec![Effect::Abort {
                        expected,
                        revealed: *revealed,
                    }];
                }
            }
        }

        // Integrity check 2: the strongest-possible local check — the
        // immediate predecessor's own most recent contribution.
        if let Some(last_author) = last_author {
            if last_author == self.predecessor {
                let (Some(&(_, last_n)), Some(expected)) =
                    (pairs.last(), self.commit_from_predecessor)
                else {
                    return vec![]; // out of order: drop and wait for a later attempt
                };
                if last_n != expected {
                    tracing::error!(
                        agent = %self.id, cheater = %last_author, expected, revealed = last_n,
                        "predecessor's reveal disagrees with its direct commitment"
                    );
                    return vec![Effect::Abort {
                        expected,
                        revealed: last_n,
                    }];
                }
            }
        }

        // Append our own contribution if not already present.
        if !pairs.iter().any(|&(pid, _)| pid == self.id) {
            if self.n_rand_reveal.is_none() {
                if self.n_rand_commit.is_none() {
                    let fallback = rng.gen_range(0..n);
                    tracing::debug!(
                        agent = %self.id, value = fallback,
                        "no commitment chosen yet at REVEAL-append, generating one lazily"
                    );
                    self.n_rand_commit = Some(fallback);
                }
                self.n_rand_reveal = self.n_rand_commit;
            }
            pairs.push((self.id, self.n_rand_reveal.expect("just ensured Some")));
        }

        let mut effects = vec![Effect::Send {
            dest: self.successor,
            sender_id: originator,
            payload: Payload::Reveal {
                id_set: id_set.clone(),
                pairs: pairs.clone(),
                last_author: Some(self.id),
            },
        }];

        if self.id == originator && pairs.len() as u32 == n {
            let leader_id = compute_leader(&id_set, &pairs, n);
            self.leader = Some(leader_id);
            tracing::info!(agent = %self.id, leader = %leader_id, "leader elected, broadcasting CHOOSE");
            effects.push(Effect::Send {
                dest: self.successor,
                sender_id: originator,
                payload: Payload::Choose {
                    id_set,
                    pairs,
                    leader: leader_id,
                },
            });
        }

        effects
    }

    // ── CHOOSE ─────────────────────────────────────────────────────────────

    fn on_choose(&mut self, msg: Message) -> Vec<Effect> {
        let originator = msg.sender_id;
        let Payload::Choose {
            id_set,
            pairs,
            leader,
        } = msg.payload
        else {
            unreachable!("dispatched as Choose")
        };

        if id_set != self.id_set {
            return vec![];
        }

        self.leader = Some(leader);
        self.phase = Phase::Finalized;

        let mut effects = vec![Effect::ReportLeader(self.id)];
        if self.id != originator {
            effects.push(Effect::Send {
                dest: self.successor,
                sender_id: originator,
                payload: Payload::Choose {
                    id_set,
                    pairs,
                    leader,
                },
            });
        }
        effects
    }
}

/// `leader = sort(id_set, descending)[total mod N]` (SPEC_FULL §4.6).
fn compute_leader(id_set: &HashSet<AgentId>, pairs: &[RevealPair], n: u32) -> AgentId {
    let total: u64 = pairs.iter().map(|&(_, v)| u64::from(v)).sum();
    let idx = (total % u64::from(n)) as usize;
    let mut sorted: Vec<AgentId> = id_set.iter().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted[idx]
}
