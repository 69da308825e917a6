//! Ring topology construction.

use ring_core::{AgentId, SimRng};
use ring_protocol::Agent;

use crate::builder::RingConfig;

/// Build `config.agent_count` agents wired into a ring: agent `i`'s
/// successor is `(i + 1) % n`, its predecessor `(i - 1 + n) % n`.
///
/// `config.malicious_nodes` agents are chosen uniformly at random (without
/// replacement) to have `is_malicious = true`. Callers that want every
/// agent honest (the synchronous transport, per SPEC_FULL §6) should pass a
/// config with `malicious_nodes = 0`.
pub fn build_ring(config: &RingConfig, rng: &mut SimRng) -> Vec<Agent> {
    let n = config.agent_count as usize;
    let malicious: std::collections::HashSet<usize> = rng
        .sample_without_replacement(n, config.malicious_nodes as usize)
        .into_iter()
        .collect();

    (0..n)
        .map(|i| {
            let id = AgentId(i as u32);
            let successor = AgentId(((i + 1) % n) as u32);
            let predecessor = AgentId(((i + n - 1) % n) as u32);
            Agent::new(id, successor, predecessor, malicious.contains(&i))
        })
        .collect()
}

/// Choose the agent that begins the election by sending the first COLLECT.
pub fn choose_starter(config: &RingConfig, rng: &mut SimRng) -> AgentId {
    AgentId(rng.choose_index(config.agent_count as usize) as u32)
}
