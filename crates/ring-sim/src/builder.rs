//! Fluent builder for [`RingConfig`].

use crate::error::{RingError, RingResult};

/// Configuration for one election run.
///
/// # Fields
///
/// | Field               | Meaning                                                |
/// |----------------------|---------------------------------------------------------|
/// | `agent_count`        | Ring size `N`                                          |
/// | `max_message_delay`  | Async transport: max ticks a message may be delayed     |
/// | `malicious_nodes`    | Number of agents that cheat during REVEAL (async only)  |
/// | `max_ticks`          | Driver ceiling; run times out if not finalized by then  |
/// | `seed`               | Seed for the run's single [`ring_core::SimRng`]         |
#[derive(Clone, Copy, Debug)]
pub struct RingConfig {
    pub agent_count: u32,
    pub max_message_delay: u32,
    pub malicious_nodes: u32,
    pub max_ticks: u64,
    pub seed: u64,
}

impl RingConfig {
    pub fn builder(agent_count: u32) -> RingConfigBuilder {
        RingConfigBuilder::new(agent_count)
    }
}

/// Builder for [`RingConfig`], validating invariants at `.build()` time
/// rather than letting an invalid configuration surface as a panic deep in
/// a tick loop.
pub struct RingConfigBuilder {
    agent_count: u32,
    max_message_delay: u32,
    malicious_nodes: u32,
    max_ticks: u64,
    seed: u64,
}

impl RingConfigBuilder {
    pub fn new(agent_count: u32) -> Self {
        Self {
            agent_count,
            max_message_delay: 1,
            malicious_nodes: 0,
            max_ticks: 10_000,
            seed: 0,
        }
    }

    pub fn max_message_delay(mut self, delay: u32) -> Self {
        self.max_message_delay = delay;
        self
    }

    pub fn malicious_nodes(mut self, count: u32) -> Self {
        self.malicious_nodes = count;
        self
    }

    pub fn max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = ticks;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> RingResult<RingConfig> {
        if self.agent_count == 0 {
            return Err(RingError::Config("agent_count must be > 0".into()));
        }
        if self.malicious_nodes > self.agent_count {
            return Err(RingError::Config(format!(
                "malicious_nodes ({}) exceeds agent_count ({})",
                self.malicious_nodes, self.agent_count
            )));
        }
        if self.max_message_delay < 1 {
            return Err(RingError::Config(
                "max_message_delay must be >= 1".into(),
            ));
        }
        if self.max_ticks == 0 {
            return Err(RingError::Config("max_ticks must be > 0".into()));
        }

        Ok(RingConfig {
            agent_count: self.agent_count,
            max_message_delay: self.max_message_delay,
            malicious_nodes: self.malicious_nodes,
            max_ticks: self.max_ticks,
            seed: self.seed,
        })
    }
}
