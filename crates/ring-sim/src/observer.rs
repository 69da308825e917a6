//! Observer trait for progress reporting during a run.

use ring_core::{AgentId, Tick};

/// Callbacks invoked by [`crate::model::SyncModel::run`] and
/// [`crate::model::AsyncModel::run`] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait RingObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once a leader has been elected and every agent has reported
    /// the outcome (testable property #5 of SPEC_FULL.md §8).
    fn on_election(&mut self, _tick: Tick, _leader: AgentId) {}

    /// Called when a commitment mismatch aborts the run.
    fn on_abort(&mut self, _tick: Tick, _expected: u32, _revealed: u32) {}
}

/// A [`RingObserver`] that does nothing.
pub struct NoopObserver;

impl RingObserver for NoopObserver {}
