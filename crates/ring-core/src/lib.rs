//! `ring-core` — foundational types for the `ring-election` leader-election
//! simulator.
//!
//! This crate is a dependency of every other `ring-*` crate.  It intentionally
//! has no `ring-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`). Nothing here is fallible, so there is no error type —
//! see `DESIGN.md`.
//!
//! # What lives here
//!
//! | Module      | Contents                                   |
//! |-------------|---------------------------------------------|
//! | [`ids`]     | `AgentId`                                    |
//! | [`time`]    | `Tick`                                       |
//! | [`rng`]     | `SimRng` — the single seeded RNG for a run   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::AgentId;
pub use rng::SimRng;
pub use time::Tick;
