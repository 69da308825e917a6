//! `ring-transport` — message delivery for the leader-election ring.
//!
//! # Crate layout
//!
//! | Module             | Contents                                             |
//! |---------------------|-------------------------------------------------------|
//! | [`pending`]          | `PendingMessage` — a scheduled, undelivered message   |
//! | [`sync_transport`]   | `SyncTransport` — double-buffered, one-round delay    |
//! | [`async_transport`]  | `AsyncTransport` — `BinaryHeap`-scheduled random delay |
//! | [`error`]            | `TransportError`, `TransportResult<T>`                |
//!
//! Both transports move the same `ring_protocol::Message` payloads; they
//! differ only in *when* a sent message becomes visible to its recipient.
//! `ring-sim`'s two model types each own exactly one of these transports.

pub mod async_transport;
pub mod error;
pub mod pending;
pub mod sync_transport;

#[cfg(test)]
mod tests;

pub use async_transport::AsyncTransport;
pub use error::{TransportError, TransportResult};
pub use pending::PendingMessage;
pub use sync_transport::SyncTransport;
