//! `ring-sim` — ring topology, configuration, and the two election models.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|--------------------------------------------------------------|
//! | [`ring`]    | `build_ring`, `choose_starter`                                |
//! | [`builder`] | `RingConfig`, `RingConfigBuilder`                             |
//! | [`model`]   | `SyncModel`, `AsyncModel`, `Outcome`                          |
//! | [`observer`]| `RingObserver`, `NoopObserver`                                |
//! | [`error`]   | `RingError`, `RingResult<T>`                                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = RingConfig::builder(8)
//!     .max_message_delay(4)
//!     .malicious_nodes(1)
//!     .seed(42)
//!     .build()?;
//! let mut model = AsyncModel::new(config)?;
//! let outcome = model.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod ring;


pub use builder::{RingConfig, RingConfigBuilder};
pub use error::{RingError, RingResult};
pub use model::{AsyncModel, Outcome, SyncModel};
pub use observer::{NoopObserver, RingObserver};
