//! Infrastructure layer
//!
//! Adapters for the domain ports that this crate ships itself, plus
//! configuration loading. Persistence and hashing adapters live with the
//! collaborators that own those concerns.

pub mod clock;
pub mod config;

pub use clock::{FixedClock, SystemClock};
pub use config::Config;
