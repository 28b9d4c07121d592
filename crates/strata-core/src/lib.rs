//! Core types for the Strata data-structure primitives.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! what the arena and the hash table share: construction-time
//! [`Config`], the [`ArenaId`] identifier, and the two error tiers
//! ([`ConfigError`] and [`Fatal`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;

pub use config::{BackingSource, Config};
pub use error::{catch_fatal, fatal, ConfigError, Fatal};
pub use id::ArenaId;
