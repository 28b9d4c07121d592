//! Strata: a region-based bump allocator and an open-addressing hash table.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // Copy every key into the arena, then index them without copying again.
//! let mut arena = Arena::new();
//! let handles: Vec<Allocation> = ["table", "chair", "lamp"]
//!     .iter()
//!     .map(|word| arena.memclone(word.as_bytes()))
//!     .collect();
//!
//! let mut table = HashTable::new();
//! for (i, &handle) in handles.iter().enumerate() {
//!     table.put(arena.bytes(handle), i + 1);
//! }
//!
//! assert_eq!(table.get(b"chair"), Some(&2));
//! let index = table.index_of(b"table").unwrap();
//! assert_eq!(*table.at(index), 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | `Config`, `ArenaId`, `ConfigError`, `Fatal` |
//! | [`arena`] | `strata-arena` | `Arena`, `Allocation`, regions and backing blocks |
//! | [`table`] | `strata-table` | `HashTable`, slots, FNV-1 hashing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Configuration, identifiers, and error tiers (`strata-core`).
pub use strata_core as types;

/// Region-based bump allocation (`strata-arena`).
///
/// [`arena::Arena`] hands out [`arena::Allocation`] handles; only the most
/// recent allocation of a region can be freed or grown in place.
pub use strata_arena as arena;

/// Open-addressing hash table (`strata-table`).
///
/// [`table::HashTable`] maps borrowed byte spans to values, hashing with
/// [`table::fnv1`].
pub use strata_table as table;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    pub use strata_arena::{Allocation, Arena};
    pub use strata_core::{catch_fatal, BackingSource, Config, ConfigError, Fatal};
    pub use strata_table::HashTable;
}
