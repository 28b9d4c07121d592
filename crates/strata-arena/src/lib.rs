//! Region-based bump allocation for Strata.
//!
//! Batches many small allocations into large backing regions. Supports
//! freeing and growing the most recent allocation of a region; everything
//! else is reclaimed only when the arena is torn down.
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── ArenaId (fresh per init; stamps every handle)
//! └── Region[] (first-fit, oldest first)
//!     └── Block (heap Box<[u8]> or anonymous MmapMut)
//!         └── │ header │ payload │ header │ payload │ ... │ free │
//! ```
//!
//! Allocations are addressed by [`Allocation`] handles (region index +
//! header offset), never by raw pointers, so this crate contains no
//! `unsafe` code.
//!
//! # Failure
//!
//! There is no recoverable allocation error. Backing exhaustion and
//! handles that do not belong to the arena raise a
//! [`Fatal`](strata_core::Fatal).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod backing;
pub mod handle;
pub mod region;

pub use arena::Arena;
pub use handle::Allocation;
pub use region::HEADER_SIZE;
