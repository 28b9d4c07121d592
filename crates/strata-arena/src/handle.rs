//! Allocation handles.
//!
//! An [`Allocation`] names an allocation by position instead of by address:
//! the arena incarnation that issued it, the region index, and the offset of
//! its header inside that region. Resolving a handle is O(1) and never
//! requires pointer arithmetic.

use std::fmt;

use strata_core::ArenaId;

use crate::region::HEADER_SIZE;

/// Location of one allocation inside an [`Arena`](crate::Arena).
///
/// Handles are plain values: copying one does not copy the bytes, and
/// dropping one does not free them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Allocation {
    /// Arena incarnation that issued this handle.
    pub(crate) arena: ArenaId,
    /// Index of the owning region.
    pub(crate) region: u32,
    /// Byte offset of the header within the region.
    pub(crate) offset: usize,
}

impl Allocation {
    pub(crate) fn new(arena: ArenaId, region: u32, offset: usize) -> Self {
        Self {
            arena,
            region,
            offset,
        }
    }

    /// The arena incarnation that issued this handle.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Index of the owning region (0 = oldest).
    pub fn region(&self) -> u32 {
        self.region
    }

    /// Byte offset of the header within the region.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte offset of the first payload byte within the region.
    pub fn payload_offset(&self) -> usize {
        self.offset + HEADER_SIZE
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Allocation(arena={}, region={}, off={})",
            self.arena, self.region, self.offset
        )
    }
}
