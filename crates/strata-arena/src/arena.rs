//! The region-chaining arena.
//!
//! [`Arena`] owns an ordered list of [`Region`]s (index 0 is the oldest).
//! Allocation is first-fit across that list; a new region is appended only
//! when no existing region has room. Memory goes back to the backing source
//! only when the whole arena is torn down.
//!
//! # Stack discipline
//!
//! `free` reclaims space only for the allocation at the top of its region.
//! Freeing anything else is a no-op and the bytes stay dead until
//! `deinit`. `realloc` follows the same rule: shrinking never returns the
//! tail, and growing moves the allocation (abandoning the old bytes) unless
//! it is the top of a region with enough room left.

use smallvec::SmallVec;
use strata_core::{fatal, ArenaId, Config, ConfigError, Fatal};

use crate::handle::Allocation;
use crate::region::{Region, HEADER_SIZE};

/// Region-based bump allocator.
///
/// Not thread-safe; every mutating operation takes `&mut self`.
pub struct Arena {
    /// Current incarnation. Replaced on every `init`.
    id: ArenaId,
    config: Config,
    regions: SmallVec<[Region; 4]>,
    /// Bytes reserved across all regions.
    total: usize,
}

impl Arena {
    /// Create an arena with the default configuration.
    pub fn new() -> Self {
        Self::build(Config::default())
    }

    /// Create an arena from `config`.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        let mut arena = Self {
            id: ArenaId::next(),
            config,
            regions: SmallVec::new(),
            total: 0,
        };
        arena.init();
        arena
    }

    /// (Re)initialise: release every region, take a fresh incarnation ID,
    /// and create one default-capacity region.
    ///
    /// Handles issued before this call no longer resolve.
    pub fn init(&mut self) {
        self.regions.clear();
        self.total = 0;
        self.id = ArenaId::next();
        self.append_region(self.config.region_capacity);
        tracing::debug!(
            "arena {} initialised with {} bytes ({})",
            self.id,
            self.config.region_capacity,
            self.config.backing
        );
    }

    /// Release every region back to the backing source.
    ///
    /// The arena stays usable: the next `allocate` re-initialises it.
    pub fn deinit(&mut self) {
        tracing::debug!(
            "arena {} released {} regions ({} bytes)",
            self.id,
            self.regions.len(),
            self.total
        );
        self.regions.clear();
        self.total = 0;
    }

    /// Allocate `size` bytes.
    ///
    /// Scans the regions in order for the first with room for the header
    /// plus payload; appends a region of `max(HEADER_SIZE + size,
    /// region_capacity)` bytes if none has. The payload starts zeroed only
    /// if its bytes were never handed out before.
    pub fn allocate(&mut self, size: usize) -> Allocation {
        if self.regions.is_empty() {
            self.init();
        }

        let found = self
            .regions
            .iter_mut()
            .enumerate()
            .find_map(|(index, region)| region.alloc(size).map(|offset| (index, offset)));

        let (index, offset) = match found {
            Some(hit) => hit,
            None => {
                let required = match HEADER_SIZE.checked_add(size) {
                    Some(required) => required,
                    None => fatal(Fatal::BackingExhausted {
                        requested: size,
                        source: self.config.backing,
                    }),
                };
                let index = self.append_region(required.max(self.config.region_capacity));
                let offset = self.regions[index]
                    .alloc(size)
                    .expect("fresh region is sized to fit");
                (index, offset)
            }
        };

        Allocation::new(self.id, index as u32, offset)
    }

    /// Allocate `bytes.len()` bytes and copy `bytes` into them.
    pub fn memclone(&mut self, bytes: &[u8]) -> Allocation {
        let handle = self.allocate(bytes.len());
        self.bytes_mut(handle).copy_from_slice(bytes);
        handle
    }

    /// Free an allocation.
    ///
    /// Space is reclaimed only if `handle` is the top of its region, in
    /// which case the next allocation that fits reuses its exact offset.
    /// Otherwise this is a no-op.
    pub fn free(&mut self, handle: Allocation) {
        let index = self.find_region(handle);
        let region = &mut self.regions[index];
        if region.is_top(handle.offset) {
            region.rewind(handle.offset);
            tracing::trace!("free {handle}: reclaimed");
        } else {
            tracing::trace!("free {handle}: not top of region, ignored");
        }
    }

    /// Resize an allocation to `new_size` bytes.
    ///
    /// - Shrinking rewrites the header in place and returns `handle`.
    /// - Growing the top allocation of a region with enough room left
    ///   extends it in place and returns `handle`.
    /// - Otherwise allocates `new_size` bytes elsewhere, copies the old
    ///   payload, and returns the new handle. The old bytes are abandoned.
    pub fn realloc(&mut self, handle: Allocation, new_size: usize) -> Allocation {
        let index = self.find_region(handle);
        let region = &mut self.regions[index];
        let old_size = region.header(handle.offset);

        if new_size <= old_size {
            region.write_header(handle.offset, new_size);
            tracing::trace!("realloc {handle}: shrink {old_size} -> {new_size}");
            return handle;
        }

        if region.is_top(handle.offset) && region.extend(new_size - old_size) {
            region.write_header(handle.offset, new_size);
            tracing::trace!("realloc {handle}: grown in place {old_size} -> {new_size}");
            return handle;
        }

        let moved = self.allocate(new_size);
        self.copy_payload(handle, moved, old_size);
        tracing::trace!("realloc {handle}: moved to {moved}");
        moved
    }

    /// Payload bytes of `handle`.
    pub fn bytes(&self, handle: Allocation) -> &[u8] {
        let index = self.find_region(handle);
        self.regions[index].payload(handle.offset)
    }

    /// Mutable payload bytes of `handle`.
    pub fn bytes_mut(&mut self, handle: Allocation) -> &mut [u8] {
        let index = self.find_region(handle);
        self.regions[index].payload_mut(handle.offset)
    }

    /// Payload size recorded for `handle`.
    pub fn size_of(&self, handle: Allocation) -> usize {
        let index = self.find_region(handle);
        self.regions[index].header(handle.offset)
    }

    /// Whether `handle` is the most recent live allocation of its region.
    pub fn is_top(&self, handle: Allocation) -> bool {
        let index = self.find_region(handle);
        self.regions[index].is_top(handle.offset)
    }

    /// Resolve the region that owns `handle`.
    ///
    /// Raises [`Fatal::ForeignAllocation`] if the handle was issued by
    /// another arena (or an earlier incarnation of this one), names a
    /// region that does not exist, or points outside the consumed span of
    /// its region.
    pub fn find_region(&self, handle: Allocation) -> usize {
        let index = handle.region as usize;
        let owned = handle.arena == self.id
            && self
                .regions
                .get(index)
                .is_some_and(|region| region.contains(handle.offset));
        if !owned {
            fatal(Fatal::ForeignAllocation {
                arena: handle.arena.get(),
                region: handle.region,
                offset: handle.offset,
            });
        }
        index
    }

    /// Current incarnation ID.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Bytes reserved from the backing source across all regions.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Bytes consumed (headers included) across all regions.
    pub fn used(&self) -> usize {
        self.regions.iter().map(Region::offset).sum()
    }

    /// Number of regions currently held.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// The configuration this arena was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn append_region(&mut self, size: usize) -> usize {
        self.regions.push(Region::new(self.config.backing, size));
        self.total += size;
        let index = self.regions.len() - 1;
        tracing::debug!(
            "arena {} appended region {index}: {size} bytes, {} total",
            self.id,
            self.total
        );
        index
    }

    fn copy_payload(&mut self, from: Allocation, to: Allocation, len: usize) {
        let (src, dst) = (from.region as usize, to.region as usize);
        let src_start = from.payload_offset();
        let dst_start = to.payload_offset();
        if src == dst {
            self.regions[src]
                .bytes_mut()
                .copy_within(src_start..src_start + len, dst_start);
        } else if src < dst {
            let (low, high) = self.regions.split_at_mut(dst);
            high[0].payload_mut(to.offset)[..len]
                .copy_from_slice(&low[src].payload(from.offset)[..len]);
        } else {
            let (low, high) = self.regions.split_at_mut(src);
            low[dst].payload_mut(to.offset)[..len]
                .copy_from_slice(&high[0].payload(from.offset)[..len]);
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
