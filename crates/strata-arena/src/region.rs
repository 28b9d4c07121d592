//! Bump-allocated regions and the inline allocation header.
//!
//! A [`Region`] is one [`Block`] plus a bump offset. Every allocation is
//! laid out as an 8-byte header holding the payload size, immediately
//! followed by the payload:
//!
//! ```text
//! offset ─┐
//!         ▼
//!  ... │ size (u64) │ payload (size bytes) │ ...
//!                                          ▲
//!                          offset + HEADER_SIZE + size
//! ```
//!
//! The offset only moves backwards when the allocation at the top of the
//! region is freed.

use strata_core::BackingSource;

use crate::backing::Block;

/// Bytes occupied by an allocation header.
pub const HEADER_SIZE: usize = std::mem::size_of::<u64>();

/// A single contiguous block with bump allocation.
///
/// Invariant: `0 <= offset <= size()`.
pub struct Region {
    /// Backing storage, allocated to full size at creation.
    block: Block,
    /// Bump pointer: bytes consumed so far.
    offset: usize,
}

impl Region {
    /// Create a region of `size` bytes from `source`.
    pub fn new(source: BackingSource, size: usize) -> Self {
        Self {
            block: Block::allocate(source, size),
            offset: 0,
        }
    }

    /// Bump-allocate a header plus `size` payload bytes.
    ///
    /// Returns the header offset, or `None` if the remaining space is
    /// smaller than `HEADER_SIZE + size`. The region is untouched on `None`.
    pub fn alloc(&mut self, size: usize) -> Option<usize> {
        let required = HEADER_SIZE.checked_add(size)?;
        if required > self.remaining() {
            return None;
        }
        let start = self.offset;
        self.write_header(start, size);
        self.offset += required;
        Some(start)
    }

    /// Payload size recorded in the header at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + HEADER_SIZE` exceeds the region size.
    pub fn header(&self, offset: usize) -> usize {
        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(&self.block[offset..offset + HEADER_SIZE]);
        u64::from_ne_bytes(raw) as usize
    }

    /// Overwrite the header at `offset`.
    pub fn write_header(&mut self, offset: usize, size: usize) {
        self.block[offset..offset + HEADER_SIZE].copy_from_slice(&(size as u64).to_ne_bytes());
    }

    /// Whether `offset` names a header whose payload lies entirely inside
    /// the consumed span `[0, offset())`.
    pub fn contains(&self, offset: usize) -> bool {
        match offset.checked_add(HEADER_SIZE) {
            Some(payload) if payload <= self.offset => payload
                .checked_add(self.header(offset))
                .is_some_and(|end| end <= self.offset),
            _ => false,
        }
    }

    /// Whether the allocation at `offset` ends exactly at the bump offset.
    pub fn is_top(&self, offset: usize) -> bool {
        offset + HEADER_SIZE + self.header(offset) == self.offset
    }

    /// Roll the bump offset back to `offset`.
    pub fn rewind(&mut self, offset: usize) {
        debug_assert!(offset <= self.offset);
        self.offset = offset;
    }

    /// Advance the bump offset by `additional` bytes.
    ///
    /// Returns `false` (leaving the region untouched) if that would exceed
    /// the region size.
    pub fn extend(&mut self, additional: usize) -> bool {
        if additional > self.remaining() {
            return false;
        }
        self.offset += additional;
        true
    }

    /// Payload bytes of the allocation at `offset`.
    pub fn payload(&self, offset: usize) -> &[u8] {
        let start = offset + HEADER_SIZE;
        &self.block[start..start + self.header(offset)]
    }

    /// Mutable payload bytes of the allocation at `offset`.
    pub fn payload_mut(&mut self, offset: usize) -> &mut [u8] {
        let start = offset + HEADER_SIZE;
        let end = start + self.header(offset);
        &mut self.block[start..end]
    }

    /// The whole backing block.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.block
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total usable bytes.
    pub fn size(&self) -> usize {
        self.block.len()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.block.len() - self.offset
    }

    /// Backing source of this region.
    pub fn source(&self) -> BackingSource {
        self.block.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(size: usize) -> Region {
        Region::new(BackingSource::Heap, size)
    }

    #[test]
    fn alloc_writes_header_and_advances() {
        let mut r = region(1024);
        let a = r.alloc(10).unwrap();
        let b = r.alloc(20).unwrap();
        assert_eq!(a, 0);
        assert_eq!(b, HEADER_SIZE + 10);
        assert_eq!(r.header(a), 10);
        assert_eq!(r.header(b), 20);
        assert_eq!(r.offset(), 2 * HEADER_SIZE + 30);
    }

    #[test]
    fn alloc_fails_when_full_and_leaves_region_untouched() {
        let mut r = region(HEADER_SIZE + 16);
        assert!(r.alloc(16).is_some());
        let before = r.offset();
        assert!(r.alloc(0).is_none());
        assert_eq!(r.offset(), before);
    }

    #[test]
    fn exact_fit_succeeds() {
        let mut r = region(HEADER_SIZE + 100);
        assert_eq!(r.alloc(100), Some(0));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn overflowing_size_is_rejected() {
        let mut r = region(64);
        assert!(r.alloc(usize::MAX).is_none());
    }

    #[test]
    fn top_tracking() {
        let mut r = region(1024);
        let a = r.alloc(8).unwrap();
        let b = r.alloc(8).unwrap();
        assert!(!r.is_top(a));
        assert!(r.is_top(b));
        r.rewind(b);
        assert!(r.is_top(a));
    }

    #[test]
    fn contains_respects_consumed_span() {
        let mut r = region(1024);
        let a = r.alloc(32).unwrap();
        assert!(r.contains(a));
        assert!(!r.contains(r.offset()));
        assert!(!r.contains(usize::MAX));
        r.rewind(a);
        assert!(!r.contains(a));
    }

    #[test]
    fn extend_is_bounded() {
        let mut r = region(64);
        r.alloc(8).unwrap();
        assert!(!r.extend(64));
        assert!(r.extend(64 - HEADER_SIZE - 8));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn payload_roundtrip() {
        let mut r = region(256);
        let a = r.alloc(5).unwrap();
        r.payload_mut(a).copy_from_slice(b"hello");
        assert_eq!(r.payload(a), b"hello");
    }

    #[test]
    fn mapped_region_behaves_like_heap() {
        let mut r = Region::new(BackingSource::PageMapped, 4096);
        let a = r.alloc(4).unwrap();
        r.payload_mut(a).copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(r.payload(a), &[1, 2, 3, 4]);
        assert_eq!(r.source(), BackingSource::PageMapped);
    }
}
