//! Raw byte blocks obtained from a [`BackingSource`].
//!
//! A [`Block`] is the storage behind one region. Heap blocks come from the
//! global allocator, page-mapped blocks from an anonymous private mapping.
//! Either way the bytes start zeroed and are released when the block drops.
//! Failure to obtain a block is fatal.

use std::ops::{Deref, DerefMut};

use memmap2::MmapMut;
use strata_core::{fatal, BackingSource, Fatal};

/// One contiguous, exclusively owned byte block.
pub enum Block {
    /// Heap allocation.
    Heap(Box<[u8]>),
    /// Anonymous memory mapping.
    Mapped(MmapMut),
}

impl Block {
    /// Obtain a zeroed block of `size` bytes from `source`.
    ///
    /// Raises [`Fatal::BackingExhausted`] if the source cannot supply it.
    pub fn allocate(source: BackingSource, size: usize) -> Self {
        match source {
            BackingSource::Heap => {
                let mut buf: Vec<u8> = Vec::new();
                if buf.try_reserve_exact(size).is_err() {
                    fatal(Fatal::BackingExhausted {
                        requested: size,
                        source,
                    });
                }
                buf.resize(size, 0);
                Self::Heap(buf.into_boxed_slice())
            }
            BackingSource::PageMapped => match MmapMut::map_anon(size) {
                Ok(map) => Self::Mapped(map),
                Err(err) => {
                    tracing::error!("map_anon({size}) failed: {err}");
                    fatal(Fatal::BackingExhausted {
                        requested: size,
                        source,
                    })
                }
            },
        }
    }

    /// The source this block came from.
    pub fn source(&self) -> BackingSource {
        match self {
            Self::Heap(_) => BackingSource::Heap,
            Self::Mapped(_) => BackingSource::PageMapped,
        }
    }
}

impl Deref for Block {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Heap(buf) => buf,
            Self::Mapped(map) => map,
        }
    }
}

impl DerefMut for Block {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Heap(buf) => buf,
            Self::Mapped(map) => map,
        }
    }
}
