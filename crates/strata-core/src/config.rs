//! Construction-time configuration shared by the arena and the hash table.

use std::fmt;

use crate::error::ConfigError;

/// Where an arena obtains the raw bytes for its regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackingSource {
    /// Zero-initialised heap allocation through the global allocator.
    #[default]
    Heap,
    /// Anonymous private memory mapping, one mapping per region.
    PageMapped,
}

impl fmt::Display for BackingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heap => write!(f, "heap"),
            Self::PageMapped => write!(f, "page-mapped"),
        }
    }
}

/// Configuration for `Arena` and `HashTable` construction.
///
/// All values are fixed once a structure is built. Call
/// [`validate()`](Config::validate) (the `with_config` constructors do) to
/// check the invariants below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Backing memory source for arena regions. Default: [`BackingSource::Heap`].
    pub backing: BackingSource,

    /// Capacity of a default arena region in bytes.
    ///
    /// Default: 8192 (two 4 KiB pages). Requests larger than this get a
    /// dedicated region sized to fit. Must be non-zero.
    pub region_capacity: usize,

    /// Initial slot count of a hash table.
    ///
    /// Default: 8. Must be a non-zero power of two. Explicit shrinking
    /// never goes below this value.
    pub table_capacity: usize,
}

impl Config {
    /// Page size assumed when sizing the default region.
    pub const PAGE_SIZE: usize = 4096;

    /// Default region capacity: two pages.
    pub const DEFAULT_REGION_CAPACITY: usize = 2 * Self::PAGE_SIZE;

    /// Default initial table capacity.
    pub const DEFAULT_TABLE_CAPACITY: usize = 8;

    /// Create a config with every parameter at its default.
    pub fn new() -> Self {
        Self {
            backing: BackingSource::Heap,
            region_capacity: Self::DEFAULT_REGION_CAPACITY,
            table_capacity: Self::DEFAULT_TABLE_CAPACITY,
        }
    }

    /// Replace the backing source.
    pub fn with_backing(mut self, backing: BackingSource) -> Self {
        self.backing = backing;
        self
    }

    /// Replace the default region capacity.
    pub fn with_region_capacity(mut self, bytes: usize) -> Self {
        self.region_capacity = bytes;
        self
    }

    /// Replace the initial table capacity.
    pub fn with_table_capacity(mut self, slots: usize) -> Self {
        self.table_capacity = slots;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_capacity == 0 {
            return Err(ConfigError::ZeroRegionCapacity);
        }
        if !self.table_capacity.is_power_of_two() {
            return Err(ConfigError::TableCapacityNotPowerOfTwo {
                configured: self.table_capacity,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
