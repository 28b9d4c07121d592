//! Error types for the Strata primitives.
//!
//! Two tiers:
//!
//! - [`ConfigError`]: the only recoverable error, returned when a structure
//!   is constructed from an invalid [`Config`](crate::Config).
//! - [`Fatal`]: invariant violations and exhausted backing memory. Raised
//!   through [`fatal()`], which logs and then unwinds with the `Fatal` value
//!   as the panic payload. Nothing in the core returns it as an `Err`.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::config::BackingSource;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`Config::validate()`](crate::Config::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `region_capacity` is zero.
    ZeroRegionCapacity,
    /// `table_capacity` is zero or not a power of two.
    TableCapacityNotPowerOfTwo {
        /// The configured capacity.
        configured: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRegionCapacity => write!(f, "region capacity must be non-zero"),
            Self::TableCapacityNotPowerOfTwo { configured } => {
                write!(
                    f,
                    "table capacity must be a non-zero power of two, got {configured}"
                )
            }
        }
    }
}

impl Error for ConfigError {}

// ── Fatal ──────────────────────────────────────────────────────────

/// Unrecoverable conditions.
///
/// A `Fatal` means either the backing allocator is out of memory or a
/// caller broke an invariant (a handle from another arena, a read of an
/// empty slot). Execution does not continue past one: [`fatal()`] unwinds
/// with the value as payload, and binaries built with `panic = "abort"`
/// terminate on the spot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fatal {
    /// The backing source could not supply a block.
    BackingExhausted {
        /// Bytes requested from the source.
        requested: usize,
        /// Which source failed.
        source: BackingSource,
    },
    /// An allocation handle does not resolve to live bytes in this arena.
    ForeignAllocation {
        /// Arena ID encoded in the handle.
        arena: u64,
        /// Region index encoded in the handle.
        region: u32,
        /// Header offset encoded in the handle.
        offset: usize,
    },
    /// A no-grow insert found no free slot.
    TableFull {
        /// Capacity of the table at the time.
        capacity: usize,
    },
    /// A slot index that does not hold an entry was dereferenced.
    EmptySlot {
        /// The slot index.
        index: usize,
    },
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackingExhausted { requested, source } => {
                write!(f, "{source} backing failed to allocate {requested} bytes")
            }
            Self::ForeignAllocation {
                arena,
                region,
                offset,
            } => {
                write!(
                    f,
                    "allocation (arena={arena}, region={region}, offset={offset}) was not allocated by this arena"
                )
            }
            Self::TableFull { capacity } => {
                write!(f, "no free slot in hash table of capacity {capacity}")
            }
            Self::EmptySlot { index } => write!(f, "slot {index} holds no entry"),
        }
    }
}

impl Error for Fatal {}

impl Fatal {
    /// Recover a `Fatal` from a panic payload, if it carries one.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Fatal> {
        payload.downcast_ref::<Fatal>()
    }
}

/// Log `err` and unwind with it as the panic payload.
#[cold]
#[track_caller]
pub fn fatal(err: Fatal) -> ! {
    let location = panic::Location::caller();
    tracing::error!(%location, "fatal: {err}");
    panic::panic_any(err)
}

/// Run `f`, converting an unwinding [`Fatal`] into `Err`.
///
/// Panics that do not carry a `Fatal` are resumed unchanged. Intended for
/// tests and harnesses that need to assert on the fatal condition.
pub fn catch_fatal<R>(f: impl FnOnce() -> R) -> Result<R, Fatal> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match Fatal::from_panic(payload.as_ref()) {
            Some(err) => Err(err.clone()),
            None => panic::resume_unwind(payload),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_fatal_returns_payload() {
        let result: Result<(), Fatal> = catch_fatal(|| fatal(Fatal::TableFull { capacity: 8 }));
        assert_eq!(result, Err(Fatal::TableFull { capacity: 8 }));
    }

    #[test]
    fn catch_fatal_passes_through_values() {
        assert_eq!(catch_fatal(|| 7), Ok(7));
    }

    #[test]
    #[should_panic(expected = "ordinary")]
    fn catch_fatal_resumes_foreign_panics() {
        let _ = catch_fatal(|| panic!("ordinary"));
    }

    #[test]
    fn display_names_the_source() {
        let err = Fatal::BackingExhausted {
            requested: 4096,
            source: BackingSource::PageMapped,
        };
        assert_eq!(
            err.to_string(),
            "page-mapped backing failed to allocate 4096 bytes"
        );
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::TableCapacityNotPowerOfTwo { configured: 6 };
        assert!(err.to_string().contains("got 6"));
    }
}
