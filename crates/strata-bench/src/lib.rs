//! Workloads and utilities for benchmarking Strata.
//!
//! Provides deterministic inputs shared by the benches and examples:
//!
//! - [`synthetic_words`]: lowercase pseudo-words from a seeded ChaCha stream
//! - [`allocation_sizes`]: a mix of small and occasionally large request sizes
//! - [`load_words`]: one raw-byte word per line from a dictionary file
//! - [`bench_config`]: a [`Config`] sized for the allocation workload

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fs;
use std::io;
use std::path::Path;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_core::{BackingSource, Config};

/// Dictionary consulted by the `dictionary` example when no path is given.
pub const SYSTEM_DICTIONARY: &str = "/usr/share/dict/words";

/// Read a word list, one entry per line, skipping blank lines.
///
/// Words are raw bytes; no encoding is assumed. A trailing `\r` is
/// stripped so files with CRLF endings load the same way.
pub fn load_words(path: impl AsRef<Path>) -> io::Result<Vec<Vec<u8>>> {
    let bytes = fs::read(path)?;
    Ok(bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(<[u8]>::to_vec)
        .collect())
}

/// Generate `n` pseudo-words of 2..=12 lowercase letters.
///
/// The same seed always yields the same list. Duplicates are possible.
pub fn synthetic_words(n: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let len = 2 + (rng.next_u32() % 11) as usize;
            (0..len)
                .map(|_| char::from(b'a' + (rng.next_u32() % 26) as u8))
                .collect()
        })
        .collect()
}

/// Generate `n` allocation sizes.
///
/// Most requests are under 64 bytes; roughly one in sixteen is between
/// 1 KiB and 16 KiB, large enough to force a dedicated region with the
/// default region capacity.
pub fn allocation_sizes(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let roll = rng.next_u64();
            if roll % 16 == 0 {
                1024 + (roll >> 8) as usize % (15 * 1024)
            } else {
                1 + (roll >> 8) as usize % 63
            }
        })
        .collect()
}

/// Config used by the arena benches: `backing` with 64 KiB regions.
pub fn bench_config(backing: BackingSource) -> Config {
    Config::new()
        .with_backing(backing)
        .with_region_capacity(64 * 1024)
}
