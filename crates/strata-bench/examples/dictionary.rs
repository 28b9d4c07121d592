//! Word-list indexing example.
//!
//! Demonstrates: load words → copy each into an arena → index the arena
//! bytes in a hash table → look words up by key and by slot index.
//!
//! Usage: `cargo run --example dictionary [WORDLIST]`. Without an argument
//! the system dictionary is tried, then a synthetic list. Set `RUST_LOG=debug`
//! to see region and rebuild events.

use std::env;

use strata::prelude::*;
use strata_bench::{load_words, synthetic_words, SYSTEM_DICTIONARY};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Strata Dictionary Example ===\n");

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| SYSTEM_DICTIONARY.to_string());
    let words = match load_words(&path) {
        Ok(words) if !words.is_empty() => {
            println!("Loaded {} words from {path}", words.len());
            words
        }
        Ok(_) | Err(_) => {
            tracing::warn!(%path, "word list unavailable, using synthetic words");
            let mut words: Vec<Vec<u8>> = synthetic_words(100_000, 42)
                .into_iter()
                .map(String::into_bytes)
                .collect();
            words.extend([b"table".to_vec(), b"A".to_vec()]);
            println!("Generated {} synthetic words", words.len());
            words
        }
    };

    // --- Copy every word into the arena ---
    let mut arena = Arena::new();
    let handles: Vec<Allocation> = words.iter().map(|w| arena.memclone(w)).collect();
    println!(
        "Arena: {} regions, {} of {} bytes used",
        arena.region_count(),
        arena.used(),
        arena.total(),
    );

    // --- Index the arena-resident keys, numbering from 1 ---
    let mut table = HashTable::new();
    for (i, &handle) in handles.iter().enumerate() {
        table.put(arena.bytes(handle), i + 1);
    }
    println!(
        "Table: {} entries, capacity {}, longest probe {}",
        table.len(),
        table.capacity(),
        table.max_collisions(),
    );

    // --- Lookups ---
    match table.index_of(b"table") {
        Some(index) => println!("\"table\" at slot {index} -> {}", table.at(index)),
        None => println!("\"table\" not found"),
    }
    match table.get(b"A") {
        Some(value) => println!("\"A\" -> {value}"),
        None => println!("\"A\" not found"),
    }

    drop(table);
    arena.deinit();
    println!("\n=== Done ===");
}
