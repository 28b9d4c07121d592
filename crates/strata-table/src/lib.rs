//! Open-addressing hash table for Strata.
//!
//! [`HashTable<'k, V>`](HashTable) maps borrowed byte spans to values of
//! any type `V`. Keys are hashed with 64-bit FNV-1 and placed by linear
//! probing into a power-of-two slot array that doubles at a load factor
//! of 0.7. Lookups are bounded by the longest collision chain any insert
//! has produced since the last rebuild.
//!
//! The table never copies key bytes. The `'k` lifetime ties every key to
//! storage the caller owns (a string, a file buffer, an arena
//! allocation), so the borrow checker rules out dangling keys across
//! rebuilds.
//!
//! ```
//! use strata_table::HashTable;
//!
//! let words = String::from("alpha beta gamma");
//! let mut table = HashTable::new();
//! for (i, word) in words.split(' ').enumerate() {
//!     table.put(word.as_bytes(), i);
//! }
//! assert_eq!(table.get(b"beta"), Some(&1));
//! assert_eq!(table.remove(b"alpha"), Some(0));
//! assert!(table.contains(b"gamma"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod hash;
pub mod slot;
pub mod table;

pub use hash::fnv1;
pub use slot::{Entry, Slot};
pub use table::HashTable;
