//! The open-addressing hash table.
//!
//! # Probing
//!
//! Keys hash with FNV-1 to a home slot and probe linearly, wrapping at the
//! end of the array. Every insert records how many slots it stepped over
//! (its collision count) and folds that into `maxcol`. No live key can sit
//! further than `maxcol` slots from its home, so a lookup inspects at most
//! `maxcol + 1` slots before giving up.
//!
//! # Removal
//!
//! Removing a key leaves a [`Slot::Deleted`] tombstone rather than an empty
//! slot. Lookups step over tombstones, so keys displaced past the removed
//! one stay reachable; inserts reuse the first tombstone on their path. A
//! removed slot whose successor is empty becomes empty directly, because no
//! probe chain can run through it.
//!
//! # Resizing
//!
//! Before an insert, the table doubles if the prospective load
//! `(count + 1) / capacity` reaches 0.7, and is rebuilt in place if live
//! entries plus tombstones would. A rebuild re-inserts every live entry
//! into a fresh array and recomputes `maxcol` from scratch.

use std::mem;

use strata_core::{fatal, BackingSource, Config, ConfigError, Fatal};

use crate::hash::home_slot;
use crate::slot::{Entry, Slot};

/// Load factor that triggers a resize, as `LOAD_NUM / LOAD_DEN`.
const LOAD_NUM: usize = 7;
const LOAD_DEN: usize = 10;

fn at_threshold(occupied: usize, capacity: usize) -> bool {
    occupied.saturating_mul(LOAD_DEN) >= capacity.saturating_mul(LOAD_NUM)
}

/// Outcome of an insert probe.
enum Probe {
    /// The key is already stored at this index.
    Existing(usize),
    /// The key is absent; it belongs at `index`, `collisions` slots past home.
    Vacant { index: usize, collisions: usize },
}

/// Open-addressing hash table keyed by borrowed byte spans.
///
/// The table owns its slot array and the values, never the key bytes.
/// Not thread-safe; every mutating operation takes `&mut self`.
#[derive(Clone, Debug)]
pub struct HashTable<'k, V> {
    slots: Vec<Slot<'k, V>>,
    /// Occupied slots.
    count: usize,
    /// Deleted slots since the last rebuild.
    tombstones: usize,
    /// Longest collision chain built by an insert since the last rebuild.
    maxcol: usize,
    /// Capacity used by `init`, and the floor for `shrink`.
    initial_capacity: usize,
}

impl<'k, V> HashTable<'k, V> {
    /// Create a table with the default initial capacity (8).
    pub fn new() -> Self {
        Self::build(Config::DEFAULT_TABLE_CAPACITY)
    }

    /// Create a table whose initial capacity is `config.table_capacity`.
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config.table_capacity))
    }

    fn build(initial_capacity: usize) -> Self {
        Self {
            slots: alloc_slots(initial_capacity),
            count: 0,
            tombstones: 0,
            maxcol: 0,
            initial_capacity,
        }
    }

    /// Replace the slot array with an empty one of the initial capacity.
    pub fn init(&mut self) {
        self.slots = alloc_slots(self.initial_capacity);
        self.count = 0;
        self.tombstones = 0;
        self.maxcol = 0;
    }

    /// Release the slot array. Capacity drops to 0; the next `put`
    /// re-initialises the table.
    pub fn deinit(&mut self) {
        self.slots = Vec::new();
        self.count = 0;
        self.tombstones = 0;
        self.maxcol = 0;
    }

    /// Insert `value` under `key`, returning the previous value if the key
    /// was present.
    ///
    /// May grow or rebuild the table before probing.
    pub fn put(&mut self, key: &'k [u8], value: V) -> Option<V> {
        if self.slots.is_empty() {
            self.init();
        }
        let capacity = self.capacity();
        if at_threshold(self.count + 1, capacity) {
            self.grow();
        } else if at_threshold(self.count + self.tombstones + 1, capacity) {
            self.rebuild(capacity);
        }
        self.put_nogrow(key, value)
    }

    /// Insert without considering the load factor.
    fn put_nogrow(&mut self, key: &'k [u8], value: V) -> Option<V> {
        match self.probe_insert(key) {
            Probe::Existing(index) => self.slots[index]
                .entry_mut()
                .map(|entry| mem::replace(&mut entry.value, value)),
            Probe::Vacant { index, collisions } => {
                if matches!(self.slots[index], Slot::Deleted) {
                    self.tombstones -= 1;
                }
                self.slots[index] = Slot::Occupied(Entry { key, value });
                self.count += 1;
                self.maxcol = self.maxcol.max(collisions);
                None
            }
        }
    }

    /// Walk the probe chain of `key` until it is found or an empty slot
    /// ends the chain, remembering the first tombstone passed.
    fn probe_insert(&self, key: &[u8]) -> Probe {
        let capacity = self.capacity();
        let mask = capacity - 1;
        let mut index = home_slot(key, capacity);
        let mut reusable: Option<(usize, usize)> = None;

        for collisions in 0..capacity {
            match &self.slots[index] {
                Slot::Occupied(entry) if entry.matches(key) => return Probe::Existing(index),
                Slot::Occupied(_) => {}
                Slot::Deleted => {
                    reusable.get_or_insert((index, collisions));
                }
                Slot::Empty => {
                    let (index, collisions) = reusable.unwrap_or((index, collisions));
                    return Probe::Vacant { index, collisions };
                }
            }
            index = (index + 1) & mask;
        }

        match reusable {
            Some((index, collisions)) => Probe::Vacant { index, collisions },
            None => fatal(Fatal::TableFull { capacity }),
        }
    }

    /// Slot index holding `key`, probing at most `maxcol + 1` slots.
    pub fn index_of(&self, key: &[u8]) -> Option<usize> {
        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }
        let mask = capacity - 1;
        let mut index = home_slot(key, capacity);
        for _ in 0..=self.maxcol {
            match &self.slots[index] {
                Slot::Occupied(entry) if entry.matches(key) => return Some(index),
                Slot::Empty => return None,
                _ => {}
            }
            index = (index + 1) & mask;
        }
        None
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index_of(key).is_some()
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let index = self.index_of(key)?;
        self.slots[index].entry().map(|entry| &entry.value)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let index = self.index_of(key)?;
        self.slots[index].entry_mut().map(|entry| &mut entry.value)
    }

    /// Value in slot `index`, as returned by [`index_of`](Self::index_of).
    ///
    /// Raises [`Fatal::EmptySlot`] if the slot holds no entry.
    pub fn at(&self, index: usize) -> &V {
        match self.slots.get(index).and_then(Slot::entry) {
            Some(entry) => &entry.value,
            None => fatal(Fatal::EmptySlot { index }),
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let index = self.index_of(key)?;
        let mask = self.capacity() - 1;
        let successor_empty = matches!(self.slots[(index + 1) & mask], Slot::Empty);
        let vacated = if successor_empty {
            Slot::Empty
        } else {
            self.tombstones += 1;
            Slot::Deleted
        };
        match mem::replace(&mut self.slots[index], vacated) {
            Slot::Occupied(entry) => {
                self.count -= 1;
                Some(entry.value)
            }
            _ => None,
        }
    }

    /// Double the capacity.
    pub fn grow(&mut self) {
        let capacity = self.capacity().max(1);
        self.rebuild(capacity << 1);
    }

    /// Halve the capacity if at most a quarter of the slots are occupied
    /// and the result stays at or above the initial capacity.
    ///
    /// Returns whether the table shrank.
    pub fn shrink(&mut self) -> bool {
        let capacity = self.capacity();
        if self.count > capacity / 4 || capacity / 2 < self.initial_capacity {
            return false;
        }
        self.rebuild(capacity / 2);
        true
    }

    /// Re-insert every live entry into a fresh array of `capacity` slots.
    fn rebuild(&mut self, capacity: usize) {
        let old = mem::replace(&mut self.slots, alloc_slots(capacity));
        let (old_capacity, old_maxcol) = (old.len(), self.maxcol);
        self.count = 0;
        self.tombstones = 0;
        self.maxcol = 0;
        for slot in old {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put_nogrow(key, value);
            }
        }
        tracing::debug!(
            "hash table rebuilt: capacity {old_capacity} -> {capacity}, {} entries, maxcol {old_maxcol} -> {}",
            self.count,
            self.maxcol
        );
    }

    /// Drop every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.count = 0;
        self.tombstones = 0;
        self.maxcol = 0;
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots not holding an entry.
    pub fn available(&self) -> usize {
        self.capacity() - self.count
    }

    /// Longest collision chain since the last rebuild.
    pub fn max_collisions(&self) -> usize {
        self.maxcol
    }

    /// Tombstones since the last rebuild.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Iterate over `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'k [u8], &V)> + '_ {
        self.slots
            .iter()
            .filter_map(Slot::entry)
            .map(|entry| (entry.key, &entry.value))
    }

    /// Iterate over keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &'k [u8]> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over values in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<V> Default for HashTable<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'k, V> Extend<(&'k [u8], V)> for HashTable<'k, V> {
    fn extend<I: IntoIterator<Item = (&'k [u8], V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'k, V> FromIterator<(&'k [u8], V)> for HashTable<'k, V> {
    fn from_iter<I: IntoIterator<Item = (&'k [u8], V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// A fresh array of `capacity` empty slots.
///
/// Raises [`Fatal::BackingExhausted`] if the heap cannot supply it.
fn alloc_slots<'k, V>(capacity: usize) -> Vec<Slot<'k, V>> {
    let mut slots = Vec::new();
    if slots.try_reserve_exact(capacity).is_err() {
        fatal(Fatal::BackingExhausted {
            requested: capacity.saturating_mul(mem::size_of::<Slot<'k, V>>()),
            source: BackingSource::Heap,
        });
    }
    slots.resize_with(capacity, || Slot::Empty);
    slots
}
