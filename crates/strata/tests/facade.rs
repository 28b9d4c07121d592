use strata::prelude::*;
use strata_test_utils::{expect_fatal, numbered_keys};

#[test]
fn table_keys_can_live_in_an_arena() {
    let words = numbered_keys(500);
    let mut arena = Arena::with_config(Config::new().with_region_capacity(1024)).unwrap();
    let handles: Vec<Allocation> = words.iter().map(|w| arena.memclone(w)).collect();
    assert!(arena.region_count() > 1);

    let mut table = HashTable::new();
    for (i, &handle) in handles.iter().enumerate() {
        table.put(arena.bytes(handle), i);
    }
    assert_eq!(table.len(), 500);
    for (i, word) in words.iter().enumerate() {
        assert_eq!(table.get(word), Some(&i));
    }
}

#[test]
fn shared_config_drives_both_structures() {
    let config = Config::new()
        .with_backing(BackingSource::PageMapped)
        .with_region_capacity(16 * 1024)
        .with_table_capacity(32);
    let arena = Arena::with_config(config.clone()).unwrap();
    let table: HashTable<'_, ()> = HashTable::with_config(&config).unwrap();
    assert_eq!(arena.total(), 16 * 1024);
    assert_eq!(arena.config().backing, BackingSource::PageMapped);
    assert_eq!(table.capacity(), 32);
}

#[test]
fn fatal_tier_is_observable() {
    let mut first = Arena::new();
    let second = Arena::new();
    let handle = first.allocate(1);
    let err = expect_fatal(|| second.size_of(handle));
    assert!(err.to_string().contains("was not allocated by this arena"));
}
