use proptest::prelude::*;
use strata_arena::{Allocation, Arena, HEADER_SIZE};
use strata_core::{BackingSource, Config, Fatal};
use strata_test_utils::{expect_fatal, marker_pattern};

fn arena_with(region_capacity: usize) -> Arena {
    Arena::with_config(Config::new().with_region_capacity(region_capacity)).unwrap()
}

fn assert_disjoint(handles: &[(Allocation, usize)]) {
    let mut spans: Vec<(u32, usize, usize)> = handles
        .iter()
        .map(|(h, size)| (h.region(), h.offset(), h.payload_offset() + size))
        .collect();
    spans.sort();
    for pair in spans.windows(2) {
        let (r0, _, end0) = pair[0];
        let (r1, start1, _) = pair[1];
        if r0 == r1 {
            assert!(end0 <= start1, "overlapping allocations: {pair:?}");
        }
    }
}

#[test]
fn top_of_region_reclaim_and_non_top_noop() {
    let mut arena = Arena::new();
    let a = arena.allocate(24);
    let b = arena.allocate(40);

    arena.free(b);
    let reused = arena.allocate(40);
    assert_eq!(reused, b);

    // `a` is no longer the top, so this must not give its space back.
    arena.free(a);
    let next = arena.allocate(8);
    assert!(next.offset() > a.offset());
    assert_eq!(next.offset(), b.payload_offset() + 40);
}

#[test]
fn smaller_allocation_after_free_reuses_offset() {
    let mut arena = Arena::new();
    let _a = arena.allocate(16);
    let b = arena.allocate(100);
    arena.free(b);
    let c = arena.allocate(1);
    assert_eq!((c.region(), c.offset()), (b.region(), b.offset()));
}

#[test]
fn grow_in_place_keeps_handle_until_region_is_full() {
    let mut arena = arena_with(256);
    let h = arena.allocate(8);
    let mut size = 8;
    while HEADER_SIZE + size + 8 <= 256 {
        size += 8;
        assert_eq!(arena.realloc(h, size), h);
    }
    let moved = arena.realloc(h, size + 8);
    assert_ne!(moved, h);
    assert_eq!(moved.region(), 1);
}

#[test]
fn data_survives_relocating_realloc() {
    let mut arena = arena_with(128);
    let h = arena.memclone(&marker_pattern(9, 64));
    let _blocker = arena.allocate(8);
    let moved = arena.realloc(h, 500);
    assert_eq!(&arena.bytes(moved)[..64], marker_pattern(9, 64).as_slice());
}

#[test]
fn foreign_handle_is_fatal_for_every_operation() {
    let mut owner = Arena::new();
    let mut other = Arena::new();
    let h = owner.allocate(4);

    assert!(matches!(
        expect_fatal(|| other.free(h)),
        Fatal::ForeignAllocation { .. }
    ));
    assert!(matches!(
        expect_fatal(|| other.realloc(h, 64)),
        Fatal::ForeignAllocation { .. }
    ));
    assert!(matches!(
        expect_fatal(|| other.bytes(h).len()),
        Fatal::ForeignAllocation { .. }
    ));
}

#[test]
fn both_backing_sources_satisfy_the_same_workload() {
    for backing in [BackingSource::Heap, BackingSource::PageMapped] {
        let config = Config::new()
            .with_backing(backing)
            .with_region_capacity(Config::PAGE_SIZE);
        let mut arena = Arena::with_config(config).unwrap();
        let handles: Vec<_> = (0..100)
            .map(|i| (i, arena.memclone(&marker_pattern(i, 100))))
            .collect();
        for (i, h) in handles {
            assert_eq!(arena.bytes(h), marker_pattern(i, 100).as_slice());
        }
        assert!(arena.region_count() > 1);
    }
}

proptest! {
    #[test]
    fn allocations_never_overlap(
        sizes in prop::collection::vec(0usize..600, 1..200),
        region_capacity in 64usize..4096,
    ) {
        let mut arena = arena_with(region_capacity);
        let mut handles = Vec::with_capacity(sizes.len());
        for (i, &size) in sizes.iter().enumerate() {
            let h = arena.allocate(size);
            arena.bytes_mut(h).copy_from_slice(&marker_pattern(i, size));
            handles.push((h, size));
        }
        for (i, (h, size)) in handles.iter().enumerate() {
            let expected = marker_pattern(i, *size);
            prop_assert_eq!(arena.bytes(*h), expected.as_slice());
        }
        assert_disjoint(&handles);
    }

    #[test]
    fn used_never_exceeds_total(
        ops in prop::collection::vec((0usize..300, any::<bool>()), 1..200),
    ) {
        let mut arena = arena_with(512);
        let mut live: Vec<Allocation> = Vec::new();
        for (size, free_last) in ops {
            if free_last {
                if let Some(h) = live.pop() {
                    arena.free(h);
                }
            } else {
                live.push(arena.allocate(size));
            }
            prop_assert!(arena.used() <= arena.total());
        }
    }

    #[test]
    fn lifo_free_returns_every_byte(sizes in prop::collection::vec(0usize..256, 1..64)) {
        let mut arena = arena_with(1 << 16);
        let handles: Vec<_> = sizes.iter().map(|&s| arena.allocate(s)).collect();
        prop_assert_eq!(arena.region_count(), 1);
        for h in handles.into_iter().rev() {
            arena.free(h);
        }
        prop_assert_eq!(arena.used(), 0);
    }
}
