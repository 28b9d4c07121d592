//! Reusable key and byte-pattern fixtures.
//!
//! - [`marker_pattern`]: a byte pattern unique to an allocation id.
//! - [`numbered_keys`]: distinct, deterministic keys.
//! - [`colliding_keys`]: distinct keys that share one home slot.

/// Deterministic `len`-byte pattern derived from `id`.
///
/// Two patterns with different ids differ in their first byte whenever
/// `len > 0` and the ids differ modulo 251, which is enough to detect
/// overlapping allocations in tests.
pub fn marker_pattern(id: usize, len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| ((id % 251) as u8).wrapping_add((i as u8).wrapping_mul(31)))
        .collect()
}

/// `n` distinct keys of the form `key-<i>`.
pub fn numbered_keys(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| format!("key-{i}").into_bytes()).collect()
}

/// `n` distinct keys whose `hash` maps to the same slot in a table of
/// `capacity` slots.
///
/// Searches `k0`, `k1`, ... and keeps the keys landing in the home slot
/// of `k0`.
///
/// # Panics
///
/// Panics if `capacity` is not a power of two.
pub fn colliding_keys(hash: impl Fn(&[u8]) -> u64, capacity: usize, n: usize) -> Vec<Vec<u8>> {
    assert!(capacity.is_power_of_two(), "capacity must be a power of two");
    let mask = capacity as u64 - 1;
    let mut target = None;
    let mut keys = Vec::with_capacity(n);
    let mut i = 0u64;
    while keys.len() < n {
        let key = format!("k{i}").into_bytes();
        let slot = hash(&key) & mask;
        if *target.get_or_insert(slot) == slot {
            keys.push(key);
        }
        i += 1;
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_byte(key: &[u8]) -> u64 {
        key.last().copied().unwrap_or(0) as u64
    }

    #[test]
    fn marker_patterns_differ_by_id() {
        assert_ne!(marker_pattern(1, 8), marker_pattern(2, 8));
        assert_eq!(marker_pattern(3, 8), marker_pattern(3, 8));
        assert!(marker_pattern(3, 0).is_empty());
    }

    #[test]
    fn numbered_keys_are_distinct() {
        let keys = numbered_keys(100);
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 100);
    }

    #[test]
    fn colliding_keys_share_a_slot() {
        let keys = colliding_keys(last_byte, 8, 4);
        assert_eq!(keys.len(), 4);
        let slots: Vec<u64> = keys.iter().map(|k| last_byte(k) & 7).collect();
        assert!(slots.iter().all(|&s| s == slots[0]));
    }
}
