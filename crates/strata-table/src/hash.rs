//! 64-bit FNV-1 hashing and slot selection.
//!
//! FNV-1 multiplies before it xors each byte (FNV-1a does the reverse).
//! The two produce different slot layouts, so the order matters.

/// FNV-1 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash `bytes` with 64-bit FNV-1.
pub fn fnv1(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        hash.wrapping_mul(FNV_PRIME) ^ u64::from(byte)
    })
}

/// Home slot of `bytes` in a table of `capacity` slots.
///
/// `capacity` must be a non-zero power of two.
pub fn home_slot(bytes: &[u8], capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    (fnv1(bytes) as usize) & (capacity - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_offset_basis() {
        assert_eq!(fnv1(b""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(fnv1(b"a"), 0xaf63_bd4c_8601_b7be);
        assert_eq!(fnv1(b"foobar"), 0x340d_8765_a4dd_a9c2);
    }

    #[test]
    fn multiply_then_xor_differs_from_fnv1a() {
        let fnv1a = (FNV_OFFSET_BASIS ^ u64::from(b'a')).wrapping_mul(FNV_PRIME);
        assert_ne!(fnv1(b"a"), fnv1a);
    }

    #[test]
    fn home_slot_is_masked_hash() {
        for capacity in [1usize, 8, 64, 1024] {
            let slot = home_slot(b"table", capacity);
            assert!(slot < capacity);
            assert_eq!(slot, fnv1(b"table") as usize & (capacity - 1));
        }
    }
}
