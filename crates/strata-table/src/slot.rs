//! Slot states of the table's flat array.

/// An occupied slot's contents.
///
/// The key is borrowed, never copied: the `'k` lifetime ties every key to
/// storage the caller keeps alive for as long as the table exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<'k, V> {
    /// Key bytes.
    pub key: &'k [u8],
    /// Stored value.
    pub value: V,
}

impl<V> Entry<'_, V> {
    /// Whether this entry's key equals `key`.
    ///
    /// Length and first byte are compared before the full bytes.
    pub fn matches(&self, key: &[u8]) -> bool {
        self.key.len() == key.len() && self.key.first() == key.first() && self.key == key
    }
}

/// One position of the slot array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<'k, V> {
    /// Never used since the last rebuild. Ends every probe.
    Empty,
    /// Holds a live entry.
    Occupied(Entry<'k, V>),
    /// Held an entry that was removed. Probes continue past it; inserts
    /// may reuse it.
    Deleted,
}

impl<V> Default for Slot<'_, V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<'k, V> Slot<'k, V> {
    /// The live entry, if any.
    pub fn entry(&self) -> Option<&Entry<'k, V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// The live entry, mutably.
    pub fn entry_mut(&mut self) -> Option<&mut Entry<'k, V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Whether the slot holds a live entry.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_requires_identical_bytes() {
        let entry = Entry {
            key: b"apple",
            value: 1,
        };
        assert!(entry.matches(b"apple"));
        assert!(!entry.matches(b"apples"));
        assert!(!entry.matches(b"bpple"));
        assert!(!entry.matches(b"applf"));
        assert!(!entry.matches(b""));
    }

    #[test]
    fn empty_key_matches_only_empty() {
        let entry = Entry { key: b"", value: () };
        assert!(entry.matches(b""));
        assert!(!entry.matches(b"x"));
    }

    #[test]
    fn entry_accessors() {
        let mut slot = Slot::Occupied(Entry {
            key: b"k",
            value: 3,
        });
        assert!(slot.is_occupied());
        slot.entry_mut().unwrap().value = 4;
        assert_eq!(slot.entry().map(|e| e.value), Some(4));
        assert!(Slot::<u8>::Deleted.entry().is_none());
        assert!(!Slot::<u8>::default().is_occupied());
    }
}
