use crate::storage_engine::digest::Xxh3BuildHasher;
use std::collections::HashMap;

/// In-memory key → offset index.
///
/// Offsets are byte positions in the store buffer, never addresses, so
/// they stay valid when the buffer reallocates.
#[derive(Debug, Default)]
pub struct KeyIndexer {
    index: HashMap<String, usize, Xxh3BuildHasher>,
}

impl KeyIndexer {
    pub fn new() -> Self {
        Self {
            index: HashMap::with_hasher(Xxh3BuildHasher),
        }
    }

    /// Points `key` at `offset` and returns the **previous offset**, if any.
    #[inline]
    pub fn insert(&mut self, key: &str, offset: usize) -> Option<usize> {
        // Overwrites reuse the existing key allocation
        if let Some(slot) = self.index.get_mut(key) {
            return Some(std::mem::replace(slot, offset));
        }
        self.index.insert(key.to_owned(), offset);
        None
    }

    #[inline]
    pub fn get_offset(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<usize> {
        self.index.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter().map(|(key, &offset)| (key.as_str(), offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_previous_offset() {
        let mut index = KeyIndexer::new();
        assert_eq!(index.insert("a", 0), None);
        assert_eq!(index.insert("a", 12), Some(0));
        assert_eq!(index.get_offset("a"), Some(12));
        assert_eq!(index.len(), 1);
        assert_eq!(index.remove("a"), Some(12));
        assert!(index.is_empty());
    }
}
