//! Presence check for the caller's backing collection.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Backing collection of a list screen.
///
/// The controller only ever asks whether the collection has items and, on
/// refresh, clears it before merging. What the items are is the caller's
/// business.
pub trait Items {
    fn item_count(&self) -> usize;

    fn clear_items(&mut self);

    fn has_items(&self) -> bool {
        self.item_count() > 0
    }
}

impl<T> Items for Vec<T> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<T> Items for VecDeque<T> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> Items for BTreeMap<K, V> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Items for HashMap<K, V, S> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn clear_items(&mut self) {
        self.clear();
    }
}

impl Items for String {
    fn item_count(&self) -> usize {
        self.chars().count()
    }

    fn clear_items(&mut self) {
        self.clear();
    }

    fn has_items(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_presence() {
        let mut items = vec![1, 2, 3];
        assert!(items.has_items());
        assert_eq!(items.item_count(), 3);

        items.clear_items();
        assert!(!items.has_items());
    }

    #[test]
    fn map_presence() {
        let mut items: HashMap<u32, &str> = HashMap::new();
        assert!(!items.has_items());

        items.insert(7, "seven");
        assert!(items.has_items());

        let mut ordered = BTreeMap::from([(1, 'a')]);
        ordered.clear_items();
        assert_eq!(ordered.item_count(), 0);
    }

    #[test]
    fn text_presence() {
        let mut log = String::from("ok");
        assert!(log.has_items());
        log.clear_items();
        assert!(!log.has_items());
    }
}
