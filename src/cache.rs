//! In-memory entity caches for the Dashactyl client.
//!
//! Each entity kind gets one [`ResourceCache`], owned by the client and
//! shared with the managers that fill it. Caches live for the lifetime of the
//! process: there is no eviction, no expiry and no size bound. The data sets
//! behind a single panel deployment are small enough that this is fine, and
//! adding eviction would change what lookups return.

use std::borrow::Borrow;
use std::fmt::Display;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

/// A cache shared between the client facade and the managers that fill it.
///
/// Locks are only ever held for the duration of a single cache operation and
/// never across an `.await`.
pub type SharedCache<K, V> = Arc<RwLock<ResourceCache<K, V>>>;

/// Create an empty shared cache
pub fn shared<K, V>() -> SharedCache<K, V> {
    Arc::new(RwLock::new(ResourceCache::default()))
}

/// Insertion-ordered keyed store for one entity kind
#[derive(Debug, Clone)]
pub struct ResourceCache<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for ResourceCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> ResourceCache<K, V>
where
    K: PartialEq + Display,
{
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, or overwrite the value already stored under `key`.
    ///
    /// An overwritten entry keeps its original position in iteration order.
    ///
    /// # Returns
    /// * `Some(V)` - The value previously stored under the key
    /// * `None` - If the key was not present
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(position) = self.entries.iter().position(|(k, _)| *k == key) {
            trace!("Overwriting cache entry {}", key);
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }

        trace!("Inserting cache entry {}", key);
        self.entries.push((key, value));
        None
    }

    /// Look up an entry by partial key.
    ///
    /// Returns the first entry, in insertion order, whose key contains `probe`
    /// as a substring. An exact key always matches its own entry, but a short
    /// probe may match several keys; the earliest inserted one wins.
    pub fn get(&self, probe: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(key, _)| key.to_string().contains(probe))
            .map(|(_, value)| value)
    }

    /// Look up an entry by its full key only
    pub fn get_exact<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, value)| value)
    }

    /// Return the first entry, in insertion order, for which `predicate` holds
    pub fn find<F>(&self, mut predicate: F) -> Option<&V>
    where
        F: FnMut(&V, &K) -> bool,
    {
        self.entries
            .iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Remove the entry stored under `key`; a missing key is a no-op
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let position = self.entries.iter().position(|(k, _)| k.borrow() == key)?;
        let (removed_key, value) = self.entries.remove(position);
        trace!("Removed cache entry {}", removed_key);
        Some(value)
    }

    /// Remove every entry for which `predicate` holds, returning the removed values
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<V>
    where
        F: FnMut(&V, &K) -> bool,
    {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for (key, value) in self.entries.drain(..) {
            if predicate(&value, &key) {
                removed.push(value);
            } else {
                kept.push((key, value));
            }
        }
        self.entries = kept;
        removed
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get_exact(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K, V> FromIterator<(K, V)> for ResourceCache<K, V>
where
    K: PartialEq + Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cache = Self::new();
        for (key, value) in iter {
            cache.upsert(key, value);
        }
        cache
    }
}

impl<K, V> IntoIterator for ResourceCache<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResourceCache<String, u32> {
        let mut cache = ResourceCache::new();
        cache.upsert("6f1c2a9e-aaaa".to_string(), 1);
        cache.upsert("7b3d4e5f-bbbb".to_string(), 2);
        cache.upsert("6f1c8888-cccc".to_string(), 3);
        cache
    }

    #[test]
    fn test_get_exact_key_returns_entry() {
        let cache = sample();
        for (key, value) in cache.iter() {
            assert_eq!(cache.get(key), Some(value));
        }
    }

    #[test]
    fn test_get_substring_returns_containing_key() {
        let cache = sample();
        assert_eq!(cache.get("7b3d"), Some(&2));
        assert_eq!(cache.get("cccc"), Some(&3));
        assert_eq!(cache.get("zzzz"), None);
    }

    #[test]
    fn test_get_ambiguous_substring_takes_first_inserted() {
        let cache = sample();
        // both the first and third keys contain "6f1c"
        assert_eq!(cache.get("6f1c"), Some(&1));

        let mut reversed: ResourceCache<String, u32> = ResourceCache::new();
        reversed.upsert("6f1c8888-cccc".to_string(), 3);
        reversed.upsert("6f1c2a9e-aaaa".to_string(), 1);
        assert_eq!(reversed.get("6f1c"), Some(&3));
    }

    #[test]
    fn test_get_on_integer_keys() {
        let mut cache: ResourceCache<u64, &str> = ResourceCache::new();
        cache.upsert(12, "twelve");
        cache.upsert(3, "three");
        assert_eq!(cache.get("1"), Some(&"twelve"));
        assert_eq!(cache.get("3"), Some(&"three"));
        assert_eq!(cache.get_exact(&3u64), Some(&"three"));
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut cache = sample();
        let previous = cache.upsert("6f1c2a9e-aaaa".to_string(), 10);
        assert_eq!(previous, Some(1));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.values().copied().collect::<Vec<_>>(), vec![10, 2, 3]);
    }

    #[test]
    fn test_find_uses_insertion_order() {
        let cache = sample();
        assert_eq!(cache.find(|value, _| *value > 1), Some(&2));
        assert_eq!(cache.find(|_, key| key.ends_with("cccc")), Some(&3));
        assert_eq!(cache.find(|value, _| *value > 10), None);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut cache = sample();
        assert_eq!(cache.remove("missing"), None);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.remove("7b3d4e5f-bbbb"), Some(2));
        assert_eq!(
            cache.keys().cloned().collect::<Vec<_>>(),
            vec!["6f1c2a9e-aaaa".to_string(), "6f1c8888-cccc".to_string()]
        );
    }

    #[test]
    fn test_remove_where() {
        let mut cache = sample();
        let removed = cache.remove_where(|value, _| value % 2 == 1);
        assert_eq!(removed, vec![1, 3]);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key("7b3d4e5f-bbbb"));
    }
}
