//! Hash maps that create entries on first access.
//!
//! [`AutoMap`] hands out a mutable reference to a default value for any
//! missing key. [`CountMap`] builds on it to tally occurrences.

use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

/// Hash map that inserts `V::default()` for missing keys on mutable access.
///
/// # Examples
/// ```
/// use u_collections::collections::AutoMap;
///
/// let mut groups: AutoMap<&str, Vec<u32>> = AutoMap::new();
/// groups.entry_mut("odd").push(1);
/// groups.entry_mut("odd").push(3);
/// groups.entry_mut("even").push(2);
/// assert_eq!(groups.get(&"odd"), Some(&vec![1, 3]));
/// assert_eq!(groups.len(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "K: serde::Serialize, V: serde::Serialize",
            deserialize = "K: Eq + Hash + serde::Deserialize<'de>, V: serde::Deserialize<'de>"
        )
    )
)]
pub struct AutoMap<K, V> {
    map: HashMap<K, V>,
}

impl<K: Eq + Hash, V: Default> AutoMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Mutable reference to the value for `key`, inserting the default
    /// value first if the key is absent.
    pub fn entry_mut(&mut self, key: K) -> &mut V {
        self.map.entry(key).or_default()
    }

    /// Value for `key`, without inserting.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Sets the value for `key`, returning the previous one.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates over entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.map.iter()
    }
}

impl<K: Eq + Hash, V: Default> Default for AutoMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for AutoMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: Eq + Hash, V: Eq> Eq for AutoMap<K, V> {}

/// Later pairs overwrite earlier ones with the same key.
impl<K: Eq + Hash, V: Default> FromIterator<(K, V)> for AutoMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AutoMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// Occurrence counter keyed by `K`.
///
/// Counts start at zero and may go negative when decremented past it.
///
/// # Examples
/// ```
/// use u_collections::collections::CountMap;
///
/// let words: CountMap<&str> = "a b a c a".split(' ').collect();
/// assert_eq!(words.count(&"a"), 3);
/// assert_eq!(words.count(&"z"), 0);
/// assert_eq!(words.total(), 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        transparent,
        bound(
            serialize = "K: serde::Serialize",
            deserialize = "K: Eq + Hash + serde::Deserialize<'de>"
        )
    )
)]
pub struct CountMap<K> {
    counts: AutoMap<K, i64>,
}

impl<K: Eq + Hash> CountMap<K> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self {
            counts: AutoMap::new(),
        }
    }

    /// Adds one to `key`'s count and returns the new count.
    pub fn increment(&mut self, key: K) -> i64 {
        self.add(key, 1)
    }

    /// Subtracts one from `key`'s count and returns the new count.
    pub fn decrement(&mut self, key: K) -> i64 {
        self.add(key, -1)
    }

    /// Adds `delta` to `key`'s count and returns the new count.
    ///
    /// Saturates at `i64::MIN` / `i64::MAX` instead of overflowing.
    pub fn add(&mut self, key: K, delta: i64) -> i64 {
        let count = self.counts.entry_mut(key);
        *count = count.saturating_add(delta);
        *count
    }

    /// Current count for `key`; zero if it was never touched.
    pub fn count(&self, key: &K) -> i64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts, saturating at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.counts
            .iter()
            .fold(0i64, |acc, (_, &c)| acc.saturating_add(c))
    }

    /// Forgets `key`, returning its count if it was present.
    pub fn remove(&mut self, key: &K) -> Option<i64> {
        self.counts.remove(key)
    }

    /// Number of distinct keys touched.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no key has been touched.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(key, count)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, i64> {
        self.counts.iter()
    }
}

impl<K: Eq + Hash> Default for CountMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> PartialEq for CountMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<K: Eq + Hash> Eq for CountMap<K> {}

/// Counts each yielded key once per occurrence.
impl<K: Eq + Hash> FromIterator<K> for CountMap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counts = Self::new();
        counts.extend(iter);
        counts
    }
}

impl<K: Eq + Hash> Extend<K> for CountMap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.increment(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_map_creates_default() {
        let mut map: AutoMap<u32, String> = AutoMap::new();
        assert!(map.get(&1).is_none());
        assert_eq!(map.entry_mut(1).as_str(), "");
        assert!(map.contains_key(&1));
        map.entry_mut(1).push_str("hi");
        assert_eq!(map.get(&1).map(String::as_str), Some("hi"));
    }

    #[test]
    fn test_auto_map_insert_remove() {
        let mut map = AutoMap::new();
        assert_eq!(map.insert("k", 1), None);
        assert_eq!(map.insert("k", 2), Some(1));
        assert_eq!(map.remove(&"k"), Some(2));
        assert!(map.is_empty());
    }

    #[test]
    fn test_auto_map_from_iter_last_wins() {
        let map: AutoMap<&str, i32> = vec![("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a"), Some(&3));
        let mut keys: Vec<_> = (&map).into_iter().map(|(k, _)| *k).collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_count_increment_decrement() {
        let mut counts = CountMap::new();
        assert_eq!(counts.increment("x"), 1);
        assert_eq!(counts.increment("x"), 2);
        assert_eq!(counts.decrement("x"), 1);
        assert_eq!(counts.decrement("y"), -1);
        assert_eq!(counts.count(&"x"), 1);
        assert_eq!(counts.count(&"y"), -1);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_count_read_does_not_insert() {
        let counts: CountMap<char> = CountMap::new();
        assert_eq!(counts.count(&'q'), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_count_add_and_remove() {
        let mut counts = CountMap::new();
        assert_eq!(counts.add(5u8, 10), 10);
        assert_eq!(counts.add(5u8, -4), 6);
        assert_eq!(counts.remove(&5), Some(6));
        assert_eq!(counts.count(&5), 0);
    }

    #[test]
    fn test_count_saturates_instead_of_overflowing() {
        let mut counts = CountMap::new();
        counts.add('a', i64::MAX);
        assert_eq!(counts.increment('a'), i64::MAX);
        counts.add('b', i64::MIN);
        assert_eq!(counts.decrement('b'), i64::MIN);
        counts.add('c', i64::MAX);
        assert_eq!(counts.total(), i64::MAX);
    }

    #[test]
    fn test_count_from_iter_and_extend() {
        let mut counts: CountMap<char> = "hello".chars().collect();
        assert_eq!(counts.count(&'l'), 2);
        counts.extend("lol".chars());
        assert_eq!(counts.count(&'l'), 4);
        assert_eq!(counts.count(&'o'), 2);
        assert_eq!(counts.total(), 8);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_count_map_serializes_as_plain_map() {
        let mut counts = CountMap::new();
        counts.increment("a".to_string());
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"a":1}"#);
        let back: CountMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }
}
