//! Ordered list whose elements carry integer weights.
//!
//! Each element is stored with a positive integer *unit*. The normalized
//! weight of element `i` is `units[i] / sum(units)`, so the weights of a
//! non-empty list always sum to 1.
//!
//! # Lazy normalization
//!
//! Normalized weights are computed on the first read after a mutation and
//! cached until the next one. A batch of `k` mutations followed by reads
//! costs O(k) + one O(n) normalization pass instead of O(k·n).
//!
//! # Thread safety
//!
//! The cache lives in a [`OnceCell`], so `WeightedList` is `Send` but not
//! `Sync`. Share it between threads behind a `Mutex` held across any
//! mutation and the reads that depend on it.

use std::cell::OnceCell;

use rand::Rng;
use tracing::{debug, trace};

use crate::error::{CollectionError, Result};
use crate::random::{self, UnitSampler};

/// A list of elements, each with a positive integer weight.
///
/// # Examples
/// ```
/// use u_collections::collections::WeightedList;
///
/// let mut list = WeightedList::new();
/// list.add("one", 1).unwrap();
/// list.add("two", 1).unwrap();
/// list.add("three", 2).unwrap();
///
/// assert_eq!(list.weight(0).unwrap(), 0.25);
/// assert_eq!(list.weight(2).unwrap(), 0.5);
/// assert_eq!(list.weight_of(&"two").unwrap(), 0.25);
///
/// list.remove_at(0).unwrap();
/// assert!((list.weight(0).unwrap() - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "WeightedListRepr<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct WeightedList<T> {
    items: Vec<T>,
    units: Vec<u64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    weights: OnceCell<Vec<f64>>,
}

impl<T> WeightedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            units: Vec::new(),
            weights: OnceCell::new(),
        }
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            units: Vec::with_capacity(capacity),
            weights: OnceCell::new(),
        }
    }

    /// Appends `item` with the given weight.
    ///
    /// # Errors
    /// `InvalidArgument` if `units < 1`; the list is left unchanged.
    pub fn add(&mut self, item: T, units: i64) -> Result<()> {
        let units = validate_units(units)?;
        self.items.push(item);
        self.units.push(units);
        self.mark_dirty();
        Ok(())
    }

    /// Appends `item` with a weight of one unit.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.units.push(1);
        self.mark_dirty();
    }

    /// Inserts `item` with a weight of one unit at `index`, shifting later
    /// elements right.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index > len()`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        self.items.insert(index, item);
        self.units.insert(index, 1);
        self.mark_dirty();
        Ok(())
    }

    /// Removes and returns the element at `index`; its units go with it.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        self.units.remove(index);
        let item = self.items.remove(index);
        self.mark_dirty();
        Ok(item)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
        self.units.clear();
        self.mark_dirty();
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// The units at `index` are kept, so the replacement inherits the
    /// weight of the element it replaces. Weights are not invalidated.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Returns the raw units of the element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn units(&self, index: usize) -> Result<u64> {
        self.units
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Sum of all units.
    pub fn total_units(&self) -> u128 {
        self.units.iter().map(|&u| u as u128).sum()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the normalized weights must be recomputed before
    /// the next weight read.
    pub fn is_dirty(&self) -> bool {
        self.weights.get().is_none()
    }

    /// Normalized weight of the element at `index`, in `(0, 1]`.
    ///
    /// Normalizes first if the list changed since the last read.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= len()`.
    pub fn weight(&self, index: usize) -> Result<f64> {
        self.weights()
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// All normalized weights, index-aligned with the elements.
    pub fn weights(&self) -> &[f64] {
        self.weights.get_or_init(|| normalize(&self.units))
    }

    /// Iterates over the elements in insertion order.
    ///
    /// Brings the weight cache up to date as a side effect, so subsequent
    /// weight reads are served from cache.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.weights();
        self.items.iter()
    }

    /// Iterates over `(element, normalized weight)` pairs.
    pub fn iter_weighted(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.items.iter().zip(self.weights().iter().copied())
    }

    /// The elements as a slice, in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Picks an element with probability equal to its normalized weight.
    ///
    /// Returns `None` if the list is empty.
    ///
    /// # Examples
    /// ```
    /// use u_collections::collections::WeightedList;
    /// use u_collections::random::create_rng;
    ///
    /// let mut list = WeightedList::new();
    /// list.add("rare", 1).unwrap();
    /// list.add("common", 99).unwrap();
    /// let mut rng = create_rng(3);
    /// assert!(list.choose(&mut rng).is_some());
    /// ```
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        random::choose_index(&self.units, rng).map(|i| &self.items[i])
    }

    /// Builds a sampler over the current units for repeated draws.
    ///
    /// The sampler is a snapshot; later mutations of the list do not
    /// affect it. Returns `None` if the list is empty.
    pub fn sampler(&self) -> Option<UnitSampler> {
        UnitSampler::new(&self.units)
    }

    fn mark_dirty(&mut self) {
        self.weights.take();
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl<T: PartialEq> WeightedList<T> {
    /// Index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    /// Returns `true` if some element equals `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Removes the first element equal to `item`.
    ///
    /// Returns `false`, leaving the list and its cached weights untouched,
    /// if no element matches.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.index_of(item) {
            Some(index) => {
                self.items.remove(index);
                self.units.remove(index);
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Normalized weight of the first element equal to `item`.
    ///
    /// # Errors
    /// `NotFound` if no element matches.
    pub fn weight_of(&self, item: &T) -> Result<f64> {
        let index = self.index_of(item).ok_or(CollectionError::NotFound)?;
        self.weight(index)
    }
}

fn validate_units(units: i64) -> Result<u64> {
    if units < 1 {
        debug!(target: "weighted_list", units, "rejected non-positive units");
        return Err(CollectionError::invalid_argument(
            "units",
            format!("must be >= 1, got {units}"),
        ));
    }
    Ok(units as u64)
}

fn normalize(units: &[u64]) -> Vec<f64> {
    let total: u128 = units.iter().map(|&u| u as u128).sum();
    trace!(target: "weighted_list", len = units.len(), total = %total, "normalizing weights");
    if total == 0 {
        return Vec::new();
    }
    let total = total as f64;
    units.iter().map(|&u| u as f64 / total).collect()
}

impl<T> Default for WeightedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two lists are equal when they hold equal elements with equal units in
/// the same order; cache state is ignored.
impl<T: PartialEq> PartialEq for WeightedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.units == other.units
    }
}

impl<T: Eq> Eq for WeightedList<T> {}

/// Collects elements with one unit each.
impl<T> FromIterator<T> for WeightedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let units = vec![1; items.len()];
        Self {
            items,
            units,
            weights: OnceCell::new(),
        }
    }
}

impl<T> Extend<T> for WeightedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.items.reserve(lower);
        self.units.reserve(lower);
        self.mark_dirty();
        for item in iter {
            self.items.push(item);
            self.units.push(1);
        }
    }
}

/// Builds a list from `(item, units)` pairs, rejecting the whole batch if
/// any units are non-positive.
impl<T> TryFrom<Vec<(T, i64)>> for WeightedList<T> {
    type Error = CollectionError;

    fn try_from(pairs: Vec<(T, i64)>) -> Result<Self> {
        let mut list = Self::with_capacity(pairs.len());
        for (item, units) in pairs {
            let units = validate_units(units)?;
            list.items.push(item);
            list.units.push(units);
        }
        Ok(list)
    }
}

impl<'a, T> IntoIterator for &'a WeightedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for WeightedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WeightedListRepr<T> {
    items: Vec<T>,
    units: Vec<u64>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<WeightedListRepr<T>> for WeightedList<T> {
    type Error = CollectionError;

    fn try_from(repr: WeightedListRepr<T>) -> Result<Self> {
        if repr.items.len() != repr.units.len() {
            return Err(CollectionError::invalid_argument(
                "units",
                format!(
                    "expected {} entries, got {}",
                    repr.items.len(),
                    repr.units.len()
                ),
            ));
        }
        if let Some(pos) = repr.units.iter().position(|&u| u == 0) {
            return Err(CollectionError::invalid_argument(
                "units",
                format!("entry {pos} must be >= 1, got 0"),
            ));
        }
        Ok(Self {
            items: repr.items,
            units: repr.units,
            weights: OnceCell::new(),
        })
    }
}
