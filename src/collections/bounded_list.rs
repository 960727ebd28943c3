//! Fixed-capacity list that evicts its oldest element on overflow.
//!
//! Useful for "last N" histories: pushing into a full list drops the
//! element at the front and returns it to the caller.

use std::collections::VecDeque;

use tracing::trace;

use crate::error::{CollectionError, Result};

/// Ordered list holding at most `limit` elements.
///
/// # Examples
/// ```
/// use u_collections::collections::BoundedList;
///
/// let mut recent = BoundedList::new(2).unwrap();
/// assert_eq!(recent.push("a"), None);
/// assert_eq!(recent.push("b"), None);
/// assert_eq!(recent.push("c"), Some("a"));
/// assert_eq!(recent.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BoundedListRepr<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct BoundedList<T> {
    items: VecDeque<T>,
    limit: usize,
}

impl<T> BoundedList<T> {
    /// Creates an empty list that holds at most `limit` elements.
    ///
    /// # Errors
    /// `InvalidArgument` if `limit == 0`.
    pub fn new(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(CollectionError::invalid_argument(
                "limit",
                "must be >= 1, got 0",
            ));
        }
        Ok(Self {
            items: VecDeque::new(),
            limit,
        })
    }

    /// Appends `item`, evicting and returning the oldest element if the
    /// list was already full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.limit {
            trace!(target: "bounded_list", limit = self.limit, "evicting oldest element");
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Removes and returns the oldest element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Oldest element.
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Newest element.
    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    /// Element at `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Maximum number of elements.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of elements currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the next push will evict.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.limit
    }

    /// Removes every element; the limit is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: PartialEq> BoundedList<T> {
    /// Returns `true` if some element equals `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T> Extend<T> for BoundedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a BoundedList<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for BoundedList<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoundedListRepr<T> {
    items: VecDeque<T>,
    limit: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<BoundedListRepr<T>> for BoundedList<T> {
    type Error = CollectionError;

    fn try_from(repr: BoundedListRepr<T>) -> Result<Self> {
        let mut list = Self::new(repr.limit)?;
        if repr.items.len() > repr.limit {
            return Err(CollectionError::invalid_argument(
                "items",
                format!("{} elements exceed limit {}", repr.items.len(), repr.limit),
            ));
        }
        list.items = repr.items;
        Ok(list)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn never_exceeds_limit_and_keeps_suffix(
            limit in 1_usize..16,
            data in proptest::collection::vec(any::<i32>(), 0..64),
        ) {
            let mut list = BoundedList::new(limit).unwrap();
            let mut evicted = Vec::new();
            for &x in &data {
                evicted.extend(list.push(x));
                prop_assert!(list.len() <= limit);
            }
            let keep = data.len().min(limit);
            let kept: Vec<i32> = list.iter().copied().collect();
            prop_assert_eq!(&kept[..], &data[data.len() - keep..]);
            prop_assert_eq!(&evicted[..], &data[..data.len() - keep]);
        }
    }
}
