use core::{fmt, iter::FusedIterator};

use rand::RngCore;

use super::{
  base::{self, SkipList},
  Ascend, Builder, Comparator, Cursor, CursorMut, DefaultRng, Error, Options, Sketch,
};

#[cfg(test)]
mod tests;

/// An ordered set of keys based on a randomized skiplist.
///
/// Search, insertion and removal take expected `O(log n)` comparisons. Every
/// key is stored once, no matter how many levels its tower spans.
///
/// ## Example
///
/// ```rust
/// use lsl::SkipSet;
///
/// let mut set = SkipSet::new();
/// for k in [9, 7, 6, 1, 3] {
///   set.insert(k);
/// }
///
/// assert_eq!(set.len(), 5);
/// assert_eq!(set.lower_bound(&5).key(), Some(&6));
/// assert_eq!(set.upper_bound(&6).key(), Some(&7));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 6, 7, 9]);
/// ```
pub struct SkipSet<K, C = Ascend, R = DefaultRng> {
  list: SkipList<K, (), C, R>,
}

impl<K: Clone, C: Clone, R: Clone> Clone for SkipSet<K, C, R> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      list: self.list.clone(),
    }
  }

  #[inline]
  fn clone_from(&mut self, source: &Self) {
    self.list.clone_from(&source.list);
  }
}

impl<K> Default for SkipSet<K> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K> SkipSet<K> {
  /// Creates an empty set with promotion probability `0.5`, maximum height `10`
  /// and an OS-seeded random number generator.
  #[inline]
  pub fn new() -> Self {
    Self::with_comparator(Ascend)
  }
}

impl<K: Ord> SkipSet<K> {
  /// Creates an empty set with the given promotion probability.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::{Error, SkipSet};
  ///
  /// assert!(SkipSet::<u32>::with_probability(0.25).is_ok());
  /// assert_eq!(
  ///   SkipSet::<u32>::with_probability(1.0).unwrap_err(),
  ///   Error::InvalidProbability(1.0),
  /// );
  /// ```
  #[inline]
  pub fn with_probability(p: f64) -> Result<Self, Error> {
    Builder::new().with_probability(p).build_set()
  }

  /// Creates a set holding the keys of `iter`. Later duplicates of a key are ignored.
  pub fn from_iter_with_probability<I>(iter: I, p: f64) -> Result<Self, Error>
  where
    I: IntoIterator<Item = K>,
  {
    let mut set = Self::with_probability(p)?;
    set.extend(iter);
    Ok(set)
  }
}

impl<K, C> SkipSet<K, C> {
  /// Creates an empty set ordered by `cmp`, with default options.
  #[inline]
  pub fn with_comparator(cmp: C) -> Self {
    Self::from_list(SkipList::with_defaults(Options::new(), cmp))
  }
}

impl<K, C, R> SkipSet<K, C, R> {
  #[inline]
  pub(crate) const fn from_list(list: SkipList<K, (), C, R>) -> Self {
    Self { list }
  }

  /// Returns the number of keys in the set.
  #[inline]
  pub const fn len(&self) -> usize {
    self.list.len()
  }

  /// Returns `true` if the set holds no keys.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.list.is_empty()
  }

  /// Returns the comparator used to order keys.
  #[inline]
  pub const fn comparator(&self) -> &C {
    self.list.comparator()
  }

  /// Returns the options the set was built with.
  #[inline]
  pub const fn options(&self) -> &Options {
    self.list.options()
  }

  /// Returns the promotion probability.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.list.probability()
  }

  /// Returns the maximum tower height.
  #[inline]
  pub fn max_height(&self) -> usize {
    self.list.max_height()
  }

  /// Returns the height of the tallest tower among all keys but the minimum,
  /// whose tower always spans every level. `1` for a single key, `0` when empty.
  #[inline]
  pub fn height(&self) -> usize {
    self.list.height()
  }

  /// Returns how many keys fit before the set reallocates.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.list.capacity()
  }

  /// Removes every key.
  #[inline]
  pub fn clear(&mut self) {
    self.list.clear();
  }

  /// Returns the minimum key.
  #[inline]
  pub fn first(&self) -> Option<&K> {
    self.list.first().map(|ent| &ent.key)
  }

  /// Returns the maximum key.
  #[inline]
  pub fn last(&self) -> Option<&K> {
    self.list.last().map(|ent| &ent.key)
  }

  /// Returns the minimum key, or [`Error::Empty`] if the set is empty.
  #[inline]
  pub fn front(&self) -> Result<&K, Error> {
    self.list.front().map(|ent| &ent.key)
  }

  /// Returns the maximum key, or [`Error::Empty`] if the set is empty.
  #[inline]
  pub fn back(&self) -> Result<&K, Error> {
    self.list.back().map(|ent| &ent.key)
  }

  /// Removes and returns the minimum key.
  #[inline]
  pub fn pop_first(&mut self) -> Option<K> {
    self.list.pop_first().map(|(k, _)| k)
  }

  /// Removes and returns the maximum key.
  #[inline]
  pub fn pop_last(&mut self) -> Option<K> {
    self.list.pop_last().map(|(k, _)| k)
  }

  /// Returns an iterator over the keys in ascending order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, K> {
    Iter {
      inner: self.list.iter(),
    }
  }

  /// Returns a cursor at the minimum key, or at the ghost position if the set is empty.
  #[inline]
  pub fn begin(&self) -> Cursor<'_, K> {
    Cursor::new(self.list.links(), self.list.first_node())
  }

  /// Returns a cursor at the ghost position past both ends.
  ///
  /// Moving it backward lands on the maximum key.
  #[inline]
  pub fn end(&self) -> Cursor<'_, K> {
    Cursor::new(self.list.links(), None)
  }

  /// Returns a per-level dump of the set, for debugging.
  #[inline]
  pub fn sketch(&self) -> Sketch<'_, K> {
    self.list.sketch()
  }
}

impl<K, C: Comparator<K>, R> SkipSet<K, C, R> {
  /// Returns `true` if the set holds `key`.
  #[inline]
  pub fn contains(&self, key: &K) -> bool {
    self.list.contains(key)
  }

  /// Alias of [`SkipSet::contains`].
  #[inline]
  pub fn exists(&self, key: &K) -> bool {
    self.contains(key)
  }

  /// Returns `1` if the set holds `key`, `0` otherwise.
  #[inline]
  pub fn count(&self, key: &K) -> usize {
    usize::from(self.contains(key))
  }

  /// Returns the stored key equal to `key`.
  #[inline]
  pub fn get(&self, key: &K) -> Option<&K> {
    self.list.get(key).map(|ent| &ent.key)
  }

  /// Returns a cursor at `key`, or at the ghost position if the key is absent.
  #[inline]
  pub fn find(&self, key: &K) -> Cursor<'_, K> {
    Cursor::new(self.list.links(), self.list.find_node(key))
  }

  /// Returns a cursor at the first key not less than `key`.
  #[inline]
  pub fn lower_bound(&self, key: &K) -> Cursor<'_, K> {
    Cursor::new(self.list.links(), self.list.lower_bound_node(key))
  }

  /// Returns a cursor at the first key strictly greater than `key`.
  #[inline]
  pub fn upper_bound(&self, key: &K) -> Cursor<'_, K> {
    Cursor::new(self.list.links(), self.list.upper_bound_node(key))
  }

  /// Like [`SkipSet::find`], but the cursor can remove the key it points at.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::SkipSet;
  ///
  /// let mut set: SkipSet<u32> = (1..=5).collect();
  /// let mut cursor = set.find_mut(&2);
  /// assert_eq!(cursor.remove_current(), Some((2, ())));
  /// assert_eq!(cursor.key(), Some(&3));
  /// assert!(!set.contains(&2));
  /// ```
  #[inline]
  pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, (), C, R> {
    let id = self.list.find_node(key);
    CursorMut::new(&mut self.list, id)
  }

  /// Like [`SkipSet::lower_bound`], but the cursor can remove the key it points at.
  #[inline]
  pub fn lower_bound_mut(&mut self, key: &K) -> CursorMut<'_, K, (), C, R> {
    let id = self.list.lower_bound_node(key);
    CursorMut::new(&mut self.list, id)
  }

  /// Like [`SkipSet::upper_bound`], but the cursor can remove the key it points at.
  #[inline]
  pub fn upper_bound_mut(&mut self, key: &K) -> CursorMut<'_, K, (), C, R> {
    let id = self.list.upper_bound_node(key);
    CursorMut::new(&mut self.list, id)
  }

  /// Removes `key`, returning how many keys were removed (`0` or `1`).
  #[inline]
  pub fn erase(&mut self, key: &K) -> usize {
    usize::from(self.remove(key))
  }

  /// Removes `key`, returning `true` if it was present.
  #[inline]
  pub fn remove(&mut self, key: &K) -> bool {
    self.list.remove(key).is_some()
  }

  /// Removes and returns the stored key equal to `key`.
  #[inline]
  pub fn take(&mut self, key: &K) -> Option<K> {
    self.list.remove(key).map(|(k, _)| k)
  }
}

impl<K, C: Comparator<K>, R: RngCore> SkipSet<K, C, R> {
  /// Inserts `key` if it is absent.
  ///
  /// Returns a cursor at the stored key and `true` if the key was inserted.
  /// Inserting a key that is already present changes nothing and returns `false`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::SkipSet;
  ///
  /// let mut set = SkipSet::new();
  /// assert!(set.insert(3).1);
  /// let (cursor, inserted) = set.insert(3);
  /// assert!(!inserted);
  /// assert_eq!(cursor.key(), Some(&3));
  /// ```
  #[inline]
  pub fn insert(&mut self, key: K) -> (Cursor<'_, K>, bool) {
    let (id, inserted) = self.list.insert(key, ());
    (Cursor::new(self.list.links(), Some(id)), inserted)
  }
}

impl<K: fmt::Debug, C, R> fmt::Debug for SkipSet<K, C, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl<K: PartialEq, C, R> PartialEq for SkipSet<K, C, R> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<K: Eq, C, R> Eq for SkipSet<K, C, R> {}

impl<K: Ord> FromIterator<K> for SkipSet<K> {
  fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
    let mut set = Self::new();
    set.extend(iter);
    set
  }
}

impl<K, C: Comparator<K>, R: RngCore> Extend<K> for SkipSet<K, C, R> {
  fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
    for key in iter {
      self.list.insert(key, ());
    }
  }
}

impl<'a, K, C, R> IntoIterator for &'a SkipSet<K, C, R> {
  type Item = &'a K;
  type IntoIter = Iter<'a, K>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<K, C, R> IntoIterator for SkipSet<K, C, R> {
  type Item = K;
  type IntoIter = IntoIter<K, C, R>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    IntoIter {
      inner: base::IntoIter::new(self.list),
    }
  }
}

/// An iterator over the keys of a [`SkipSet`], in ascending order.
pub struct Iter<'a, K> {
  inner: base::Iter<'a, K, ()>,
}

impl<K> Clone for Iter<'_, K> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone(),
    }
  }
}

impl<'a, K> Iterator for Iter<'a, K> {
  type Item = &'a K;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(k, _)| k)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(k, _)| k)
  }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

/// An owning iterator over the keys of a [`SkipSet`], in ascending order.
pub struct IntoIter<K, C = Ascend, R = DefaultRng> {
  inner: base::IntoIter<K, (), C, R>,
}

impl<K, C, R> Iterator for IntoIter<K, C, R> {
  type Item = K;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next().map(|(k, _)| k)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, C, R> DoubleEndedIterator for IntoIter<K, C, R> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back().map(|(k, _)| k)
  }
}

impl<K, C, R> ExactSizeIterator for IntoIter<K, C, R> {}

impl<K, C, R> FusedIterator for IntoIter<K, C, R> {}
