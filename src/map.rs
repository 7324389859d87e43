use core::{fmt, iter::FusedIterator, mem, ops::Index};

use rand::RngCore;

use super::{
  base::{self, SkipList},
  Ascend, Builder, Comparator, Cursor, CursorMut, DefaultRng, Error, Options, Sketch,
};


/// An ordered map based on a randomized skiplist.
///
/// Each key/value pair is stored once and shared by every level of its tower.
/// Values can be updated in place through [`SkipMap::get_mut`],
/// [`SkipMap::get_or_insert_default`] or a [`CursorMut`], without reinserting.
///
/// ## Example
///
/// ```rust
/// use lsl::{Error, SkipMap};
///
/// let mut map = SkipMap::new();
/// assert!(map.insert("b", 2).1);
/// assert!(map.insert("a", 1).1);
///
/// // `insert` never overwrites
/// assert!(!map.insert("a", 10).1);
/// assert_eq!(map.at(&"a"), Ok(&1));
///
/// *map.get_or_insert_default("c") += 3;
/// assert_eq!(map.at(&"c"), Ok(&3));
/// assert_eq!(map.at(&"d"), Err(Error::KeyNotFound));
/// ```
pub struct SkipMap<K, V, C = Ascend, R = DefaultRng> {
  list: SkipList<K, V, C, R>,
}

impl<K: Clone, V: Clone, C: Clone, R: Clone> Clone for SkipMap<K, V, C, R> {
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

impl<K, V> Default for SkipMap<K, V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K, V> SkipMap<K, V> {
  /// Creates an empty map with promotion probability `0.5`, maximum height `10`
  /// and an OS-seeded random number generator.
  #[inline]
  pub fn new() -> Self {
    Self::with_comparator(Ascend)
  }
}

impl<K: Ord, V> SkipMap<K, V> {
  /// Creates an empty map with the given promotion probability.
  #[inline]
  pub fn with_probability(p: f64) -> Result<Self, Error> {
    Builder::new().with_probability(p).build_map()
  }

  /// Creates a map holding the pairs of `iter`. When a key repeats, the first
  /// pair wins and later ones are ignored.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::SkipMap;
  ///
  /// let map = SkipMap::from_iter_with_probability([(1, "a"), (1, "b"), (0, "c")], 0.5).unwrap();
  /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&0, &"c"), (&1, &"a")]);
  /// ```
  pub fn from_iter_with_probability<I>(iter: I, p: f64) -> Result<Self, Error>
  where
    I: IntoIterator<Item = (K, V)>,
  {
    let mut map = Self::with_probability(p)?;
    map.extend(iter);
    Ok(map)
  }
}

impl<K, V, C> SkipMap<K, V, C> {
  /// Creates an empty map ordered by `cmp`, with default options.
  #[inline]
  pub fn with_comparator(cmp: C) -> Self {
    Self::from_list(SkipList::with_defaults(Options::new(), cmp))
  }
}

impl<K, V, C, R> SkipMap<K, V, C, R> {
  #[inline]
  pub(crate) const fn from_list(list: SkipList<K, V, C, R>) -> Self {
    Self { list }
  }

  /// Returns the number of entries in the map.
  #[inline]
  pub const fn len(&self) -> usize {
    self.list.len()
  }

  /// Returns `true` if the map holds no entries.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.list.is_empty()
  }

  /// Returns the comparator used to order keys.
  #[inline]
  pub const fn comparator(&self) -> &C {
    self.list.comparator()
  }

  /// Returns the options the map was built with.
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

  /// Returns the height of the tallest tower among all entries but the minimum,
  /// whose tower always spans every level. `1` for a single entry, `0` when empty.
  #[inline]
  pub fn height(&self) -> usize {
    self.list.height()
  }

  /// Returns how many entries fit before the map reallocates.
  #[inline]
  pub fn capacity(&self) -> usize {
    self.list.capacity()
  }

  /// Removes every entry.
  #[inline]
  pub fn clear(&mut self) {
    self.list.clear();
  }

  /// Returns the entry with the minimum key.
  #[inline]
  pub fn first(&self) -> Option<(&K, &V)> {
    self.list.first().map(|ent| (&ent.key, &ent.value))
  }

  /// Returns the entry with the maximum key.
  #[inline]
  pub fn last(&self) -> Option<(&K, &V)> {
    self.list.last().map(|ent| (&ent.key, &ent.value))
  }

  /// Returns the entry with the minimum key, or [`Error::Empty`] if the map is empty.
  #[inline]
  pub fn front(&self) -> Result<(&K, &V), Error> {
    self.list.front().map(|ent| (&ent.key, &ent.value))
  }

  /// Returns the entry with the maximum key, or [`Error::Empty`] if the map is empty.
  #[inline]
  pub fn back(&self) -> Result<(&K, &V), Error> {
    self.list.back().map(|ent| (&ent.key, &ent.value))
  }

  /// Removes and returns the entry with the minimum key.
  #[inline]
  pub fn pop_first(&mut self) -> Option<(K, V)> {
    self.list.pop_first()
  }

  /// Removes and returns the entry with the maximum key.
  #[inline]
  pub fn pop_last(&mut self) -> Option<(K, V)> {
    self.list.pop_last()
  }

  /// Returns an iterator over the entries in ascending key order.
  #[inline]
  pub fn iter(&self) -> Iter<'_, K, V> {
    Iter {
      inner: self.list.iter(),
    }
  }

  /// Returns an iterator over the keys in ascending order.
  #[inline]
  pub fn keys(&self) -> Keys<'_, K, V> {
    Keys {
      inner: self.list.iter(),
    }
  }

  /// Returns an iterator over the values in ascending key order.
  #[inline]
  pub fn values(&self) -> Values<'_, K, V> {
    Values {
      inner: self.list.iter(),
    }
  }

  /// Returns a cursor at the minimum entry, or at the ghost position if the map is empty.
  #[inline]
  pub fn begin(&self) -> Cursor<'_, K, V> {
    Cursor::new(self.list.links(), self.list.first_node())
  }

  /// Returns a cursor at the ghost position past both ends.
  ///
  /// Moving it backward lands on the maximum entry.
  #[inline]
  pub fn end(&self) -> Cursor<'_, K, V> {
    Cursor::new(self.list.links(), None)
  }

  /// Returns a mutable cursor at the minimum entry.
  #[inline]
  pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, C, R> {
    let id = self.list.first_node();
    CursorMut::new(&mut self.list, id)
  }

  /// Returns a per-level dump of the keys, for debugging.
  #[inline]
  pub fn sketch(&self) -> Sketch<'_, K, V> {
    self.list.sketch()
  }
}

impl<K, V, C: Comparator<K>, R> SkipMap<K, V, C, R> {
  /// Returns `true` if the map holds `key`.
  #[inline]
  pub fn contains_key(&self, key: &K) -> bool {
    self.list.contains(key)
  }

  /// Alias of [`SkipMap::contains_key`].
  #[inline]
  pub fn exists(&self, key: &K) -> bool {
    self.contains_key(key)
  }

  /// Returns `1` if the map holds `key`, `0` otherwise.
  #[inline]
  pub fn count(&self, key: &K) -> usize {
    usize::from(self.contains_key(key))
  }

  /// Returns the value stored under `key`.
  #[inline]
  pub fn get(&self, key: &K) -> Option<&V> {
    self.list.get(key).map(|ent| &ent.value)
  }

  /// Returns the stored key and value for `key`.
  #[inline]
  pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
    self.list.get(key).map(|ent| (&ent.key, &ent.value))
  }

  /// Returns a mutable reference to the value stored under `key`.
  #[inline]
  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
    self.list.get_mut(key).map(|ent| &mut ent.value)
  }

  /// Returns the value stored under `key`, or [`Error::KeyNotFound`].
  #[inline]
  pub fn at(&self, key: &K) -> Result<&V, Error> {
    self.get(key).ok_or(Error::KeyNotFound)
  }

  /// Returns a mutable reference to the value stored under `key`, or [`Error::KeyNotFound`].
  #[inline]
  pub fn at_mut(&mut self, key: &K) -> Result<&mut V, Error> {
    self.get_mut(key).ok_or(Error::KeyNotFound)
  }

  /// Returns a cursor at `key`, or at the ghost position if the key is absent.
  #[inline]
  pub fn find(&self, key: &K) -> Cursor<'_, K, V> {
    Cursor::new(self.list.links(), self.list.find_node(key))
  }

  /// Returns a cursor at the first entry whose key is not less than `key`.
  #[inline]
  pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V> {
    Cursor::new(self.list.links(), self.list.lower_bound_node(key))
  }

  /// Returns a cursor at the first entry whose key is strictly greater than `key`.
  #[inline]
  pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V> {
    Cursor::new(self.list.links(), self.list.upper_bound_node(key))
  }

  /// Like [`SkipMap::find`], but the cursor can update or remove the entry it points at.
  #[inline]
  pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, V, C, R> {
    let id = self.list.find_node(key);
    CursorMut::new(&mut self.list, id)
  }

  /// Like [`SkipMap::lower_bound`], but the cursor can update or remove entries.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::SkipMap;
  ///
  /// let mut map: SkipMap<u32, u32> = (0..10).map(|i| (i, i * 10)).collect();
  /// let mut cursor = map.lower_bound_mut(&7);
  /// while cursor.remove_current().is_some() {}
  /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5, 6]);
  /// ```
  #[inline]
  pub fn lower_bound_mut(&mut self, key: &K) -> CursorMut<'_, K, V, C, R> {
    let id = self.list.lower_bound_node(key);
    CursorMut::new(&mut self.list, id)
  }

  /// Like [`SkipMap::upper_bound`], but the cursor can update or remove entries.
  #[inline]
  pub fn upper_bound_mut(&mut self, key: &K) -> CursorMut<'_, K, V, C, R> {
    let id = self.list.upper_bound_node(key);
    CursorMut::new(&mut self.list, id)
  }

  /// Removes `key`, returning how many entries were removed (`0` or `1`).
  #[inline]
  pub fn erase(&mut self, key: &K) -> usize {
    usize::from(self.list.remove(key).is_some())
  }

  /// Removes `key`, returning its value if it was present.
  #[inline]
  pub fn remove(&mut self, key: &K) -> Option<V> {
    self.list.remove(key).map(|(_, v)| v)
  }

  /// Removes `key`, returning the stored key and value if it was present.
  #[inline]
  pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
    self.list.remove(key)
  }
}

impl<K, V, C: Comparator<K>, R: RngCore> SkipMap<K, V, C, R> {
  /// Inserts `value` under `key` if the key is absent.
  ///
  /// Returns a cursor at the entry for `key` and `true` if the pair was inserted.
  /// An existing entry keeps its value; use [`SkipMap::insert_or_assign`] to overwrite.
  #[inline]
  pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool) {
    let (id, inserted) = self.list.insert(key, value);
    (Cursor::new(self.list.links(), Some(id)), inserted)
  }

  /// Inserts `value` under `key`, overwriting an existing value.
  ///
  /// Returns the previous value, if any.
  pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
    match self.list.find_node(&key) {
      Some(id) => Some(mem::replace(&mut self.list.entry_mut(id).value, value)),
      None => {
        self.list.insert(key, value);
        None
      }
    }
  }

  /// Returns a mutable reference to the value under `key`, inserting the
  /// result of `f` first if the key is absent.
  pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &mut V
  where
    F: FnOnce() -> V,
  {
    let id = match self.list.find_node(&key) {
      Some(id) => id,
      None => self.list.insert(key, f()).0,
    };
    &mut self.list.entry_mut(id).value
  }

  /// Returns a mutable reference to the value under `key`, inserting
  /// `V::default()` first if the key is absent.
  #[inline]
  pub fn get_or_insert_default(&mut self, key: K) -> &mut V
  where
    V: Default,
  {
    self.get_or_insert_with(key, V::default)
  }
}

impl<K, V, C: Comparator<K>, R> Index<&K> for SkipMap<K, V, C, R> {
  type Output = V;

  /// Returns the value stored under `key`.
  ///
  /// ## Panics
  ///
  /// Panics if the key is not present in the map.
  #[inline]
  fn index(&self, key: &K) -> &V {
    match self.get(key) {
      Some(v) => v,
      None => panic!("key not found in the skipmap"),
    }
  }
}

impl<K: fmt::Debug, V: fmt::Debug, C, R> fmt::Debug for SkipMap<K, V, C, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

impl<K: PartialEq, V: PartialEq, C, R> PartialEq for SkipMap<K, V, C, R> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<K: Eq, V: Eq, C, R> Eq for SkipMap<K, V, C, R> {}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = Self::new();
    map.extend(iter);
    map
  }
}

impl<K, V, C: Comparator<K>, R: RngCore> Extend<(K, V)> for SkipMap<K, V, C, R> {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.list.insert(key, value);
    }
  }
}

impl<'a, K, V, C, R> IntoIterator for &'a SkipMap<K, V, C, R> {
  type Item = (&'a K, &'a V);
  type IntoIter = Iter<'a, K, V>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<K, V, C, R> IntoIterator for SkipMap<K, V, C, R> {
  type Item = (K, V);
  type IntoIter = IntoIter<K, V, C, R>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    IntoIter {
      inner: base::IntoIter::new(self.list),
    }
  }
}

macro_rules! iterator {
  ($(#[$meta:meta])* $name:ident<$lt:lifetime> => $item:ty, |$k:ident, $v:ident| $map:expr) => {
    $(#[$meta])*
    pub struct $name<$lt, K, V> {
      inner: base::Iter<$lt, K, V>,
    }

    impl<K, V> Clone for $name<'_, K, V> {
      fn clone(&self) -> Self {
        Self {
          inner: self.inner.clone(),
        }
      }
    }

    impl<$lt, K, V> Iterator for $name<$lt, K, V> {
      type Item = $item;

      #[inline]
      fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|($k, $v)| $map)
      }

      #[inline]
      fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
      }
    }

    impl<K, V> DoubleEndedIterator for $name<'_, K, V> {
      #[inline]
      fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|($k, $v)| $map)
      }
    }

    impl<K, V> ExactSizeIterator for $name<'_, K, V> {}

    impl<K, V> FusedIterator for $name<'_, K, V> {}
  };
}

iterator!(
  /// An iterator over the entries of a [`SkipMap`], in ascending key order.
  Iter<'a> => (&'a K, &'a V), |k, v| (k, v)
);

iterator!(
  /// An iterator over the keys of a [`SkipMap`], in ascending order.
  Keys<'a> => &'a K, |k, _v| k
);

iterator!(
  /// An iterator over the values of a [`SkipMap`], in ascending key order.
  Values<'a> => &'a V, |_k, v| v
);

/// An owning iterator over the entries of a [`SkipMap`], in ascending key order.
pub struct IntoIter<K, V, C = Ascend, R = DefaultRng> {
  inner: base::IntoIter<K, V, C, R>,
}

impl<K, V, C, R> Iterator for IntoIter<K, V, C, R> {
  type Item = (K, V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl<K, V, C, R> DoubleEndedIterator for IntoIter<K, V, C, R> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.inner.next_back()
  }
}

impl<K, V, C, R> ExactSizeIterator for IntoIter<K, V, C, R> {}

impl<K, V, C, R> FusedIterator for IntoIter<K, V, C, R> {}
