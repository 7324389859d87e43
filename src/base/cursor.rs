use core::fmt;

use super::{Links, NodeId, SkipList};
use crate::{Ascend, DefaultRng};

/// A read-only position in a skiplist.
///
/// A cursor either points at an entry or at the "ghost" position past both
/// ends, which plays the role of `end` and `rend`. Moving forward from the
/// ghost lands on the first entry, moving backward from it lands on the last.
///
/// Two cursors compare equal when they rest on the same position of the same
/// list. Cursors taken from different lists must not be compared: any two
/// ghost positions are equal, whichever list they come from. To order
/// positions, compare their keys with the list's comparator.
///
/// ## Example
///
/// ```rust
/// use lsl::SkipSet;
///
/// let set: SkipSet<u32> = (0..3).collect();
/// let mut cursor = set.begin();
/// cursor.move_next();
/// assert_eq!(cursor, set.find(&1));
/// assert_ne!(cursor, set.begin());
///
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor, set.end());
/// assert!(cursor.key().is_none());
/// ```
pub struct Cursor<'a, K, V = ()> {
  links: Links<'a, K, V>,
  current: Option<NodeId>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
  fn eq(&self, other: &Self) -> bool {
    self.current == other.current
  }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Cursor").field(&self.entry()).finish()
  }
}

impl<'a, K, V> Cursor<'a, K, V> {
  #[inline]
  pub(crate) const fn new(links: Links<'a, K, V>, current: Option<NodeId>) -> Self {
    Self { links, current }
  }

  /// Returns `true` if the cursor points at the ghost position past the ends.
  #[inline]
  pub const fn is_end(&self) -> bool {
    self.current.is_none()
  }

  /// Returns the key at the cursor.
  #[inline]
  pub fn key(&self) -> Option<&'a K> {
    self.entry().map(|(k, _)| k)
  }

  /// Returns the value at the cursor.
  #[inline]
  pub fn value(&self) -> Option<&'a V> {
    self.entry().map(|(_, v)| v)
  }

  /// Returns the key and value at the cursor.
  #[inline]
  pub fn entry(&self) -> Option<(&'a K, &'a V)> {
    self.current.map(|id| {
      let ent = self.links.entry(id);
      (&ent.key, &ent.value)
    })
  }

  /// Moves the cursor to the next entry in key order.
  #[inline]
  pub fn move_next(&mut self) {
    self.current = match self.current {
      Some(id) => self.links.next(id),
      None => self.links.first(),
    };
  }

  /// Moves the cursor to the previous entry in key order.
  #[inline]
  pub fn move_prev(&mut self) {
    self.current = match self.current {
      Some(id) => self.links.prev(id),
      None => self.links.last(),
    };
  }
}

/// A position in a skiplist that can update the value it points at or
/// remove its entry.
///
/// Obtained from `find_mut`, `lower_bound_mut` and friends. Like [`Cursor`],
/// it may rest on the ghost position past both ends.
pub struct CursorMut<'a, K, V = (), C = Ascend, R = DefaultRng> {
  list: &'a mut SkipList<K, V, C, R>,
  current: Option<NodeId>,
}

impl<K: fmt::Debug, V: fmt::Debug, C, R> fmt::Debug for CursorMut<'_, K, V, C, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("CursorMut").field(&self.entry()).finish()
  }
}

impl<'a, K, V, C, R> CursorMut<'a, K, V, C, R> {
  #[inline]
  pub(crate) fn new(list: &'a mut SkipList<K, V, C, R>, current: Option<NodeId>) -> Self {
    Self { list, current }
  }

  /// Returns `true` if the cursor points at the ghost position past the ends.
  #[inline]
  pub const fn is_end(&self) -> bool {
    self.current.is_none()
  }

  /// Returns the key at the cursor.
  #[inline]
  pub fn key(&self) -> Option<&K> {
    self.current.map(|id| &self.list.entry(id).key)
  }

  /// Returns the value at the cursor.
  #[inline]
  pub fn value(&self) -> Option<&V> {
    self.current.map(|id| &self.list.entry(id).value)
  }

  /// Returns a mutable reference to the value at the cursor.
  #[inline]
  pub fn value_mut(&mut self) -> Option<&mut V> {
    let id = self.current?;
    Some(&mut self.list.entry_mut(id).value)
  }

  /// Returns the key and value at the cursor.
  #[inline]
  pub fn entry(&self) -> Option<(&K, &V)> {
    self.current.map(|id| {
      let ent = self.list.entry(id);
      (&ent.key, &ent.value)
    })
  }

  /// Moves the cursor to the next entry in key order.
  #[inline]
  pub fn move_next(&mut self) {
    self.current = match self.current {
      Some(id) => self.list.next_of(id),
      None => self.list.first_node(),
    };
  }

  /// Moves the cursor to the previous entry in key order.
  #[inline]
  pub fn move_prev(&mut self) {
    self.current = match self.current {
      Some(id) => self.list.prev_of(id),
      None => self.list.last_node(),
    };
  }

  /// Removes the entry at the cursor and moves the cursor to its successor.
  ///
  /// Returns `None`, removing nothing, when the cursor is at the ghost position.
  pub fn remove_current(&mut self) -> Option<(K, V)> {
    let id = self.current?;
    // level-0 nodes of other entries survive the removal, so the successor stays valid
    let next = self.list.next_of(id);
    let removed = self.list.remove_node(id);
    self.current = next;
    Some(removed)
  }

  /// Returns a read-only cursor at the same position.
  #[inline]
  pub fn as_cursor(&self) -> Cursor<'_, K, V> {
    Cursor::new(self.list.links(), self.current)
  }
}
