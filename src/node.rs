/// Key of a node inside the node slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// Key of an entry inside the entry slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct EntryId(pub(crate) usize);

/// The logical `(key, value)` pair. Stored once and shared by every node of its tower.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
  pub(crate) key: K,
  pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
  #[inline]
  pub(crate) const fn new(key: K, value: V) -> Self {
    Self { key, value }
  }

  #[inline]
  pub(crate) fn into_pair(self) -> (K, V) {
    (self.key, self.value)
  }
}

/// One placement of an entry at one level.
///
/// `next`/`prev` chain the level in key order, `up`/`down` chain the tower.
#[derive(Debug, Clone)]
pub(crate) struct Node {
  pub(crate) entry: EntryId,
  pub(crate) next: Option<NodeId>,
  pub(crate) prev: Option<NodeId>,
  pub(crate) up: Option<NodeId>,
  pub(crate) down: Option<NodeId>,
}

impl Node {
  #[inline]
  pub(crate) const fn new(entry: EntryId) -> Self {
    Self {
      entry,
      next: None,
      prev: None,
      up: None,
      down: None,
    }
  }

  #[inline]
  pub(crate) const fn with_links(
    mut self,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    down: Option<NodeId>,
  ) -> Self {
    self.prev = prev;
    self.next = next;
    self.down = down;
    self
  }
}
