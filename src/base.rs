use core::cmp;

use rand::RngCore;
use slab::Slab;
use std::vec::Vec;

use super::{
  builder::default_rng,
  height::Promoter,
  node::{Entry, EntryId, Node, NodeId},
  Comparator, DefaultRng, Error, Options,
};

mod cursor;
pub use cursor::{Cursor, CursorMut};

mod iterator;
pub(crate) use iterator::{IntoIter, Iter};

mod sketch;
pub use sketch::Sketch;

#[cfg(test)]
mod tests;

/// The skiplist engine shared by [`SkipSet`](crate::SkipSet) (with `V = ()`)
/// and [`SkipMap`](crate::SkipMap).
///
/// Every level keeps a head reference. While the list is non-empty the minimum
/// entry owns a full `max_height` tower, so every level head is the minimum's
/// node at that level. All other towers get a random height.
#[derive(Debug)]
pub(crate) struct SkipList<K, V, C, R = DefaultRng> {
  nodes: Slab<Node>,
  entries: Slab<Entry<K, V>>,
  /// `heads[i]` is the first node of level `i`.
  heads: Vec<Option<NodeId>>,
  /// The level-0 node holding the maximum key.
  last: Option<NodeId>,
  len: usize,
  promoter: Promoter<R>,
  opts: Options,
  cmp: C,
}

impl<K: Clone, V: Clone, C: Clone, R: Clone> Clone for SkipList<K, V, C, R> {
  fn clone(&self) -> Self {
    Self {
      nodes: self.nodes.clone(),
      entries: self.entries.clone(),
      heads: self.heads.clone(),
      last: self.last,
      len: self.len,
      promoter: self.promoter.clone(),
      opts: self.opts,
      cmp: self.cmp.clone(),
    }
  }

  fn clone_from(&mut self, source: &Self) {
    self.nodes.clone_from(&source.nodes);
    self.entries.clone_from(&source.entries);
    self.heads.clone_from(&source.heads);
    self.last = source.last;
    self.len = source.len;
    self.promoter.clone_from(&source.promoter);
    self.opts = source.opts;
    self.cmp.clone_from(&source.cmp);
  }
}

/// A read-only view over the level-0 chain, used by cursors and iterators.
pub(crate) struct Links<'a, K, V> {
  nodes: &'a Slab<Node>,
  entries: &'a Slab<Entry<K, V>>,
  first: Option<NodeId>,
  last: Option<NodeId>,
}

impl<K, V> Clone for Links<'_, K, V> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<K, V> Copy for Links<'_, K, V> {}

impl<'a, K, V> Links<'a, K, V> {
  #[inline]
  fn node(&self, id: NodeId) -> &'a Node {
    &self.nodes[id.0]
  }

  #[inline]
  pub(crate) fn entry(&self, id: NodeId) -> &'a Entry<K, V> {
    &self.entries[self.node(id).entry.0]
  }

  #[inline]
  pub(crate) fn next(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).next
  }

  #[inline]
  pub(crate) fn prev(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).prev
  }

  #[inline]
  pub(crate) const fn first(&self) -> Option<NodeId> {
    self.first
  }

  #[inline]
  pub(crate) const fn last(&self) -> Option<NodeId> {
    self.last
  }
}

// --------------------------------Constructors--------------------------------
impl<K, V, C> SkipList<K, V, C> {
  /// Builds an empty skiplist from options already known to be valid.
  pub(crate) fn with_defaults(opts: Options, cmp: C) -> Self {
    let rng = default_rng(&opts);
    match Self::new(opts, cmp, rng) {
      Ok(list) => list,
      Err(e) => panic!("default options must be valid: {e}"),
    }
  }
}

impl<K, V, C, R> SkipList<K, V, C, R> {
  pub(crate) fn new(opts: Options, cmp: C, rng: R) -> Result<Self, Error> {
    let promoter = Promoter::new(opts.probability(), rng)?;
    let cap = opts.capacity();
    let mut heads = Vec::with_capacity(opts.max_height());
    heads.resize(opts.max_height(), None);
    Ok(Self {
      nodes: Slab::with_capacity(cap.saturating_mul(2)),
      entries: Slab::with_capacity(cap),
      heads,
      last: None,
      len: 0,
      promoter,
      opts,
      cmp,
    })
  }
}

// --------------------------------Accessors--------------------------------
impl<K, V, C, R> SkipList<K, V, C, R> {
  /// Returns the number of entries.
  #[inline]
  pub(crate) const fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub(crate) const fn is_empty(&self) -> bool {
    self.len == 0
  }

  #[inline]
  pub(crate) const fn comparator(&self) -> &C {
    &self.cmp
  }

  #[inline]
  pub(crate) const fn options(&self) -> &Options {
    &self.opts
  }

  #[inline]
  pub(crate) const fn probability(&self) -> f64 {
    self.promoter.probability()
  }

  #[inline]
  pub(crate) fn max_height(&self) -> usize {
    self.heads.len()
  }

  /// Returns how many entries fit before the entry slab reallocates.
  #[inline]
  pub(crate) fn capacity(&self) -> usize {
    self.entries.capacity()
  }

  /// Returns the height of the tallest tower, not counting the head spine
  /// which always spans every level. Returns `1` for a single entry and `0`
  /// for an empty list.
  pub(crate) fn height(&self) -> usize {
    for (level, head) in self.heads.iter().enumerate().rev() {
      if let Some(head) = head {
        if self.node(*head).next.is_some() {
          return level + 1;
        }
      }
    }
    usize::from(!self.is_empty())
  }

  #[inline]
  pub(crate) fn links(&self) -> Links<'_, K, V> {
    Links {
      nodes: &self.nodes,
      entries: &self.entries,
      first: self.first_node(),
      last: self.last,
    }
  }

  #[inline]
  pub(crate) fn iter(&self) -> Iter<'_, K, V> {
    Iter::new(self.links(), self.len)
  }

  #[inline]
  pub(crate) fn sketch(&self) -> Sketch<'_, K, V> {
    Sketch::new(self.links(), &self.heads)
  }

  #[inline]
  pub(crate) fn first_node(&self) -> Option<NodeId> {
    self.heads.first().copied().flatten()
  }

  #[inline]
  pub(crate) const fn last_node(&self) -> Option<NodeId> {
    self.last
  }

  #[inline]
  pub(crate) fn first(&self) -> Option<&Entry<K, V>> {
    self.first_node().map(|id| self.entry(id))
  }

  #[inline]
  pub(crate) fn last(&self) -> Option<&Entry<K, V>> {
    self.last.map(|id| self.entry(id))
  }

  /// Like [`SkipList::first`], but signals [`Error::Empty`] instead of returning `None`.
  #[inline]
  pub(crate) fn front(&self) -> Result<&Entry<K, V>, Error> {
    self.first().ok_or(Error::Empty)
  }

  /// Like [`SkipList::last`], but signals [`Error::Empty`] instead of returning `None`.
  #[inline]
  pub(crate) fn back(&self) -> Result<&Entry<K, V>, Error> {
    self.last().ok_or(Error::Empty)
  }

  #[inline]
  pub(crate) fn entry(&self, id: NodeId) -> &Entry<K, V> {
    &self.entries[self.node(id).entry.0]
  }

  #[inline]
  pub(crate) fn entry_mut(&mut self, id: NodeId) -> &mut Entry<K, V> {
    let entry = self.node(id).entry;
    &mut self.entries[entry.0]
  }

  #[inline]
  pub(crate) fn next_of(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).next
  }

  #[inline]
  pub(crate) fn prev_of(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).prev
  }

  #[inline]
  fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.0]
  }

  #[inline]
  fn node_mut(&mut self, id: NodeId) -> &mut Node {
    &mut self.nodes[id.0]
  }

  #[inline]
  fn key_of(&self, id: NodeId) -> &K {
    &self.entry(id).key
  }

  #[inline]
  fn top(&self) -> usize {
    self.heads.len() - 1
  }

  #[inline]
  fn head(&self, level: usize) -> NodeId {
    match self.heads[level] {
      Some(id) => id,
      None => panic!("level {level} has no head in a non-empty skiplist"),
    }
  }

  /// Follows a tower from an upper level to its level-0 node.
  #[inline]
  fn ground(&self, mut id: NodeId) -> NodeId {
    while let Some(down) = self.node(id).down {
      id = down;
    }
    id
  }

  #[inline]
  fn alloc_node(&mut self, node: Node) -> NodeId {
    NodeId(self.nodes.insert(node))
  }

  /// Creates a node for `entry` right after `prev` on `prev`'s level.
  fn link_after(&mut self, prev: NodeId, entry: EntryId, down: Option<NodeId>) -> NodeId {
    let next = self.node(prev).next;
    let id = self.alloc_node(Node::new(entry).with_links(Some(prev), next, down));
    if let Some(next) = next {
      self.node_mut(next).prev = Some(id);
    }
    self.node_mut(prev).next = Some(id);
    if let Some(down) = down {
      self.node_mut(down).up = Some(id);
    }
    id
  }

  /// Releases a node and splices its horizontal neighbours together.
  fn unlink(&mut self, id: NodeId) -> Node {
    let node = self.nodes.remove(id.0);
    if let Some(prev) = node.prev {
      self.node_mut(prev).next = node.next;
    }
    if let Some(next) = node.next {
      self.node_mut(next).prev = node.prev;
    }
    node
  }
}

// --------------------------------Search--------------------------------
impl<K, V, C: Comparator<K>, R> SkipList<K, V, C, R> {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    self.cmp.compare(a, b)
  }

  /// Moves right from `id` while the next key is strictly less than `key`.
  #[inline]
  fn advance(&self, mut id: NodeId, key: &K) -> NodeId {
    while let Some(next) = self.node(id).next {
      if self.compare(self.key_of(next), key).is_lt() {
        id = next;
      } else {
        break;
      }
    }
    id
  }

  /// Returns the next node at `id`'s level if it holds exactly `key`.
  #[inline]
  fn matching_next(&self, id: NodeId, key: &K) -> Option<NodeId> {
    self
      .node(id)
      .next
      .filter(|next| self.compare(self.key_of(*next), key).is_eq())
  }

  /// Returns the level-0 node holding `key`.
  pub(crate) fn find_node(&self, key: &K) -> Option<NodeId> {
    let mut id = self.heads.last().copied().flatten()?;
    match self.compare(key, self.key_of(id)) {
      cmp::Ordering::Less => return None,
      cmp::Ordering::Equal => return self.first_node(),
      cmp::Ordering::Greater => {}
    }

    loop {
      id = self.advance(id, key);
      if let Some(found) = self.matching_next(id, key) {
        return Some(self.ground(found));
      }
      id = self.node(id).down?;
    }
  }

  /// Returns the level-0 node holding the first key not less than `key`.
  pub(crate) fn lower_bound_node(&self, key: &K) -> Option<NodeId> {
    let mut id = self.heads.last().copied().flatten()?;
    if self.compare(key, self.key_of(id)).is_le() {
      return self.first_node();
    }

    loop {
      id = self.advance(id, key);
      if let Some(found) = self.matching_next(id, key) {
        return Some(self.ground(found));
      }
      match self.node(id).down {
        Some(down) => id = down,
        None => return self.node(id).next,
      }
    }
  }

  /// Returns the level-0 node holding the first key strictly greater than `key`.
  pub(crate) fn upper_bound_node(&self, key: &K) -> Option<NodeId> {
    let id = self.lower_bound_node(key)?;
    if self.compare(self.key_of(id), key).is_eq() {
      self.node(id).next
    } else {
      Some(id)
    }
  }

  #[inline]
  pub(crate) fn contains(&self, key: &K) -> bool {
    self.find_node(key).is_some()
  }

  #[inline]
  pub(crate) fn get(&self, key: &K) -> Option<&Entry<K, V>> {
    self.find_node(key).map(|id| self.entry(id))
  }

  #[inline]
  pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut Entry<K, V>> {
    let id = self.find_node(key)?;
    Some(self.entry_mut(id))
  }

  /// Removes the entry holding `key`, if any.
  pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
    let id = self.find_node(key)?;
    Some(self.remove_node(id))
  }
}

// --------------------------------Insert--------------------------------
impl<K, V, C: Comparator<K>, R: RngCore> SkipList<K, V, C, R> {
  /// Inserts `key` with `value` unless the key is already present.
  ///
  /// Returns the level-0 node of the entry holding `key`, and whether it was
  /// newly inserted. An existing entry keeps its value.
  pub(crate) fn insert(&mut self, key: K, value: V) -> (NodeId, bool) {
    let top = self.top();
    let head = match self.heads[top] {
      Some(head) => head,
      None => return (self.insert_first(key, value), true),
    };

    match self.compare(&key, self.key_of(head)) {
      cmp::Ordering::Equal => return (self.head(0), false),
      cmp::Ordering::Less => return (self.insert_front(key, value), true),
      cmp::Ordering::Greater => {}
    }

    // previous[i] is the last node on level i whose key is less than `key`
    let mut previous = Vec::with_capacity(top + 1);
    previous.resize(top + 1, head);
    let mut id = head;
    for level in (0..=top).rev() {
      id = self.advance(id, &key);
      if let Some(found) = self.matching_next(id, &key) {
        return (self.ground(found), false);
      }
      previous[level] = id;
      if level > 0 {
        id = self.below(id);
      }
    }

    let entry = EntryId(self.entries.insert(Entry::new(key, value)));
    let ground = self.link_after(previous[0], entry, None);
    if self.node(ground).next.is_none() {
      self.last = Some(ground);
    }

    let height = self.promoter.random_height(top + 1);
    let mut below = ground;
    for prev in previous.iter().take(height).skip(1) {
      below = self.link_after(*prev, entry, Some(below));
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(height, len = self.len + 1, "inserted tower");

    self.len += 1;
    (ground, true)
  }

  /// Builds the full-height head spine of an empty list.
  fn insert_first(&mut self, key: K, value: V) -> NodeId {
    let entry = EntryId(self.entries.insert(Entry::new(key, value)));
    let mut below = None;
    for level in 0..self.heads.len() {
      let id = self.alloc_node(Node::new(entry).with_links(None, None, below));
      if let Some(below) = below {
        self.node_mut(below).up = Some(id);
      }
      self.heads[level] = Some(id);
      below = Some(id);
    }

    let ground = self.head(0);
    self.last = Some(ground);
    self.len = 1;
    ground
  }

  /// Inserts a key below the current minimum.
  ///
  /// The new entry takes over the head spine with a full-height tower, then the
  /// previous minimum is demoted to a random height.
  fn insert_front(&mut self, key: K, value: V) -> NodeId {
    let entry = EntryId(self.entries.insert(Entry::new(key, value)));
    let mut below = None;
    for level in 0..self.heads.len() {
      let old = self.head(level);
      let id = self.alloc_node(Node::new(entry).with_links(None, Some(old), below));
      self.node_mut(old).prev = Some(id);
      if let Some(below) = below {
        self.node_mut(below).up = Some(id);
      }
      self.heads[level] = Some(id);
      below = Some(id);
    }

    let ground = self.head(0);
    if let Some(demoted) = self.node(ground).next {
      self.demote(demoted);
    }
    self.len += 1;
    ground
  }

  /// Trims a full-height tower down to a freshly drawn random height.
  fn demote(&mut self, ground: NodeId) {
    let height = self.promoter.random_height(self.heads.len());
    let mut top = ground;
    for _ in 1..height {
      top = self.above(top);
    }

    let mut cur = self.node_mut(top).up.take();
    while let Some(id) = cur {
      cur = self.unlink(id).up;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(height, "demoted former head tower");
  }

  #[inline]
  fn above(&self, id: NodeId) -> NodeId {
    match self.node(id).up {
      Some(up) => up,
      None => panic!("head spine tower is shorter than the maximum height"),
    }
  }

  #[inline]
  fn below(&self, id: NodeId) -> NodeId {
    match self.node(id).down {
      Some(down) => down,
      None => panic!("node above level 0 has no down link"),
    }
  }
}

// --------------------------------Erase--------------------------------
impl<K, V, C, R> SkipList<K, V, C, R> {
  /// Removes the entry whose level-0 node is `ground`.
  pub(crate) fn remove_node(&mut self, ground: NodeId) -> (K, V) {
    if self.first_node() == Some(ground) {
      self.remove_head()
    } else {
      self.remove_tower(ground)
    }
  }

  #[inline]
  pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
    self.first_node()?;
    Some(self.remove_head())
  }

  #[inline]
  pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
    let last = self.last?;
    Some(self.remove_node(last))
  }

  /// Unlinks every node of a non-head tower, from level 0 upward.
  fn remove_tower(&mut self, ground: NodeId) -> (K, V) {
    if self.last == Some(ground) {
      self.last = self.node(ground).prev;
    }

    let entry = self.node(ground).entry;
    let mut cur = Some(ground);
    while let Some(id) = cur {
      cur = self.unlink(id).up;
    }

    self.len -= 1;
    self.entries.remove(entry.0).into_pair()
  }

  /// Removes the minimum. Its successor inherits the head spine: its own tower
  /// is kept, and the levels above it get synthesized nodes that take over the
  /// old head's `next` links.
  fn remove_head(&mut self) -> (K, V) {
    let old = self.head(0);
    let entry = self.node(old).entry;

    match self.node(old).next {
      None => {
        for level in 0..self.heads.len() {
          if let Some(id) = self.heads[level].take() {
            self.nodes.remove(id.0);
          }
        }
        self.last = None;
      }
      Some(successor) => {
        let heir = self.node(successor).entry;
        let mut cur = Some(successor);
        let mut below = None;

        for level in 0..self.heads.len() {
          let head = self.head(level);
          let old = self.nodes.remove(head.0);
          let id = match cur {
            Some(id) => {
              self.node_mut(id).prev = None;
              id
            }
            None => {
              let id = self.alloc_node(Node::new(heir).with_links(None, old.next, below));
              if let Some(next) = old.next {
                self.node_mut(next).prev = Some(id);
              }
              if let Some(below) = below {
                self.node_mut(below).up = Some(id);
              }
              id
            }
          };
          self.heads[level] = Some(id);
          below = Some(id);
          cur = self.node(id).up;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len - 1, "rebuilt head spine");
      }
    }

    self.len -= 1;
    self.entries.remove(entry.0).into_pair()
  }

  /// Releases every tower and resets all level heads.
  pub(crate) fn clear(&mut self) {
    #[cfg(feature = "tracing")]
    tracing::debug!(len = self.len, "clearing skiplist");

    self.nodes.clear();
    self.entries.clear();
    self.heads.iter_mut().for_each(|head| *head = None);
    self.last = None;
    self.len = 0;
  }
}

#[cfg(test)]
impl<K, V, C: Comparator<K>, R> SkipList<K, V, C, R> {
  /// Walks every level and asserts all structural invariants.
  pub(crate) fn check_invariants(&self) {
    use std::collections::BTreeSet;

    if self.is_empty() {
      assert!(self.heads.iter().all(Option::is_none), "empty list keeps a head");
      assert!(self.last.is_none(), "empty list keeps a last node");
      assert_eq!(self.nodes.len(), 0, "empty list keeps nodes alive");
      assert_eq!(self.entries.len(), 0, "empty list keeps entries alive");
      return;
    }

    let spine = self.node(self.head(0)).entry;
    let mut below: BTreeSet<NodeId> = BTreeSet::new();
    let mut total = 0;
    for level in 0..self.heads.len() {
      let head = self.head(level);
      assert_eq!(self.node(head).entry, spine, "level {level} head is not the minimum");
      assert!(self.node(head).prev.is_none(), "level {level} head has a prev link");

      let mut seen = BTreeSet::new();
      let mut cur = Some(head);
      let mut prev: Option<NodeId> = None;
      while let Some(id) = cur {
        let node = self.node(id);
        assert_eq!(node.prev, prev, "broken prev link at level {level}");
        if let Some(prev) = prev {
          assert!(
            self.compare(self.key_of(prev), self.key_of(id)).is_lt(),
            "level {level} is not strictly ordered"
          );
        }

        if level == 0 {
          assert!(node.down.is_none(), "level 0 node has a down link");
        } else {
          let down = match node.down {
            Some(down) => down,
            None => panic!("level {level} node has no down link"),
          };
          assert!(below.contains(&down), "down link leaves level {}", level - 1);
          assert_eq!(self.node(down).up, Some(id), "asymmetric up/down links");
          assert_eq!(self.node(down).entry, node.entry, "tower mixes entries");
        }

        match node.up {
          Some(up) => assert_eq!(self.node(up).down, Some(id), "asymmetric up/down links"),
          None => assert!(
            level == self.top() || id != head,
            "head spine stops at level {level}"
          ),
        }

        seen.insert(id);
        prev = Some(id);
        cur = node.next;
      }

      if level == 0 {
        assert_eq!(seen.len(), self.len, "level 0 does not hold every entry");
        assert_eq!(self.last, prev, "last does not point at the maximum");
      }
      total += seen.len();
      below = seen;
    }

    assert_eq!(total, self.nodes.len(), "unreachable nodes are still allocated");
    assert_eq!(self.len, self.entries.len(), "unreachable entries are still allocated");
  }
}
