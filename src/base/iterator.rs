use core::iter::FusedIterator;

use super::{Links, NodeId, SkipList};

/// A double-ended iterator over the level-0 chain.
pub(crate) struct Iter<'a, K, V> {
  links: Links<'a, K, V>,
  front: Option<NodeId>,
  back: Option<NodeId>,
  remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
  fn clone(&self) -> Self {
    Self {
      links: self.links,
      front: self.front,
      back: self.back,
      remaining: self.remaining,
    }
  }
}

impl<'a, K, V> Iter<'a, K, V> {
  #[inline]
  pub(super) fn new(links: Links<'a, K, V>, len: usize) -> Self {
    Self {
      front: links.first(),
      back: links.last(),
      links,
      remaining: len,
    }
  }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
  type Item = (&'a K, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }

    let id = self.front?;
    self.remaining -= 1;
    self.front = self.links.next(id);
    let ent = self.links.entry(id);
    Some((&ent.key, &ent.value))
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
  fn next_back(&mut self) -> Option<Self::Item> {
    if self.remaining == 0 {
      return None;
    }

    let id = self.back?;
    self.remaining -= 1;
    self.back = self.links.prev(id);
    let ent = self.links.entry(id);
    Some((&ent.key, &ent.value))
  }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An owning iterator which drains the skiplist from both ends.
pub(crate) struct IntoIter<K, V, C, R> {
  list: SkipList<K, V, C, R>,
}

impl<K, V, C, R> IntoIter<K, V, C, R> {
  #[inline]
  pub(crate) const fn new(list: SkipList<K, V, C, R>) -> Self {
    Self { list }
  }
}

impl<K, V, C, R> Iterator for IntoIter<K, V, C, R> {
  type Item = (K, V);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    self.list.pop_first()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.list.len(), Some(self.list.len()))
  }
}

impl<K, V, C, R> DoubleEndedIterator for IntoIter<K, V, C, R> {
  #[inline]
  fn next_back(&mut self) -> Option<Self::Item> {
    self.list.pop_last()
  }
}

impl<K, V, C, R> ExactSizeIterator for IntoIter<K, V, C, R> {}

impl<K, V, C, R> FusedIterator for IntoIter<K, V, C, R> {}
