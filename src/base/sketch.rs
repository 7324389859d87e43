use core::fmt;

use super::{Links, NodeId};

/// A diagnostic dump of the keys present at every level, bottom level first.
///
/// Returned by `sketch()` on [`SkipSet`](crate::SkipSet) and
/// [`SkipMap`](crate::SkipMap). Its [`Display`](fmt::Display) output has one
/// line per level, keys separated by a single space.
pub struct Sketch<'a, K, V = ()> {
  links: Links<'a, K, V>,
  heads: &'a [Option<NodeId>],
}

impl<'a, K, V> Sketch<'a, K, V> {
  #[inline]
  pub(crate) const fn new(links: Links<'a, K, V>, heads: &'a [Option<NodeId>]) -> Self {
    Self { links, heads }
  }

  /// Returns the number of levels.
  #[inline]
  pub const fn levels(&self) -> usize {
    self.heads.len()
  }

  /// Returns the keys present at `level`, in order. Out-of-range levels are empty.
  pub fn level(&self, level: usize) -> impl Iterator<Item = &'a K> + 'a
  where
    K: 'a,
    V: 'a,
  {
    let links = self.links;
    let head = self.heads.get(level).copied().flatten();
    core::iter::successors(head, move |id| links.next(*id)).map(move |id| &links.entry(id).key)
  }
}

impl<'a, K: fmt::Display + 'a, V: 'a> fmt::Display for Sketch<'a, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for level in 0..self.levels() {
      for (i, key) in self.level(level).enumerate() {
        if i > 0 {
          f.write_str(" ")?;
        }
        write!(f, "{key}")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

impl<'a, K: fmt::Debug + 'a, V: 'a> fmt::Debug for Sketch<'a, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut list = f.debug_list();
    for level in 0..self.levels() {
      list.entry(&Level(self, level));
    }
    list.finish()
  }
}

struct Level<'s, 'a, K, V>(&'s Sketch<'a, K, V>, usize);

impl<'a, K: fmt::Debug + 'a, V: 'a> fmt::Debug for Level<'_, 'a, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.0.level(self.1)).finish()
  }
}
