use rand::{RngCore, SeedableRng};

use super::{
  base::SkipList, Ascend, Comparator, DefaultRng, Error, Options, SkipMap, SkipSet,
};

/// The builder to build [`SkipSet`] and [`SkipMap`].
///
/// ## Example
///
/// ```rust
/// use lsl::{Builder, Descend};
///
/// let mut map = Builder::new()
///   .with_probability(0.25)
///   .with_max_height(16)
///   .with_comparator(Descend)
///   .build_map::<u32, &str>()
///   .unwrap();
///
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.front(), Ok((&2, &"two")));
/// ```
#[derive(Debug, Clone)]
pub struct Builder<C = Ascend> {
  opts: Options,
  cmp: C,
}

impl Default for Builder {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Builder {
  /// Create a new `Builder` with default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      opts: Options::new(),
      cmp: Ascend,
    }
  }
}

impl<C> Builder<C> {
  /// Returns a new builder with the new [`Comparator`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::{Builder, Descend};
  ///
  /// let builder = Builder::new().with_comparator(Descend);
  /// ```
  #[inline]
  pub fn with_comparator<NC>(self, cmp: NC) -> Builder<NC> {
    Builder {
      cmp,
      opts: self.opts,
    }
  }

  /// Returns a new builder with the new [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::{Builder, Options};
  ///
  /// let builder = Builder::new().with_options(Options::new().with_max_height(20));
  /// assert_eq!(builder.options().max_height(), 20);
  /// ```
  #[inline]
  pub const fn with_options(mut self, opts: Options) -> Self {
    self.opts = opts;
    self
  }

  /// See [`Options::with_probability`].
  #[inline]
  pub const fn with_probability(mut self, p: f64) -> Self {
    self.opts = self.opts.with_probability(p);
    self
  }

  /// See [`Options::with_max_height`].
  #[inline]
  pub const fn with_max_height(mut self, height: u8) -> Self {
    self.opts = self.opts.with_max_height(height);
    self
  }

  /// See [`Options::with_capacity`].
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.opts = self.opts.with_capacity(capacity);
    self
  }

  /// See [`Options::with_seed`].
  #[inline]
  pub const fn with_seed(mut self, seed: u64) -> Self {
    self.opts = self.opts.with_seed(seed);
    self
  }

  /// Returns the options of the builder.
  #[inline]
  pub const fn options(&self) -> &Options {
    &self.opts
  }

  /// Returns the comparator of the builder.
  #[inline]
  pub const fn comparator(&self) -> &C {
    &self.cmp
  }

  /// Builds a [`SkipSet`] with the default random number generator.
  pub fn build_set<K>(self) -> Result<SkipSet<K, C>, Error>
  where
    C: Comparator<K>,
  {
    let rng = default_rng(&self.opts);
    self.build_set_with_rng(rng)
  }

  /// Builds a [`SkipSet`] which draws tower heights from `rng`.
  pub fn build_set_with_rng<K, R>(self, rng: R) -> Result<SkipSet<K, C, R>, Error>
  where
    C: Comparator<K>,
    R: RngCore,
  {
    SkipList::new(self.opts, self.cmp, rng).map(SkipSet::from_list)
  }

  /// Builds a [`SkipMap`] with the default random number generator.
  pub fn build_map<K, V>(self) -> Result<SkipMap<K, V, C>, Error>
  where
    C: Comparator<K>,
  {
    let rng = default_rng(&self.opts);
    self.build_map_with_rng(rng)
  }

  /// Builds a [`SkipMap`] which draws tower heights from `rng`.
  pub fn build_map_with_rng<K, V, R>(self, rng: R) -> Result<SkipMap<K, V, C, R>, Error>
  where
    C: Comparator<K>,
    R: RngCore,
  {
    SkipList::new(self.opts, self.cmp, rng).map(SkipMap::from_list)
  }
}

/// Seeds from [`Options::seed`] when present, from the operating system otherwise.
#[inline]
pub(crate) fn default_rng(opts: &Options) -> DefaultRng {
  match opts.seed {
    Some(seed) => DefaultRng::seed_from_u64(seed),
    None => DefaultRng::from_os_rng(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_rng_seeding() {
    let seeded = Options::new().with_seed(9);
    assert_eq!(
      default_rng(&seeded).next_u64(),
      default_rng(&seeded).next_u64()
    );

    let unseeded = Options::new();
    assert_ne!(
      default_rng(&unseeded).next_u64(),
      default_rng(&unseeded).next_u64()
    );
    assert!(Builder::new().build_set::<u32>().is_ok());
  }
}
