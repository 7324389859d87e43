use super::{DEFAULT_MAX_HEIGHT, DEFAULT_PROBABILITY, MAX_HEIGHT};

/// Options for [`SkipSet`](crate::SkipSet) and [`SkipMap`](crate::SkipMap).
#[viewit::viewit(vis_all = "pub(super)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
  probability: f64,
  max_height: u8,
  capacity: usize,
  seed: Option<u64>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      probability: DEFAULT_PROBABILITY,
      max_height: DEFAULT_MAX_HEIGHT as u8,
      capacity: 0,
      seed: None,
    }
  }

  /// Sets the probability that a tower grows by one more level.
  ///
  /// Must lie in the open interval `(0, 1)`, otherwise building the skiplist fails
  /// with [`Error::InvalidProbability`](crate::Error::InvalidProbability).
  ///
  /// Default is `0.5`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::Options;
  ///
  /// let opts = Options::new().with_probability(0.25);
  /// assert_eq!(opts.probability(), 0.25);
  /// ```
  #[inline]
  pub const fn with_probability(mut self, p: f64) -> Self {
    self.probability = p;
    self
  }

  /// Sets the maximum height of a tower.
  ///
  /// Default is `10`. The maximum height is `32`. The minimum height is `1`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::Options;
  ///
  /// assert_eq!(Options::new().with_max_height(0).max_height(), 1);
  /// assert_eq!(Options::new().with_max_height(64).max_height(), 32);
  /// ```
  #[inline]
  pub const fn with_max_height(mut self, height: u8) -> Self {
    self.max_height = if height == 0 {
      1
    } else if height as usize > MAX_HEIGHT {
      MAX_HEIGHT as u8
    } else {
      height
    };
    self
  }

  /// Sets how many entries the underlying slabs reserve up front.
  ///
  /// Default is `0`.
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Seeds the default random number generator, making tower heights reproducible.
  ///
  /// Without a seed the generator is seeded from the operating system.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use lsl::Options;
  ///
  /// let opts = Options::new().with_seed(42);
  /// assert_eq!(opts.seed(), Some(42));
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  /// Returns the promotion probability.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.probability
  }

  /// Returns the maximum tower height.
  #[inline]
  pub const fn max_height(&self) -> usize {
    self.max_height as usize
  }

  /// Returns the number of entries reserved up front.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the seed of the default random number generator, if any.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }
}
