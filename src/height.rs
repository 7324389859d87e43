use rand::{Rng, RngCore};

use super::Error;

/// Decides tower heights with one Bernoulli trial of probability `p` per level.
#[derive(Debug, Clone)]
pub(crate) struct Promoter<R> {
  p: f64,
  rng: R,
}

impl<R> Promoter<R> {
  /// Validates that `p` lies in the open interval `(0, 1)`.
  pub(crate) fn new(p: f64, rng: R) -> Result<Self, Error> {
    // written so that NaN fails too
    if !(p > 0.0 && p < 1.0) {
      return Err(Error::InvalidProbability(p));
    }
    Ok(Self { p, rng })
  }

  #[inline]
  pub(crate) const fn probability(&self) -> f64 {
    self.p
  }
}

impl<R: RngCore> Promoter<R> {
  /// Returns a height in `1..=max`. Each level above the first is added
  /// independently with probability `p`, stopping at the first failed flip.
  pub(crate) fn random_height(&mut self, max: usize) -> usize {
    let mut h = 1;
    while h < max && self.rng.random_bool(self.p) {
      h += 1;
    }
    h
  }
}
