/// Error type for the lsl crate.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
  /// Indicates that the first or last element of an empty skiplist was requested.
  #[error("skiplist is empty")]
  Empty,

  /// Indicates that the requested key does not exist in the skipmap.
  #[error("key not found in the skipmap")]
  KeyNotFound,

  /// Indicates that the promotion probability is not within the open interval `(0, 1)`.
  #[error("promotion probability must be in (0, 1), but got {0}")]
  InvalidProbability(f64),
}
