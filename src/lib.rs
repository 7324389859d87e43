#![doc = include_str!("../README.md")]
#![cfg_attr(not(all(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::type_complexity)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use core::cmp;

mod height;
mod node;

mod base;
pub use base::{Cursor, CursorMut, Sketch};

mod builder;
pub use builder::Builder;

mod error;
pub use error::Error;

mod options;
pub use options::Options;

/// An ordered set implementation based on skiplist.
pub mod set;
pub use set::SkipSet;

/// An ordered map implementation based on skiplist.
pub mod map;
pub use map::SkipMap;

pub use rand;

/// The default source of randomness used to decide tower heights.
pub type DefaultRng = rand::rngs::StdRng;

/// The hard upper bound for [`Options::with_max_height`].
pub const MAX_HEIGHT: usize = 32;

/// The default maximum tower height.
pub const DEFAULT_MAX_HEIGHT: usize = 10;

/// The default promotion probability.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Comparator is used to define a total order over the keys of a skiplist.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator, so `f64::total_cmp` or a closure
/// can be plugged in directly.
///
/// ## Example
///
/// ```rust
/// use lsl::{Builder, SkipSet};
///
/// let mut set = Builder::new()
///   .with_comparator(f64::total_cmp)
///   .build_set::<f64>()
///   .unwrap();
/// set.insert(2.5);
/// set.insert(-1.0);
/// assert_eq!(set.front(), Ok(&-1.0));
/// ```
pub trait Comparator<K: ?Sized> {
  /// Compares two keys.
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
  F: Fn(&K, &K) -> cmp::Ordering,
{
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    self(a, b)
  }
}

/// Ascend is a comparator that orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ascend;

impl<K: Ord + ?Sized> Comparator<K> for Ascend {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    a.cmp(b)
  }
}

/// Descend is a comparator that orders keys in the reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descend;

impl<K: Ord + ?Sized> Comparator<K> for Descend {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    b.cmp(a)
  }
}
