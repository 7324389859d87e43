use super::*;
use crate::{Builder, Descend, Error};

use rand::{rngs::StdRng, SeedableRng};
use std::{format, vec::Vec};

fn seeded<K: Ord>() -> SkipSet<K> {
  Builder::new().with_seed(7).build_set().unwrap()
}

fn collect(set: &SkipSet<i32>) -> Vec<i32> {
  set.iter().copied().collect()
}

#[test]
fn test_empty() {
  let set = SkipSet::<i32>::new();
  assert!(set.is_empty());
  assert_eq!(set.len(), 0);
  assert_eq!(set.height(), 0);
  assert_eq!(set.front(), Err(Error::Empty));
  assert_eq!(set.back(), Err(Error::Empty));
  assert!(set.begin().is_end());
  assert_eq!(set.begin(), set.end());
  assert_eq!(set.iter().next(), None);
  assert_eq!(format!("{set:?}"), "{}");
}

#[test]
fn test_insert_and_query() {
  let mut set = seeded();
  for k in [9, 7, 6, 1, 3] {
    assert!(set.insert(k).1);
    assert_eq!(set.back(), Ok(&9));
  }
  assert!(!set.insert(6).1);

  assert_eq!(set.len(), 5);
  assert_eq!(collect(&set), [1, 3, 6, 7, 9]);
  assert_eq!(set.front(), Ok(&1));
  assert!(set.contains(&7));
  assert!(set.exists(&7));
  assert!(!set.contains(&8));
  assert_eq!(set.count(&3), 1);
  assert_eq!(set.count(&4), 0);
  assert_eq!(set.get(&6), Some(&6));
  assert_eq!(set.first(), Some(&1));
  assert_eq!(set.last(), Some(&9));
}

#[test]
fn test_duplicates_and_size() {
  let mut set = seeded();
  set.extend([5, 6, 7, 8, 1, 3, 1, 0, 9]);
  assert_eq!(set.len(), 8);
  assert_eq!(set.back(), Ok(&9));
  assert_eq!(collect(&set), [0, 1, 3, 5, 6, 7, 8, 9]);
}

#[test]
fn test_bounds() {
  let set: SkipSet<i32> = [1, 3, 6, 7, 9].into_iter().collect();
  assert_eq!(set.lower_bound(&5).key(), Some(&6));
  assert_eq!(set.upper_bound(&5).key(), Some(&6));
  assert_eq!(set.lower_bound(&6).key(), Some(&6));
  assert_eq!(set.upper_bound(&6).key(), Some(&7));
  assert!(set.upper_bound(&9).is_end());
  assert_eq!(set.upper_bound(&9), set.end());
  assert_eq!(set.find(&3).key(), Some(&3));
  assert!(set.find(&4).is_end());
}

#[test]
fn test_cursor_navigation() {
  let set: SkipSet<i32> = (0..5).collect();

  let mut cursor = set.end();
  cursor.move_prev();
  assert_eq!(cursor.key(), Some(&4));

  let mut seen = Vec::new();
  let mut cursor = set.begin();
  while let Some(k) = cursor.key() {
    seen.push(*k);
    cursor.move_next();
  }
  assert_eq!(seen, [0, 1, 2, 3, 4]);
  assert!(cursor.is_end());

  cursor.move_next();
  assert_eq!(cursor, set.begin());
}

#[test]
fn test_erase() {
  let mut set: SkipSet<i32> = (0..20).collect();
  assert_eq!(set.erase(&0), 1);
  assert_eq!(set.erase(&0), 0);
  assert!(set.remove(&19));
  assert!(!set.remove(&19));
  assert_eq!(set.take(&10), Some(10));
  assert_eq!(set.take(&10), None);
  assert_eq!(set.len(), 17);
  assert_eq!(set.front(), Ok(&1));
  assert_eq!(set.back(), Ok(&18));
  set.list.check_invariants();

  while let Some(k) = set.pop_first() {
    assert!(!set.contains(&k));
  }
  assert!(set.is_empty());
  assert_eq!(set.back(), Err(Error::Empty));
}

#[test]
fn test_erase_by_cursor() {
  let mut set: SkipSet<i32> = (0..10).collect();

  let mut cursor = set.lower_bound_mut(&4);
  for _ in 0..3 {
    assert!(cursor.remove_current().is_some());
  }
  assert_eq!(cursor.key(), Some(&7));
  assert_eq!(collect(&set), [0, 1, 2, 3, 7, 8, 9]);

  let mut cursor = set.find_mut(&42);
  assert!(cursor.is_end());
  assert_eq!(cursor.remove_current(), None);

  let mut cursor = set.upper_bound_mut(&8);
  assert_eq!(cursor.remove_current(), Some((9, ())));
  assert!(cursor.is_end());
  assert_eq!(set.back(), Ok(&8));
  set.list.check_invariants();
}

#[test]
fn test_pop_last() {
  let mut set: SkipSet<i32> = (0..10).collect();
  assert_eq!(set.pop_last(), Some(9));
  assert_eq!(set.pop_first(), Some(0));
  assert_eq!(collect(&set), (1..9).collect::<Vec<_>>());
}

#[test]
fn test_descending_comparator() {
  let mut set = Builder::new()
    .with_comparator(Descend)
    .with_seed(3)
    .build_set::<i32>()
    .unwrap();
  set.extend([1, 5, 3]);
  assert_eq!(set.front(), Ok(&5));
  assert_eq!(set.iter().copied().collect::<Vec<_>>(), [5, 3, 1]);
  assert_eq!(set.lower_bound(&4).key(), Some(&3));
}

#[test]
fn test_float_keys() {
  let mut set = Builder::new()
    .with_probability(0.6)
    .with_comparator(f64::total_cmp)
    .build_set::<f64>()
    .unwrap();
  for k in [9.0, 7.0, 6.0, 1.0, 3.0] {
    set.insert(k);
  }
  assert_eq!(set.front(), Ok(&1.0));
  assert_eq!(set.back(), Ok(&9.0));
  assert_eq!(set.probability(), 0.6);
}

#[test]
fn test_custom_rng() {
  let build = || {
    Builder::new()
      .with_max_height(6)
      .build_set_with_rng::<u32, _>(StdRng::seed_from_u64(11))
      .unwrap()
  };
  let mut a = build();
  let mut b = build();
  a.extend(0..200);
  b.extend(0..200);
  assert_eq!(a.max_height(), 6);
  assert_eq!(format!("{}", a.sketch()), format!("{}", b.sketch()));
}

#[test]
fn test_invalid_probability() {
  assert_eq!(
    SkipSet::<i32>::with_probability(1.0).err(),
    Some(Error::InvalidProbability(1.0))
  );
  assert!(SkipSet::<i32>::with_probability(0.0).is_err());
  assert!(SkipSet::from_iter_with_probability([1, 2], -1.0).is_err());

  let set = SkipSet::from_iter_with_probability([3, 1, 2], 0.3).unwrap();
  assert_eq!(set.iter().copied().collect::<Vec<i32>>(), [1, 2, 3]);
}

#[test]
fn test_clone_and_eq() {
  let mut a: SkipSet<i32> = (0..16).collect();
  let b = a.clone();
  assert_eq!(a, b);
  a.remove(&3);
  assert_ne!(a, b);
  assert_eq!(b.len(), 16);

  let mut c = SkipSet::new();
  c.insert(100);
  c.clone_from(&b);
  assert_eq!(c, b);
}

#[test]
fn test_into_iter() {
  let set: SkipSet<i32> = [4, 2, 3, 1].into_iter().collect();
  let mut iter = (&set).into_iter();
  assert_eq!(iter.len(), 4);
  assert_eq!(iter.next_back(), Some(&4));
  assert_eq!(iter.next(), Some(&1));
  assert_eq!(iter.len(), 2);

  let mut owned = set.into_iter();
  assert_eq!(owned.next_back(), Some(4));
  assert_eq!(owned.collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn test_clear() {
  let mut set: SkipSet<i32> = (0..100).collect();
  set.clear();
  assert!(set.is_empty());
  assert!(set.insert(5).1);
  assert_eq!(collect(&set), [5]);
}

#[test]
fn test_debug() {
  let set: SkipSet<i32> = [2, 1].into_iter().collect();
  assert_eq!(format!("{set:?}"), "{1, 2}");
}
