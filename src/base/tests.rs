use super::*;
use crate::{Ascend, Error};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::{collections::BTreeMap, format, vec::Vec};

type List = SkipList<u32, u32, Ascend, StdRng>;

const SEED: u64 = 0x5eed;

fn list(opts: Options) -> List {
  SkipList::new(opts, Ascend, StdRng::seed_from_u64(SEED)).unwrap()
}

fn key_at(l: &List, id: Option<NodeId>) -> Option<u32> {
  id.map(|id| l.entry(id).key)
}

fn keys(l: &List) -> Vec<u32> {
  l.iter().map(|(k, _)| *k).collect()
}

macro_rules! skiplist_tests {
  ($($name:ident),+ $(,)?) => {
    $(
      paste::paste! {
        #[test]
        fn [< test_ $name >]() {
          $name(list(Options::new()));
        }

        #[test]
        fn [< test_ $name _sparse >]() {
          $name(list(Options::new().with_probability(0.25)));
        }

        #[test]
        fn [< test_ $name _flat >]() {
          $name(list(Options::new().with_max_height(1)));
        }

        #[test]
        fn [< test_ $name _tall >]() {
          $name(list(Options::new().with_max_height(32).with_probability(0.75)));
        }
      }
    )+
  };
}

skiplist_tests!(
  empty,
  ordered_inserts,
  duplicate_inserts,
  back_tracks_maximum,
  mixed_inserts,
  bounds,
  erase_all_shuffled,
  erase_head_repeatedly,
  erase_last_repeatedly,
  erase_sole_entry,
  insert_below_minimum,
  cursor_walk,
  clear,
  clone_is_independent,
  random_ops_against_model,
  scale,
);

fn empty(mut l: List) {
  l.check_invariants();
  assert!(l.is_empty());
  assert_eq!(l.len(), 0);
  assert_eq!(l.height(), 0);
  assert!(l.first().is_none());
  assert!(l.last().is_none());
  assert_eq!(l.front().err(), Some(Error::Empty));
  assert_eq!(l.back().err(), Some(Error::Empty));
  assert!(l.find_node(&1).is_none());
  assert!(l.lower_bound_node(&1).is_none());
  assert!(l.upper_bound_node(&1).is_none());
  assert!(l.remove(&1).is_none());
  assert!(l.pop_first().is_none());
  assert!(l.pop_last().is_none());
  assert_eq!(l.iter().count(), 0);
  l.check_invariants();
}

fn ordered_inserts(mut l: List) {
  for i in 0..200 {
    let (id, inserted) = l.insert(i, i * 10);
    assert!(inserted);
    assert_eq!(l.entry(id).key, i);
  }
  l.check_invariants();

  assert_eq!(l.len(), 200);
  assert_eq!(keys(&l), (0..200).collect::<Vec<_>>());
  assert_eq!(l.front().unwrap().key, 0);
  assert_eq!(l.back().unwrap().key, 199);
  for i in 0..200 {
    assert_eq!(l.get(&i).unwrap().value, i * 10);
  }
  assert!(!l.contains(&200));
}

fn duplicate_inserts(mut l: List) {
  assert!(l.insert(5, 50).1);
  let (id, inserted) = l.insert(5, 51);
  assert!(!inserted);
  assert_eq!(l.entry(id).value, 50);
  assert_eq!(l.len(), 1);

  assert!(l.insert(7, 70).1);
  assert!(!l.insert(7, 71).1);
  assert!(!l.insert(5, 52).1);
  assert_eq!(l.len(), 2);
  assert_eq!(l.get(&7).unwrap().value, 70);
  l.check_invariants();
}

fn back_tracks_maximum(mut l: List) {
  for k in [9, 7, 6, 1, 3] {
    l.insert(k, k);
    assert_eq!(l.back().unwrap().key, 9);
    l.check_invariants();
  }
  assert_eq!(l.front().unwrap().key, 1);
}

fn mixed_inserts(mut l: List) {
  for k in [5, 6, 7, 8, 1, 3, 1, 0, 9] {
    l.insert(k, k);
    l.check_invariants();
  }
  assert_eq!(l.len(), 8);
  assert_eq!(l.back().unwrap().key, 9);
  assert_eq!(l.front().unwrap().key, 0);
  assert_eq!(keys(&l), [0, 1, 3, 5, 6, 7, 8, 9]);
}

fn bounds(mut l: List) {
  for k in [1, 3, 6, 7, 9] {
    l.insert(k, k);
  }

  assert_eq!(key_at(&l, l.lower_bound_node(&5)), Some(6));
  assert_eq!(key_at(&l, l.upper_bound_node(&5)), Some(6));
  assert_eq!(key_at(&l, l.lower_bound_node(&6)), Some(6));
  assert_eq!(key_at(&l, l.upper_bound_node(&6)), Some(7));
  assert_eq!(key_at(&l, l.lower_bound_node(&0)), Some(1));
  assert_eq!(key_at(&l, l.upper_bound_node(&0)), Some(1));
  assert_eq!(key_at(&l, l.lower_bound_node(&1)), Some(1));
  assert_eq!(key_at(&l, l.upper_bound_node(&1)), Some(3));
  assert_eq!(key_at(&l, l.lower_bound_node(&9)), Some(9));
  assert_eq!(key_at(&l, l.upper_bound_node(&9)), None);
  assert_eq!(key_at(&l, l.lower_bound_node(&10)), None);

  assert_eq!(key_at(&l, l.find_node(&7)), Some(7));
  assert_eq!(key_at(&l, l.find_node(&1)), Some(1));
  assert_eq!(l.find_node(&8), None);
}

fn erase_all_shuffled(mut l: List) {
  let mut order: Vec<u32> = (0..300).collect();
  for k in &order {
    l.insert(*k, *k + 1);
  }
  order.shuffle(&mut StdRng::seed_from_u64(SEED + 1));

  for (i, k) in order.iter().enumerate() {
    assert_eq!(l.remove(k), Some((*k, *k + 1)));
    assert!(!l.contains(k));
    assert!(l.remove(k).is_none());
    if i % 16 == 0 {
      l.check_invariants();
    }
  }

  assert!(l.is_empty());
  assert!(l.heads.iter().all(Option::is_none));
  l.check_invariants();
}

fn erase_head_repeatedly(mut l: List) {
  for k in (0..100).rev() {
    l.insert(k, k);
  }
  for k in 0..100 {
    assert_eq!(l.front().unwrap().key, k);
    assert_eq!(l.pop_first(), Some((k, k)));
    l.check_invariants();
  }
  assert!(l.pop_first().is_none());
}

fn erase_last_repeatedly(mut l: List) {
  for k in 0..100 {
    l.insert(k, k);
  }
  for k in (0..100).rev() {
    assert_eq!(l.pop_last(), Some((k, k)));
    if let Some(last) = l.last() {
      assert_eq!(last.key + 1, k);
    }
    l.check_invariants();
  }
  assert!(l.is_empty());
}

fn erase_sole_entry(mut l: List) {
  l.insert(42, 1);
  assert_eq!(l.remove(&42), Some((42, 1)));
  assert!(l.is_empty());
  l.check_invariants();

  l.insert(41, 2);
  l.insert(43, 3);
  assert_eq!(keys(&l), [41, 43]);
  l.check_invariants();
}

fn insert_below_minimum(mut l: List) {
  for k in 50..100 {
    l.insert(k, k);
  }
  for k in (0..50).rev() {
    l.insert(k, k);
    assert_eq!(l.front().unwrap().key, k);
    l.check_invariants();
  }
  assert_eq!(keys(&l), (0..100).collect::<Vec<_>>());
  assert!(l.height() <= l.max_height());
}

fn cursor_walk(mut l: List) {
  for k in [4, 2, 8, 6] {
    l.insert(k, k * 2);
  }

  let mut cursor = Cursor::new(l.links(), None);
  let mut seen = Vec::new();
  loop {
    cursor.move_prev();
    match cursor.key() {
      Some(k) => seen.push(*k),
      None => break,
    }
  }
  assert_eq!(seen, [8, 6, 4, 2]);
  assert!(cursor.is_end());

  cursor.move_next();
  assert_eq!(cursor.entry(), Some((&2, &4)));

  let mut cursor = CursorMut::new(&mut l, None);
  cursor.move_next();
  cursor.move_next();
  *cursor.value_mut().unwrap() = 100;
  assert_eq!(cursor.remove_current(), Some((4, 100)));
  assert_eq!(cursor.key(), Some(&6));
  cursor.move_prev();
  assert_eq!(cursor.remove_current(), Some((2, 4)));
  assert_eq!(cursor.key(), Some(&6));
  l.check_invariants();
  assert_eq!(keys(&l), [6, 8]);
}

fn clear(mut l: List) {
  for k in 0..64 {
    l.insert(k, k);
  }
  l.clear();
  l.check_invariants();
  assert!(l.is_empty());
  assert_eq!(l.height(), 0);

  l.insert(3, 3);
  l.insert(1, 1);
  assert_eq!(keys(&l), [1, 3]);
  l.check_invariants();
}

fn clone_is_independent(mut l: List) {
  for k in 0..32 {
    l.insert(k, k);
  }
  let snapshot = l.clone();
  for k in 0..16 {
    l.remove(&(k * 2));
  }
  l.insert(100, 100);

  snapshot.check_invariants();
  l.check_invariants();
  assert_eq!(keys(&snapshot), (0..32).collect::<Vec<_>>());
  assert_eq!(l.len(), 17);

  let mut other = list(Options::new());
  other.insert(7, 7);
  other.clone_from(&snapshot);
  other.check_invariants();
  assert_eq!(keys(&other), keys(&snapshot));
}

fn random_ops_against_model(mut l: List) {
  let mut rng = StdRng::seed_from_u64(SEED + 2);
  let mut model = BTreeMap::new();

  for round in 0..3000 {
    let k = rng.random_range(0..128u32);
    match rng.random_range(0..4u8) {
      0 | 1 => {
        let inserted = l.insert(k, round).1;
        assert_eq!(inserted, !model.contains_key(&k));
        model.entry(k).or_insert(round);
      }
      2 => assert_eq!(l.remove(&k), model.remove(&k).map(|v| (k, v))),
      _ => {
        assert_eq!(l.get(&k).map(|e| e.value), model.get(&k).copied());
        assert_eq!(
          key_at(&l, l.lower_bound_node(&k)),
          model.range(k..).next().map(|(k, _)| *k)
        );
      }
    }

    assert_eq!(l.len(), model.len());
    assert_eq!(l.first().map(|e| e.key), model.keys().next().copied());
    assert_eq!(l.last().map(|e| e.key), model.keys().next_back().copied());
    if round % 100 == 0 {
      l.check_invariants();
    }
  }

  l.check_invariants();
  assert_eq!(
    l.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
    model.into_iter().collect::<Vec<_>>()
  );
}

fn scale(mut l: List) {
  let mut rng = StdRng::seed_from_u64(SEED + 3);
  for _ in 0..1000 {
    let k = rng.random::<u32>();
    l.insert(k, k);
  }
  l.check_invariants();

  assert!(l.height() <= l.max_height());
  if l.max_height() > 1 {
    assert!(l.height() > 1, "1000 entries never got promoted");
  } else {
    assert_eq!(l.height(), 1);
  }

  let collected = keys(&l);
  assert!(collected.windows(2).all(|w| w[0] < w[1]));
  assert_eq!(collected.len(), l.len());
}

#[test]
fn test_invalid_probability() {
  for p in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
    let res = SkipList::<u32, (), _, _>::new(
      Options::new().with_probability(p),
      Ascend,
      StdRng::seed_from_u64(SEED),
    );
    assert!(matches!(res, Err(Error::InvalidProbability(_))));
  }
}

#[test]
fn test_sketch() {
  let mut l = list(Options::new().with_max_height(4));
  for k in [9, 7, 6, 1, 3] {
    l.insert(k, k);
  }

  let sketch = l.sketch();
  assert_eq!(sketch.levels(), 4);
  assert_eq!(sketch.level(0).copied().collect::<Vec<_>>(), [1, 3, 6, 7, 9]);
  for level in 1..4 {
    let upper: Vec<u32> = sketch.level(level).copied().collect();
    assert_eq!(upper.first(), Some(&1), "minimum spans level {level}");
    let below: Vec<u32> = sketch.level(level - 1).copied().collect();
    assert!(upper.iter().all(|k| below.contains(k)));
  }

  let rendered = format!("{sketch}");
  assert_eq!(rendered.lines().count(), 4);
  assert_eq!(rendered.lines().next(), Some("1 3 6 7 9"));
}

#[test]
fn test_capacity_reserved() {
  let l = list(Options::new().with_capacity(128));
  assert!(l.capacity() >= 128);
}

#[test]
fn test_released_slots_are_reused() {
  let mut l = list(Options::new());
  for k in 0..100 {
    l.insert(k, k);
  }
  for k in 0..50 {
    l.remove(&(k * 2));
  }
  for k in 100..150 {
    l.insert(k, k);
  }
  l.check_invariants();
  assert_eq!(l.entries.len(), 100);
  assert!(
    l.entries.iter().all(|(idx, _)| idx < 100),
    "released entry slots were not reused"
  );
}

#[test]
#[should_panic(expected = "invalid key")]
fn test_stale_node_panics() {
  let mut l = list(Options::new());
  l.insert(1, 1);
  let (id, _) = l.insert(3, 3);
  l.remove(&3);
  l.entry(id);
}
