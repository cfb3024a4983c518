//! Associative rows

use std::hash::Hash;

use indexmap::map::{Iter, Keys, Values};
use indexmap::{Equivalent, IndexMap};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

/// A mapping from column key to value
///
/// Rows are never edited in place: every operation that changes content
/// returns a new row. Keys iterate in first-insertion order; equality
/// ignores order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: Deserialize<'de> + Hash + Eq, V: Deserialize<'de>"
))]
pub struct Row<K, V> {
    cells: IndexMap<K, V, FxBuildHasher>,
}

impl<K, V> Default for Row<K, V> {
    fn default() -> Self {
        Self {
            cells: IndexMap::default(),
        }
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for Row<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Row<K, V> {}

impl<K, V> Row<K, V> {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no columns
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Column keys in first-insertion order
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.cells.keys()
    }

    /// Values in key order
    pub fn values(&self) -> Values<'_, K, V> {
        self.cells.values()
    }

    /// Key/value pairs in first-insertion order
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.cells.iter()
    }
}

impl<K: Hash + Eq, V> Row<K, V> {
    /// Build a row from key/value pairs; later duplicates overwrite earlier ones
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Look up a value by key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.cells.get(key)
    }

    /// Check if the row has a value for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.cells.contains_key(key)
    }

    /// Look up a value, falling back to `default` when the key is absent
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        Q: ?Sized + Hash + Equivalent<K>,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Check a predicate against one column; an absent key never matches
    pub fn matches<Q, P>(&self, key: &Q, predicate: P) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
        P: FnOnce(&V) -> bool,
    {
        self.get(key).is_some_and(predicate)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Row<K, V> {
    /// Return a copy of this row with `key` set to `value`
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut cells = self.cells.clone();
        cells.insert(key, value);
        Self { cells }
    }

    /// Return a copy of this row with `key` set to a value computed from the row
    ///
    /// `derive` sees the row as it was before the insert and runs exactly once.
    pub fn insert_derived<F>(&self, key: K, derive: F) -> Self
    where
        F: FnOnce(&Self) -> V,
    {
        let value = derive(self);
        self.insert(key, value)
    }

    /// Left-biased union: on a shared key the value from `self` is kept
    pub fn union(&self, other: &Self) -> Self {
        let mut cells = self.cells.clone();
        for (key, value) in &other.cells {
            if !cells.contains_key(key) {
                cells.insert(key.clone(), value.clone());
            }
        }
        Self { cells }
    }

    /// Union where shared keys take `combine(self_value, other_value)`
    pub fn union_with<F>(&self, other: &Self, mut combine: F) -> Self
    where
        F: FnMut(&V, &V) -> V,
    {
        let mut cells = self.cells.clone();
        for (key, value) in &other.cells {
            match cells.get_mut(key) {
                Some(existing) => *existing = combine(existing, value),
                None => {
                    cells.insert(key.clone(), value.clone());
                }
            }
        }
        Self { cells }
    }

    /// Keep only the listed keys that are present, in the order given
    pub fn project(&self, keys: &[K]) -> Self {
        keys.iter()
            .filter_map(|key| self.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Row<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Row<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&'static str, i64)]) -> Row<&'static str, i64> {
        Row::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_from_pairs_last_wins() {
        let r = row(&[("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get(&"a"), Some(&3));
    }

    #[test]
    fn test_empty_row() {
        let r: Row<&str, i64> = Row::new();
        assert!(r.is_empty());
        assert_eq!(r.get(&"a"), None);
    }

    #[test]
    fn test_get_or() {
        let r = row(&[("a", 1)]);
        assert_eq!(r.get_or(&"a", 0), 1);
        assert_eq!(r.get_or(&"z", 0), 0);
    }

    #[test]
    fn test_insert_leaves_original() {
        let r = row(&[("a", 1)]);
        let r2 = r.insert("a", 5).insert("b", 6);
        assert_eq!(r.get(&"a"), Some(&1));
        assert!(!r.contains_key(&"b"));
        assert_eq!(r2, row(&[("a", 5), ("b", 6)]));
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(row(&[("a", 1), ("b", 2)]), row(&[("b", 2), ("a", 1)]));
        assert_ne!(row(&[("a", 1)]), row(&[("a", 2)]));
    }

    #[test]
    fn test_union_left_biased() {
        let left = row(&[("k", 1), ("a", 10)]);
        let right = row(&[("k", 2), ("b", 20)]);
        let merged = left.union(&right);
        assert_eq!(merged.get(&"k"), left.get(&"k"));
        assert_eq!(merged, row(&[("k", 1), ("a", 10), ("b", 20)]));
    }

    #[test]
    fn test_union_with_combines_collisions() {
        let left = row(&[("k", 1), ("a", 10)]);
        let right = row(&[("k", 2), ("b", 20)]);
        let merged = left.union_with(&right, |l, r| l * 100 + r);
        assert_eq!(merged.get(&"k"), Some(&102));
        assert_eq!(merged.get(&"b"), Some(&20));
    }

    #[test]
    fn test_union_with_disjoint_equals_union() {
        let left = row(&[("a", 1)]);
        let right = row(&[("b", 2)]);
        let combined = left.union_with(&right, |_, _| unreachable!());
        assert_eq!(combined, left.union(&right));
    }

    #[test]
    fn test_insert_derived_calls_once() {
        let r = row(&[("price", 3), ("qty", 4)]);
        let mut calls = 0;
        let r2 = r.insert_derived("total", |row| {
            calls += 1;
            row.get_or(&"price", 0) * row.get_or(&"qty", 0)
        });
        assert_eq!(calls, 1);
        assert_eq!(r2.get(&"total"), Some(&12));
        assert!(!r.contains_key(&"total"));
    }

    #[test]
    fn test_matches_absent_is_false() {
        let r = row(&[("a", 1)]);
        assert!(r.matches(&"a", |v| *v == 1));
        assert!(!r.matches(&"a", |v| *v == 2));
        assert!(!r.matches(&"missing", |_| true));
    }

    #[test]
    fn test_project() {
        let r = row(&[("a", 1), ("b", 2), ("c", 3)]);
        let p = r.project(&["c", "a", "zzz"]);
        assert_eq!(p.keys().copied().collect::<Vec<_>>(), vec!["c", "a"]);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Cell {
        Int(i64),
        Text(String),
        Day(String),
        Flag(bool),
        Missing,
    }

    #[test]
    fn test_serde_keeps_value_variants() {
        let r: Row<String, Cell> = Row::from_pairs([
            ("n".to_string(), Cell::Int(7)),
            ("name".to_string(), Cell::Text("2024-01-31".to_string())),
            ("day".to_string(), Cell::Day("2024-01-31".to_string())),
            ("ok".to_string(), Cell::Flag(true)),
            ("gap".to_string(), Cell::Missing),
        ]);
        let json = serde_json::to_string(&r).unwrap();
        let back: Row<String, Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.get("day"), Some(&Cell::Day("2024-01-31".to_string())));
    }

    #[test]
    fn test_serde_as_map() {
        let r = row(&[("a", 1), ("b", 2)]);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
        let back: Row<String, i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("b"), Some(&2));
    }
}
