//! Row-wise table operators: filtering, positional zips and scans

use std::hash::Hash;

use tracing::trace;

use crate::model::{Row, Table};

impl<R> Table<R> {
    /// Keep rows satisfying `predicate`, in order
    ///
    /// Returns `None` rather than an empty table when nothing survives.
    pub fn filter<P>(&self, mut predicate: P) -> Option<Table<R>>
    where
        R: Clone,
        P: FnMut(&R) -> bool,
    {
        let kept: Vec<R> = self.iter().filter(|row| predicate(*row)).cloned().collect();
        if kept.is_empty() {
            trace!(input_rows = self.len(), "filter kept no rows");
        }
        Table::try_from_rows(kept)
    }

    /// Pair rows positionally; the result is as long as the shorter table
    pub fn zip_with<S, T, F>(&self, other: &Table<S>, mut combine: F) -> Table<T>
    where
        F: FnMut(&R, &S) -> T,
    {
        let rows = self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| combine(a, b))
            .collect();
        Table::from_nonempty(rows)
    }

    /// Left scan: `[seed, f(seed, r0), f(f(seed, r0), r1), ...]`
    pub fn scan_left<T, F>(&self, seed: T, mut f: F) -> Table<T>
    where
        F: FnMut(&T, &R) -> T,
    {
        let mut acc = Table::singleton(seed);
        for row in self {
            let next = f(acc.last(), row);
            acc.push(next);
        }
        acc
    }

    /// Right scan: `[..., f(r(n-2), f(r(n-1), seed)), f(r(n-1), seed), seed]`
    pub fn scan_right<T, F>(&self, seed: T, mut f: F) -> Table<T>
    where
        F: FnMut(&R, &T) -> T,
    {
        let mut acc = vec![seed];
        for row in self.iter().rev() {
            let next = f(row, &acc[acc.len() - 1]);
            acc.push(next);
        }
        acc.reverse();
        Table::from_nonempty(acc)
    }
}

impl<K, V> Table<Row<K, V>>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Keep rows whose value at `key` satisfies `predicate`; rows without `key` are dropped
    pub fn filter_by_elem<P>(&self, key: &K, mut predicate: P) -> Option<Self>
    where
        P: FnMut(&V) -> bool,
    {
        self.filter(|row| row.matches(key, &mut predicate))
    }

    /// Merge row i of `self` with row i of `other`
    ///
    /// This is positional, not a relational join.
    pub fn union_rows_with<F>(&self, other: &Self, mut combine: F) -> Self
    where
        F: FnMut(&V, &V) -> V,
    {
        self.zip_with(other, |a, b| a.union_with(b, &mut combine))
    }

    /// Add a column computed from each row
    pub fn derive<F>(&self, key: K, mut compute: F) -> Self
    where
        F: FnMut(&Row<K, V>) -> V,
    {
        self.map(|row| row.insert_derived(key.clone(), &mut compute))
    }

    /// Keep only the listed columns in every row
    pub fn project(&self, keys: &[K]) -> Self {
        self.map(|row| row.project(keys))
    }
}
