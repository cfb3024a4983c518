//! Build/probe hash join
//!
//! The build phase buckets one side by its key value. The probe phase walks
//! the other side and looks each key value up in the buckets. The built
//! index is read-only while probing, so `HashJoin::par_join` runs the probe
//! on the rayon pool.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::config::{JoinConfig, JoinOrder};
use crate::error::{Error, Result};
use crate::model::Row;

/// Rows bucketed by their value at one key; buckets keep source order
pub type Index<'a, K, V> = IndexMap<V, Vec<&'a Row<K, V>>, FxBuildHasher>;

/// Bucket `rows` by their value at `key`
///
/// Fails on the first row without `key`; a partial index is never returned.
pub fn build_index<'a, K, V, I>(key: &K, rows: I) -> Result<Index<'a, K, V>>
where
    K: Hash + Eq + Debug + 'a,
    V: Hash + Eq + Clone + 'a,
    I: IntoIterator<Item = &'a Row<K, V>>,
{
    let mut index: Index<'a, K, V> = IndexMap::default();
    let mut row_count = 0;

    for (row_idx, row) in rows.into_iter().enumerate() {
        let Some(value) = row.get(key) else {
            trace!(row = row_idx, key = ?key, "row missing index key");
            return Err(Error::missing_key(key, row_idx));
        };

        match index.get_mut(value) {
            Some(bucket) => bucket.push(row),
            None => {
                index.insert(value.clone(), vec![row]);
            }
        }
        row_count += 1;
    }

    debug!(rows = row_count, buckets = index.len(), "built hash index");
    Ok(index)
}

/// Rows in `index` whose key equals `value`; empty when nothing matches
pub fn matching_rows<'i, 'a, K, V>(index: &'i Index<'a, K, V>, value: &V) -> &'i [&'a Row<K, V>]
where
    V: Hash + Eq,
{
    index.get(value).map(Vec::as_slice).unwrap_or(&[])
}

/// Hash join engine with configurable output ordering
#[derive(Debug, Clone, Default)]
pub struct HashJoin {
    config: JoinConfig,
}

impl HashJoin {
    /// Create a join engine with configuration
    pub fn new(config: JoinConfig) -> Self {
        Self { config }
    }

    /// Configuration this engine joins with
    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Inner join `left` and `right` on `left_key == right_key`
    ///
    /// Each match yields `left_row.union(right_row)`, so the left row's value
    /// wins on any shared column. Left rows without a match contribute
    /// nothing. Any row, on either side, that lacks its join key fails the
    /// whole join.
    pub fn join<'l, 'r, K, V, L, R>(
        &self,
        left_key: &K,
        right_key: &K,
        left: L,
        right: R,
    ) -> Result<Vec<Row<K, V>>>
    where
        K: Hash + Eq + Clone + Debug + 'l + 'r,
        V: Hash + Eq + Clone + 'l + 'r,
        L: IntoIterator<Item = &'l Row<K, V>>,
        R: IntoIterator<Item = &'r Row<K, V>>,
    {
        let index = build_index(right_key, right)?;
        let batches = left
            .into_iter()
            .enumerate()
            .map(|(row_idx, row)| probe(left_key, row_idx, row, &index))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.assemble(batches, index.len(), false))
    }

    /// Same as [`HashJoin::join`], probing left rows on the rayon thread pool
    ///
    /// Output order matches the sequential join. When several left rows lack
    /// `left_key`, the reported row is one of them, not necessarily the first.
    pub fn par_join<'l, 'r, K, V, L, R>(
        &self,
        left_key: &K,
        right_key: &K,
        left: L,
        right: R,
    ) -> Result<Vec<Row<K, V>>>
    where
        K: Hash + Eq + Clone + Debug + Send + Sync + 'l + 'r,
        V: Hash + Eq + Clone + Send + Sync + 'l + 'r,
        L: IntoIterator<Item = &'l Row<K, V>>,
        R: IntoIterator<Item = &'r Row<K, V>>,
    {
        let index = build_index(right_key, right)?;
        let left: Vec<&Row<K, V>> = left.into_iter().collect();
        let batches = left
            .par_iter()
            .enumerate()
            .map(|(row_idx, row)| probe(left_key, row_idx, row, &index))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.assemble(batches, index.len(), true))
    }

    /// Flatten per-left-row batches in the configured order
    fn assemble<K, V>(
        &self,
        batches: Vec<Vec<Row<K, V>>>,
        buckets: usize,
        parallel: bool,
    ) -> Vec<Row<K, V>> {
        let left_rows = batches.len();
        let joined: Vec<Row<K, V>> = match self.config.order {
            JoinOrder::Natural => batches.into_iter().flatten().collect(),
            JoinOrder::ReversedLeft => batches.into_iter().rev().flatten().collect(),
        };

        debug!(
            left_rows,
            buckets,
            output_rows = joined.len(),
            order = ?self.config.order,
            parallel,
            "hash join complete"
        );
        joined
    }
}

/// Join one left row against the index
fn probe<K, V>(
    left_key: &K,
    row_idx: usize,
    row: &Row<K, V>,
    index: &Index<'_, K, V>,
) -> Result<Vec<Row<K, V>>>
where
    K: Hash + Eq + Clone + Debug,
    V: Hash + Eq + Clone,
{
    let value = row
        .get(left_key)
        .ok_or_else(|| Error::missing_key(left_key, row_idx))?;

    Ok(matching_rows(index, value)
        .iter()
        .map(|matched| row.union(matched))
        .collect())
}

/// Inner join with the default configuration
pub fn inner_join<'l, 'r, K, V, L, R>(
    left_key: &K,
    right_key: &K,
    left: L,
    right: R,
) -> Result<Vec<Row<K, V>>>
where
    K: Hash + Eq + Clone + Debug + 'l + 'r,
    V: Hash + Eq + Clone + 'l + 'r,
    L: IntoIterator<Item = &'l Row<K, V>>,
    R: IntoIterator<Item = &'r Row<K, V>>,
{
    HashJoin::default().join(left_key, right_key, left, right)
}
