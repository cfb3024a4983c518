//! Columnar frame with a column-key index

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::row::Row;
use super::table::Table;
use crate::error::{Error, Result};

/// Column-oriented storage: an ordered key list, a key-to-position map and row vectors
#[derive(Debug, Clone)]
pub struct Frame<K, V> {
    /// Column keys in position order
    columns: Vec<K>,
    /// Index from column key to position
    column_index: IndexMap<K, usize, FxBuildHasher>,
    /// Cell values per row, in column order
    rows: Vec<Vec<V>>,
}

impl<K, V> Frame<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a frame; a repeated column key keeps its first position
    pub fn new(columns: Vec<K>, rows: Vec<Vec<V>>) -> Self {
        let mut column_index = IndexMap::with_capacity_and_hasher(columns.len(), FxBuildHasher);
        for (idx, key) in columns.iter().enumerate() {
            column_index.entry(key.clone()).or_insert(idx);
        }
        Self {
            columns,
            column_index,
            rows,
        }
    }

    /// Build a frame from a table, taking the columns from the head row
    ///
    /// Every row must hold every column of the head row.
    pub fn from_table(table: &Table<Row<K, V>>) -> Result<Self>
    where
        K: Debug,
        V: Clone,
    {
        let columns: Vec<K> = table.head().keys().cloned().collect();

        let mut rows = Vec::with_capacity(table.len());
        for (row_idx, row) in table.iter().enumerate() {
            let cells = columns
                .iter()
                .map(|key| {
                    row.get(key)
                        .cloned()
                        .ok_or_else(|| Error::missing_key(key, row_idx))
                })
                .collect::<Result<Vec<V>>>()?;
            rows.push(cells);
        }

        Ok(Self::new(columns, rows))
    }

    /// Get column position by key
    pub fn column_index(&self, key: &K) -> Option<usize> {
        self.column_index.get(key).copied()
    }

    /// Column keys in position order
    pub fn columns(&self) -> &[K] {
        &self.columns
    }

    /// Row vectors in order
    pub fn rows(&self) -> &[Vec<V>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Keep the rows whose cell in column `key` satisfies `predicate`
    ///
    /// An unknown column, or any row too short to reach it, fails the whole filter.
    pub fn filter_by_key<P>(&self, key: &K, mut predicate: P) -> Result<Self>
    where
        K: Debug,
        V: Clone,
        P: FnMut(&V) -> bool,
    {
        let index = self
            .column_index(key)
            .ok_or_else(|| Error::UnknownColumn(format!("{:?}", key)))?;

        let mut kept = Vec::new();
        for (row_idx, cells) in self.rows.iter().enumerate() {
            let cell = cells.get(index).ok_or(Error::RaggedRow {
                row: row_idx,
                len: cells.len(),
                index,
            })?;
            if predicate(cell) {
                kept.push(cells.clone());
            }
        }

        Ok(Self {
            columns: self.columns.clone(),
            column_index: self.column_index.clone(),
            rows: kept,
        })
    }

    /// Convert back to associative rows; cells past the column list are dropped
    pub fn to_rows(&self) -> Vec<Row<K, V>>
    where
        V: Clone,
    {
        self.rows
            .iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
