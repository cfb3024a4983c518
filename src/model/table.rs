//! Non-empty ordered sequences of rows

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// A non-empty ordered sequence of rows
///
/// Every constructor rejects empty input, so `head` is always defined.
/// Row order is significant: it is what `head`, the scans and `zip_with`
/// observe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<R>", bound(deserialize = "R: Deserialize<'de>"))]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Table<R> {
    /// Create a table from a first row and the rest
    pub fn new(head: R, tail: impl IntoIterator<Item = R>) -> Self {
        let mut rows = vec![head];
        rows.extend(tail);
        Self { rows }
    }

    /// Create a single-row table
    pub fn singleton(row: R) -> Self {
        Self { rows: vec![row] }
    }

    /// Create a table, failing on empty input
    pub fn from_rows(rows: Vec<R>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { rows })
    }

    /// Create a table, returning `None` on empty input
    pub fn try_from_rows(rows: Vec<R>) -> Option<Self> {
        Self::from_rows(rows).ok()
    }

    /// First row
    pub fn head(&self) -> &R {
        &self.rows[0]
    }

    /// Last row
    pub fn last(&self) -> &R {
        &self.rows[self.rows.len() - 1]
    }

    /// Number of rows; never zero
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false, kept for API symmetry with other collections
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row at `index`, if any
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    /// All rows in order
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Iterate rows in order
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Unwrap into the underlying rows
    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Apply `f` to every row, preserving order
    pub fn map<T, F>(&self, f: F) -> Table<T>
    where
        F: FnMut(&R) -> T,
    {
        Table {
            rows: self.rows.iter().map(f).collect(),
        }
    }

    pub(crate) fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    /// Wrap rows already known to be non-empty
    pub(crate) fn from_nonempty(rows: Vec<R>) -> Self {
        debug_assert!(!rows.is_empty());
        Self { rows }
    }
}

impl<R> TryFrom<Vec<R>> for Table<R> {
    type Error = Error;

    fn try_from(rows: Vec<R>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl<R> From<Table<R>> for Vec<R> {
    fn from(table: Table<R>) -> Self {
        table.rows
    }
}

impl<R: Serialize> Serialize for Table<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl<R> IntoIterator for Table<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
