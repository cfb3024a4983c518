//! Grouping rows by a key column

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::hash_join::{build_index, Index};
use crate::error::Result;
use crate::model::{Row, Table};

/// Groups whose buckets are non-empty tables
pub type TableGroups<'a, K, V> = IndexMap<V, Table<&'a Row<K, V>>, FxBuildHasher>;

/// Group rows by their value at `key`
///
/// Same contract as [`build_index`]: a row without `key` fails the whole call.
/// Groups iterate in first-encounter order.
pub fn group_by<'a, K, V, I>(key: &K, rows: I) -> Result<Index<'a, K, V>>
where
    K: Hash + Eq + Debug + 'a,
    V: Hash + Eq + Clone + 'a,
    I: IntoIterator<Item = &'a Row<K, V>>,
{
    build_index(key, rows)
}

/// Group rows by their value at `key`, wrapping each bucket as a table
pub fn group_table<'a, K, V, I>(key: &K, rows: I) -> Result<TableGroups<'a, K, V>>
where
    K: Hash + Eq + Debug + 'a,
    V: Hash + Eq + Clone + 'a,
    I: IntoIterator<Item = &'a Row<K, V>>,
{
    // a bucket only exists once a row lands in it
    Ok(group_by(key, rows)?
        .into_iter()
        .map(|(value, bucket)| (value, Table::from_nonempty(bucket)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Field {
        Region(&'static str),
        Amount(i64),
    }

    type TestRow = Row<&'static str, Field>;

    fn sale(region: &'static str, amount: i64) -> TestRow {
        Row::from_pairs([("region", Field::Region(region)), ("amount", Field::Amount(amount))])
    }

    fn sales() -> Table<TestRow> {
        Table::new(
            sale("north", 10),
            [sale("south", 5), sale("north", 7), sale("east", 1), sale("south", 2)],
        )
    }

    fn amount(row: &TestRow) -> Option<i64> {
        match row.get(&"amount") {
            Some(Field::Amount(a)) => Some(*a),
            _ => None,
        }
    }

    fn amounts(rows: &[&TestRow]) -> Vec<i64> {
        rows.iter().filter_map(|r| amount(r)).collect()
    }

    #[test]
    fn test_group_by_buckets() {
        let table = sales();
        let groups = group_by(&"region", &table).unwrap();

        let regions: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(
            regions,
            vec![Field::Region("north"), Field::Region("south"), Field::Region("east")]
        );
        assert_eq!(amounts(&groups[&Field::Region("north")]), vec![10, 7]);
        assert_eq!(amounts(&groups[&Field::Region("south")]), vec![5, 2]);
    }

    #[test]
    fn test_group_by_partitions_input() {
        let table = sales();
        let groups = group_by(&"region", &table).unwrap();

        let mut grouped: Vec<i64> = groups.values().flat_map(|b| amounts(b)).collect();
        let mut input: Vec<i64> = table.iter().filter_map(amount).collect();
        grouped.sort_unstable();
        input.sort_unstable();
        assert_eq!(grouped, input);
    }

    #[test]
    fn test_group_by_missing_key() {
        let rows = vec![sale("north", 1), Row::from_pairs([("amount", Field::Amount(3))])];
        let err = group_by(&"region", &rows).unwrap_err();
        assert!(matches!(err, Error::MissingKey { row: 1, .. }));
        assert!(group_table(&"region", &rows).is_err());
    }

    #[test]
    fn test_group_table_buckets_are_tables() {
        let table = sales();
        let groups = group_table(&"region", &table).unwrap();
        assert_eq!(groups.len(), 3);

        let north = &groups[&Field::Region("north")];
        assert_eq!(north.len(), 2);
        assert_eq!(north.head().get(&"amount"), Some(&Field::Amount(10)));

        let totals: Vec<i64> = groups
            .values()
            .map(|bucket| bucket.iter().filter_map(|r| amount(r)).sum())
            .collect();
        assert_eq!(totals, vec![17, 7, 1]);
    }

    #[test]
    fn test_group_shares_rows() {
        let table = sales();
        let groups = group_by(&"region", &table).unwrap();
        let first = groups[&Field::Region("north")][0];
        assert!(std::ptr::eq(first, table.head()));
    }
}
