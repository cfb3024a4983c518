//! Relational operators over rows and tables

pub mod group;
pub mod hash_join;
mod structural;

pub use group::{group_by, group_table, TableGroups};
pub use hash_join::{build_index, inner_join, matching_rows, HashJoin, Index};
