//! rowrel - Relational algebra over in-memory rows
//!
//! Tabular data is a non-empty [`Table`] of associative [`Row`]s. On top of
//! that model the crate provides filtering, positional zips and scans,
//! grouping, and a build/probe hash join.

pub mod config;
pub mod error;
pub mod model;
pub mod ops;

pub use config::{JoinConfig, JoinOrder};
pub use error::{Error, Result};
pub use model::{Frame, Row, Table};
pub use ops::{group_by, group_table, inner_join, HashJoin};
