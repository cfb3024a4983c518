//! Data model for rows and tables

mod frame;
mod row;
mod table;

pub use frame::Frame;
pub use row::Row;
pub use table::Table;
