//! Data model for delimited text tables

mod delimiter;
mod row;
mod schema;
mod table;

pub use delimiter::Delimiter;
pub use row::Row;
pub use schema::{Column, ColumnType, StorageType, BOUNDED_TEXT_LIMIT};
pub use table::Table;
