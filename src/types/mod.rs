pub mod field;
mod schema;

pub use schema::{Column, ColumnBuilder, DataType, Table};
