// File I/O operations: report ingestion and result export

pub mod csv;
pub mod table;
pub mod xlsx;

pub use table::{load_table, table_from_grid};
