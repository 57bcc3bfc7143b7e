// src/process/mod.rs
//! Turning a report response body into a CSV file.

pub mod cleanup;
pub mod table;
pub mod write;

pub use cleanup::clean_cell;
pub use table::{decode_body, extract_table, TableRow};
pub use write::write_rows;
