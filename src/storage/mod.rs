//! File system and database storage
//!
//! This module handles all I/O that is not HTTP:
//! - NDJSON file reading
//! - CSV output with an index column
//! - SQLite table replacement and queries
//! - The append-only progress log

mod csv_table;
mod ndjson;
mod progress;
mod sqlite;

pub use csv_table::CsvTableWriter;
pub use ndjson::NdjsonReader;
pub use progress::{CONSOLIDATION_TIMESTAMP_FORMAT, GDP_TIMESTAMP_FORMAT, ProgressLog};
pub use sqlite::{SqliteTableLoader, connect, query_table, run_query};
pub(crate) use sqlite::quote_ident;
