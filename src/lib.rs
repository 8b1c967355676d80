//! ETL Jobs
//!
//! Two one-shot batch jobs built on a small Extract/Transform/Load framework:
//! a GDP table scraped into CSV and SQLite, and person measurements merged
//! from CSV, JSON Lines and XML into one metric CSV.

pub mod cli;
pub mod client;
pub mod config;
pub mod etl;
pub mod gdp;
pub mod people;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use client::HttpClient;
pub use config::{ConsolidationConfig, GdpConfig};
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use storage::{CsvTableWriter, NdjsonReader, ProgressLog, SqliteTableLoader};
pub use table::{Record, TextTable};
