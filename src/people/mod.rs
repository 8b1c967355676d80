//! Person measurements gathered from CSV, JSON Lines and XML files
//!
//! The consolidation job merges every source file in a data directory into
//! one `{name, height, weight}` table, converts it to metric and writes CSV.

mod extractor;
mod readers;

pub use extractor::{DataDirExtractor, SourceFormat};
pub use readers::{CsvPeopleReader, JsonLinesPeopleReader, XmlPeopleReader};

use crate::table::{ColumnType, Field, Record};
use serde::Deserialize;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TARGET_PATH: &str = "data/transformed_data.csv";
pub const DEFAULT_LOG_PATH: &str = "log_file.txt";

/// One person's measurements (inches/pounds before transform, meters/kilograms after)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: f64,
    pub weight: f64,
}

impl Record for Person {
    const COLUMNS: &'static [(&'static str, ColumnType)] = &[
        ("name", ColumnType::Text),
        ("height", ColumnType::Real),
        ("weight", ColumnType::Real),
    ];

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Text(self.name.clone()),
            Field::Real(self.height),
            Field::Real(self.weight),
        ]
    }
}
