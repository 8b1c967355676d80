//! Country GDP table: scraped rows and their converted form
//!
//! The job reads the nominal-GDP table from an archived Wikipedia page,
//! converts USD millions to USD billions, and stores the result as CSV and as
//! a SQLite table.

mod extractor;
mod markup;

pub use extractor::{GdpTableExtractor, HtmlSource, TableLocator, parse_gdp_table};

use crate::storage::quote_ident;
use crate::table::{ColumnType, Field, Record};

/// Archived snapshot of the Wikipedia list of countries by nominal GDP
pub const DEFAULT_SOURCE_URL: &str = "https://web.archive.org/web/20230902185326/https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";
pub const DEFAULT_CSV_PATH: &str = "data/Countries_by_GDP.csv";
pub const DEFAULT_DB_PATH: &str = "World_Economies.db";
pub const DEFAULT_TABLE_NAME: &str = "Countries_by_GDP";
pub const DEFAULT_LOG_PATH: &str = "data/etl_project_log.txt";
pub const DEFAULT_MIN_BILLIONS: f64 = 100.0;

/// Position of the GDP table among the page's `tbody` elements
pub const DEFAULT_TABLE_POSITION: usize = 2;

/// A country row as scraped, GDP still in the page's formatting
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRow {
    pub country: String,
    pub gdp_usd_millions: String,
}

impl Record for GdpRow {
    const COLUMNS: &'static [(&'static str, ColumnType)] = &[
        ("Country", ColumnType::Text),
        ("GDP_USD_millions", ColumnType::Text),
    ];

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Text(self.country.clone()),
            Field::Text(self.gdp_usd_millions.clone()),
        ]
    }
}

/// A country with its GDP in USD billions, rounded to 2 decimals
#[derive(Debug, Clone, PartialEq)]
pub struct CountryGdp {
    pub country: String,
    pub gdp_usd_billions: f64,
}

impl Record for CountryGdp {
    const COLUMNS: &'static [(&'static str, ColumnType)] = &[
        ("Country", ColumnType::Text),
        ("GDP_USD_billions", ColumnType::Real),
    ];

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::Text(self.country.clone()),
            Field::Real(self.gdp_usd_billions),
        ]
    }
}

/// The query run after loading: every country at or above `min_billions`
///
/// The table name is quoted, so any name the loader accepts can be queried.
pub fn threshold_query(table_name: &str, min_billions: f64) -> String {
    format!(
        "SELECT * from {} WHERE GDP_USD_billions >= {}",
        quote_ident(table_name),
        min_billions
    )
}
