//! Job configuration
//!
//! Every path and URL a job touches is carried in these structs instead of
//! process-wide constants. Defaults reproduce the historical fixed paths;
//! environment variables (optionally sourced from a dotenv file) override the
//! defaults, and CLI flags override both.

use crate::gdp::{self, HtmlSource, TableLocator};
use crate::people;
use eyre::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Settings for the GDP scrape job
#[derive(Debug, Clone)]
pub struct GdpConfig {
    pub source: HtmlSource,
    pub locator: TableLocator,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    pub min_billions: f64,
}

impl GdpConfig {
    /// The historical fixed paths and the archived source page
    pub fn defaults() -> Result<Self> {
        let url = Url::parse(gdp::DEFAULT_SOURCE_URL).context("Invalid default source URL")?;

        Ok(Self {
            source: HtmlSource::Url(url),
            locator: TableLocator::default(),
            csv_path: PathBuf::from(gdp::DEFAULT_CSV_PATH),
            db_path: PathBuf::from(gdp::DEFAULT_DB_PATH),
            table_name: gdp::DEFAULT_TABLE_NAME.to_string(),
            log_path: PathBuf::from(gdp::DEFAULT_LOG_PATH),
            min_billions: gdp::DEFAULT_MIN_BILLIONS,
        })
    }

    /// Defaults overridden by environment variables
    ///
    /// Recognized variables:
    /// - GDP_SOURCE_URL: page to scrape
    /// - GDP_HTML_FILE: saved copy of the page (takes precedence over GDP_SOURCE_URL)
    /// - GDP_HEADER_TEXT: pick the table by header text instead of position
    /// - GDP_CSV_PATH, GDP_DB_PATH, GDP_TABLE_NAME, GDP_LOG_PATH: outputs
    /// - GDP_MIN_BILLIONS: threshold for the final query
    pub fn from_env() -> Result<Self> {
        let mut config = Self::defaults()?;

        if let Some(url) = env_var("GDP_SOURCE_URL") {
            let url = Url::parse(&url).with_context(|| format!("Invalid GDP_SOURCE_URL: {}", url))?;
            config.source = HtmlSource::Url(url);
        }
        if let Some(path) = env_var("GDP_HTML_FILE") {
            config.source = HtmlSource::File(PathBuf::from(path));
        }
        if let Some(text) = env_var("GDP_HEADER_TEXT") {
            config.locator = TableLocator::HeaderText(text);
        }
        if let Some(path) = env_var("GDP_CSV_PATH") {
            config.csv_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("GDP_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(name) = env_var("GDP_TABLE_NAME") {
            config.table_name = name;
        }
        if let Some(path) = env_var("GDP_LOG_PATH") {
            config.log_path = PathBuf::from(path);
        }
        if let Some(value) = env_var("GDP_MIN_BILLIONS") {
            config.min_billions = value
                .parse()
                .with_context(|| format!("Invalid GDP_MIN_BILLIONS: {}", value))?;
        }

        Ok(config)
    }
}

/// Settings for the multi-format consolidation job
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidationConfig {
    pub data_dir: PathBuf,
    pub target_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(people::DEFAULT_DATA_DIR),
            target_path: PathBuf::from(people::DEFAULT_TARGET_PATH),
            log_path: PathBuf::from(people::DEFAULT_LOG_PATH),
        }
    }
}

impl ConsolidationConfig {
    /// Defaults overridden by CONSOLIDATE_DATA_DIR, CONSOLIDATE_TARGET_PATH
    /// and CONSOLIDATE_LOG_PATH
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = env_var("CONSOLIDATE_DATA_DIR") {
            config.data_dir = PathBuf::from(path);
        }
        if let Some(path) = env_var("CONSOLIDATE_TARGET_PATH") {
            config.target_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("CONSOLIDATE_LOG_PATH") {
            config.log_path = PathBuf::from(path);
        }

        config
    }
}

/// A set, non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
