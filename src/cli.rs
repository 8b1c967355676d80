//! CLI helper functions
//!
//! One function per job. Each runs its stages once, in order, and writes a
//! marker to the job's progress log between stages.

use crate::{
    config::{ConsolidationConfig, GdpConfig},
    etl::{Extractor, Loader, Pipeline, Transformer},
    gdp::{CountryGdp, GdpTableExtractor, threshold_query},
    people::{DataDirExtractor, Person},
    storage::{self, CsvTableWriter, ProgressLog, SqliteTableLoader},
    table::TextTable,
    transform::{GdpToBillions, ImperialToMetric},
};
use eyre::{Context, Result};
use std::path::Path;

/// What a GDP run produced
#[derive(Debug, Clone)]
pub struct GdpRunSummary {
    /// The converted table, as written to CSV and the database
    pub countries: Vec<CountryGdp>,
    /// Rows returned by the threshold query
    pub query_result: TextTable,
}

/// Scrape the GDP table and store it as CSV and SQLite, then run the threshold query
///
/// Pipeline: GdpTableExtractor → GdpToBillions → CsvTableWriter + SqliteTableLoader → query
pub async fn run_gdp_job(config: &GdpConfig) -> Result<GdpRunSummary> {
    ensure_parent_dir(&config.log_path)?;
    let progress = ProgressLog::gdp(&config.log_path);

    progress.log_progress("Preliminaries complete. Initiating ETL process")?;
    let extractor = GdpTableExtractor::new(config.source.clone(), config.locator.clone());
    let rows = extractor.extract().await?;

    progress.log_progress("Data extraction complete. Initiating Transformation process")?;
    let countries = GdpToBillions.transform_many(rows)?;

    progress.log_progress("Data transformation complete. Initiating loading process")?;
    ensure_parent_dir(&config.csv_path)?;
    let csv = CsvTableWriter::new(&config.csv_path);
    let count = csv.load(&countries).await?;
    log::info!("Wrote {} rows to {}", count, config.csv_path.display());

    progress.log_progress("Data saved to CSV file")?;
    ensure_parent_dir(&config.db_path)?;
    let pool = storage::connect(&config.db_path).await?;

    progress.log_progress("SQL Connection initiated.")?;
    let db = SqliteTableLoader::new(pool.clone(), config.table_name.as_str());
    let count = db.load(&countries).await?;
    log::info!("Loaded {} rows into table {}", count, db.table());

    progress.log_progress("Data loaded to Database as table. Running the query")?;
    let query = threshold_query(&config.table_name, config.min_billions);
    let query_result = storage::run_query(&pool, &query).await?;

    progress.log_progress("Process Complete.")?;
    pool.close().await;

    Ok(GdpRunSummary {
        countries,
        query_result,
    })
}

/// Merge CSV, JSON and XML person files into one metric CSV
///
/// Pipeline: DataDirExtractor → ImperialToMetric → CsvTableWriter
pub async fn run_consolidation_job(config: &ConsolidationConfig) -> Result<Vec<Person>> {
    ensure_parent_dir(&config.log_path)?;
    ensure_parent_dir(&config.target_path)?;

    let extractor = DataDirExtractor::new(&config.data_dir).excluding(&config.target_path);
    let pipeline = Pipeline::new(
        extractor,
        ImperialToMetric,
        CsvTableWriter::new(&config.target_path),
    )
    .with_progress(ProgressLog::consolidation(&config.log_path))
    .with_inspect(|people: &[Person]| {
        println!("Transformed Data");
        println!("{}", TextTable::from_records(people));
    });

    pipeline.run().await
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_parent_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("out.csv");

        ensure_parent_dir(&nested).unwrap();
        assert!(temp.path().join("a").join("b").is_dir());

        ensure_parent_dir(Path::new("bare.csv")).unwrap();
    }
}
