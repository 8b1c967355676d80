//! CSV output with a leading row-index column

use crate::etl::Loader;
use crate::table::Record;
use eyre::{Context, Result};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Writes a table to CSV, overwriting the file
///
/// The header starts with an empty column name and every row starts with its
/// 0-based position, e.g.
///
/// ```text
/// ,Country,GDP_USD_billions
/// 0,United States,26854.6
/// ```
pub struct CsvTableWriter<R> {
    path: PathBuf,
    _record: PhantomData<fn(&R)>,
}

impl<R: Record> CsvTableWriter<R> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write header and rows, returning the number of rows written
    pub fn write(&self, records: &[R]) -> Result<usize> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create CSV file: {}", self.path.display()))?;

        let mut header = vec![""];
        header.extend(R::column_names());
        writer.write_record(&header)?;

        for (index, record) in records.iter().enumerate() {
            let mut row = vec![index.to_string()];
            row.extend(record.values());
            writer.write_record(&row)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write CSV file: {}", self.path.display()))?;
        log::debug!("Wrote {} rows to {}", records.len(), self.path.display());
        Ok(records.len())
    }
}

impl<R: Record + Send + Sync> Loader for CsvTableWriter<R> {
    type Item = R;

    async fn load(&self, items: &[Self::Item]) -> Result<usize> {
        self.write(items)
    }
}
