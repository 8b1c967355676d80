//! Data directory extractor

use super::{CsvPeopleReader, JsonLinesPeopleReader, Person, XmlPeopleReader};
use crate::etl::Extractor;
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Supported source file formats, in processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceFormat {
    Csv,
    Json,
    Xml,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [SourceFormat::Csv, SourceFormat::Json, SourceFormat::Xml];

    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
            SourceFormat::Xml => "xml",
        }
    }

    /// Read one file of this format
    pub fn read(self, path: &Path) -> Result<Vec<Person>> {
        match self {
            SourceFormat::Csv => CsvPeopleReader::new(path).read(),
            SourceFormat::Json => JsonLinesPeopleReader::new(path).read(),
            SourceFormat::Xml => XmlPeopleReader::new(path).read(),
        }
    }
}

/// Merges every CSV, JSON and XML file in a directory into one table
///
/// Files are read in format order (all CSV, then JSON, then XML) and sorted
/// by path within each format, so the output order does not depend on the
/// platform's directory listing. Subdirectories are not searched.
pub struct DataDirExtractor {
    dir: PathBuf,
    exclude: Vec<PathBuf>,
}

impl DataDirExtractor {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            exclude: Vec::new(),
        }
    }

    /// Skip a file, e.g. the job's own output when it lives in the data directory
    pub fn excluding(mut self, path: impl AsRef<Path>) -> Self {
        self.exclude.push(path.as_ref().to_path_buf());
        self
    }

    /// List the files to read, in processing order
    pub fn discover(&self) -> Result<Vec<(SourceFormat, PathBuf)>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list data directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || self.is_excluded(&path) {
                continue;
            }

            let extension = path.extension().and_then(|s| s.to_str());
            if let Some(format) = SourceFormat::ALL
                .into_iter()
                .find(|format| Some(format.extension()) == extension)
            {
                files.push((format, path));
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read and concatenate every discovered file
    pub fn read_all(&self) -> Result<Vec<Person>> {
        let mut people = Vec::new();

        for (format, path) in self.discover()? {
            let rows = format.read(&path)?;
            log::debug!("Read {} rows from {}", rows.len(), path.display());
            people.extend(rows);
        }

        Ok(people)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|excluded| same_file(excluded, path))
    }
}

impl Extractor for DataDirExtractor {
    type Item = Person;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read_all()
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
