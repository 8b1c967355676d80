//! NDJSON (Newline Delimited JSON) file reading

use eyre::{Context, Result};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Read one JSON object per line into typed records
///
/// Blank lines are skipped. Object keys beyond the record's fields are ignored.
pub struct NdjsonReader<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> NdjsonReader<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    /// Read all lines, in file order
    pub fn read(&self) -> Result<Vec<T>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read NDJSON file: {}", self.path.display()))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(index, line)| {
                serde_json::from_str(line).with_context(|| {
                    format!(
                        "Failed to parse JSON record {} in {}: {}",
                        index + 1,
                        self.path.display(),
                        line
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pair {
        key: String,
        value: f64,
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "{{\"key\": \"a\", \"value\": 1}}").unwrap();
        writeln!(temp).unwrap();
        writeln!(temp, "{{\"key\": \"b\", \"value\": 2.5, \"extra\": true}}").unwrap();

        let reader = NdjsonReader::<Pair>::new(temp.path());
        let data = reader.read().unwrap();

        assert_eq!(
            data,
            vec![
                Pair {
                    key: "a".to_string(),
                    value: 1.0
                },
                Pair {
                    key: "b".to_string(),
                    value: 2.5
                },
            ]
        );
    }

    #[test]
    fn test_read_reports_bad_line() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "{{\"key\": \"a\", \"value\": 1}}").unwrap();
        writeln!(temp, "{{\"key\": \"b\"}}").unwrap();

        let reader = NdjsonReader::<Pair>::new(temp.path());
        let err = reader.read().unwrap_err();
        assert!(format!("{:#}", err).contains("record 2"));
    }

    #[test]
    fn test_missing_file() {
        let reader = NdjsonReader::<Pair>::new("does/not/exist.json");
        assert!(reader.read().is_err());
    }
}
