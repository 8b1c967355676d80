//! Extractor trait for reading tables from a source

use eyre::Result;

/// Extractor trait for pulling records out of a source
///
/// Implementors define how to read rows from sources like:
/// - An HTML page fetched over HTTP (or a saved snapshot)
/// - CSV, JSON Lines and XML files
///
/// # Example
/// ```no_run
/// use etl_jobs::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LinesExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for LinesExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         let content = std::fs::read_to_string(&self.path)?;
///         Ok(content.lines().map(str::to_string).collect())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of records extracted
    type Item: Send;

    /// Extract all records from the source, in source order
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, unexpected document shape)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
