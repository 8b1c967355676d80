//! Loader trait for writing tables to destinations

use eyre::Result;

/// Loader trait for persisting a transformed table
///
/// Loaders borrow the table, so the same rows can be handed to several
/// destinations in turn (a CSV file, then a database table).
///
/// # Example
/// ```no_run
/// use etl_jobs::etl::Loader;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LinesLoader {
///     path: PathBuf,
/// }
///
/// impl Loader for LinesLoader {
///     type Item = String;
///
///     async fn load(&self, items: &[Self::Item]) -> Result<usize> {
///         std::fs::write(&self.path, items.join("\n"))?;
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of records to load
    type Item: Send + Sync;

    /// Load records to the destination, replacing whatever was there
    ///
    /// Returns the number of records written
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, database, serialization)
    fn load(
        &self,
        items: &[Self::Item],
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
