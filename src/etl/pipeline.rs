//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use crate::storage::ProgressLog;
use eyre::Result;

/// ETL Pipeline that runs Extract, Transform, and Load once, in order
///
/// When a [`ProgressLog`] is attached, each stage is bracketed by a marker line:
/// `ETL Job Started`, `Extract phase Started`, `Extract phase Ended`, ...,
/// `ETL Job Ended`. A failure leaves the markers written so far and nothing else.
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use etl_jobs::etl::Pipeline;
/// use etl_jobs::people::DataDirExtractor;
/// use etl_jobs::storage::{CsvTableWriter, ProgressLog};
/// use etl_jobs::transform::ImperialToMetric;
///
/// # async fn example() -> eyre::Result<()> {
/// let pipeline = Pipeline::new(
///     DataDirExtractor::new("data"),
///     ImperialToMetric,
///     CsvTableWriter::new("data/transformed_data.csv"),
/// )
/// .with_progress(ProgressLog::consolidation("log_file.txt"));
///
/// let table = pipeline.run().await?;
/// println!("Loaded {} rows", table.len());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L>
where
    T: Transformer,
{
    extractor: E,
    transformer: T,
    loader: L,
    progress: Option<ProgressLog>,
    inspect: Option<Inspector<T::Output>>,
}

/// Callback that sees the transformed table before it is loaded
type Inspector<O> = Box<dyn Fn(&[O]) + Send + Sync>;

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            progress: None,
            inspect: None,
        }
    }

    /// Write stage markers to the given progress log
    pub fn with_progress(mut self, progress: ProgressLog) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Call `inspect` with the transformed table inside the transform stage,
    /// before `Transform phase Ended` is written
    pub fn with_inspect(
        mut self,
        inspect: impl Fn(&[T::Output]) + Send + Sync + 'static,
    ) -> Self {
        self.inspect = Some(Box::new(inspect));
        self
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract records from source
    /// 2. Transform each record
    /// 3. Load the table to the destination
    ///
    /// Returns the transformed table after it has been loaded
    ///
    /// # Errors
    /// Returns an error if any stage fails, or if a marker cannot be written
    pub async fn run(&self) -> Result<Vec<T::Output>> {
        self.mark("ETL Job Started")?;

        self.mark("Extract phase Started")?;
        let items = self.extractor.extract().await?;
        log::info!("Extracted {} records", items.len());
        if items.is_empty() {
            log::warn!("No records extracted, the output will only contain a header");
        }
        self.mark("Extract phase Ended")?;

        self.mark("Transform phase Started")?;
        let transformed = self.transformer.transform_many(items)?;
        log::info!("Transformed {} records", transformed.len());
        if let Some(inspect) = &self.inspect {
            inspect(&transformed);
        }
        self.mark("Transform phase Ended")?;

        self.mark("Load phase Started")?;
        let count = self.loader.load(&transformed).await?;
        log::info!("Loaded {} records", count);
        self.mark("Load phase Ended")?;

        self.mark("ETL Job Ended")?;
        Ok(transformed)
    }

    fn mark(&self, message: &str) -> Result<()> {
        match &self.progress {
            Some(progress) => progress.log_progress(message),
            None => {
                log::debug!("{}", message);
                Ok(())
            }
        }
    }
}
