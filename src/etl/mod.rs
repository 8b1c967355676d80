//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides the trait definitions both jobs are built from:
//! extractors read a table from a source, transformers convert it record by
//! record, and loaders persist it.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::{Transformer, round_to};
