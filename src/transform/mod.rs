//! Field-level conversions used by the two jobs
//!
//! Each transformer maps one record to a new record; nothing is mutated in place.

mod gdp_billions;
mod metric_units;

pub use gdp_billions::{GdpToBillions, parse_grouped_number};
pub use metric_units::{ImperialToMetric, KILOGRAMS_PER_POUND, METERS_PER_INCH};
