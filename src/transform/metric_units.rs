//! Inches/pounds to meters/kilograms

use crate::etl::{Transformer, round_to};
use crate::people::Person;
use eyre::Result;

pub const METERS_PER_INCH: f64 = 0.0254;
pub const KILOGRAMS_PER_POUND: f64 = 0.45359237;

/// Converts height and weight to metric, each rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default)]
pub struct ImperialToMetric;

impl Transformer for ImperialToMetric {
    type Input = Person;
    type Output = Person;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(Person {
            name: input.name,
            height: round_to(input.height * METERS_PER_INCH, 2),
            weight: round_to(input.weight * KILOGRAMS_PER_POUND, 2),
        })
    }
}
