//! Transformer trait for record-level conversions

use eyre::Result;

/// Transformer trait for converting records
///
/// Transformers are pure and deterministic: each input record maps to exactly
/// one output record, and the output may be a different type (a renamed or
/// re-typed column produces a new record type rather than mutating the old one).
///
/// # Example
/// ```
/// use etl_jobs::etl::Transformer;
/// use eyre::Result;
///
/// struct Doubler;
///
/// impl Transformer for Doubler {
///     type Input = f64;
///     type Output = f64;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input * 2.0)
///     }
/// }
///
/// assert_eq!(Doubler.transform_many(vec![1.0, 2.5]).unwrap(), vec![2.0, 5.0]);
/// ```
pub trait Transformer: Send + Sync {
    /// Input record type
    type Input: Send;

    /// Output record type after transformation
    type Output: Send;

    /// Transform a single record
    ///
    /// # Errors
    /// Returns an error if conversion fails (e.g. non-numeric text)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform a whole table, preserving row order
    ///
    /// Stops at the first failing record.
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}

/// Round to `places` decimal places, ties to even.
///
/// Matches the rounding used by the numeric library the CSV outputs were
/// originally produced with, so `0.125` rounds to `0.12` and `0.135` to `0.14`
/// (modulo binary representation).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Negate;

    impl Transformer for Negate {
        type Input = i32;
        type Output = i32;

        fn transform(&self, input: Self::Input) -> Result<Self::Output> {
            if input == 0 {
                eyre::bail!("zero has no sign");
            }
            Ok(-input)
        }
    }

    #[test]
    fn test_transform_many_preserves_order() {
        let output = Negate.transform_many(vec![3, 1, 2]).unwrap();
        assert_eq!(output, vec![-3, -1, -2]);
    }

    #[test]
    fn test_transform_many_stops_on_error() {
        assert!(Negate.transform_many(vec![1, 0, 2]).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.778, 2), 1.78);
        assert_eq!(round_to(68.0388555, 2), 68.04);
        assert_eq!(round_to(21427.7, 2), 21427.7);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }
}
