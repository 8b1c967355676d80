//! USD millions (page formatting) to USD billions

use crate::etl::{Transformer, round_to};
use crate::gdp::{CountryGdp, GdpRow};
use eyre::{Context, Result};

/// Converts scraped GDP text to billions, rounded to 2 decimals
///
/// # Example
/// ```
/// use etl_jobs::etl::Transformer;
/// use etl_jobs::gdp::GdpRow;
/// use etl_jobs::transform::GdpToBillions;
///
/// let row = GdpRow {
///     country: "Tuvalu".to_string(),
///     gdp_usd_millions: "1,000".to_string(),
/// };
/// let converted = GdpToBillions.transform(row).unwrap();
/// assert_eq!(converted.gdp_usd_billions, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GdpToBillions;

impl Transformer for GdpToBillions {
    type Input = GdpRow;
    type Output = CountryGdp;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        let millions = parse_grouped_number(&input.gdp_usd_millions)
            .with_context(|| format!("Invalid GDP figure for {}", input.country))?;

        Ok(CountryGdp {
            country: input.country,
            gdp_usd_billions: round_to(millions / 1000.0, 2),
        })
    }
}

/// Parse a number written with `,` thousands separators
pub fn parse_grouped_number(text: &str) -> Result<f64> {
    let digits: String = text.trim().chars().filter(|c| *c != ',').collect();
    digits
        .parse::<f64>()
        .with_context(|| format!("Not a number: {:?}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, gdp: &str) -> GdpRow {
        GdpRow {
            country: country.to_string(),
            gdp_usd_millions: gdp.to_string(),
        }
    }

    #[test]
    fn test_parse_grouped_number() {
        assert_eq!(parse_grouped_number("21,427,700").unwrap(), 21427700.0);
        assert_eq!(parse_grouped_number(" 63 ").unwrap(), 63.0);
        assert_eq!(parse_grouped_number("1,234.5").unwrap(), 1234.5);
        assert!(parse_grouped_number("n/a").is_err());
        assert!(parse_grouped_number("").is_err());
    }

    #[test]
    fn test_converts_and_renames() {
        let output = GdpToBillions.transform(row("A", "1,000")).unwrap();
        assert_eq!(
            output,
            CountryGdp {
                country: "A".to_string(),
                gdp_usd_billions: 1.0
            }
        );

        let output = GdpToBillions.transform(row("B", "21,427,700")).unwrap();
        assert_eq!(output.gdp_usd_billions, 21427.7);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let output = GdpToBillions.transform(row("C", "19,373,586")).unwrap();
        assert_eq!(output.gdp_usd_billions, 19373.59);

        let output = GdpToBillions.transform(row("D", "63")).unwrap();
        assert_eq!(output.gdp_usd_billions, 0.06);
    }

    #[test]
    fn test_non_numeric_fails_with_country() {
        let err = GdpToBillions.transform(row("Nowhere", "12,3x4")).unwrap_err();
        assert!(format!("{:#}", err).contains("Nowhere"));
    }

    #[test]
    fn test_transform_many_keeps_order() {
        let output = GdpToBillions
            .transform_many(vec![row("X", "2,000"), row("Y", "3,000")])
            .unwrap();
        let names: Vec<&str> = output.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
    }
}
