//! GDP table extractor
//!
//! Reads an HTML page (over HTTP or from a saved file), picks one `tbody`,
//! and keeps the rows that describe a real country with a reported GDP.

use super::{DEFAULT_TABLE_POSITION, GdpRow, markup};
use crate::client::HttpClient;
use crate::etl::Extractor;
use eyre::{Context, Result, eyre};
use scraper::{ElementRef, Html, Selector};
use std::path::PathBuf;
use url::Url;

/// Placeholder the page uses for a missing figure
const MISSING_VALUE: &str = "—";

/// Where the HTML document comes from
#[derive(Debug, Clone)]
pub enum HtmlSource {
    /// Fetch with a single HTTP GET
    Url(Url),
    /// Read a previously saved copy of the page
    File(PathBuf),
}

impl HtmlSource {
    /// Load the whole document as text
    pub async fn read(&self) -> Result<String> {
        match self {
            HtmlSource::Url(url) => HttpClient::try_new()?.get_text(url).await,
            HtmlSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read HTML file: {}", path.display())),
        }
    }
}

impl std::fmt::Display for HtmlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HtmlSource::Url(url) => write!(f, "{}", url),
            HtmlSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How to pick the GDP table out of the document
#[derive(Debug, Clone, PartialEq)]
pub enum TableLocator {
    /// The n-th `tbody` in document order (0-based)
    Position(usize),
    /// The first `tbody` whose header cells contain this text
    HeaderText(String),
}

impl Default for TableLocator {
    fn default() -> Self {
        TableLocator::Position(DEFAULT_TABLE_POSITION)
    }
}

/// Extractor for the country/GDP table
///
/// # Example
/// ```no_run
/// use etl_jobs::etl::Extractor;
/// use etl_jobs::gdp::{GdpTableExtractor, HtmlSource, TableLocator};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse(etl_jobs::gdp::DEFAULT_SOURCE_URL)?;
/// let extractor = GdpTableExtractor::new(HtmlSource::Url(url), TableLocator::default());
/// let rows = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct GdpTableExtractor {
    source: HtmlSource,
    locator: TableLocator,
}

impl GdpTableExtractor {
    pub fn new(source: HtmlSource, locator: TableLocator) -> Self {
        Self { source, locator }
    }

    pub fn source(&self) -> &HtmlSource {
        &self.source
    }
}

impl Extractor for GdpTableExtractor {
    type Item = GdpRow;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        log::debug!("Reading GDP page from {}", self.source);
        let document = self.source.read().await?;

        let rows = parse_gdp_table(&document, &self.locator)
            .with_context(|| format!("Unexpected document shape in {}", self.source))?;
        log::info!("Found {} country rows", rows.len());

        Ok(rows)
    }
}

/// Pull country rows out of an HTML document
///
/// Only `tbody` tags written in the markup are counted, so a `table` without
/// one does not shift the position. A row is kept when it has at least three
/// `td` cells, its first cell holds a hyperlink, and no direct text child of
/// its third cell is the `—` placeholder. The country is the first link's
/// text and the GDP is the third cell's first text node.
///
/// # Errors
/// Returns an error when the locator matches no `tbody`
pub fn parse_gdp_table(document: &str, locator: &TableLocator) -> Result<Vec<GdpRow>> {
    let tr = selector("tr")?;
    let td = selector("td")?;
    let th = selector("th")?;
    let link = selector("a[href]")?;
    let anchor = selector("a")?;

    let bodies: Vec<Html> = markup::source_tbodies(document)
        .into_iter()
        .map(|body| Html::parse_fragment(&format!("<table>{}</table>", body)))
        .collect();
    let table = match locator {
        TableLocator::Position(position) => bodies.get(*position).ok_or_else(|| {
            eyre!(
                "Expected at least {} tbody elements, found {}",
                position + 1,
                bodies.len()
            )
        })?,
        TableLocator::HeaderText(text) => bodies
            .iter()
            .find(|body| {
                body.select(&th)
                    .any(|cell| collapse_whitespace(&cell.text().collect::<String>()).contains(text))
            })
            .ok_or_else(|| eyre!("No tbody has a header containing {:?}", text))?,
    };

    let mut rows = Vec::new();
    for row in table.select(&tr) {
        let cells: Vec<ElementRef> = row.select(&td).collect();
        if cells.len() < 3 {
            continue;
        }
        let (first, third) = (cells[0], cells[2]);

        if first.select(&link).next().is_none() {
            continue;
        }
        let placeholder = third
            .children()
            .filter_map(|child| child.value().as_text())
            .any(|text| text.trim() == MISSING_VALUE);
        if placeholder {
            continue;
        }

        let country = first
            .select(&anchor)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let gdp = third
            .text()
            .map(str::trim)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
            .to_string();

        rows.push(GdpRow {
            country,
            gdp_usd_millions: gdp,
        });
    }

    Ok(rows)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| eyre!("Invalid selector {:?}: {}", css, e))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PAGE: &str = r#"
<html><body>
<table><tbody><tr><td>navigation</td></tr></tbody></table>
<table><tbody><tr><td>notes</td></tr></tbody></table>
<table class="wikitable">
<tbody>
<tr><th>Country/Territory</th><th>UN region</th><th>IMF estimate</th></tr>
<tr><th></th><th></th><th>Estimate</th></tr>
<tr><td>World</td><td>—</td><td>105,568,776</td></tr>
<tr><td><span class="flag"></span> <a href="/wiki/United_States">United States</a></td><td>Americas</td><td>26,854,599</td></tr>
<tr><td><a href="/wiki/China">China</a></td><td>Asia</td><td>19,373,586<sup>[n 1]</sup></td></tr>
<tr><td><a href="/wiki/Afghanistan">Afghanistan</a></td><td>Asia</td><td>—</td></tr>
<tr><td><a href="/wiki/Tuvalu">Tuvalu</a></td><td>Oceania</td><td>
63</td></tr>
<tr><td><a name="anchor-only">Nowhere</a></td><td>Oceania</td><td>1</td></tr>
<tr><td><a href="/wiki/Short">Short</a></td><td>only two cells</td></tr>
</tbody>
</table>
</body></html>
"#;

    fn countries(rows: &[GdpRow]) -> Vec<&str> {
        rows.iter().map(|r| r.country.as_str()).collect()
    }

    #[test]
    fn test_keeps_linked_rows_with_figures() {
        let rows = parse_gdp_table(PAGE, &TableLocator::default()).unwrap();

        assert_eq!(countries(&rows), vec!["United States", "China", "Tuvalu"]);
        assert_eq!(rows[0].gdp_usd_millions, "26,854,599");
        assert_eq!(rows[1].gdp_usd_millions, "19,373,586");
        assert_eq!(rows[2].gdp_usd_millions, "63");
    }

    #[test]
    fn test_missing_tbody_is_an_error() {
        let err = parse_gdp_table(
            "<table><tbody><tr><td>x</td></tr></tbody></table>",
            &TableLocator::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_header_text_locator() {
        let locator = TableLocator::HeaderText("IMF estimate".to_string());
        let rows = parse_gdp_table(PAGE, &locator).unwrap();
        assert_eq!(rows.len(), 3);

        let missing = TableLocator::HeaderText("World Bank".to_string());
        assert!(parse_gdp_table(PAGE, &missing).is_err());
    }

    #[test]
    fn test_table_without_tbody_does_not_shift_position() {
        let page = r#"
<table><tr><td>toolbar</td></tr></table>
<table><tbody><tr><td>navigation</td></tr></tbody></table>
<table><tbody><tr><td>notes</td></tr></tbody></table>
<table><tbody>
<tr><td><a href="/wiki/Realland">Realland</a></td><td>Europe</td><td>5,000</td></tr>
</tbody></table>
"#;

        let rows = parse_gdp_table(page, &TableLocator::default()).unwrap();
        assert_eq!(countries(&rows), vec!["Realland"]);
        assert_eq!(rows[0].gdp_usd_millions, "5,000");
    }

    #[test]
    fn test_placeholder_with_footnote_is_skipped() {
        let page = r#"
<tbody></tbody><tbody></tbody>
<table><tbody>
<tr><td><a href="/wiki/Dashland">Dashland</a></td><td>Asia</td><td>—<sup>[n 2]</sup></td></tr>
<tr><td><a href="/wiki/Spanland">Spanland</a></td><td>Asia</td><td><span>—</span></td></tr>
<tr><td><a href="/wiki/Numberland">Numberland</a></td><td>Asia</td><td>1,500<sup>[n 3]</sup></td></tr>
</tbody></table>
"#;

        let rows = parse_gdp_table(page, &TableLocator::default()).unwrap();
        assert_eq!(countries(&rows), vec!["Spanland", "Numberland"]);
        assert_eq!(rows[1].gdp_usd_millions, "1,500");
    }

    #[test]
    fn test_other_position() {
        let rows = parse_gdp_table(PAGE, &TableLocator::Position(0)).unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_extract_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", PAGE).unwrap();

        let extractor = GdpTableExtractor::new(
            HtmlSource::File(file.path().to_path_buf()),
            TableLocator::default(),
        );
        let rows = extractor.extract().await.unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let extractor = GdpTableExtractor::new(
            HtmlSource::File(PathBuf::from("no/such/page.html")),
            TableLocator::default(),
        );
        assert!(extractor.extract().await.is_err());
    }

    #[tokio::test]
    #[ignore] // hits the live archive
    async fn test_extract_archived_page() {
        let url = Url::parse(crate::gdp::DEFAULT_SOURCE_URL).unwrap();
        let extractor = GdpTableExtractor::new(HtmlSource::Url(url), TableLocator::default());

        let rows = extractor.extract().await.unwrap();
        assert!(rows.iter().any(|r| r.country == "United States"));
    }
}
