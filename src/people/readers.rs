//! Per-format readers normalizing a file to `Person` rows

use super::Person;
use crate::etl::Extractor;
use crate::storage::NdjsonReader;
use eyre::{Context, Result, eyre};
use std::path::{Path, PathBuf};

/// Reads a CSV file with a `name,height,weight` header
///
/// Columns are matched by header name; extra columns are ignored and
/// surrounding whitespace is trimmed.
pub struct CsvPeopleReader {
    path: PathBuf,
}

impl CsvPeopleReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn read(&self) -> Result<Vec<Person>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;

        reader
            .deserialize::<Person>()
            .map(|row| {
                row.with_context(|| format!("Failed to parse CSV row in {}", self.path.display()))
            })
            .collect()
    }
}

impl Extractor for CsvPeopleReader {
    type Item = Person;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

/// Reads one JSON object per line
pub struct JsonLinesPeopleReader {
    inner: NdjsonReader<Person>,
}

impl JsonLinesPeopleReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: NdjsonReader::new(path),
        }
    }

    pub fn read(&self) -> Result<Vec<Person>> {
        self.inner.read()
    }
}

impl Extractor for JsonLinesPeopleReader {
    type Item = Person;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

/// Reads an XML document whose root's children each hold `name`, `height`
/// and `weight` elements
///
/// ```xml
/// <data>
///   <person><name>alex</name><height>65.78</height><weight>112.99</weight></person>
/// </data>
/// ```
///
/// The child element's own tag name is not checked.
pub struct XmlPeopleReader {
    path: PathBuf,
}

impl XmlPeopleReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn read(&self) -> Result<Vec<Person>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read XML file: {}", self.path.display()))?;
        parse_people_xml(&content)
            .with_context(|| format!("Failed to parse XML file: {}", self.path.display()))
    }
}

impl Extractor for XmlPeopleReader {
    type Item = Person;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

fn parse_people_xml(content: &str) -> Result<Vec<Person>> {
    let document = roxmltree::Document::parse(content)?;

    let mut people = Vec::new();
    for (index, node) in document
        .root_element()
        .children()
        .filter(|node| node.is_element())
        .enumerate()
    {
        let person = read_person(node).with_context(|| {
            format!("Invalid <{}> element #{}", node.tag_name().name(), index + 1)
        })?;
        people.push(person);
    }

    Ok(people)
}

fn read_person(node: roxmltree::Node) -> Result<Person> {
    Ok(Person {
        name: child_text(node, "name")?,
        height: child_text(node, "height")?
            .parse::<f64>()
            .context("height is not a number")?,
        weight: child_text(node, "weight")?
            .parse::<f64>()
            .context("weight is not a number")?,
    })
}

fn child_text(node: roxmltree::Node, tag: &str) -> Result<String> {
    let child = node
        .children()
        .find(|child| child.has_tag_name(tag))
        .ok_or_else(|| eyre!("missing <{}>", tag))?;
    Ok(child.text().unwrap_or_default().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CSV: &str = "name,height,weight\nalex,65.78331,112.9925\najay,71.51521,136.4873\n";
    const JSON: &str = "{\"name\":\"alex\",\"height\":65.78331,\"weight\":112.9925}\n{\"name\":\"ajay\",\"height\":71.51521,\"weight\":136.4873}\n";
    const XML: &str = r#"<?xml version="1.0"?>
<data>
    <person>
        <name>alex</name>
        <height>65.78331</height>
        <weight>112.9925</weight>
    </person>
    <person>
        <name>ajay</name>
        <height>71.51521</height>
        <weight>136.4873</weight>
    </person>
</data>
"#;

    fn expected() -> Vec<Person> {
        vec![
            Person {
                name: "alex".to_string(),
                height: 65.78331,
                weight: 112.9925,
            },
            Person {
                name: "ajay".to_string(),
                height: 71.51521,
                weight: 136.4873,
            },
        ]
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_formats_agree() {
        let temp = TempDir::new().unwrap();

        let from_csv = CsvPeopleReader::new(write(&temp, "a.csv", CSV)).read().unwrap();
        let from_json = JsonLinesPeopleReader::new(write(&temp, "a.json", JSON))
            .read()
            .unwrap();
        let from_xml = XmlPeopleReader::new(write(&temp, "a.xml", XML)).read().unwrap();

        assert_eq!(from_csv, expected());
        assert_eq!(from_json, expected());
        assert_eq!(from_xml, expected());
    }

    #[test]
    fn test_csv_column_order_and_extras() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "b.csv",
            "weight, name ,height,team\n112.9925,alex,65.78331,red\n",
        );

        let people = CsvPeopleReader::new(path).read().unwrap();
        assert_eq!(people, expected()[..1].to_vec());
    }

    #[test]
    fn test_csv_bad_number() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "c.csv", "name,height,weight\nalex,tall,112\n");
        assert!(CsvPeopleReader::new(path).read().is_err());
    }

    #[test]
    fn test_xml_missing_element() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "d.xml",
            "<data><person><name>alex</name><height>1</height></person></data>",
        );

        let err = XmlPeopleReader::new(path).read().unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("missing <weight>"));
        assert!(message.contains("<person> element #1"));
    }

    #[test]
    fn test_xml_ignores_child_tag_name() {
        let people = parse_people_xml(
            "<root><row><name>a</name><height>1</height><weight>2</weight></row>\
             <entry><weight>4</weight><name>b</name><height>3</height></entry></root>",
        )
        .unwrap();

        assert_eq!(people.len(), 2);
        assert_eq!(people[1].name, "b");
        assert_eq!(people[1].height, 3.0);
    }

    #[test]
    fn test_xml_malformed() {
        assert!(parse_people_xml("<data><person></data>").is_err());
    }

    #[tokio::test]
    async fn test_extract_matches_read() {
        let temp = TempDir::new().unwrap();
        let reader = JsonLinesPeopleReader::new(write(&temp, "e.json", JSON));
        assert_eq!(reader.extract().await.unwrap(), expected());
    }
}
