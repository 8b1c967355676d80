//! Fixed-schema records and plain-text table rendering

use std::fmt;

/// SQL column affinity for a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Real,
}

impl ColumnType {
    pub fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Real => "REAL",
        }
    }
}

/// A single typed value of a record
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Real(f64),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(text) => f.write_str(text),
            Field::Real(value) => f.write_str(&format_float(*value)),
        }
    }
}

/// A row with a column set known at compile time
///
/// Every row of a table shares `COLUMNS`; `fields()` returns the values in
/// the same order.
pub trait Record {
    /// Column names with their types, in output order
    const COLUMNS: &'static [(&'static str, ColumnType)];

    /// Field values in `COLUMNS` order
    fn fields(&self) -> Vec<Field>;

    /// Field values rendered as text
    fn values(&self) -> Vec<String> {
        self.fields().iter().map(Field::to_string).collect()
    }

    /// Column names only
    fn column_names() -> Vec<&'static str> {
        Self::COLUMNS.iter().map(|(name, _)| *name).collect()
    }
}

/// Render a float the way the CSV outputs have always shown them:
/// shortest round-trip digits, always with a fractional part (`1.0`, `21427.7`).
pub fn format_float(value: f64) -> String {
    let text = format!("{:?}", value);
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Column names plus rendered rows, printed with a leading row index
///
/// Used for console output of a transformed table and of query results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Build from typed records
    pub fn from_records<R: Record>(records: &[R]) -> Self {
        Self {
            columns: R::column_names().into_iter().map(String::from).collect(),
            rows: records.iter().map(Record::values).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "Empty table");
        }

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }

        write!(f, "{:index_width$}", "")?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column)?;
        }
        writeln!(f)?;

        for (index, row) in self.rows.iter().enumerate() {
            write!(f, "{:<index_width$}", index)?;
            for (value, width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", value)?;
            }
            writeln!(f)?;
        }

        if self.rows.is_empty() {
            writeln!(f, "(no rows)")?;
        }
        Ok(())
    }
}
