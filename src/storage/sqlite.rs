//! SQLite destination and query runner

use crate::etl::Loader;
use crate::table::{Field, Record, TextTable, format_float};
use eyre::{Context, Result};
use sqlx::sqlite::{
    SqliteColumn, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Executor, Row, TypeInfo, ValueRef};
use std::marker::PhantomData;
use std::path::Path;

/// Open (creating if needed) a SQLite database file
///
/// The pool holds a single connection; every statement runs in sequence.
pub async fn connect(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let path = path.as_ref();
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))
}

/// Replaces a named table with the loaded records
///
/// Each load drops the table, recreates it from the record's column list and
/// inserts every row, all in one transaction. Loading twice leaves one table
/// holding the second load's rows. No index column is stored.
pub struct SqliteTableLoader<R> {
    pool: SqlitePool,
    table: String,
    _record: PhantomData<fn(&R)>,
}

impl<R: Record> SqliteTableLoader<R> {
    pub fn new(pool: SqlitePool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
            _record: PhantomData,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn create_statement(&self) -> String {
        let columns = R::COLUMNS
            .iter()
            .map(|(name, kind)| format!("{} {}", quote_ident(name), kind.sql_name()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({})", quote_ident(&self.table), columns)
    }

    fn insert_statement(&self) -> String {
        let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
        format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(&self.table),
            placeholders
        )
    }
}

impl<R: Record + Send + Sync> Loader for SqliteTableLoader<R> {
    type Item = R;

    async fn load(&self, items: &[Self::Item]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {}", quote_ident(&self.table)))
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to drop table {}", self.table))?;
        sqlx::query(&self.create_statement())
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to create table {}", self.table))?;

        let insert = self.insert_statement();
        for item in items {
            let mut query = sqlx::query(&insert);
            for field in item.fields() {
                query = match field {
                    Field::Text(text) => query.bind(text),
                    Field::Real(value) => query.bind(value),
                };
            }
            query
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to insert into {}", self.table))?;
        }

        tx.commit().await?;
        log::debug!("Replaced table {} with {} rows", self.table, items.len());
        Ok(items.len())
    }
}

/// Run a trusted query and collect the rows as text
///
/// Column names come from the prepared statement, so an empty result still
/// carries its header.
pub async fn query_table(pool: &SqlitePool, query: &str) -> Result<TextTable> {
    let rows: Vec<SqliteRow> = sqlx::query(query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("Query failed: {}", query))?;

    let columns = match rows.first() {
        Some(row) => column_names(row.columns()),
        None => {
            let described = pool
                .describe(query)
                .await
                .with_context(|| format!("Failed to describe query: {}", query))?;
            column_names(described.columns())
        }
    };
    let rows = rows.iter().map(render_row).collect::<Result<Vec<_>>>()?;

    Ok(TextTable::new(columns, rows))
}

/// Run a trusted query and print the statement and its rows to stdout
pub async fn run_query(pool: &SqlitePool, query: &str) -> Result<TextTable> {
    let table = query_table(pool, query).await?;
    println!("{}", query);
    println!("{}", table);
    Ok(table)
}

fn column_names(columns: &[SqliteColumn]) -> Vec<String> {
    columns
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

fn render_row(row: &SqliteRow) -> Result<Vec<String>> {
    (0..row.len())
        .map(|index| {
            let raw = row.try_get_raw(index)?;
            if raw.is_null() {
                return Ok(String::new());
            }
            let type_name = raw.type_info().name().to_string();
            let value = match type_name.as_str() {
                "INTEGER" => row.try_get::<i64, _>(index)?.to_string(),
                "REAL" => format_float(row.try_get::<f64, _>(index)?),
                _ => row.try_get::<String, _>(index)?,
            };
            Ok(value)
        })
        .collect()
}

/// Quote a table or column name for SQLite
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
