//! Table: an ordered collection of rows with derived columns and queries

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexSet;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TableError};
use crate::infer::infer_column;
use crate::normalize::NormalizationRule;
use crate::output::CsvOutput;
use crate::parser::read_table;

use super::delimiter::Delimiter;
use super::row::Row;
use super::schema::{Column, ColumnType};

/// A delimited-text document: rows in insertion order plus an optional heading.
///
/// The column list is not stored with the rows. It is the union of every
/// row's keys in first-seen order, cached after [`Table::refresh_columns`]
/// and dropped on any structural change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Title for the table, used as the caption in HTML output
    #[serde(default, skip_serializing_if = "String::is_empty")]
    heading: String,
    #[serde(rename = "data")]
    rows: Vec<Row>,
    #[serde(skip)]
    column_cache: Option<Vec<String>>,
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.heading == other.heading && self.rows == other.rows
    }
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a heading
    pub fn with_heading(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ..Self::default()
        }
    }

    /// Build a table that takes ownership of the given rows
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Parse delimited text held in memory
    pub fn parse_str(text: &str, delimiter: Delimiter) -> Self {
        crate::parser::parse_text(text, delimiter)
    }

    /// Read and parse delimited text from a stream
    pub fn from_reader<R: Read>(reader: R, delimiter: Delimiter) -> Result<Self> {
        read_table(reader, delimiter)
    }

    /// Open and parse a delimited file
    pub fn open(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), %delimiter, "opening table");
        let file = File::open(path)?;
        read_table(BufReader::new(file), delimiter)
    }

    /// Write the table to a file, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>, delimiter: Delimiter) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), rows = self.rows.len(), "saving table");
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), delimiter)
    }

    /// Write the table to a stream.
    ///
    /// Pass `&mut writer` to keep using the stream afterwards; a writer passed
    /// by value is flushed and dropped on return.
    pub fn write_to<W: Write>(&self, writer: W, delimiter: Delimiter) -> Result<()> {
        CsvOutput::new(delimiter).write_table(self, writer)
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn set_heading(&mut self, heading: impl Into<String>) {
        self.heading = heading.into();
    }

    /// All rows in order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the rows. Drops the cached column list, since
    /// callers may add keys.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        self.column_cache = None;
        &mut self.rows
    }

    /// Row by position
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
        self.column_cache = None;
    }

    /// Move every row of `other` onto the end of this table
    pub fn extend_from(&mut self, other: Table) {
        self.extend(other.rows);
    }

    /// Column names: every key of every row, in first-seen order.
    ///
    /// Borrows the cached list when it is current, otherwise computes a fresh
    /// one without storing it.
    pub fn columns(&self) -> Cow<'_, [String]> {
        match &self.column_cache {
            Some(cached) => Cow::Borrowed(cached.as_slice()),
            None => Cow::Owned(self.compute_columns()),
        }
    }

    /// Recompute the column list if stale and store it
    pub fn refresh_columns(&mut self) -> &[String] {
        if self.column_cache.is_none() {
            self.column_cache = Some(self.compute_columns());
        }
        self.column_cache.as_deref().unwrap_or_default()
    }

    fn compute_columns(&self) -> Vec<String> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for row in &self.rows {
            seen.extend(row.keys());
        }
        seen.into_iter().map(str::to_string).collect()
    }

    /// Resolve a column name, accepting a quoted variant of the header
    fn resolve_column(&self, name: &str) -> Result<String> {
        let columns = self.columns();
        if columns.iter().any(|c| c == name) {
            return Ok(name.to_string());
        }
        let quoted = format!("\"{}\"", name);
        if columns.iter().any(|c| *c == quoted) {
            return Ok(quoted);
        }
        Err(TableError::ColumnNotFound(name.to_string()))
    }

    /// Every value of a column in row order; rows lacking it contribute `""`
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let header = self.resolve_column(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get_or_default(&header).to_string())
            .collect())
    }

    /// First row holding `value` under `column`
    pub fn find_row(&self, column: &str, value: &str) -> Result<&Row> {
        self.rows
            .iter()
            .find(|row| row.get(column) == Some(value))
            .ok_or_else(|| TableError::RowNotFound {
                column: column.to_string(),
                value: value.to_string(),
            })
    }

    /// Rows agreeing with every key/value pair of `predicate`
    pub fn filter(&self, predicate: &Row) -> Table {
        Table::from_rows(self.rows.iter().filter(|row| row.matches(predicate)).cloned())
    }

    /// Rows whose value under each named column matches the paired pattern.
    /// A row missing one of the columns does not match.
    pub fn filter_by_patterns(&self, patterns: &[(String, Regex)]) -> Table {
        Table::from_rows(
            self.rows
                .iter()
                .filter(|row| {
                    patterns.iter().all(|(column, pattern)| {
                        row.get(column).is_some_and(|value| pattern.is_match(value))
                    })
                })
                .cloned(),
        )
    }

    /// Whether some row agrees with every key of `row`
    pub fn contains(&self, row: &Row) -> bool {
        self.rows.iter().any(|candidate| candidate.matches(row))
    }

    /// Rows of this table whose values over the columns shared with `other`
    /// have no exact match in `other`
    pub fn not_in(&self, other: &Table) -> Table {
        let other_columns = other.columns();
        let other_set: FxHashSet<&str> = other_columns.iter().map(String::as_str).collect();
        let shared: Vec<String> = self
            .columns()
            .iter()
            .filter(|c| other_set.contains(c.as_str()))
            .cloned()
            .collect();

        Table::from_rows(
            self.rows
                .iter()
                .filter(|row| !other.contains(&row.project(&shared)))
                .cloned(),
        )
    }

    /// Delete every row matching `predicate`; returns how many were removed
    pub fn remove_matching(&mut self, predicate: &Row) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.matches(predicate));
        let removed = before - self.rows.len();
        if removed > 0 {
            self.column_cache = None;
        }
        debug!(removed, "removed matching rows");
        removed
    }

    /// Whether any value of the column reads `null` (any case)
    pub fn contains_nulls(&self, column: &str) -> Result<bool> {
        Ok(self
            .column(column)?
            .iter()
            .any(|value| value.eq_ignore_ascii_case("null")))
    }

    /// Infer the storage type of one column
    pub fn infer_type(&self, column: &str) -> Result<ColumnType> {
        Ok(infer_column(&self.column(column)?))
    }

    /// Inferred type of every column, in column order
    pub fn schema(&self) -> Vec<Column> {
        self.columns()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let values: Vec<&str> = self.rows.iter().map(|r| r.get_or_default(name)).collect();
                Column::new(name.clone(), index, infer_column(&values))
            })
            .collect()
    }

    /// Apply a normalization rule to the given columns of every row
    pub fn normalize<S: AsRef<str>>(&mut self, rule: &dyn NormalizationRule, columns: &[S]) {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        rule.apply(self.rows_mut(), &columns);
    }
}

impl Extend<Row> for Table {
    fn extend<I: IntoIterator<Item = Row>>(&mut self, iter: I) {
        self.rows.extend(iter);
        self.column_cache = None;
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table::from_rows(iter)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        Table::from_rows([
            Row::from_pairs([("id", "1"), ("name", "x")]),
            Row::from_pairs([("id", "2"), ("name", "y")]),
            Row::from_pairs([("id", "3"), ("name", "x"), ("age", "40")]),
        ])
    }

    #[test]
    fn test_columns_union_in_first_seen_order() {
        let table = people();
        assert_eq!(table.columns().as_ref(), ["id", "name", "age"]);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_column_cache_invalidated_on_push() {
        let mut table = people();
        assert_eq!(table.refresh_columns().len(), 3);
        assert!(matches!(table.columns(), Cow::Borrowed(_)));

        table.push_row(Row::from_pairs([("email", "a@b")]));
        assert!(matches!(table.columns(), Cow::Owned(_)));
        assert_eq!(table.refresh_columns().last().map(String::as_str), Some("email"));
    }

    #[test]
    fn test_column_fills_missing_with_empty() {
        let table = people();
        assert_eq!(table.column("age").unwrap(), vec!["", "", "40"]);
    }

    #[test]
    fn test_unknown_column_is_lookup_error() {
        let err = people().column("missing").unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_quoted_column_variant() {
        let table = Table::from_rows([Row::from_pairs([("\"code\"", "7")])]);
        assert_eq!(table.column("code").unwrap(), vec!["7"]);
    }

    #[test]
    fn test_find_row() {
        let table = people();
        assert_eq!(table.find_row("name", "x").unwrap().get_or_default("id"), "1");
        assert!(matches!(
            table.find_row("name", "z"),
            Err(TableError::RowNotFound { .. })
        ));
    }

    #[test]
    fn test_filter_is_conjunction() {
        // Rows failing any predicate key are excluded, never passed through.
        let table = people();
        let hits = table.filter(&Row::from_pairs([("name", "x")]));
        assert_eq!(hits.row_count(), 2);

        let hits = table.filter(&Row::from_pairs([("name", "x"), ("id", "3")]));
        assert_eq!(hits.row_count(), 1);

        let hits = table.filter(&Row::from_pairs([("age", "")]));
        assert_eq!(hits.row_count(), 0);
    }

    #[test]
    fn test_filter_by_patterns() {
        let table = people();
        let patterns = vec![("id".to_string(), Regex::new("^[12]$").unwrap())];
        assert_eq!(table.filter_by_patterns(&patterns).row_count(), 2);

        let patterns = vec![("age".to_string(), Regex::new(".*").unwrap())];
        assert_eq!(table.filter_by_patterns(&patterns).row_count(), 1);
    }

    #[test]
    fn test_not_in() {
        let a = Table::from_rows([
            Row::from_pairs([("id", "1"), ("name", "x")]),
            Row::from_pairs([("id", "2"), ("name", "y")]),
        ]);
        let b = Table::from_rows([Row::from_pairs([("id", "1"), ("name", "x")])]);
        let diff = a.not_in(&b);
        assert_eq!(diff.rows(), &[Row::from_pairs([("id", "2"), ("name", "y")])]);
    }

    #[test]
    fn test_not_in_uses_shared_columns_only() {
        let a = Table::from_rows([
            Row::from_pairs([("id", "1"), ("extra", "a")]),
            Row::from_pairs([("id", "2"), ("extra", "b")]),
        ]);
        let b = Table::from_rows([Row::from_pairs([("id", "2"), ("other", "z")])]);
        let diff = a.not_in(&b);
        assert_eq!(diff.row_count(), 1);
        assert_eq!(diff.rows()[0].get_or_default("id"), "1");
    }

    #[test]
    fn test_contains() {
        let table = people();
        assert!(table.contains(&Row::from_pairs([("id", "2")])));
        assert!(!table.contains(&Row::from_pairs([("id", "2"), ("name", "x")])));
    }

    #[test]
    fn test_remove_matching_removes_duplicates() {
        let mut table = people();
        table.push_row(Row::from_pairs([("id", "4"), ("name", "x")]));
        let removed = table.remove_matching(&Row::from_pairs([("name", "x")]));
        assert_eq!(removed, 3);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns().as_ref(), ["id", "name"]);
    }

    #[test]
    fn test_extend_from() {
        let mut table = people();
        table.extend_from(people());
        assert_eq!(table.row_count(), 6);
    }

    #[test]
    fn test_contains_nulls_and_schema() {
        let table = Table::from_rows([
            Row::from_pairs([("n", "1"), ("f", "1.5")]),
            Row::from_pairs([("n", "NULL"), ("f", "2")]),
        ]);
        assert!(table.contains_nulls("n").unwrap());
        assert!(!table.contains_nulls("f").unwrap());

        let schema = table.schema();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema[0].column_type.sql_type(), "INT NULL");
        assert_eq!(schema[1].column_type.sql_type(), "DOUBLE NOT NULL");
        assert_eq!(schema[1].index, 1);
    }

    #[test]
    fn test_serde_document_shape() {
        let mut table = people();
        table.set_heading("People");
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["heading"], "People");
        assert_eq!(json["data"][0]["name"], "x");

        let back: Table = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
