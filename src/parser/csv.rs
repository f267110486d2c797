//! Delimited text parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Delimiter, Row, Table};

use super::split::{split_fields, split_lines, unwrap_outer_quotes};
use super::Parser;

/// Parser for delimited text files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let delimiter = config.delimiter_for(path);
        let file = File::open(path)?;
        let mut table = read_table(BufReader::new(file), delimiter)?;
        if let Some(heading) = &config.heading {
            table.set_heading(heading.clone());
        }
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Read a whole stream and parse it as delimited text.
///
/// The stream must be UTF-8; anything else is reported as an I/O error.
pub fn read_table<R: Read>(mut reader: R, delimiter: Delimiter) -> Result<Table> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(parse_text(&content, delimiter))
}

/// Parse delimited text: header line first, one row per following logical line
pub fn parse_text(text: &str, delimiter: Delimiter) -> Table {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let normalized = text.replace('\r', "");

    let mut lines = split_lines(&normalized);
    // The final newline leaves one empty line that is not a record
    if lines.len() > 1 && lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }

    let mut lines = lines.into_iter();
    let headers = match lines.next() {
        Some(line) => parse_headers(&line, delimiter),
        None => return Table::new(),
    };

    let table: Table = lines.map(|line| parse_row(&line, &headers, delimiter)).collect();

    debug!(
        rows = table.row_count(),
        headers = headers.len(),
        %delimiter,
        "parsed delimited text"
    );

    table
}

fn parse_headers(line: &str, delimiter: Delimiter) -> Vec<String> {
    split_fields(line, delimiter)
        .iter()
        .map(|field| unwrap_outer_quotes(field).to_string())
        .collect()
}

fn parse_row(line: &str, headers: &[String], delimiter: Delimiter) -> Row {
    let fields = split_fields(line, delimiter);
    Row::from_fields(
        headers,
        fields.iter().map(|field| unwrap_outer_quotes(field).to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let table = parse_text("id,name\r\n1,x\r\n2,y\r\n", Delimiter::Comma);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns().as_ref(), ["id", "name"]);
        assert_eq!(table.rows()[1].get_or_default("name"), "y");
    }

    #[test]
    fn test_header_collision() {
        let table = parse_text("A,A,A\n1,2,3", Delimiter::Comma);
        let row = &table.rows()[0];
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["A", "A ", "A  "]);
        assert_eq!(row.get_or_default("A"), "1");
        assert_eq!(row.get_or_default("A "), "2");
        assert_eq!(row.get_or_default("A  "), "3");
    }

    #[test]
    fn test_embedded_delimiter_and_newline() {
        let table = parse_text("id,val\n1,\"a,b\"\n2,c", Delimiter::Comma);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].get_or_default("val"), "a,b");
        assert_eq!(table.rows()[1].get_or_default("val"), "c");

        let table = parse_text("id,note\n1,\"line one\nline two\"\n2,z", Delimiter::Comma);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].get_or_default("note"), "line one\nline two");
    }

    #[test]
    fn test_quoted_headers_are_unwrapped() {
        let table = parse_text("\"first name\";\"age\"\nAnn;30", Delimiter::Semicolon);
        assert_eq!(table.columns().as_ref(), ["first name", "age"]);
    }

    #[test]
    fn test_short_and_long_rows() {
        let table = parse_text("a,b,c\n1\n1,2,3,4", Delimiter::Comma);
        assert_eq!(table.rows()[0].len(), 1);
        assert_eq!(table.rows()[0].get_or_default("c"), "");
        assert_eq!(table.rows()[1].len(), 3);
    }

    #[test]
    fn test_blank_line_in_middle_becomes_row() {
        let table = parse_text("a,b\n\n1,2\n", Delimiter::Comma);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].get("a"), Some(""));
    }

    #[test]
    fn test_only_final_newline_is_dropped() {
        let table = parse_text("a,b\n1,2\n\n", Delimiter::Comma);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[1].get("a"), Some(""));

        let table = parse_text("a\nx\n\n", Delimiter::Comma);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let table = parse_text("", Delimiter::Comma);
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);

        let table = parse_text("only,headers\n", Delimiter::Comma);
        assert!(table.is_empty());
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = parse_text("\u{feff}id\n1", Delimiter::Comma);
        assert_eq!(table.columns().as_ref(), ["id"]);
    }

    #[test]
    fn test_read_table_rejects_invalid_utf8() {
        let bytes: &[u8] = &[b'a', b'\n', 0xff, 0xfe];
        assert!(read_table(bytes, Delimiter::Comma).is_err());
    }
}
