//! Parser layer for reading tabular text formats

mod csv;
mod json;
pub mod split;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, TableError};
use crate::model::Table;

pub use self::csv::{parse_text, read_table, CsvParser};
pub use self::json::{read_json_table, JsonParser};

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => detect_format(path).unwrap_or("csv").to_string(),
        };

        self.parsers
            .iter()
            .find(|parser| parser.supports_extension(&ext))
            .map(|parser| parser.as_ref())
            .ok_or(TableError::UnsupportedFormat(ext))
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        parser.parse(path, config)
    }
}

/// Detect file format from content (for files without extension)
pub fn detect_format(path: &Path) -> Option<&'static str> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.by_ref().take(4096).read_line(&mut line).ok()?;

    let trimmed = line.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        Some("json")
    } else {
        Some("csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_factory_by_extension() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("a.csv")).is_ok());
        assert!(factory.get_parser(Path::new("a.TSV")).is_ok());
        assert!(factory.get_parser(Path::new("a.json")).is_ok());
        assert!(matches!(
            factory.get_parser(Path::new("a.xlsx")),
            Err(TableError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_detect_format() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("data");
        let mut f = File::create(&json_path).unwrap();
        writeln!(f, "  [{{\"a\": \"1\"}}]").unwrap();
        assert_eq!(detect_format(&json_path), Some("json"));

        let csv_path = dir.path().join("plain");
        std::fs::write(&csv_path, "a,b\n1,2\n").unwrap();
        assert_eq!(detect_format(&csv_path), Some("csv"));

        let table = ParserFactory::new()
            .parse(&json_path, &Config::default())
            .unwrap();
        assert_eq!(table.rows()[0].get_or_default("a"), "1");
    }
}
