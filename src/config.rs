//! Configuration handling for csvdoc

use std::path::{Path, PathBuf};

use crate::model::Delimiter;
use crate::output::HtmlClasses;

/// Output format for rendered tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Csv,
    Json,
    Html,
    Record,
    Schema,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "record" => Ok(OutputFormat::Record),
            "schema" => Ok(OutputFormat::Schema),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for reading, transforming and rendering a table
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input file
    pub input: PathBuf,
    /// Input delimiter; derived from the file extension when unset
    pub delimiter: Option<Delimiter>,
    /// Delimiter used for CSV output
    pub output_delimiter: Delimiter,
    /// Output format
    pub output_format: OutputFormat,
    /// Heading to attach to the parsed table
    pub heading: Option<String>,
    /// CSS classes for HTML output
    pub html_classes: HtmlClasses,
    /// Type name for generated record code
    pub record_name: String,
    /// Visibility keyword for generated record code (may be empty)
    pub record_visibility: String,
    /// Emit single-line JSON
    pub compact_json: bool,
    /// Write output to this file instead of stdout
    pub output_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            delimiter: None,
            output_delimiter: Delimiter::default(),
            output_format: OutputFormat::default(),
            heading: None,
            html_classes: HtmlClasses::default(),
            record_name: "Record".to_string(),
            record_visibility: "pub".to_string(),
            compact_json: false,
            output_path: None,
        }
    }
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Delimiter to read `path` with: the explicit one, else by extension
    pub fn delimiter_for(&self, path: &Path) -> Delimiter {
        self.delimiter.unwrap_or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(Delimiter::for_extension)
                .unwrap_or_default()
        })
    }

    /// Set input delimiter
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set output delimiter
    pub fn with_output_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.output_delimiter = delimiter;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set table heading
    pub fn with_heading(mut self, heading: String) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Set HTML CSS classes
    pub fn with_html_classes(mut self, classes: HtmlClasses) -> Self {
        self.html_classes = classes;
        self
    }

    /// Set generated record type name and visibility
    pub fn with_record(mut self, name: String, visibility: String) -> Self {
        self.record_name = name;
        self.record_visibility = visibility;
        self
    }

    /// Emit compact JSON
    pub fn with_compact_json(mut self, compact: bool) -> Self {
        self.compact_json = compact;
        self
    }

    /// Write output to a file
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("schema".parse::<OutputFormat>(), Ok(OutputFormat::Schema));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_delimiter_for_path() {
        let config = Config::default();
        assert_eq!(config.delimiter_for(Path::new("a.tsv")), Delimiter::Tab);
        assert_eq!(config.delimiter_for(Path::new("a.csv")), Delimiter::Comma);
        assert_eq!(config.delimiter_for(Path::new("noext")), Delimiter::Comma);

        let config = config.with_delimiter(Delimiter::Semicolon);
        assert_eq!(config.delimiter_for(Path::new("a.tsv")), Delimiter::Semicolon);
    }
}
