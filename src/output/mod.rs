//! Output formatting for tables

mod csv;
mod html;
mod json;
mod record;
mod schema;
mod terminal;

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use html::{HtmlClasses, HtmlOutput};
pub use json::JsonOutput;
pub use record::RecordOutput;
pub use schema::SchemaOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter for the configured format
    pub fn create(config: &Config) -> Box<dyn OutputFormatter> {
        match config.output_format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Csv => Box::new(CsvOutput::new(config.output_delimiter)),
            OutputFormat::Json if config.compact_json => Box::new(JsonOutput::compact()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Html => Box::new(HtmlOutput::new(config.html_classes.clone())),
            OutputFormat::Record => Box::new(RecordOutput::new(
                config.record_name.clone(),
                config.record_visibility.clone(),
            )),
            OutputFormat::Schema => Box::new(SchemaOutput),
        }
    }
}

/// Render a table to the configured destination (file or stdout)
pub fn render(table: &Table, config: &Config) -> Result<()> {
    let formatter = OutputFactory::create(config);
    match &config.output_path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            formatter.render(table, &mut writer)?;
            writer.flush()?;
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            formatter.render(table, &mut stdout)
        }
    }
}

/// Render a table to a string with the given formatter
pub fn render_to_string(formatter: &dyn OutputFormatter, table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    formatter.render(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

impl Table {
    /// JSON array of row objects
    pub fn to_json(&self) -> Result<String> {
        render_to_string(&JsonOutput::new(), self)
            .map(|json| json.trim_end().to_string())
    }

    /// HTML `<table>` markup over every column
    pub fn to_html(&self, classes: &HtmlClasses) -> String {
        HtmlOutput::new(classes.clone()).table_markup(self)
    }

    /// Rust struct declaration for one record of this table
    pub fn to_record_code(&self, type_name: &str, visibility: &str) -> String {
        RecordOutput::new(type_name.to_string(), visibility.to_string()).declaration(self)
    }
}
