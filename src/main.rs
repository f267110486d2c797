//! csvdoc - Quote-aware delimited text tables

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use regex::Regex;
use tracing_subscriber::EnvFilter;

use csvdoc::config::{Config, OutputFormat};
use csvdoc::model::{Delimiter, Row};
use csvdoc::normalize::{CaseRule, MacAddressRule, MacSeparator};
use csvdoc::output::{self, HtmlClasses};
use csvdoc::parser::ParserFactory;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Csv,
    Json,
    Html,
    Record,
    Schema,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Html => OutputFormat::Html,
            CliOutputFormat::Record => OutputFormat::Record,
            CliOutputFormat::Schema => OutputFormat::Schema,
        }
    }
}

/// Query, normalize and convert delimited text tables
#[derive(Parser, Debug)]
#[command(name = "csvdoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Delimited text or JSON file to read
    file: PathBuf,

    /// Input delimiter: , ; ~ tab (defaults by extension)
    #[arg(short, long)]
    delimiter: Option<Delimiter>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Delimiter for CSV output
    #[arg(long, default_value = ",")]
    output_delimiter: Delimiter,

    /// Keep rows whose COLUMN equals VALUE (repeatable, all must hold)
    #[arg(long, value_name = "COLUMN=VALUE", value_parser = parse_pair)]
    filter: Vec<(String, String)>,

    /// Keep rows whose COLUMN matches REGEX (repeatable, all must hold)
    #[arg(long = "match", value_name = "COLUMN=REGEX", value_parser = parse_pair)]
    patterns: Vec<(String, String)>,

    /// Keep only rows with no match in this file over the shared columns
    #[arg(long, value_name = "FILE")]
    not_in: Option<PathBuf>,

    /// Remove rows whose COLUMN equals VALUE (repeatable, all must hold)
    #[arg(long, value_name = "COLUMN=VALUE", value_parser = parse_pair)]
    remove: Vec<(String, String)>,

    /// Upper-case these columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    upper: Vec<String>,

    /// Lower-case these columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    lower: Vec<String>,

    /// Canonicalize MAC addresses in these columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    mac: Vec<String>,

    /// Separator for canonical MAC addresses: none, colon, dash
    #[arg(long, default_value = "colon")]
    mac_separator: MacSeparator,

    /// Upper-case canonical MAC addresses
    #[arg(long)]
    mac_upper: bool,

    /// Print the values of one column, one per line
    #[arg(long)]
    column: Option<String>,

    /// Heading for the table (HTML caption)
    #[arg(long)]
    heading: Option<String>,

    /// CSS class for the HTML table
    #[arg(long)]
    table_class: Option<String>,

    /// CSS class for the HTML header row
    #[arg(long)]
    header_class: Option<String>,

    /// CSS class for HTML data rows
    #[arg(long)]
    row_class: Option<String>,

    /// Type name for record output
    #[arg(long, default_value = "Record")]
    record_name: String,

    /// Visibility for record output (empty for private)
    #[arg(long, default_value = "pub")]
    visibility: String,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got `{}`", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::new(cli.file.clone())
        .with_output_delimiter(cli.output_delimiter)
        .with_output_format(cli.format.into())
        .with_html_classes(HtmlClasses {
            table: cli.table_class,
            header_row: cli.header_class,
            row: cli.row_class,
        })
        .with_record(cli.record_name, cli.visibility)
        .with_compact_json(cli.compact);
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter);
    }
    if let Some(heading) = cli.heading {
        config = config.with_heading(heading);
    }
    if let Some(path) = cli.output {
        config = config.with_output_path(path);
    }

    let factory = ParserFactory::new();
    let mut table = factory
        .parse(&config.input, &config)
        .with_context(|| format!("Failed to parse file: {}", config.input.display()))?;

    if !cli.filter.is_empty() {
        table = table.filter(&Row::from_pairs(cli.filter));
    }

    if !cli.patterns.is_empty() {
        let patterns = cli
            .patterns
            .into_iter()
            .map(|(column, pattern)| {
                Regex::new(&pattern)
                    .with_context(|| format!("Invalid pattern for column {}: {}", column, pattern))
                    .map(|re| (column, re))
            })
            .collect::<Result<Vec<_>>>()?;
        table = table.filter_by_patterns(&patterns);
    }

    if let Some(other_path) = &cli.not_in {
        let other = factory
            .parse(other_path, &config)
            .with_context(|| format!("Failed to parse file: {}", other_path.display()))?;
        table = table.not_in(&other);
    }

    if !cli.remove.is_empty() {
        table.remove_matching(&Row::from_pairs(cli.remove));
    }

    if !cli.upper.is_empty() {
        table.normalize(&CaseRule::upper(), &cli.upper);
    }
    if !cli.lower.is_empty() {
        table.normalize(&CaseRule::lower(), &cli.lower);
    }
    if !cli.mac.is_empty() {
        let rule = MacAddressRule::new(cli.mac_upper, cli.mac_separator);
        table.normalize(&rule, &cli.mac);
    }

    if let Some(heading) = &config.heading {
        table.set_heading(heading.clone());
    }

    if let Some(column) = &cli.column {
        let values = table.column(column)?;
        for value in values {
            println!("{}", value);
        }
        return Ok(());
    }

    output::render(&table, &config)?;
    Ok(())
}
