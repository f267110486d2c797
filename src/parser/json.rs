//! JSON array parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Row, Table};

use super::Parser;

/// Parser for JSON files holding an array of objects or a `{heading, data}` document
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file = File::open(path)?;
        let mut table = read_json_table(BufReader::new(file))?;
        if let Some(heading) = &config.heading {
            table.set_heading(heading.clone());
        }
        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }
}

/// Read a table from JSON.
///
/// Scalars are stored as their text; `null` becomes the literal `null` so type
/// inference still sees the column as nullable. Nested arrays and objects are
/// kept as serialized JSON.
pub fn read_json_table<R: Read>(reader: R) -> Result<Table> {
    let value: Value = serde_json::from_reader(reader)?;

    let (heading, items) = match value {
        Value::Array(items) => (None, items),
        Value::Object(mut obj) if obj.contains_key("data") => {
            let heading = obj
                .get("heading")
                .and_then(Value::as_str)
                .map(str::to_string);
            match obj.remove("data") {
                Some(Value::Array(items)) => (heading, items),
                Some(other) => (heading, vec![other]),
                None => (heading, Vec::new()),
            }
        }
        other => (None, vec![other]),
    };

    let mut table: Table = items.iter().map(json_value_to_row).collect();
    if let Some(heading) = heading {
        table.set_heading(heading);
    }
    Ok(table)
}

fn json_value_to_row(item: &Value) -> Row {
    match item {
        Value::Object(obj) => obj
            .iter()
            .map(|(key, value)| (key.clone(), json_value_to_cell(value)))
            .collect(),
        // Non-object item in array: single unnamed column
        other => Row::from_pairs([("value".to_string(), json_value_to_cell(other))]),
    }
}

fn json_value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
