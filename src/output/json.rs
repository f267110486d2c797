//! JSON output format

use std::io::Write;

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

/// JSON output formatter: an array with one object per row
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, table.rows())?;
        } else {
            serde_json::to_writer(&mut *writer, table.rows())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use crate::output::render_to_string;

    #[test]
    fn test_array_of_objects() {
        let table = Table::from_rows([
            Row::from_pairs([("id", "1"), ("quote", "say \"hi\"")]),
            Row::from_pairs([("id", "2")]),
        ]);
        let out = render_to_string(&JsonOutput::compact(), &table).unwrap();
        assert_eq!(
            out,
            "[{\"id\":\"1\",\"quote\":\"say \\\"hi\\\"\"},{\"id\":\"2\"}]\n"
        );
    }

    #[test]
    fn test_table_to_json_parses_back() {
        let table = Table::from_rows([Row::from_pairs([("a", "x")])]);
        let json = table.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["a"], "x");
    }
}
