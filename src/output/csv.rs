//! Delimited text writer (the save format)

use std::io::Write;

use crate::error::Result;
use crate::model::{Delimiter, Table};

use super::OutputFormatter;

/// Writes a header line then one line per row.
///
/// Values containing a newline, comma, quote or the active delimiter are
/// wrapped in quotes. Embedded quotes are not doubled, so such values do not
/// survive a save/open round trip unchanged.
pub struct CsvOutput {
    delimiter: Delimiter,
}

impl CsvOutput {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    /// Write `table` to `writer` and flush it
    pub fn write_table<W: Write>(&self, table: &Table, mut writer: W) -> Result<()> {
        let columns = table.columns();
        if columns.is_empty() {
            return writer.flush().map_err(Into::into);
        }

        self.write_line(&mut writer, columns.iter().map(String::as_str))?;
        for row in table {
            self.write_line(&mut writer, columns.iter().map(|c| row.get_or_default(c)))?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_line<'a, W: Write>(
        &self,
        writer: &mut W,
        values: impl Iterator<Item = &'a str>,
    ) -> Result<()> {
        for (i, value) in values.enumerate() {
            if i > 0 {
                write!(writer, "{}", self.delimiter)?;
            }
            if self.needs_quoting(value) {
                write!(writer, "\"{}\"", value)?;
            } else {
                writer.write_all(value.as_bytes())?;
            }
        }
        writeln!(writer)?;
        Ok(())
    }

    fn needs_quoting(&self, value: &str) -> bool {
        value.contains(['\n', ',', '"']) || value.contains(self.delimiter.as_char())
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        self.write_table(table, writer)
    }
}
