//! Inferred column types, one line per column

use std::io::Write;

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

pub struct SchemaOutput;

impl OutputFormatter for SchemaOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let schema = table.schema();
        let width = schema
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for column in &schema {
            writeln!(
                writer,
                "{:width$}  {}",
                column.name,
                column.column_type.sql_type(),
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Delimiter;
    use crate::output::render_to_string;

    #[test]
    fn test_schema_lines() {
        let table = Table::parse_str("id,label\n1,a\nnull,b\n", Delimiter::Comma);
        let out = render_to_string(&SchemaOutput, &table).unwrap();
        assert_eq!(out, "id     INT NULL\nlabel  varchar(255) NOT NULL\n");
    }
}
