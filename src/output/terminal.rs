//! Aligned terminal table output

use std::io::{IsTerminal, Write};

use termcolor::{Ansi, Color, ColorChoice, ColorSpec, NoColor, WriteColor};

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

/// Terminal output with a highlighted header
pub struct TerminalOutput {
    color_choice: ColorChoice,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            color_choice: ColorChoice::Auto,
        }
    }

    pub fn with_color_choice(color_choice: ColorChoice) -> Self {
        Self { color_choice }
    }

    fn use_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }

    fn write_grid<W: WriteColor>(&self, table: &Table, writer: &mut W) -> Result<()> {
        let columns = table.columns();
        if columns.is_empty() {
            writeln!(writer, "(empty table)")?;
            return Ok(());
        }

        let header: Vec<String> = columns.iter().map(|c| display_cell(c)).collect();
        let body: Vec<Vec<String>> = table
            .iter()
            .map(|row| columns.iter().map(|c| display_cell(row.get_or_default(c))).collect())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        if !table.heading().is_empty() {
            writeln!(writer, "{}", table.heading())?;
        }

        writeln!(writer, "{}", border('┌', '┬', '┐', &widths))?;

        writer.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Cyan)))?;
        write!(writer, "{}", line(&header, &widths))?;
        writer.reset()?;
        writeln!(writer)?;

        writeln!(writer, "{}", border('├', '┼', '┤', &widths))?;
        for row in &body {
            writeln!(writer, "{}", line(row, &widths))?;
        }
        writeln!(writer, "{}", border('└', '┴', '┘', &widths))?;

        writeln!(writer, "{} rows, {} columns", table.row_count(), widths.len())?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if self.use_color() {
            self.write_grid(table, &mut Ansi::new(writer))
        } else {
            self.write_grid(table, &mut NoColor::new(writer))
        }
    }
}

/// Keep each cell on one line
fn display_cell(value: &str) -> String {
    value.replace('\n', "\\n").replace('\t', "\\t")
}

fn border(left: char, mid: char, right: char, widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&mid.to_string()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("│");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('│');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use crate::output::render_to_string;

    #[test]
    fn test_plain_grid() {
        let table = Table::from_rows([
            Row::from_pairs([("id", "1"), ("name", "alice")]),
            Row::from_pairs([("id", "22")]),
        ]);
        let output = TerminalOutput::with_color_choice(ColorChoice::Never);
        let out = render_to_string(&output, &table).unwrap();
        let expected = "\
┌────┬───────┐
│ id │ name  │
├────┼───────┤
│ 1  │ alice │
│ 22 │       │
└────┴───────┘
2 rows, 2 columns
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_colored_header() {
        let table = Table::from_rows([Row::from_pairs([("id", "1")])]);
        let output = TerminalOutput::with_color_choice(ColorChoice::Always);
        let out = render_to_string(&output, &table).unwrap();
        assert!(out.contains("\x1b["));
    }

    #[test]
    fn test_empty_table() {
        let output = TerminalOutput::with_color_choice(ColorChoice::Never);
        let out = render_to_string(&output, &Table::new()).unwrap();
        assert_eq!(out, "(empty table)\n");
    }
}
