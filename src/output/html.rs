//! HTML table output

use std::fmt::Write as _;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

/// Optional CSS classes for the generated markup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlClasses {
    pub table: Option<String>,
    pub header_row: Option<String>,
    pub row: Option<String>,
}

/// HTML `<table>` output
pub struct HtmlOutput {
    classes: HtmlClasses,
}

impl HtmlOutput {
    pub fn new(classes: HtmlClasses) -> Self {
        Self { classes }
    }

    /// Build the `<table>` markup. Every column appears in every row; absent
    /// keys become empty cells.
    pub fn table_markup(&self, table: &Table) -> String {
        let columns = table.columns();
        let mut html = String::new();

        let _ = write!(html, "<table{}>", class_attr(&self.classes.table));
        if !table.heading().is_empty() {
            let _ = write!(html, "<caption>{}</caption>", html_escape(table.heading()));
        }

        let _ = write!(html, "<tr{}>", class_attr(&self.classes.header_row));
        for header in columns.iter() {
            let _ = write!(html, "<th>{}</th>", html_escape(header));
        }
        html.push_str("</tr>");

        let row_class = class_attr(&self.classes.row);
        for row in table {
            let _ = write!(html, "<tr{}>", row_class);
            for header in columns.iter() {
                let _ = write!(html, "<td>{}</td>", html_escape(row.get_or_default(header)));
            }
            html.push_str("</tr>");
        }

        html.push_str("</table>");
        html
    }
}

impl Default for HtmlOutput {
    fn default() -> Self {
        Self::new(HtmlClasses::default())
    }
}

impl OutputFormatter for HtmlOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "{}", self.table_markup(table))?;
        Ok(())
    }
}

fn class_attr(class: &Option<String>) -> String {
    match class.as_deref() {
        Some(c) if !c.is_empty() => format!(" class=\"{}\"", html_escape(c)),
        _ => String::new(),
    }
}

fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    #[test]
    fn test_plain_markup() {
        let table = Table::from_rows([
            Row::from_pairs([("a", "1"), ("b", "<2>")]),
            Row::from_pairs([("a", "3")]),
        ]);
        let html = table.to_html(&HtmlClasses::default());
        assert_eq!(
            html,
            "<table><tr><th>a</th><th>b</th></tr>\
             <tr><td>1</td><td>&lt;2&gt;</td></tr>\
             <tr><td>3</td><td></td></tr></table>"
        );
    }

    #[test]
    fn test_classes_and_heading() {
        let mut table = Table::from_rows([Row::from_pairs([("a", "1")])]);
        table.set_heading("Totals");
        let classes = HtmlClasses {
            table: Some("grid".into()),
            header_row: Some("head".into()),
            row: Some(String::new()),
        };
        let html = table.to_html(&classes);
        assert!(html.starts_with("<table class=\"grid\"><caption>Totals</caption><tr class=\"head\">"));
        assert!(html.contains("<tr><td>1</td></tr>"));
    }
}
