//! Pipe- and tab-delimited table detection.

use serde::Serialize;

/// A detected table: first row as headers, the rest as body rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Render as a `<table>` fragment with escaped cells.
    pub fn to_html(&self) -> String {
        use crate::utils::html_escape;

        let mut html = String::from("<table><thead><tr>");
        for header in &self.headers {
            html.push_str(&format!("<th>{}</th>", html_escape(header)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");
        html
    }
}

/// Split a delimited line into trimmed non-empty cells.
///
/// Returns `None` for lines with neither `|` nor a tab. Pipes take
/// precedence when both are present.
fn split_cells(line: &str) -> Option<Vec<String>> {
    let delimiter = if line.contains('|') {
        '|'
    } else if line.contains('\t') {
        '\t'
    } else {
        return None;
    };

    Some(
        line.split(delimiter)
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Find every run of two or more consecutive delimited rows.
///
/// A delimited line with fewer than two cells is skipped without closing
/// the current run; only a line with no delimiter closes it.
pub fn extract_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.split('\n') {
        match split_cells(line) {
            Some(cells) => {
                if cells.len() >= 2 {
                    current.push(cells);
                }
            }
            None => flush(&mut current, &mut tables),
        }
    }
    flush(&mut current, &mut tables);

    tables
}

fn flush(current: &mut Vec<Vec<String>>, tables: &mut Vec<Table>) {
    if current.len() >= 2 {
        let mut rows = std::mem::take(current);
        let headers = rows.remove(0);
        tables.push(Table { headers, rows });
    } else {
        current.clear();
    }
}
