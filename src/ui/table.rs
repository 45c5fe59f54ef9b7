//! Boxed table rendering for `check` output.

use console::measure_text_width;

/// A simple table for formatted output.
///
/// Widths are measured with ANSI styling stripped, so cells may be colored.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row to the table. Missing cells render empty.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        self.rows
            .push(row.iter().map(|s| s.as_ref().to_string()).collect());
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| measure_text_width(cell))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = vec![
            border(&widths, '┌', '┬', '┐'),
            render_row(&self.headers, &widths),
            border(&widths, '├', '┼', '┤'),
        ];
        lines.extend(self.rows.iter().map(|row| render_row(row, &widths)));
        lines.push(border(&widths, '└', '┴', '┘'));
        lines.join("\n")
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    let mid = mid.to_string();
    format!("{}{}{}", left, segments.join(mid.as_str()), right)
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::from("│");
    for (i, width) in widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(measure_text_width(cell));
        line.push_str(&format!(" {}{} │", cell, " ".repeat(pad)));
    }
    line
}
