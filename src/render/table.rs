// src/render/table.rs

//! Plain-text tables with optional per-segment styling
//!
//! Column widths are computed from the unstyled text, so styled and
//! unstyled tables line up identically.

use super::paint;
use console::{Style, measure_text_width};

const COLUMN_SEPARATOR: &str = " | ";

/// One table cell made of text segments, each with an optional style
#[derive(Debug, Clone, Default)]
pub struct Cell {
    segments: Vec<(String, Option<Style>)>,
}

impl Cell {
    /// Cell with a single unstyled segment
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            segments: vec![(text.into(), None)],
        }
    }

    /// Cell with a single styled segment
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            segments: vec![(text.into(), Some(style))],
        }
    }

    /// Append a segment
    pub fn push(mut self, text: impl Into<String>, style: Option<Style>) -> Self {
        self.segments.push((text.into(), style));
        self
    }

    /// Unstyled text of the cell
    pub fn text(&self) -> String {
        self.segments.iter().map(|(text, _)| text.as_str()).collect()
    }

    /// Display width of the unstyled text
    pub fn width(&self) -> usize {
        measure_text_width(&self.text())
    }

    fn render(&self, styled: bool) -> String {
        self.segments
            .iter()
            .map(|(text, style)| match style {
                Some(style) => paint(text, style, styled),
                None => text.clone(),
            })
            .collect()
    }
}

/// A table with a fixed header row
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one cell per header
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row/header length mismatch");
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest unstyled value per column, headers included
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    /// Render the header and every row as lines
    ///
    /// Headers are bold when `styled`. The last column is not padded.
    pub fn render(&self, styled: bool) -> Vec<String> {
        let widths = self.column_widths();
        let bold = Style::new().bold();

        let header_cells: Vec<(String, usize)> = self
            .headers
            .iter()
            .map(|h| (paint(h, &bold, styled), measure_text_width(h)))
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(join_padded(&header_cells, &widths));
        for row in &self.rows {
            let cells: Vec<(String, usize)> = row
                .iter()
                .map(|cell| (cell.render(styled), cell.width()))
                .collect();
            lines.push(join_padded(&cells, &widths));
        }
        lines
    }
}

fn join_padded(cells: &[(String, usize)], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, ((rendered, plain_width), width))| {
            if i == last {
                rendered.clone()
            } else {
                format!("{}{}", rendered, " ".repeat(width.saturating_sub(*plain_width)))
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Name", "Version", "Identifier"]);
        table.push_row(vec![
            Cell::plain("nginx"),
            Cell::plain("1.24.0"),
            Cell::plain("acme").push("/", None).push("web", None),
        ]);
        table.push_row(vec![
            Cell::plain("a-much-longer-name"),
            Cell::plain("None"),
            Cell::plain("acme/tools"),
        ]);
        table
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(sample().column_widths(), vec![18, 7, 10]);
    }

    #[test]
    fn test_render_plain() {
        let lines = sample().render(false);
        assert_eq!(
            lines,
            vec![
                "Name               | Version | Identifier",
                "nginx              | 1.24.0  | acme/web",
                "a-much-longer-name | None    | acme/tools",
            ]
        );
    }

    #[test]
    fn test_styled_render_keeps_alignment() {
        let mut table = Table::new(["A", "B"]);
        table.push_row(vec![Cell::styled("x", Style::new().cyan()), Cell::plain("y")]);
        table.push_row(vec![Cell::plain("long"), Cell::plain("z")]);

        let lines = table.render(true);
        let stripped: Vec<String> = lines
            .iter()
            .map(|l| console::strip_ansi_codes(l).to_string())
            .collect();
        assert_eq!(stripped, table.render(false));
        assert_ne!(lines, table.render(false));
    }

    #[test]
    fn test_cell_text() {
        let cell = Cell::plain("owner").push("/", None).push("slug", Some(Style::new().magenta()));
        assert_eq!(cell.text(), "owner/slug");
        assert_eq!(cell.width(), 10);
    }
}
