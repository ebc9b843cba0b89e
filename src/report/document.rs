use anyhow::Result;

use crate::report::fonts::ResolvedFonts;
use crate::report::table::{Row, RowStyle, TableModel};

const PAGE_WIDTH: usize = 100;
const ROWS_PER_PAGE: usize = 40;
const PAGE_BREAK: char = '\u{0c}';

/// Renders a table model into a paginated plain-document byte stream.
///
/// The first page carries the title and info header; every page repeats the
/// column header above its dependency rows and ends with a numbered footer.
/// Output is never empty, even for a header-only model.
pub struct DocumentRenderer {
    rows_per_page: usize,
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self {
            rows_per_page: ROWS_PER_PAGE,
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page.max(1);
        self
    }

    pub fn render(&self, model: &TableModel, fonts: &ResolvedFonts) -> Result<Vec<u8>> {
        let header_rows: Vec<&Row> = model
            .rows
            .iter()
            .filter(|row| row.style != RowStyle::Dependency)
            .collect();
        let dependency_rows: Vec<&Row> = model.dependency_rows().collect();

        let column_header = header_rows
            .iter()
            .find(|row| row.style == RowStyle::ColumnHeader)
            .copied();
        let widths = column_widths(column_header, &dependency_rows);

        let page_count = dependency_rows.len().div_ceil(self.rows_per_page).max(1);
        let mut out = String::new();

        let pages: Vec<&[&Row]> = if dependency_rows.is_empty() {
            vec![&[]]
        } else {
            dependency_rows.chunks(self.rows_per_page).collect()
        };

        for (page, chunk) in pages.into_iter().enumerate() {
            if page > 0 {
                out.push(PAGE_BREAK);
            }

            if page == 0 {
                for row in &header_rows {
                    match row.style {
                        RowStyle::Title => {
                            out.push_str(&center(&row.cells[0], PAGE_WIDTH));
                            out.push('\n');
                            out.push_str(&"=".repeat(PAGE_WIDTH));
                            out.push('\n');
                        }
                        RowStyle::Info => {
                            out.push_str(&format!("{:<20} {}\n", row.cells[0], row.cells[1]));
                        }
                        RowStyle::ColumnHeader | RowStyle::Dependency => {}
                    }
                }
                out.push('\n');
            }

            if let Some(header) = column_header {
                out.push_str(&format_cells(&header.cells, &widths));
                out.push('\n');
                out.push_str(&"-".repeat(PAGE_WIDTH));
                out.push('\n');
            }

            for row in chunk {
                out.push_str(&format_cells(&row.cells, &widths));
                out.push('\n');
            }

            out.push_str(&format!(
                "\n{}\n",
                center(
                    &format!(
                        "page {} of {} - font: {}",
                        page + 1,
                        page_count,
                        fonts.regular_name()
                    ),
                    PAGE_WIDTH
                )
            ));
        }

        Ok(out.into_bytes())
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn column_widths(header: Option<&Row>, rows: &[&Row]) -> Vec<usize> {
    let column_count = header
        .map(|row| row.cells.len())
        .or_else(|| rows.first().map(|row| row.cells.len()))
        .unwrap_or(0);
    let mut widths = vec![0usize; column_count];
    for row in header.into_iter().chain(rows.iter().copied()) {
        for (index, cell) in row.cells.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(cell.chars().count());
            }
        }
    }
    widths
}

fn format_cells(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let width = widths.get(index).copied().unwrap_or(cell.len());
            format!("{:<width$}", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn center(text: &str, width: usize) -> String {
    let length = text.chars().count();
    if length >= width {
        return text.to_string();
    }
    let padding = (width - length) / 2;
    format!("{}{}", " ".repeat(padding), text)
}
