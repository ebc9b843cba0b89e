/// Backend-agnostic table model produced by the report builder and consumed
/// by a document renderer. Rows are ordered; a renderer may repaginate or
/// regroup them but never reinterprets their content.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    /// Report title, spans the full width.
    Title,
    /// Aggregate summary line, label + value.
    Info,
    /// Column header, repeated on every page.
    ColumnHeader,
    /// One dependency relation.
    Dependency,
}

#[derive(Debug, Clone)]
pub struct Row {
    pub style: RowStyle,
    pub cells: Vec<String>,
}

impl Row {
    pub fn title(text: &str) -> Self {
        Self {
            style: RowStyle::Title,
            cells: vec![text.to_string()],
        }
    }

    pub fn info(label: &str, value: &str) -> Self {
        Self {
            style: RowStyle::Info,
            cells: vec![label.to_string(), value.to_string()],
        }
    }

    pub fn column_header(cells: &[&str]) -> Self {
        Self {
            style: RowStyle::ColumnHeader,
            cells: cells.iter().map(|cell| cell.to_string()).collect(),
        }
    }

    pub fn dependency(cells: Vec<String>) -> Self {
        Self {
            style: RowStyle::Dependency,
            cells,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableModel {
    pub rows: Vec<Row>,
}

impl TableModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn dependency_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .filter(|row| row.style == RowStyle::Dependency)
    }
}
