use super::style::UiStyle;

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align_right: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
            align_right: false,
        }
    }

    /// Right-aligned column, used for amounts.
    pub fn numeric(header: impl Into<String>, width: usize) -> Self {
        Self {
            align_right: true,
            ..Self::new(header, width)
        }
    }

    fn pad(&self, cell: &str) -> String {
        if self.align_right {
            format!("{:>width$}", cell, width = self.width)
        } else {
            format!("{:width$}", cell, width = self.width)
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    /// Renders the table as padded columns, one line per row.
    pub fn render(&self, style: &UiStyle) -> String {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(style.header(title));
        }

        if !self.columns.is_empty() {
            let total_width = self
                .columns
                .iter()
                .map(|col| col.width + 1)
                .sum::<usize>()
                .max(1);
            let header = self
                .columns
                .iter()
                .map(|col| col.pad(&col.header))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(style.apply_header_style(header.trim_end()));
            lines.push(style.horizontal_line(total_width));
        }

        for row in &self.rows {
            let line = self
                .columns
                .iter()
                .enumerate()
                .map(|(idx, column)| column.pad(row.get(idx).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(line.trim_end().to_string());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
