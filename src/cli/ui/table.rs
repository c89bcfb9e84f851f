use crate::cli::ui::style::UiStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn left(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            align: Align::Left,
        }
    }

    pub fn right(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            align: Align::Right,
        }
    }
}

/// Simple table model used for read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
            footer: None,
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    pub fn set_footer<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.footer = Some(cells.into_iter().map(|value| value.into()).collect());
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .chain(self.footer.iter())
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.header.chars().count(), column.min_width])
                    .max()
                    .unwrap_or(column.min_width)
            })
            .collect()
    }
}

/// Renders [`Table`] instances using padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render_lines(table: &Table, style: &UiStyle) -> Vec<String> {
        let widths = table.widths();
        let total_width = widths.iter().map(|width| width + 2).sum::<usize>();
        let mut lines = Vec::new();

        if let Some(title) = &table.title {
            lines.push(style.apply_header_style(title));
        }

        let headers: Vec<String> = table
            .columns
            .iter()
            .map(|column| column.header.clone())
            .collect();
        lines.push(style.apply_header_style(&format_row(&table.columns, &widths, &headers)));
        lines.push(style.horizontal_line(total_width));

        for row in &table.rows {
            lines.push(format_row(&table.columns, &widths, row));
        }

        if let Some(footer) = &table.footer {
            lines.push(style.horizontal_line(total_width));
            lines.push(style.apply_total_style(&format_row(&table.columns, &widths, footer)));
        }
        lines
    }

    pub fn render(table: &Table, style: &UiStyle) {
        for line in Self::render_lines(table, style) {
            println!("{line}");
        }
    }
}

fn format_row(columns: &[TableColumn], widths: &[usize], cells: &[String]) -> String {
    let mut line = String::new();
    for (idx, column) in columns.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        let width = widths[idx];
        match column.align {
            Align::Left => line.push_str(&format!("{:<width$}", cell)),
            Align::Right => line.push_str(&format!("{:>width$}", cell)),
        }
    }
    line.trim_end().to_string()
}
