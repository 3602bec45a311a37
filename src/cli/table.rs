use colored::Colorize;

use crate::cli::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: &'static str,
    pub align: Align,
}

impl TableColumn {
    pub const fn left(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Right,
        }
    }
}

/// Plain text table sized to its widest cell per column.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Lines without styling: header, rule, then one line per row.
    pub fn lines(&self) -> Vec<String> {
        let widths = self.widths();
        let render = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, column), width)| pad(cell, *width, column.align))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render(self.columns.iter().map(|column| column.header).collect()));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            let cells = (0..self.columns.len())
                .map(|index| row.get(index).map(String::as_str).unwrap_or(""))
                .collect();
            lines.push(render(cells));
        }
        lines
    }

    pub fn print(&self) {
        let plain = output::preferences().plain;
        for (index, line) in self.lines().into_iter().enumerate() {
            if index == 0 && !plain {
                output::line(line.bold());
            } else {
                output::line(line);
            }
        }
    }
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    match align {
        Align::Left => format!("{cell}{}", " ".repeat(fill)),
        Align::Right => format!("{}{cell}", " ".repeat(fill)),
    }
}
