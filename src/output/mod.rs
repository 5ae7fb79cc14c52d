use std::fmt;

use crate::{
    engine::AggregateResult,
    row::{Row, parse_number},
    source::Table,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

impl fmt::Display for AggregateResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}({}) = ", self.function, self.column)?;
        match self.value {
            Some(value) if value.is_nan() => f.write_str("nan"),
            // Debug keeps the fractional part, so 674 prints as `674.0`.
            Some(value) => write!(f, "{value:?}"),
            None => f.write_str("None"),
        }
    }
}

/// Renders a grid table: `+---+` borders, a `+===+` rule under the header.
pub fn render_table(table: &Table) -> String {
    let columns = &table.headers;
    if columns.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| row_cells(row, columns))
        .collect();
    let widths = compute_widths(columns, &cells);
    let aligns = compute_aligns(columns.len(), &cells);

    let header: Vec<&str> = columns.iter().map(String::as_str).collect();
    let mut lines = vec![
        format_rule(&widths, '-'),
        format_row(&header, &widths, &aligns),
        format_rule(&widths, '='),
    ];
    for row in &cells {
        lines.push(format_row(row, &widths, &aligns));
        lines.push(format_rule(&widths, '-'));
    }
    if cells.is_empty() {
        lines.pop();
        lines.push(format_rule(&widths, '-'));
    }

    lines.join("\n")
}

fn row_cells<'a>(
    row: &'a Row,
    columns: &[String],
) -> Vec<&'a str> {
    columns
        .iter()
        .map(|column| row.get(column).map_or("", |cell| cell.as_str()))
        .collect()
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn compute_widths(
    columns: &[String],
    cells: &[Vec<&str>],
) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| display_width(row[index]))
                .fold(display_width(column), usize::max)
        })
        .collect()
}

// A column is numeric when it has at least one value and every non-empty
// value parses as a number.
fn compute_aligns(
    column_count: usize,
    cells: &[Vec<&str>],
) -> Vec<Align> {
    (0..column_count)
        .map(|index| {
            let mut values = cells
                .iter()
                .map(|row| row[index])
                .filter(|value| !value.trim().is_empty())
                .peekable();
            let numeric = values.peek().is_some()
                && values.all(|value| parse_number(value).is_some());
            if numeric { Align::Right } else { Align::Left }
        })
        .collect()
}

fn format_row(
    cells: &[&str],
    widths: &[usize],
    aligns: &[Align],
) -> String {
    let mut out = String::from("|");
    for ((cell, width), align) in cells.iter().zip(widths).zip(aligns) {
        let padding = " ".repeat(width.saturating_sub(display_width(cell)));
        out.push(' ');
        match align {
            Align::Left => {
                out.push_str(cell);
                out.push_str(&padding);
            }
            Align::Right => {
                out.push_str(&padding);
                out.push_str(cell);
            }
        }
        out.push_str(" |");
    }
    out
}

fn format_rule(
    widths: &[usize],
    fill: char,
) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.extend(std::iter::repeat_n(fill, width + 2));
        out.push('+');
    }
    out
}
