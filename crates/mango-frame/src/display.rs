use std::fmt;

use mango_columnar::Series;

use crate::frame::DataFrame;

const ELLIPSIS: &str = "…";

/// Limits applied when rendering a [`DataFrame`] as a text table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Rows past this count are elided. The first and last rows stay visible.
    pub max_rows: usize,
    /// Cells wider than this many characters are cut and end in `…`.
    pub max_col_width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            max_rows: 20,
            max_col_width: 32,
        }
    }
}

/// A [`DataFrame`] paired with display limits; see [`DataFrame::display_with`].
pub struct FrameDisplay<'a> {
    frame: &'a DataFrame,
    options: DisplayOptions,
}

impl DataFrame {
    pub fn display_with(&self, options: DisplayOptions) -> FrameDisplay<'_> {
        FrameDisplay {
            frame: self,
            options,
        }
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(DisplayOptions::default()), f)
    }
}

/// Row indices to print, with `None` marking the elided block.
fn visible_rows(height: usize, max_rows: usize) -> Vec<Option<usize>> {
    if height <= max_rows {
        return (0..height).map(Some).collect();
    }
    let tail = max_rows / 2;
    let head = max_rows - tail;
    (0..head)
        .map(Some)
        .chain(std::iter::once(None))
        .chain((height - tail..height).map(Some))
        .collect()
}

fn cell_text(column: &Series, row: usize, max_width: usize) -> String {
    let text = match column.value(row) {
        Ok(Some(value)) => value.to_string(),
        _ => "null".to_owned(),
    };
    truncate(text, max_width)
}

fn truncate(text: String, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text;
    }
    let keep = max_width.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

fn separator(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
    f.write_str("+")?;
    for width in widths {
        write!(f, "{}+", "-".repeat(width + 2))?;
    }
    writeln!(f)
}

fn line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    f.write_str("|")?;
    for (cell, width) in cells.iter().zip(widths) {
        write!(f, " {cell:<width$} |")?;
    }
    writeln!(f)
}

impl fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.frame.columns();
        if columns.is_empty() {
            return writeln!(f, "empty data frame");
        }

        let max_width = self.options.max_col_width.max(1);
        let rows = visible_rows(self.frame.height(), self.options.max_rows);

        let names: Vec<String> = columns
            .iter()
            .map(|c| truncate(c.name().to_owned(), max_width))
            .collect();
        let types: Vec<String> = columns
            .iter()
            .map(|c| c.dtype().short_name().to_owned())
            .collect();
        let body: Vec<Option<Vec<String>>> = rows
            .iter()
            .map(|row| {
                row.map(|row| {
                    columns
                        .iter()
                        .map(|c| cell_text(c, row, max_width))
                        .collect()
                })
            })
            .collect();

        let mut widths: Vec<usize> = names
            .iter()
            .zip(&types)
            .map(|(n, t)| n.chars().count().max(t.len()))
            .collect();
        for cells in body.iter().flatten() {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        separator(f, &widths)?;
        line(f, &names, &widths)?;
        line(f, &types, &widths)?;
        separator(f, &widths)?;
        for cells in &body {
            match cells {
                Some(cells) => line(f, cells, &widths)?,
                None => line(f, &vec![ELLIPSIS.to_owned(); widths.len()], &widths)?,
            }
            separator(f, &widths)?;
        }
        Ok(())
    }
}
