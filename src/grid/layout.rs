use unicode_segmentation::UnicodeSegmentation;

use crate::foundation::error::{DiaryError, DiaryResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellContent {
    /// One user-perceived character (grapheme cluster).
    Glyph(String),
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub content: CellContent,
}

impl Cell {
    pub fn glyph(&self) -> Option<&str> {
        match &self.content {
            CellContent::Glyph(g) => Some(g),
            CellContent::Blank => None,
        }
    }
}

fn is_line_break(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}

/// Lays `text` out on a grid `max_cols` wide.
///
/// Each grapheme takes one cell and wraps at `max_cols`. A line break fills the rest of the
/// current row with blanks; a break right after a full row therefore yields an empty row. The
/// final row is padded with blanks so the result is always a whole number of rows.
pub fn layout(text: &str, max_cols: u32) -> DiaryResult<Vec<Cell>> {
    if max_cols == 0 {
        return Err(DiaryError::invalid_input("grid needs at least one column"));
    }

    let mut grid = GridWriter {
        cells: Vec::new(),
        row: 0,
        col: 0,
        max_cols,
    };
    for g in text.graphemes(true) {
        if is_line_break(g) {
            grid.finish_row();
        } else {
            grid.push(CellContent::Glyph(g.to_string()));
        }
    }
    if grid.col != 0 {
        grid.finish_row();
    }
    Ok(grid.cells)
}

struct GridWriter {
    cells: Vec<Cell>,
    row: u32,
    col: u32,
    max_cols: u32,
}

impl GridWriter {
    fn push(&mut self, content: CellContent) {
        self.cells.push(Cell {
            row: self.row,
            col: self.col,
            content,
        });
        self.col += 1;
        if self.col == self.max_cols {
            self.col = 0;
            self.row += 1;
        }
    }

    /// Blanks out the rest of the current row, or a whole row when at column 0.
    fn finish_row(&mut self) {
        let remaining = self.max_cols - self.col;
        for _ in 0..remaining {
            self.push(CellContent::Blank);
        }
    }
}

/// Number of rows a layout occupies.
pub fn rows_used(cells: &[Cell]) -> u32 {
    cells.last().map_or(0, |c| c.row + 1)
}

/// Reads a grid back into text lines, one per row, dropping blanks.
pub fn cells_to_lines(cells: &[Cell]) -> Vec<String> {
    let mut lines = vec![String::new(); rows_used(cells) as usize];
    for cell in cells {
        if let (Some(line), Some(g)) = (lines.get_mut(cell.row as usize), cell.glyph()) {
            line.push_str(g);
        }
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/grid/layout.rs"]
mod tests;
