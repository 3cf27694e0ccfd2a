//! Character-grid layout shared by the live display and the export renderer.

pub mod layout;

pub use layout::{Cell, CellContent, cells_to_lines, layout, rows_used};
