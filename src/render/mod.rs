//! Anti-aliased vector rasterization on top of `vello_cpu`.
//!
//! Shapes and glyphs are drawn into a scratch pixmap covering only the affected region, then
//! blended back onto a [`crate::raster::Surface`].

pub mod cpu;
pub mod text;

pub use cpu::ScratchCanvas;
pub use text::{HAlign, TextBrushRgba8, TextLayoutEngine, TextPainter, VAlign};
