//! Brush state and freehand stroking.

pub mod brush;
pub mod engine;

pub use brush::{BrushState, DEFAULT_PALETTE, Pen, Tool};
pub use engine::{StrokeEngine, draw_segment, map_client_point};
