//! Raster surfaces and the per-pixel operations every tool builds on.

pub mod blend;
pub mod filter;
pub mod surface;

pub use blend::{BlendMode, composite_onto};
pub use surface::{PixelRect, Surface};
