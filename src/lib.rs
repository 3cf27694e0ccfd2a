//! Core of a picture-diary app: a drawing surface with brush, eraser and fill tools, a
//! photo-to-crayon filter, and a ruled-grid diary page exported as PNG.
//!
//! Hosts usually drive a [`Session`]:
//!
//! - feed pointer and text events to [`Session::dispatch`]
//! - load a photo with [`Session::load_image`] to replace the drawing with its crayon rendering
//! - export a finished page with [`Session::save`]
//!
//! The building blocks are public too, for hosts that manage their own state.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod export;
pub mod fill;
mod foundation;
pub mod grid;
pub mod raster;
pub mod render;
pub mod session;
pub mod stroke;
pub mod stylize;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{DiaryError, DiaryResult};

pub use crate::assets::decode::decode_image;
pub use crate::config::{DiaryConfig, ExportConfig, NoiseConfig, RowPolicy, StylizeConfig};
pub use crate::export::{DiaryEntry, ExportedImage, Weather, export_diary};
pub use crate::fill::{FillOutcome, flood_fill};
pub use crate::grid::{Cell, CellContent, cells_to_lines, layout};
pub use crate::raster::{BlendMode, PixelRect, Surface, composite_onto};
pub use crate::render::TextPainter;
pub use crate::session::{Effect, InputEvent, Session};
pub use crate::stroke::{BrushState, DEFAULT_PALETTE, Pen, StrokeEngine, Tool, map_client_point};
pub use crate::stylize::stylize;
