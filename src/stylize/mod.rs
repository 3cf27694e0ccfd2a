//! Photo-to-crayon stylization.
//!
//! A source photo is reduced to three layers at the output size and multiplied onto white
//! paper:
//!
//! 1. **Color**: the photo shrunk hard and scaled back up, saturated and blurred into flat
//!    patches that overhang the canvas edges.
//! 2. **Edges**: the photo differenced against a shifted copy of itself, then turned into dark
//!    lines on white.
//! 3. **Noise**: sparse, faint specks of paper grain.
//!
//! Multiply only darkens, so every layer can add pigment and none can remove it.

pub mod layers;
pub mod pipeline;

pub use layers::{Layers, color_layer, edge_layer, noise_layer};
pub use pipeline::{composite_layers, fit_within, stylize, stylize_layers};
