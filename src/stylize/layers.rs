use rand::Rng;

use crate::{
    config::{NoiseConfig, StylizeConfig},
    foundation::{
        core::{Canvas, Rgba8},
        error::DiaryResult,
    },
    raster::{BlendMode, Surface, filter},
};

/// RGB of a paper-grain speck.
const GRAIN_RGB: [u8; 3] = [16, 16, 16];

/// The three intermediate layers, all sized to the output canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layers {
    pub color: Surface,
    pub edges: Surface,
    pub noise: Surface,
}

/// Dark lines where `base` changes quickly, white where it is flat.
///
/// `base` must already be at output size and opaque.
pub fn edge_layer(base: &Surface, cfg: &StylizeConfig) -> Surface {
    let off = cfg.edge_offset_px;
    let mut edges = base.clone();
    edges.composite(&base.shifted(off, off), BlendMode::Difference, (0, 0));

    filter::grayscale(&mut edges);
    filter::brightness(&mut edges, cfg.edge_gain);
    filter::invert(&mut edges);
    filter::contrast(&mut edges, cfg.edge_contrast);
    edges
}

/// Flat, bleeding color patches derived from the opaque `paper` image.
pub fn color_layer(paper: &Surface, target: Canvas, cfg: &StylizeConfig) -> DiaryResult<Surface> {
    let small_w = target.width.div_ceil(cfg.color_downsample).max(1);
    let small_h = target.height.div_ceil(cfg.color_downsample).max(1);
    let small = filter::resize(paper, small_w, small_h)?;

    let bleed = cfg.color_bleed_px;
    let mut patches = filter::resize(
        &small,
        target.width + 2 * bleed,
        target.height + 2 * bleed,
    )?;
    filter::saturate(&mut patches, cfg.saturation);
    filter::contrast(&mut patches, cfg.color_contrast);
    filter::blur(&mut patches, cfg.blur_px)?;

    let mut layer = Surface::filled(target.width, target.height, Rgba8::WHITE);
    let bleed = i32::try_from(bleed).unwrap_or(i32::MAX);
    layer.composite(&patches, BlendMode::SourceOver, (-bleed, -bleed));
    tracing::debug!(small_w, small_h, "color layer");
    Ok(layer)
}

/// Transparent surface where each pixel independently becomes a faint dark speck with
/// probability `cfg.probability`.
pub fn noise_layer(target: Canvas, cfg: &NoiseConfig, rng: &mut impl Rng) -> Surface {
    let mut layer = Surface::new(target.width, target.height);
    if cfg.probability <= 0.0 || cfg.alpha == 0 {
        return layer;
    }
    let p = f64::from(cfg.probability).min(1.0);
    let speck = [GRAIN_RGB[0], GRAIN_RGB[1], GRAIN_RGB[2], cfg.alpha];
    for px in layer.data_mut().chunks_exact_mut(4) {
        if rng.gen_bool(p) {
            px.copy_from_slice(&speck);
        }
    }
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/stylize/layers.rs"]
mod tests;
