use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::DiaryConfig,
    foundation::{
        core::{Canvas, Rgba8},
        error::{DiaryError, DiaryResult},
    },
    raster::{BlendMode, Surface, filter},
    stylize::layers::{Layers, color_layer, edge_layer, noise_layer},
};

/// Output size for a `src`-sized image that must fit inside `max`, plus the uniform scale.
///
/// Images that already fit are never enlarged.
pub fn fit_within(src: Canvas, max: Canvas) -> (Canvas, f64) {
    let scale = (f64::from(max.width) / f64::from(src.width))
        .min(f64::from(max.height) / f64::from(src.height))
        .min(1.0);
    let w = ((f64::from(src.width) * scale).round() as u32).clamp(1, max.width);
    let h = ((f64::from(src.height) * scale).round() as u32).clamp(1, max.height);
    (Canvas::new(w, h), scale)
}

/// Runs the full crayon stylization of `source`.
///
/// The returned surface is opaque and no larger than `config.max_canvas`.
#[tracing::instrument(skip_all, fields(width = source.width(), height = source.height()))]
pub fn stylize(source: &Surface, config: &DiaryConfig) -> DiaryResult<Surface> {
    let layers = stylize_layers(source, config)?;
    Ok(composite_layers(&layers))
}

/// Builds the color, edge and noise layers for `source` without compositing them.
pub fn stylize_layers(source: &Surface, config: &DiaryConfig) -> DiaryResult<Layers> {
    if source.canvas().is_empty() {
        return Err(DiaryError::invalid_input(format!(
            "source image has zero size ({}x{})",
            source.width(),
            source.height()
        )));
    }
    config.validate()?;

    let (target, scale) = fit_within(source.canvas(), config.max_canvas);
    tracing::debug!(
        out_width = target.width,
        out_height = target.height,
        scale,
        "stylize target"
    );

    let mut paper = source.clone();
    paper.flatten_onto(Rgba8::WHITE);
    let base = filter::resize(&paper, target.width, target.height)?;

    let edges = edge_layer(&base, &config.stylize);
    let color = color_layer(&paper, target, &config.stylize)?;
    let mut rng = match config.noise.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let noise = noise_layer(target, &config.noise, &mut rng);

    Ok(Layers { color, edges, noise })
}

/// Multiplies color, edges and noise (in that order) onto opaque white.
pub fn composite_layers(layers: &Layers) -> Surface {
    let mut out = Surface::filled(layers.color.width(), layers.color.height(), Rgba8::WHITE);
    for layer in [&layers.color, &layers.edges, &layers.noise] {
        out.composite(layer, BlendMode::Multiply, (0, 0));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/stylize/pipeline.rs"]
mod tests;
