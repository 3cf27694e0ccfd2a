use anyhow::Context;

use crate::{
    foundation::error::{DiaryError, DiaryResult},
    raster::Surface,
};

/// Decodes an encoded image (PNG, JPEG, ...) into a straight-alpha RGBA8 surface.
///
/// Undecodable bytes and zero-size images are reported as [`DiaryError::InvalidInput`].
pub fn decode_image(bytes: &[u8]) -> DiaryResult<Surface> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| DiaryError::invalid_input(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DiaryError::invalid_input(format!(
            "decoded image has zero size ({width}x{height})"
        )));
    }
    tracing::debug!(width, height, "decoded source image");
    Ok(Surface::from_rgba_image(rgba))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
