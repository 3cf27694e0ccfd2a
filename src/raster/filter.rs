//! Per-pixel color filters and resampling used by the stylization layers.
//!
//! Color filters touch RGB only and leave alpha alone. Factors follow the usual CSS filter
//! definitions so `contrast(1.0)` or `saturate(1.0)` are identities.

use crate::{
    foundation::error::{DiaryError, DiaryResult},
    raster::surface::{Surface, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

const LUMA: [f32; 3] = [0.2126, 0.7152, 0.0722];

pub fn grayscale(surface: &mut Surface) {
    map_rgb(surface, |[r, g, b]| {
        let y = LUMA[0] * r + LUMA[1] * g + LUMA[2] * b;
        [y, y, y]
    });
}

pub fn invert(surface: &mut Surface) {
    for px in surface.data_mut().chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = 255 - *c;
        }
    }
}

/// Scales channel values around mid-gray by `amount`.
pub fn contrast(surface: &mut Surface, amount: f32) {
    map_rgb(surface, |rgb| rgb.map(|c| (c - 127.5) * amount + 127.5));
}

/// Multiplies channel values by `amount`.
pub fn brightness(surface: &mut Surface, amount: f32) {
    map_rgb(surface, |rgb| rgb.map(|c| c * amount));
}

pub fn saturate(surface: &mut Surface, amount: f32) {
    let s = amount;
    let m = [
        [
            0.213 + 0.787 * s,
            0.715 - 0.715 * s,
            0.072 - 0.072 * s,
        ],
        [
            0.213 - 0.213 * s,
            0.715 + 0.285 * s,
            0.072 - 0.072 * s,
        ],
        [
            0.213 - 0.213 * s,
            0.715 - 0.715 * s,
            0.072 + 0.928 * s,
        ],
    ];
    map_rgb(surface, |[r, g, b]| {
        [
            m[0][0] * r + m[0][1] * g + m[0][2] * b,
            m[1][0] * r + m[1][1] * g + m[1][2] * b,
            m[2][0] * r + m[2][1] * g + m[2][2] * b,
        ]
    });
}

/// Gaussian blur with standard deviation `sigma_px`. The kernel spans `ceil(3 * sigma)` pixels
/// on each side and edges are clamped.
pub fn blur(surface: &mut Surface, sigma_px: f32) -> DiaryResult<()> {
    if sigma_px == 0.0 {
        return Ok(());
    }
    if !sigma_px.is_finite() || sigma_px < 0.0 {
        return Err(DiaryError::validation("blur sigma must be finite and >= 0"));
    }
    let dims = (surface.width() as usize, surface.height() as usize);
    if dims.0 == 0 || dims.1 == 0 {
        return Ok(());
    }
    let weights = gaussian_weights(sigma_px);

    // Blur premultiplied so transparent pixels don't bleed their color.
    let data = surface.data_mut();
    premultiply_rgba8_in_place(data);
    let mut tmp = vec![0u8; data.len()];
    convolve_axis(data, &mut tmp, dims, &weights, Axis::Horizontal);
    convolve_axis(&tmp, data, dims, &weights, Axis::Vertical);
    unpremultiply_rgba8_in_place(data);
    Ok(())
}

/// Resamples to `width` x `height` with a triangle (bilinear) filter.
pub fn resize(surface: &Surface, width: u32, height: u32) -> DiaryResult<Surface> {
    if width == 0 || height == 0 {
        return Err(DiaryError::invalid_input(format!(
            "cannot resize to {width}x{height}"
        )));
    }
    if width == surface.width() && height == surface.height() {
        return Ok(surface.clone());
    }
    let img = surface.to_rgba_image()?;
    let out = image::imageops::resize(&img, width, height, image::imageops::FilterType::Triangle);
    Ok(Surface::from_rgba_image(out))
}

fn map_rgb(surface: &mut Surface, f: impl Fn([f32; 3]) -> [f32; 3]) {
    for px in surface.data_mut().chunks_exact_mut(4) {
        let out = f([f32::from(px[0]), f32::from(px[1]), f32::from(px[2])]);
        for (c, v) in px[..3].iter_mut().zip(out) {
            *c = v.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Normalized weights for offsets `-r..=r`, `r = ceil(3 * sigma)`.
fn gaussian_weights(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as i32;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|d| match d {
            0 => 1.0,
            _ => (-((d * d) as f32) / two_sigma_sq).exp(),
        })
        .collect();
    // The center weight is 1, so the total is never zero.
    let total: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// One separable pass over RGBA8 rows or columns, clamping samples at the borders.
fn convolve_axis(src: &[u8], dst: &mut [u8], (w, h): (usize, usize), weights: &[f32], axis: Axis) {
    let radius = (weights.len() / 2) as isize;
    let (len, stride) = match axis {
        Axis::Horizontal => (w as isize, 4),
        Axis::Vertical => (h as isize, w * 4),
    };
    for (i, out) in dst.chunks_exact_mut(4).enumerate() {
        let pos = match axis {
            Axis::Horizontal => i % w,
            Axis::Vertical => i / w,
        };
        let line_start = i * 4 - pos * stride;
        let mut acc = [0.0f32; 4];
        for (k, &weight) in weights.iter().enumerate() {
            let at = (pos as isize + k as isize - radius).clamp(0, len - 1) as usize;
            let px = &src[line_start + at * stride..][..4];
            for (a, &c) in acc.iter_mut().zip(px) {
                *a += weight * f32::from(c);
            }
        }
        for (o, a) in out.iter_mut().zip(acc) {
            *o = a.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/filter.rs"]
mod tests;
