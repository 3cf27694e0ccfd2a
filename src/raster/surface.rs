use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{DiaryError, DiaryResult},
    raster::blend::{BlendMode, composite_onto},
};

/// Integer pixel rectangle. May extend past a surface; operations clip it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open `(x0, y0, x1, y1)` span of this rect inside `canvas`, if any pixel overlaps.
    pub fn clip_to(self, canvas: Canvas) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(i64::from(canvas.width));
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(i64::from(canvas.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Mutable RGBA8 raster in row-major order with straight (unassociated) alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let data = color.to_array().repeat(Canvas::new(width, height).area());
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> DiaryResult<Self> {
        let expected_len = byte_len(width, height)?;
        if data.len() != expected_len {
            return Err(DiaryError::evaluation(format!(
                "rgba8 buffer has {} bytes, expected {expected_len} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`, or `None` outside the surface.
    pub fn offset_of(&self, x: i64, y: i64) -> Option<usize> {
        if !self.canvas().contains(x, y) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgba8> {
        let i = self.offset_of(x, y)?;
        Some(Rgba8::from_array([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    /// Overwrites one pixel. Writes outside the surface are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: Rgba8) {
        if let Some(i) = self.offset_of(x, y) {
            self.data[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Overwrites every pixel of `rect` (clipped) with `color`. No blending.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba8) {
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.canvas()) else {
            return;
        };
        let px = color.to_array();
        let stride = self.width as usize * 4;
        for y in y0 as usize..y1 as usize {
            let row = &mut self.data[y * stride + x0 as usize * 4..y * stride + x1 as usize * 4];
            for d in row.chunks_exact_mut(4) {
                d.copy_from_slice(&px);
            }
        }
    }

    /// Blends `src` into this surface with its top-left corner at `offset`.
    pub fn composite(&mut self, src: &Surface, mode: BlendMode, offset: (i32, i32)) {
        composite_onto(self, src, mode, offset);
    }

    /// Copy translated by `(dx, dy)`; uncovered pixels repeat the nearest edge.
    pub fn shifted(&self, dx: i32, dy: i32) -> Surface {
        let mut out = Surface::new(self.width, self.height);
        if self.canvas().is_empty() {
            return out;
        }
        let max_x = i64::from(self.width) - 1;
        let max_y = i64::from(self.height) - 1;
        for y in 0..i64::from(self.height) {
            let sy = (y - i64::from(dy)).clamp(0, max_y);
            for x in 0..i64::from(self.width) {
                let sx = (x - i64::from(dx)).clamp(0, max_x);
                let (Some(si), Some(di)) = (self.offset_of(sx, sy), out.offset_of(x, y)) else {
                    continue;
                };
                out.data[di..di + 4].copy_from_slice(&self.data[si..si + 4]);
            }
        }
        out
    }

    /// Composites this surface over an opaque `background`, leaving every pixel opaque.
    pub fn flatten_onto(&mut self, background: Rgba8) {
        let mut base = Surface::filled(self.width, self.height, background.opaque());
        base.composite(self, BlendMode::SourceOver, (0, 0));
        *self = base;
    }

    pub fn to_rgba_image(&self) -> DiaryResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| DiaryError::evaluation("surface buffer does not match its dimensions"))
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Encodes the surface as a PNG file in memory.
    pub fn to_png(&self) -> DiaryResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> DiaryResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| DiaryError::evaluation("surface buffer size overflow"))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
