use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::{
        core::{Point, Rgba8},
        error::{DiaryError, DiaryResult},
    },
    render::cpu::ScratchCanvas,
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Builds Parley layouts for a single font registered from raw bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    pub fn new(font_bytes: &[u8]) -> DiaryResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DiaryError::invalid_input("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DiaryError::invalid_input("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shapes `text` as a single unwrapped paragraph.
    pub fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> DiaryResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DiaryError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    /// `y` is the first line's baseline.
    Baseline,
    /// `y` is the vertical center of the layout box.
    Middle,
}

/// Draws short single-line strings with one font.
pub struct TextPainter {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter")
            .field("family_name", &self.engine.family_name())
            .finish()
    }
}

impl TextPainter {
    pub fn from_bytes(font_bytes: Vec<u8>) -> DiaryResult<Self> {
        let engine = TextLayoutEngine::new(&font_bytes)?;
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self { engine, font })
    }

    pub fn load(path: &Path) -> DiaryResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    pub fn family_name(&self) -> &str {
        self.engine.family_name()
    }

    /// Draws `text` anchored at `pos` according to the alignment pair.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        canvas: &mut ScratchCanvas,
        text: &str,
        size_px: f32,
        color: Rgba8,
        pos: Point,
        h: HAlign,
        v: VAlign,
    ) -> DiaryResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.engine.layout_plain(text, size_px, color.into())?;

        let w = f64::from(layout.width());
        let x = match h {
            HAlign::Start => pos.x,
            HAlign::Center => pos.x - w / 2.0,
            HAlign::End => pos.x - w,
        };
        let y = match v {
            VAlign::Baseline => {
                let baseline = layout
                    .lines()
                    .next()
                    .map(|line| f64::from(line.metrics().baseline))
                    .unwrap_or(0.0);
                pos.y - baseline
            }
            VAlign::Middle => pos.y - f64::from(layout.height()) / 2.0,
        };

        canvas.draw_layout(&layout, &self.font, Point::new(x, y));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
