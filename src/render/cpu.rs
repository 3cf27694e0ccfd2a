use crate::{
    foundation::{
        core::{Point, Rgba8},
        error::{DiaryError, DiaryResult},
    },
    raster::{
        BlendMode, PixelRect, Surface,
        surface::unpremultiply_rgba8_in_place,
    },
    render::text::TextBrushRgba8,
};

/// A transparent `vello_cpu` render target mapped onto one rectangle of a surface.
///
/// Drawing coordinates are surface coordinates; the region's origin is subtracted by the
/// context transform.
pub struct ScratchCanvas {
    region: PixelRect,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl ScratchCanvas {
    pub fn new(region: PixelRect) -> DiaryResult<Self> {
        if region.is_empty() {
            return Err(DiaryError::evaluation("scratch region must not be empty"));
        }
        let width: u16 = region
            .width
            .try_into()
            .map_err(|_| DiaryError::evaluation("scratch width exceeds u16"))?;
        let height: u16 = region
            .height
            .try_into()
            .map_err(|_| DiaryError::evaluation("scratch height exceeds u16"))?;

        let ctx = vello_cpu::RenderContext::new(width, height);
        let mut canvas = Self {
            region,
            width,
            height,
            ctx,
        };
        canvas.reset_transform();
        Ok(canvas)
    }

    pub fn region(&self) -> PixelRect {
        self.region
    }

    fn base_transform(&self) -> vello_cpu::kurbo::Affine {
        vello_cpu::kurbo::Affine::translate((
            -f64::from(self.region.x),
            -f64::from(self.region.y),
        ))
    }

    fn reset_transform(&mut self) {
        let base = self.base_transform();
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(base);
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64) {
        use vello_cpu::kurbo::Shape as _;

        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.ctx.fill_path(&circle.to_path(0.1));
    }

    /// Strokes the segment `a -> b` with round caps and joins.
    pub fn stroke_line(&mut self, a: Point, b: Point, width: f64) {
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round);
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(a));
        path.line_to(point_to_cpu(b));
        self.ctx.set_stroke(stroke);
        self.ctx.stroke_path(&path);
    }

    /// Draws every glyph run of `layout` with its top-left corner at `origin`.
    pub fn draw_layout(
        &mut self,
        layout: &parley::Layout<TextBrushRgba8>,
        font: &vello_cpu::peniko::FontData,
        origin: Point,
    ) {
        let transform =
            self.base_transform() * vello_cpu::kurbo::Affine::translate((origin.x, origin.y));
        self.ctx.set_transform(transform);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        self.reset_transform();
    }

    /// Rasterizes everything drawn so far into a straight-alpha surface of the region's size.
    pub fn render(mut self) -> DiaryResult<Surface> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut rgba = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut rgba);
        Surface::from_rgba8(u32::from(self.width), u32::from(self.height), rgba)
    }

    /// Renders and blends the result source-over onto `dst` at the region's position.
    pub fn composite_into(self, dst: &mut Surface) -> DiaryResult<()> {
        let region = self.region;
        let layer = self.render()?;
        dst.composite(&layer, BlendMode::SourceOver, (region.x, region.y));
        Ok(())
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
