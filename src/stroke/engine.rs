use crate::{
    foundation::{
        core::{Canvas, Point, Rect},
        error::{DiaryError, DiaryResult},
    },
    raster::{PixelRect, Surface},
    render::ScratchCanvas,
    stroke::brush::Pen,
};

/// Incremental stroker. Only the last pointer sample is kept; each sample draws one segment
/// from the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeEngine {
    current: Option<Point>,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Starts a stroke at `p` and draws a dot there. A non-finite `p` leaves no stroke active.
    pub fn begin(
        &mut self,
        surface: &mut Surface,
        p: Point,
        pen: Pen,
    ) -> DiaryResult<Option<PixelRect>> {
        let dirty = draw_segment(surface, p, p, pen)?;
        self.current = p.is_finite().then_some(p);
        Ok(dirty)
    }

    /// Draws from the previous sample to `p`. Does nothing when no stroke is active.
    /// Non-finite samples are skipped and the stroke continues from the last good one.
    pub fn extend(
        &mut self,
        surface: &mut Surface,
        p: Point,
        pen: Pen,
    ) -> DiaryResult<Option<PixelRect>> {
        let Some(prev) = self.current else {
            return Ok(None);
        };
        if !p.is_finite() {
            return Ok(None);
        }
        let dirty = draw_segment(surface, prev, p, pen)?;
        self.current = Some(p);
        Ok(dirty)
    }

    pub fn end(&mut self) {
        self.current = None;
    }
}

/// Draws one round-capped segment (a dot when `a == b`) and returns the touched pixel rect,
/// or `None` when the segment lies entirely off the surface.
pub fn draw_segment(
    surface: &mut Surface,
    a: Point,
    b: Point,
    pen: Pen,
) -> DiaryResult<Option<PixelRect>> {
    if !pen.width.is_finite() || pen.width <= 0.0 {
        return Err(DiaryError::validation(format!(
            "stroke width must be finite and > 0, got {}",
            pen.width
        )));
    }
    if !(a.is_finite() && b.is_finite()) {
        return Ok(None);
    }

    // One extra pixel of margin for anti-aliasing.
    let reach = pen.width / 2.0 + 1.0;
    let x0 = (a.x.min(b.x) - reach).floor();
    let y0 = (a.y.min(b.y) - reach).floor();
    let x1 = (a.x.max(b.x) + reach).ceil();
    let y1 = (a.y.max(b.y) + reach).ceil();
    let bbox = Rect::new(x0, y0, x1, y1).intersect(Rect::new(
        0.0,
        0.0,
        f64::from(surface.width()),
        f64::from(surface.height()),
    ));
    if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return Ok(None);
    }
    let region = PixelRect::new(
        bbox.x0 as i32,
        bbox.y0 as i32,
        bbox.width() as u32,
        bbox.height() as u32,
    );

    let mut scratch = ScratchCanvas::new(region)?;
    scratch.set_color(pen.color);
    if a == b {
        scratch.fill_circle(a, pen.width / 2.0);
    } else {
        scratch.stroke_line(a, b, pen.width);
    }
    scratch.composite_into(surface)?;

    tracing::trace!(?region, width = pen.width, "stroke segment");
    Ok(Some(region))
}

/// Maps a pointer position in presentation space onto surface pixels.
///
/// `display` is where the surface is shown; it may be scaled relative to `surface`.
pub fn map_client_point(client: Point, display: Rect, surface: Canvas) -> DiaryResult<Point> {
    let (dw, dh) = (display.width(), display.height());
    if !(dw.is_finite() && dh.is_finite()) || dw <= 0.0 || dh <= 0.0 {
        return Err(DiaryError::invalid_input(format!(
            "display rect must have a positive size, got {dw}x{dh}"
        )));
    }
    let sx = f64::from(surface.width) / dw;
    let sy = f64::from(surface.height) / dh;
    Ok(Point::new(
        ((client.x - display.x0) * sx).floor(),
        ((client.y - display.y0) * sy).floor(),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/engine.rs"]
mod tests;
