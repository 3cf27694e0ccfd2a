//! The long-lived drawing session a host UI drives with input events.

use crate::{
    assets::decode::decode_image,
    config::DiaryConfig,
    export::{DiaryEntry, ExportedImage, export_diary},
    fill::flood_fill,
    foundation::{
        core::{Canvas, Point, Rgba8},
        error::{DiaryError, DiaryResult},
    },
    grid::{Cell, layout},
    raster::{PixelRect, Surface},
    render::TextPainter,
    stroke::{BrushState, StrokeEngine, Tool},
    stylize::stylize,
};

/// Input from the host, already mapped into surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    TextChanged(String),
}

/// What an event changed, so the host knows what to repaint.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    Stroked { dirty: PixelRect },
    Filled { pixels: usize, dirty: PixelRect },
    /// Fresh on-screen grid for the diary text.
    Grid(Vec<Cell>),
}

pub struct Session {
    config: DiaryConfig,
    surface: Surface,
    brush: BrushState,
    stroke: StrokeEngine,
    painter: Option<TextPainter>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("surface", &self.surface)
            .field("brush", &self.brush)
            .field("stroke", &self.stroke)
            .field("painter", &self.painter)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Starts with a white surface of `config.max_canvas` and loads the export font if one is
    /// configured.
    pub fn new(config: DiaryConfig) -> DiaryResult<Self> {
        config.validate()?;
        let painter = match &config.export.font_path {
            Some(path) => Some(TextPainter::load(path)?),
            None => None,
        };
        let Canvas { width, height } = config.max_canvas;
        Ok(Self {
            surface: Surface::filled(width, height, Rgba8::WHITE),
            brush: BrushState::default(),
            stroke: StrokeEngine::new(),
            painter,
            config,
        })
    }

    pub fn with_painter(mut self, painter: TextPainter) -> Self {
        self.painter = Some(painter);
        self
    }

    pub fn config(&self) -> &DiaryConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn brush(&self) -> BrushState {
        self.brush
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_active()
    }

    pub fn dispatch(&mut self, event: InputEvent) -> DiaryResult<Effect> {
        tracing::trace!(?event, tool = ?self.brush.tool, "dispatch");
        match event {
            InputEvent::PointerDown(p) if self.brush.tool == Tool::Fill => Ok(self.fill_at(p)),
            InputEvent::PointerDown(p) => {
                let pen = self.brush.pen(self.config.eraser_multiplier);
                let dirty = self.stroke.begin(&mut self.surface, p, pen)?;
                Ok(stroked(dirty))
            }
            InputEvent::PointerMove(p) => {
                if !self.stroke.is_active() {
                    return Ok(Effect::None);
                }
                let pen = self.brush.pen(self.config.eraser_multiplier);
                let dirty = self.stroke.extend(&mut self.surface, p, pen)?;
                Ok(stroked(dirty))
            }
            InputEvent::PointerUp => {
                self.stroke.end();
                Ok(Effect::None)
            }
            InputEvent::TextChanged(text) => Ok(Effect::Grid(layout(&text, self.config.grid_cols)?)),
        }
    }

    fn fill_at(&mut self, p: Point) -> Effect {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Effect::None;
        }
        let seed = (p.x.floor() as i64, p.y.floor() as i64);
        let outcome = flood_fill(
            &mut self.surface,
            seed,
            self.brush.color,
            self.config.fill_tolerance,
        );
        match outcome.dirty {
            Some(dirty) => Effect::Filled {
                pixels: outcome.filled,
                dirty,
            },
            None => Effect::None,
        }
    }

    /// Decodes and stylizes `bytes`, replacing the drawing. On error the drawing is untouched.
    #[tracing::instrument(skip_all, fields(bytes = bytes.len()))]
    pub fn load_image(&mut self, bytes: &[u8]) -> DiaryResult<Canvas> {
        let source = decode_image(bytes)?;
        let stylized = stylize(&source, &self.config)?;
        self.stroke.end();
        self.surface = stylized;
        tracing::info!(
            width = self.surface.width(),
            height = self.surface.height(),
            "image loaded"
        );
        Ok(self.surface.canvas())
    }

    /// Repaints the drawing white, keeping its current size.
    pub fn clear(&mut self) {
        self.stroke.end();
        self.surface.fill(Rgba8::WHITE);
    }

    pub fn save(&mut self, entry: &DiaryEntry) -> DiaryResult<ExportedImage> {
        export_diary(&self.surface, entry, &self.config, self.painter.as_mut())
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.stroke.end();
        self.brush.tool = tool;
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.brush.select_color(color);
    }

    pub fn set_brush_size(&mut self, size: u32) -> DiaryResult<()> {
        if size == 0 {
            return Err(DiaryError::invalid_input("brush size must be > 0"));
        }
        self.brush.size = size;
        Ok(())
    }

    /// Cursor guide diameter for the current tool when the drawing is shown at `display_scale`.
    pub fn guide_diameter(&self, display_scale: f64) -> f64 {
        self.brush
            .guide_diameter(self.config.eraser_multiplier, display_scale)
    }
}

fn stroked(dirty: Option<PixelRect>) -> Effect {
    match dirty {
        Some(dirty) => Effect::Stroked { dirty },
        None => Effect::None,
    }
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
