use crate::foundation::core::Rgba8;

/// Swatches offered by the palette, in display order.
pub const DEFAULT_PALETTE: [Rgba8; 12] = [
    Rgba8::rgb(0x00, 0x00, 0x00),
    Rgba8::rgb(0xFF, 0x3B, 0x30),
    Rgba8::rgb(0xFF, 0x95, 0x00),
    Rgba8::rgb(0xFF, 0xCC, 0x00),
    Rgba8::rgb(0x4C, 0xD9, 0x64),
    Rgba8::rgb(0x5A, 0xC8, 0xFA),
    Rgba8::rgb(0x00, 0x7A, 0xFF),
    Rgba8::rgb(0x58, 0x56, 0xD6),
    Rgba8::rgb(0xFF, 0x2D, 0x55),
    Rgba8::rgb(0x8E, 0x8E, 0x93),
    Rgba8::rgb(0x6F, 0x4E, 0x37),
    Rgba8::rgb(0xFF, 0xFF, 0xFF),
];

/// The active tool. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
}

/// Width and color a stroke segment is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub width: f64,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BrushState {
    pub tool: Tool,
    /// Brush diameter in surface pixels. Always > 0.
    pub size: u32,
    pub color: Rgba8,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            size: 5,
            color: Rgba8::BLACK,
        }
    }
}

impl BrushState {
    /// Picking a color while erasing switches back to the brush; the fill tool stays active.
    pub fn select_color(&mut self, color: Rgba8) {
        self.color = color;
        if self.tool == Tool::Eraser {
            self.tool = Tool::Brush;
        }
    }

    /// Stroke width in surface pixels; the eraser is `eraser_multiplier` times the brush size.
    pub fn effective_width(&self, eraser_multiplier: u32) -> f64 {
        match self.tool {
            Tool::Eraser => f64::from(self.size) * f64::from(eraser_multiplier),
            Tool::Brush | Tool::Fill => f64::from(self.size),
        }
    }

    /// The eraser paints white.
    pub fn effective_color(&self) -> Rgba8 {
        match self.tool {
            Tool::Eraser => Rgba8::WHITE,
            Tool::Brush | Tool::Fill => self.color,
        }
    }

    pub fn pen(&self, eraser_multiplier: u32) -> Pen {
        Pen {
            width: self.effective_width(eraser_multiplier),
            color: self.effective_color(),
        }
    }

    /// On-screen diameter of the cursor guide when the surface is displayed at `display_scale`.
    /// The fill tool shows no guide.
    pub fn guide_diameter(&self, eraser_multiplier: u32, display_scale: f64) -> f64 {
        if self.tool == Tool::Fill {
            return 0.0;
        }
        self.effective_width(eraser_multiplier) * display_scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/brush.rs"]
mod tests;
