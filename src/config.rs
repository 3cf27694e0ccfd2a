//! Tunable constants, loadable from JSON.
//!
//! Every field has a default matching the stock app, so an empty JSON object is a complete
//! configuration.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{DiaryError, DiaryResult},
};

pub const MAX_GRID_CELL_PX: u32 = 1024;
pub const MAX_EDGE_OFFSET_PX: u32 = 64;
pub const MAX_COLOR_BLEED_PX: u32 = 1024;
pub const MAX_BLUR_PX: f32 = 64.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiaryConfig {
    /// Largest drawing surface a stylized photo may produce.
    pub max_canvas: Canvas,
    /// Eraser width is `brush size * eraser_multiplier`.
    pub eraser_multiplier: u32,
    /// Per-channel distance below which a pixel joins the fill region.
    pub fill_tolerance: u16,
    pub noise: NoiseConfig,
    /// Characters per grid row.
    pub grid_cols: u32,
    /// Side length of one grid cell in the export, in pixels.
    pub grid_cell_px: u32,
    pub stylize: StylizeConfig,
    pub export: ExportConfig,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            max_canvas: Canvas::new(800, 600),
            eraser_multiplier: 5,
            fill_tolerance: 50,
            noise: NoiseConfig::default(),
            grid_cols: 13,
            grid_cell_px: 40,
            stylize: StylizeConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Paper-grain texture settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Chance that any given pixel receives a grain speck.
    pub probability: f32,
    /// Alpha of a grain speck.
    pub alpha: u8,
    /// Fixed RNG seed; `None` draws a fresh seed from the OS for every run.
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            probability: 0.10,
            alpha: 20,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylizeConfig {
    /// Offset of the shifted copy used for edge extraction.
    pub edge_offset_px: i32,
    /// Brightness gain applied to the raw difference before inversion.
    pub edge_gain: f32,
    pub edge_contrast: f32,
    /// The color layer is shrunk by this linear factor before being scaled back up.
    pub color_downsample: u32,
    pub saturation: f32,
    pub color_contrast: f32,
    /// Gaussian sigma of the color layer blur.
    pub blur_px: f32,
    /// How far the color layer overhangs each canvas edge.
    pub color_bleed_px: u32,
}

impl Default for StylizeConfig {
    fn default() -> Self {
        Self {
            edge_offset_px: 2,
            edge_gain: 2.0,
            edge_contrast: 5.0,
            color_downsample: 8,
            saturation: 1.5,
            color_contrast: 1.2,
            blur_px: 2.0,
            color_bleed_px: 4,
        }
    }
}

/// How many grid rows the exported diary page reserves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowPolicy {
    /// Always `rows` rows; text past the last row is dropped.
    Fixed { rows: u32 },
    /// As many rows as the text needs, never fewer than `min_rows`.
    FitContent { min_rows: u32 },
}

impl Default for RowPolicy {
    fn default() -> Self {
        Self::Fixed { rows: 10 }
    }
}

impl RowPolicy {
    pub fn rows_for(self, used_rows: u32) -> u32 {
        match self {
            Self::Fixed { rows } => rows,
            Self::FitContent { min_rows } => used_rows.max(min_rows),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub padding_px: u32,
    pub header_px: u32,
    /// Gap between the framed drawing and the text grid.
    pub grid_gap_px: u32,
    pub rows: RowPolicy,
    pub background: Rgba8,
    pub title: String,
    pub title_color: Rgba8,
    pub ink_color: Rgba8,
    pub frame_color: Rgba8,
    pub grid_line_color: Rgba8,
    pub title_px: f32,
    pub label_px: f32,
    pub glyph_px: f32,
    pub date_label: String,
    pub weather_label: String,
    /// Shown (and used in the file name) when the entry has no date.
    pub default_date: String,
    /// Placeholder drawn in the header when the entry has no date.
    pub date_placeholder: String,
    /// TrueType/OpenType font used for all export text. Without it only graphics are drawn.
    pub font_path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            padding_px: 40,
            header_px: 120,
            grid_gap_px: 60,
            rows: RowPolicy::default(),
            background: Rgba8::rgb(0xF7, 0xF3, 0xE8),
            title: "Picture Diary".to_string(),
            title_color: Rgba8::rgb(0xFF, 0x6B, 0x6B),
            ink_color: Rgba8::rgb(0x33, 0x33, 0x33),
            frame_color: Rgba8::rgb(0x33, 0x33, 0x33),
            grid_line_color: Rgba8::rgb(0xB0, 0xC4, 0xDE),
            title_px: 40.0,
            label_px: 24.0,
            glyph_px: 24.0,
            date_label: "Date".to_string(),
            weather_label: "Weather".to_string(),
            default_date: "today".to_string(),
            date_placeholder: "____-__-__".to_string(),
            font_path: None,
        }
    }
}

impl DiaryConfig {
    pub fn from_json_str(json: &str) -> DiaryResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| DiaryError::serde(format!("parse config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> DiaryResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> DiaryResult<()> {
        if self.max_canvas.is_empty() {
            return Err(DiaryError::validation("max_canvas dimensions must be > 0"));
        }
        if self.max_canvas.width > u32::from(u16::MAX) || self.max_canvas.height > u32::from(u16::MAX)
        {
            return Err(DiaryError::validation("max_canvas dimensions must fit in u16"));
        }
        if self.eraser_multiplier == 0 {
            return Err(DiaryError::validation("eraser_multiplier must be > 0"));
        }
        if !(1..=256).contains(&self.fill_tolerance) {
            return Err(DiaryError::validation("fill_tolerance must be in 1..=256"));
        }
        if !(0.0..=1.0).contains(&self.noise.probability) {
            return Err(DiaryError::validation("noise.probability must be in [0, 1]"));
        }
        if self.grid_cols == 0 || self.grid_cell_px == 0 {
            return Err(DiaryError::validation(
                "grid_cols and grid_cell_px must be > 0",
            ));
        }
        // Export draws each text row into a scratch band two cells tall.
        if self.grid_cell_px > MAX_GRID_CELL_PX {
            return Err(DiaryError::validation(format!(
                "grid_cell_px must be <= {MAX_GRID_CELL_PX}"
            )));
        }

        let s = &self.stylize;
        if s.color_downsample == 0 {
            return Err(DiaryError::validation("stylize.color_downsample must be > 0"));
        }
        if s.edge_offset_px.unsigned_abs() > MAX_EDGE_OFFSET_PX {
            return Err(DiaryError::validation(format!(
                "stylize.edge_offset_px must be within +-{MAX_EDGE_OFFSET_PX}"
            )));
        }
        if s.color_bleed_px > MAX_COLOR_BLEED_PX {
            return Err(DiaryError::validation(format!(
                "stylize.color_bleed_px must be <= {MAX_COLOR_BLEED_PX}"
            )));
        }
        if s.blur_px > MAX_BLUR_PX {
            return Err(DiaryError::validation(format!(
                "stylize.blur_px must be <= {MAX_BLUR_PX}"
            )));
        }
        for (name, v) in [
            ("stylize.edge_gain", s.edge_gain),
            ("stylize.edge_contrast", s.edge_contrast),
            ("stylize.saturation", s.saturation),
            ("stylize.color_contrast", s.color_contrast),
            ("stylize.blur_px", s.blur_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(DiaryError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }

        let e = &self.export;
        for (name, v) in [
            ("export.title_px", e.title_px),
            ("export.label_px", e.label_px),
            ("export.glyph_px", e.glyph_px),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(DiaryError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if e.rows == (RowPolicy::Fixed { rows: 0 }) {
            return Err(DiaryError::validation("export.rows must reserve at least one row"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
