use crate::{
    config::DiaryConfig,
    export::entry::DiaryEntry,
    foundation::{
        core::{Canvas, Point, Rgba8},
        error::{DiaryError, DiaryResult},
    },
    grid::{Cell, layout, rows_used},
    raster::{BlendMode, PixelRect, Surface},
    render::{HAlign, ScratchCanvas, TextPainter, VAlign},
};

/// Width of the white mat around the drawing.
const MAT_PX: u32 = 5;
const FRAME_PX: u32 = 3;
/// Glyphs sit slightly below the geometric cell center.
const GLYPH_DROP_PX: f64 = 2.0;

/// An encoded page ready to be written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Geometry of an export page for a drawing of a given size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub page: Canvas,
    /// Top-left corner of the drawing on the page.
    pub image_origin: (u32, u32),
    pub image: Canvas,
    pub grid_origin: (u32, u32),
    pub cols: u32,
    pub rows: u32,
    pub cell_px: u32,
}

impl PageLayout {
    /// Columns that fit across the page, capped at `grid_cols`. Never zero.
    pub fn columns_for(image: Canvas, config: &DiaryConfig) -> u32 {
        // Page width minus both paddings is exactly the image width.
        (image.width / config.grid_cell_px)
            .min(config.grid_cols)
            .max(1)
    }

    pub fn compute(image: Canvas, rows_needed: u32, config: &DiaryConfig) -> Self {
        let e = &config.export;
        let cell = config.grid_cell_px;
        let cols = Self::columns_for(image, config);
        let rows = e.rows.rows_for(rows_needed);

        let width = image.width + 2 * e.padding_px;
        let text_h = rows * cell;
        let height = e.header_px + image.height + text_h + 2 * e.padding_px + e.grid_gap_px;
        let grid_x = width.saturating_sub(cols * cell) / 2;
        let grid_y = e.header_px + image.height + e.padding_px + e.grid_gap_px;

        Self {
            page: Canvas::new(width, height),
            image_origin: (e.padding_px, e.header_px + e.padding_px),
            image,
            grid_origin: (grid_x, grid_y),
            cols,
            rows,
            cell_px: cell,
        }
    }

    /// Center of the cell at (`row`, `col`) in page coordinates.
    pub fn cell_center(&self, row: u32, col: u32) -> Point {
        let half = f64::from(self.cell_px) / 2.0;
        Point::new(
            f64::from(self.grid_origin.0 + col * self.cell_px) + half,
            f64::from(self.grid_origin.1 + row * self.cell_px) + half,
        )
    }
}

/// Renders the page for `surface` and `entry` and encodes it as PNG.
///
/// Without a `painter` the page still carries the drawing, frame and grid but no text.
#[tracing::instrument(skip_all, fields(width = surface.width(), height = surface.height()))]
pub fn export_diary(
    surface: &Surface,
    entry: &DiaryEntry,
    config: &DiaryConfig,
    painter: Option<&mut TextPainter>,
) -> DiaryResult<ExportedImage> {
    let page = render_page(surface, entry, config, painter)?;
    let png = page.to_png()?;
    let file_name = entry.file_name(&config.export.default_date);
    tracing::info!(%file_name, bytes = png.len(), "exported diary page");
    Ok(ExportedImage {
        file_name,
        width: page.width(),
        height: page.height(),
        png,
    })
}

/// Renders the page without encoding it.
pub fn render_page(
    surface: &Surface,
    entry: &DiaryEntry,
    config: &DiaryConfig,
    painter: Option<&mut TextPainter>,
) -> DiaryResult<Surface> {
    if surface.canvas().is_empty() {
        return Err(DiaryError::invalid_input("cannot export an empty drawing"));
    }
    config.validate()?;

    let image = surface.canvas();
    let cols = PageLayout::columns_for(image, config);
    let cells = layout(&entry.body, cols)?;
    let geo = PageLayout::compute(image, rows_used(&cells), config);
    let e = &config.export;

    let mut page = Surface::filled(geo.page.width, geo.page.height, e.background);

    let (ix, iy) = (geo.image_origin.0 as i32, geo.image_origin.1 as i32);
    let mat = PixelRect::new(
        ix - MAT_PX as i32,
        iy - MAT_PX as i32,
        image.width + 2 * MAT_PX,
        image.height + 2 * MAT_PX,
    );
    page.fill_rect(mat, Rgba8::WHITE);
    stroke_rect(&mut page, mat, FRAME_PX, e.frame_color);
    page.composite(surface, BlendMode::SourceOver, (ix, iy));

    draw_grid_lines(&mut page, &geo, e.grid_line_color);

    let visible: Vec<&Cell> = cells.iter().filter(|c| c.row < geo.rows).collect();
    let dropped = cells.iter().filter(|c| c.glyph().is_some()).count()
        - visible.iter().filter(|c| c.glyph().is_some()).count();
    if dropped > 0 {
        tracing::debug!(dropped, rows = geo.rows, "text past the last grid row dropped");
    }

    match painter {
        Some(painter) => draw_text(&mut page, &geo, entry, config, &visible, painter)?,
        None => tracing::warn!("no font configured; export text skipped"),
    }
    Ok(page)
}

/// Header text goes into one scratch canvas above the mat; grid glyphs get one canvas per row
/// band, so scratch size stays bounded however tall the page grows.
fn draw_text(
    page: &mut Surface,
    geo: &PageLayout,
    entry: &DiaryEntry,
    config: &DiaryConfig,
    cells: &[&Cell],
    painter: &mut TextPainter,
) -> DiaryResult<()> {
    draw_header(page, geo, entry, config, painter)?;

    let e = &config.export;
    for row in cells.chunk_by(|a, b| a.row == b.row) {
        let Some(first) = row.first() else {
            continue;
        };
        if row.iter().all(|c| c.glyph().is_none()) {
            continue;
        }

        // Half a cell of slack above and below for ascenders and descenders.
        let cell_px = geo.cell_px;
        let top = i64::from(geo.grid_origin.1) + i64::from(first.row) * i64::from(cell_px)
            - i64::from(cell_px / 2);
        let band = PixelRect::new(0, top as i32, geo.page.width, 2 * cell_px);
        let mut canvas = ScratchCanvas::new(band)?;
        for cell in row {
            let Some(glyph) = cell.glyph() else {
                continue;
            };
            let center = geo.cell_center(cell.row, cell.col);
            painter.draw(
                &mut canvas,
                glyph,
                e.glyph_px,
                e.ink_color,
                Point::new(center.x, center.y + GLYPH_DROP_PX),
                HAlign::Center,
                VAlign::Middle,
            )?;
        }
        canvas.composite_into(page)?;
    }
    Ok(())
}

fn draw_header(
    page: &mut Surface,
    geo: &PageLayout,
    entry: &DiaryEntry,
    config: &DiaryConfig,
    painter: &mut TextPainter,
) -> DiaryResult<()> {
    let e = &config.export;
    let pad = f64::from(e.padding_px);
    let width = f64::from(geo.page.width);
    let height = geo.image_origin.1.saturating_sub(MAT_PX).max(1);
    let mut canvas = ScratchCanvas::new(PixelRect::new(0, 0, geo.page.width, height))?;

    painter.draw(
        &mut canvas,
        &e.title,
        e.title_px,
        e.title_color,
        Point::new(width / 2.0, pad + 40.0),
        HAlign::Center,
        VAlign::Baseline,
    )?;

    let date = entry.date_text().unwrap_or(e.date_placeholder.as_str());
    painter.draw(
        &mut canvas,
        &format!("{}: {date}", e.date_label),
        e.label_px,
        e.ink_color,
        Point::new(pad, pad + 80.0),
        HAlign::Start,
        VAlign::Baseline,
    )?;
    painter.draw(
        &mut canvas,
        &format!("{}: {}", e.weather_label, entry.weather.label()),
        e.label_px,
        e.ink_color,
        Point::new(width - pad, pad + 80.0),
        HAlign::End,
        VAlign::Baseline,
    )?;

    canvas.composite_into(page)
}

fn draw_grid_lines(page: &mut Surface, geo: &PageLayout, color: Rgba8) {
    let (gx, gy) = (geo.grid_origin.0 as i32, geo.grid_origin.1 as i32);
    let cell = geo.cell_px as i32;
    let grid_w = geo.cols * geo.cell_px;
    let grid_h = geo.rows * geo.cell_px;
    for i in 0..=geo.rows as i32 {
        page.fill_rect(PixelRect::new(gx, gy + i * cell, grid_w + 1, 1), color);
    }
    for j in 0..=geo.cols as i32 {
        page.fill_rect(PixelRect::new(gx + j * cell, gy, 1, grid_h + 1), color);
    }
}

/// Draws a `thickness`-wide border centered on the edges of `rect`.
fn stroke_rect(page: &mut Surface, rect: PixelRect, thickness: u32, color: Rgba8) {
    let inset = (thickness / 2) as i32;
    let outer = PixelRect::new(
        rect.x - inset,
        rect.y - inset,
        rect.width + thickness - 1,
        rect.height + thickness - 1,
    );
    let t = thickness as i32;
    let right = outer.x + outer.width as i32 - t;
    let bottom = outer.y + outer.height as i32 - t;
    page.fill_rect(PixelRect::new(outer.x, outer.y, outer.width, thickness), color);
    page.fill_rect(PixelRect::new(outer.x, bottom, outer.width, thickness), color);
    page.fill_rect(PixelRect::new(outer.x, outer.y, thickness, outer.height), color);
    page.fill_rect(PixelRect::new(right, outer.y, thickness, outer.height), color);
}

#[cfg(test)]
#[path = "../../tests/unit/export/page.rs"]
mod tests;
