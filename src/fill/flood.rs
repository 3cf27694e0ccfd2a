use crate::{
    foundation::core::Rgba8,
    raster::{PixelRect, Surface},
};

/// What a flood fill changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillOutcome {
    /// Number of pixels overwritten. Zero when the fill was a no-op.
    pub filled: usize,
    /// Bounding box of the overwritten pixels.
    pub dirty: Option<PixelRect>,
}

impl FillOutcome {
    const NOOP: Self = Self {
        filled: 0,
        dirty: None,
    };
}

/// Recolors the 4-connected region around `seed` whose RGB stays within `tolerance` of the
/// seed pixel, writing `color` at full opacity.
///
/// A pixel joins the region when every one of |dR|, |dG|, |dB| against the seed color is
/// strictly less than `tolerance`; alpha is ignored when matching. Seeds outside the surface
/// and seeds already holding `color` at full opacity are no-ops.
pub fn flood_fill(
    surface: &mut Surface,
    seed: (i64, i64),
    color: Rgba8,
    tolerance: u16,
) -> FillOutcome {
    let Some(seed_color) = surface.get(seed.0, seed.1) else {
        return FillOutcome::NOOP;
    };
    if seed_color.same_rgb(color) && seed_color.a == 255 {
        return FillOutcome::NOOP;
    }

    let fill = color.opaque().to_array();
    let seed_rgb = [seed_color.r, seed_color.g, seed_color.b];
    let matches = |px: &[u8]| (0..3).all(|c| u16::from(px[c].abs_diff(seed_rgb[c])) < tolerance);

    let (w, h) = (surface.width() as usize, surface.height() as usize);
    let data = surface.data_mut();
    // Marks pixels that were ever pushed, so each one is tested at most once.
    let mut queued = vec![false; w * h];
    let mut stack = Vec::with_capacity(1024);

    let start = (seed.1 as usize) * w + (seed.0 as usize);
    queued[start] = true;
    stack.push(start);

    let mut filled = 0usize;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (w, h, 0usize, 0usize);

    while let Some(idx) = stack.pop() {
        let px = &mut data[idx * 4..idx * 4 + 4];
        if !matches(px) {
            continue;
        }
        px.copy_from_slice(&fill);
        filled += 1;

        let (x, y) = (idx % w, idx / w);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);

        let mut push = |n: usize| {
            if !queued[n] {
                queued[n] = true;
                stack.push(n);
            }
        };
        if x > 0 {
            push(idx - 1);
        }
        if x + 1 < w {
            push(idx + 1);
        }
        if y > 0 {
            push(idx - w);
        }
        if y + 1 < h {
            push(idx + w);
        }
    }

    tracing::debug!(filled, seed_x = seed.0, seed_y = seed.1, "flood fill");
    FillOutcome {
        filled,
        dirty: (filled > 0).then(|| {
            PixelRect::new(
                min_x as i32,
                min_y as i32,
                (max_x - min_x + 1) as u32,
                (max_y - min_y + 1) as u32,
            )
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fill/flood.rs"]
mod tests;
