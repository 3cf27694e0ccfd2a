use crate::raster::surface::Surface;

pub type Rgba8Px = [u8; 4];

/// Arithmetic rule used when one surface is composited onto another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Normal alpha compositing; an opaque source replaces the destination.
    #[default]
    SourceOver,
    /// Channel-wise product. Only ever darkens.
    Multiply,
    /// Absolute channel-wise difference.
    Difference,
}

/// Blends one straight-alpha source pixel over a straight-alpha destination pixel.
///
/// Follows the separable blend-mode model: the blend result is mixed with the source by the
/// backdrop alpha, then composited source-over.
pub fn blend(dst: Rgba8Px, src: Rgba8Px, mode: BlendMode) -> Rgba8Px {
    if src[3] == 0 {
        return dst;
    }

    if src[3] == 255 && dst[3] == 255 {
        let mut out = [0u8, 0, 0, 255];
        for i in 0..3 {
            out[i] = match mode {
                BlendMode::SourceOver => src[i],
                BlendMode::Multiply => mul_div255(u16::from(src[i]), u16::from(dst[i])),
                BlendMode::Difference => src[i].abs_diff(dst[i]),
            };
        }
        return out;
    }

    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = f32::from(src[i]) / 255.0;
        let dc = f32::from(dst[i]) / 255.0;
        let mixed = match mode {
            BlendMode::SourceOver => sc,
            BlendMode::Multiply => sc * dc,
            BlendMode::Difference => (sc - dc).abs(),
        };
        let cm = (1.0 - da) * sc + da * mixed;
        let co = (sa * cm + da * dc * (1.0 - sa)) / oa;
        out[i] = unit_to_u8(co);
    }
    out[3] = unit_to_u8(oa);
    out
}

/// Blends `src` into `dst` with `src`'s top-left corner at `offset`.
///
/// Only the overlapping region is touched; offsets that push `src` partially or fully outside
/// `dst` are clipped, never an error.
pub fn composite_onto(dst: &mut Surface, src: &Surface, mode: BlendMode, offset: (i32, i32)) {
    let (ox, oy) = (i64::from(offset.0), i64::from(offset.1));
    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + i64::from(src.width())).min(i64::from(dst.width()));
    let y1 = (oy + i64::from(src.height())).min(i64::from(dst.height()));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let span = (x1 - x0) as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for y in y0..y1 {
        let d_start = (y as usize) * dst_stride + (x0 as usize) * 4;
        let s_start = ((y - oy) as usize) * src_stride + ((x0 - ox) as usize) * 4;
        let d_row = &mut dst_data[d_start..d_start + span];
        let s_row = &src_data[s_start..s_start + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = blend([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], mode);
            d.copy_from_slice(&out);
        }
    }
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
