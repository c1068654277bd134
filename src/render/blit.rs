use crate::foundation::core::Size;
use crate::foundation::error::{FramepaceError, FramepaceResult};
use crate::render::layout::TileRect;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Nearest-neighbor scale `src` into `rect` of `dst`, compositing source-over.
///
/// The rectangle is clipped to the destination; pixels outside it are never touched.
pub fn blit_scaled_over(
    dst: &mut [u8],
    dst_size: Size,
    src: &[u8],
    src_size: Size,
    rect: TileRect,
) -> FramepaceResult<()> {
    if dst.len() != dst_size.rgba8_len() || src.len() != src_size.rgba8_len() {
        return Err(FramepaceError::render(
            "blit_scaled_over expects buffers matching width*height*4",
        ));
    }
    if src_size.is_empty() || rect.width == 0 || rect.height == 0 {
        return Ok(());
    }

    let x_end = rect.x.saturating_add(rect.width).min(dst_size.width);
    let y_end = rect.y.saturating_add(rect.height).min(dst_size.height);
    let (sw, sh) = (u64::from(src_size.width), u64::from(src_size.height));
    let (rw, rh) = (u64::from(rect.width), u64::from(rect.height));

    for y in rect.y..y_end {
        let sy = (u64::from(y - rect.y) * sh / rh) as usize;
        let src_row = sy * (src_size.width as usize) * 4;
        let dst_row = (y as usize) * (dst_size.width as usize) * 4;
        for x in rect.x..x_end {
            let sx = (u64::from(x - rect.x) * sw / rw) as usize;
            let si = src_row + sx * 4;
            let di = dst_row + (x as usize) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s));
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
