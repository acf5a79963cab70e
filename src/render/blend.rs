use image::{RgbImage, RgbaImage};

use crate::foundation::core::PixelPos;
use crate::render::tile::Tile;

/// Composite `tile` onto `target` with its top-left corner at `anchor`.
///
/// The anchor must lie inside the target for anything to be painted; anchors
/// outside the bounds (negative included) are silently skipped, which is the
/// engine's clipping policy rather than an error. The painted region is the
/// overlap of the tile with the target; nothing outside it is read or
/// written.
///
/// Opaque tiles copy row-by-row with no arithmetic. Coverage tiles blend
/// `out = cov*src + (1-cov)*dst` per channel, where the per-pixel coverage
/// is scaled by `opacity` (clamped to `[0, 1]`). A tile whose coverage is
/// zero everywhere leaves the target untouched.
pub fn composite(target: &mut RgbImage, anchor: PixelPos, tile: &Tile, opacity: f32) {
    let (tw, th) = (target.width(), target.height());
    if tw == 0 || th == 0 {
        return;
    }
    if anchor.x < 0 || anchor.y < 0 {
        return;
    }
    let (ax, ay) = (anchor.x as u32, anchor.y as u32);
    if ax >= tw || ay >= th {
        return;
    }

    // Overlap of the tile with the target, in tile-local pixels.
    let copy_w = tile.width().min(tw - ax);
    let copy_h = tile.height().min(th - ay);
    if copy_w == 0 || copy_h == 0 {
        return;
    }

    match tile {
        Tile::Rgb(src) => copy_opaque(target, ax, ay, src, copy_w, copy_h),
        Tile::Rgba(src) => blend_coverage(target, ax, ay, src, copy_w, copy_h, opacity),
    }
}

/// Fast path: opaque source, row-slice copies into the target.
fn copy_opaque(target: &mut RgbImage, ax: u32, ay: u32, src: &RgbImage, w: u32, h: u32) {
    let t_stride = target.width() as usize * 3;
    let s_stride = src.width() as usize * 3;
    let row_bytes = w as usize * 3;
    let t_buf: &mut [u8] = target;
    let s_buf: &[u8] = src.as_raw();

    for y in 0..h as usize {
        let t_off = (ay as usize + y) * t_stride + ax as usize * 3;
        let s_off = y * s_stride;
        t_buf[t_off..t_off + row_bytes].copy_from_slice(&s_buf[s_off..s_off + row_bytes]);
    }
}

/// Coverage path: restrict work to the tight bounding rectangle of non-zero
/// coverage, then blend per pixel in integer arithmetic.
fn blend_coverage(
    target: &mut RgbImage,
    ax: u32,
    ay: u32,
    src: &RgbaImage,
    w: u32,
    h: u32,
    opacity: f32,
) {
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 0 {
        return;
    }

    let Some((x0, y0, x1, y1)) = coverage_bounds(src, w, h) else {
        return;
    };

    let t_stride = target.width() as usize * 3;
    let s_stride = src.width() as usize * 4;
    let t_buf: &mut [u8] = target;
    let s_buf: &[u8] = src.as_raw();

    for y in y0..=y1 {
        let t_row = (ay as usize + y as usize) * t_stride;
        let s_row = y as usize * s_stride;
        for x in x0..=x1 {
            let s_off = s_row + x as usize * 4;
            let cov = mul_div255(u16::from(s_buf[s_off + 3]), op);
            if cov == 0 {
                continue;
            }
            let inv = 255u16 - u16::from(cov);
            let t_off = t_row + (ax as usize + x as usize) * 3;
            for c in 0..3 {
                let s = u16::from(s_buf[s_off + c]);
                let d = u16::from(t_buf[t_off + c]);
                t_buf[t_off + c] = mul_add_div255(s, u16::from(cov), d, inv);
            }
        }
    }
}

/// Tight bounding rectangle (inclusive) of non-zero coverage within the
/// `w` x `h` overlap, or `None` when the coverage is zero everywhere.
fn coverage_bounds(src: &RgbaImage, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
    let s_stride = src.width() as usize * 4;
    let buf = src.as_raw();

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..h {
        let row = y as usize * s_stride;
        for x in 0..w {
            if buf[row + x as usize * 4 + 3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

/// `(x * y + 127) / 255`, the rounded fixed-point multiply used for 8-bit
/// blend weights.
fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// `(s*cov + d*inv + 127) / 255` without intermediate truncation, so a fully
/// covered pixel reproduces the source byte exactly.
fn mul_add_div255(s: u16, cov: u16, d: u16, inv: u16) -> u8 {
    ((u32::from(s) * u32::from(cov) + u32::from(d) * u32::from(inv) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
