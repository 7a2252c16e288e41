use image::{RgbaImage, imageops::FilterType};

use crate::foundation::core::Rgba8;

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Run `f` on a premultiplied copy of `img` and return the result in straight alpha.
pub(crate) fn with_premultiplied(
    img: &RgbaImage,
    f: impl FnOnce(RgbaImage) -> RgbaImage,
) -> RgbaImage {
    let mut pre = img.clone();
    premultiply_rgba8_in_place(&mut pre);
    let mut out = f(pre);
    unpremultiply_rgba8_in_place(&mut out);
    out
}

/// Lanczos resample. Works on premultiplied pixels so transparent edges do not bleed color.
pub fn resize(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (w, h) = (width.max(1), height.max(1));
    if img.dimensions() == (w, h) {
        return img.clone();
    }
    with_premultiplied(img, |pre| {
        image::imageops::resize(&pre, w, h, FilterType::Lanczos3)
    })
}

pub fn filled(width: u32, height: u32, color: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color.to_pixel())
}

/// Source-over `src` onto `dst` with its top-left at `(x, y)`, both straight alpha.
pub fn draw_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, s) in src.enumerate_pixels() {
        let tx = x + i64::from(sx);
        let ty = y + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx as u32, ty as u32);
        *d = image::Rgba(over_straight(d.0, s.0));
    }
}

fn over_straight(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u32::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Work in premultiplied space scaled by 255.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((c + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixels.rs"]
mod tests;
