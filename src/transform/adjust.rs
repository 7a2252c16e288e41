//! Per-channel color adjustments. Alpha is left untouched everywhere.

use image::RgbaImage;

use crate::{foundation::error::KritiResult, raster::blur::gaussian_blur};

fn build_lut(f: impl Fn(f32) -> f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        let x = i as f32 / 255.0;
        *v = (f(x).clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    lut
}

fn map_rgb(img: &RgbaImage, lut: &[u8; 256]) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        for c in &mut px.0[..3] {
            *c = lut[*c as usize];
        }
    }
    out
}

/// Shift every channel by `percent / 100` of full scale (`-100..=100`).
pub fn brightness(img: &RgbaImage, percent: f32) -> RgbaImage {
    let shift = percent.clamp(-100.0, 100.0) / 100.0;
    map_rgb(img, &build_lut(|x| x + shift))
}

/// Scale the distance from mid-gray by `1 + percent / 100` (`-100..=100`).
pub fn contrast(img: &RgbaImage, percent: f32) -> RgbaImage {
    let k = 1.0 + percent.clamp(-100.0, 100.0) / 100.0;
    map_rgb(img, &build_lut(|x| (x - 0.5) * k + 0.5))
}

/// Gamma curve `x^(1/gamma)`; values above 1 brighten midtones.
pub fn gamma(img: &RgbaImage, gamma: f32) -> RgbaImage {
    let e = 1.0 / gamma.max(1.0e-5);
    map_rgb(img, &build_lut(|x| x.powf(e)))
}

/// Multiply HSL saturation by `1 + percent / 100` (`-100..=500`).
pub fn saturation(img: &RgbaImage, percent: f32) -> RgbaImage {
    let k = 1.0 + percent.clamp(-100.0, 500.0) / 100.0;
    let mut out = img.clone();
    for px in out.pixels_mut() {
        let [r, g, b, _] = px.0;
        let (h, s, l) = rgb_to_hsl(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        );
        let (r, g, b) = hsl_to_rgb(h, (s * k).clamp(0.0, 1.0), l);
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        px.0[0] = to_u8(r);
        px.0[1] = to_u8(g);
        px.0[2] = to_u8(b);
    }
    out
}

/// Unsharp mask: `x + amount * (x - blur(x))` with a sigma-1 Gaussian and no threshold.
pub fn sharpen(img: &RgbaImage, amount: f32) -> KritiResult<RgbaImage> {
    let blurred = gaussian_blur(img, 1.0)?;
    let mut out = img.clone();
    for (px, bl) in out.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let x = f32::from(px.0[c]);
            let v = x + amount * (x - f32::from(bl.0[c]));
            px.0[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let hue = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    (hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/adjust.rs"]
mod tests;
