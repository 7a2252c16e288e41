use image::RgbaImage;

use crate::raster::pixels::with_premultiplied;

/// Mirror axis for a flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flip {
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    /// `h`, `v`, `hv`/`vh`. Anything else means no flip.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "h" => Some(Self::Horizontal),
            "v" => Some(Self::Vertical),
            "hv" | "vh" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn apply(self, img: &RgbaImage) -> RgbaImage {
        match self {
            Self::Horizontal => image::imageops::flip_horizontal(img),
            Self::Vertical => image::imageops::flip_vertical(img),
            Self::Both => image::imageops::rotate180(img),
        }
    }
}

/// Output size after rotating a `width` x `height` raster clockwise by `degrees`.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    match right_angle(degrees) {
        Some(0) | Some(180) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }
    let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
    let (w, h) = (f64::from(width), f64::from(height));
    let bw = (w * cos.abs() + h * sin.abs() - 1e-6).ceil().max(1.0);
    let bh = (w * sin.abs() + h * cos.abs() - 1e-6).ceil().max(1.0);
    (bw as u32, bh as u32)
}

/// Rotate clockwise by `degrees` into the bounding box of the rotated raster. Uncovered
/// areas are transparent; non-right angles use bilinear sampling.
pub fn rotate(img: &RgbaImage, degrees: f32) -> RgbaImage {
    match right_angle(degrees) {
        Some(0) => return img.clone(),
        Some(90) => return image::imageops::rotate90(img),
        Some(180) => return image::imageops::rotate180(img),
        Some(_) => return image::imageops::rotate270(img),
        None => {}
    }

    let (w, h) = img.dimensions();
    let (ow, oh) = rotated_bounds(w, h, degrees);
    let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
    let (scx, scy) = (f64::from(w) / 2.0, f64::from(h) / 2.0);
    let (ocx, ocy) = (f64::from(ow) / 2.0, f64::from(oh) / 2.0);

    with_premultiplied(img, |pre| {
        RgbaImage::from_fn(ow, oh, |x, y| {
            let dx = f64::from(x) + 0.5 - ocx;
            let dy = f64::from(y) + 0.5 - ocy;
            let sx = dx * cos + dy * sin + scx - 0.5;
            let sy = -dx * sin + dy * cos + scy - 0.5;
            image::Rgba(sample_bilinear(&pre, sx, sy))
        })
    })
}

fn right_angle(degrees: f32) -> Option<u32> {
    let d = f64::from(degrees).rem_euclid(360.0);
    [0u32, 90, 180, 270, 360]
        .into_iter()
        .find(|&a| (d - f64::from(a)).abs() < 1e-3)
        .map(|a| a % 360)
}

fn sample_bilinear(img: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));

    let fetch = |px: i64, py: i64| -> [f64; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 4];
        }
        let p = img.get_pixel(px as u32, py as u32).0;
        [
            f64::from(p[0]),
            f64::from(p[1]),
            f64::from(p[2]),
            f64::from(p[3]),
        ]
    };

    let (ix, iy) = (x0 as i64, y0 as i64);
    let p00 = fetch(ix, iy);
    let p10 = fetch(ix + 1, iy);
    let p01 = fetch(ix, iy + 1);
    let p11 = fetch(ix + 1, iy + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/geometry.rs"]
mod tests;
