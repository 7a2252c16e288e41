use image::RgbaImage;

use crate::{
    foundation::{
        core::Rgba8,
        error::{KritiError, KritiResult},
    },
    raster::pixels,
};

/// Sizing strategy for a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Preserve aspect, fit within the box. Either dimension alone is enough.
    Contain,
    /// Preserve aspect, fill the box, center-crop the excess.
    Cover,
    /// Stretch to the exact box.
    Squeeze,
    /// Like contain, but never enlarges.
    ScaleDown,
    /// Scale-down when the source fits the box, cover otherwise; output is always the box.
    Crop,
    /// Contain, centered on a box-sized canvas filled with the background color.
    Pad,
}

impl FitMode {
    pub fn parse(value: &str) -> KritiResult<Self> {
        match value.trim() {
            "contain" => Ok(Self::Contain),
            "cover" => Ok(Self::Cover),
            "squeeze" => Ok(Self::Squeeze),
            "scaledown" => Ok(Self::ScaleDown),
            "crop" => Ok(Self::Crop),
            "pad" => Ok(Self::Pad),
            other => Err(KritiError::InvalidFitMode(other.to_string())),
        }
    }

    fn needs_both_dimensions(self) -> bool {
        matches!(self, Self::Cover | Self::Squeeze | Self::Crop | Self::Pad)
    }
}

/// A fit operation bound to the requested box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub mode: FitMode,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Pad fill; white when unset.
    pub background: Option<Rgba8>,
}

/// Which part of the source is resized, and where the result lands in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
    /// Source rectangle `(x, y, w, h)` taken before resizing.
    region: (u32, u32, u32, u32),
    scaled: (u32, u32),
    output: (u32, u32),
    /// Top-left of the scaled image inside the output.
    offset: (i64, i64),
}

impl Fit {
    pub fn new(
        mode: FitMode,
        width: Option<u32>,
        height: Option<u32>,
        background: Option<Rgba8>,
    ) -> KritiResult<Self> {
        if width.is_none() && height.is_none() {
            return Err(KritiError::FitRequiresDimensions);
        }
        Ok(Self {
            mode,
            width,
            height,
            background,
        })
    }

    /// Output size for a `src_w` x `src_h` source.
    pub fn bounds(&self, src_w: u32, src_h: u32) -> (u32, u32) {
        self.layout(src_w, src_h).output
    }

    pub fn apply(&self, img: &RgbaImage) -> RgbaImage {
        let (src_w, src_h) = img.dimensions();
        let layout = self.layout(src_w, src_h);

        let (rx, ry, rw, rh) = layout.region;
        let region = if (rx, ry, rw, rh) == (0, 0, src_w, src_h) {
            img.clone()
        } else {
            image::imageops::crop_imm(img, rx, ry, rw, rh).to_image()
        };
        let scaled = if layout.scaled == (rw, rh) {
            region
        } else {
            pixels::resize(&region, layout.scaled.0, layout.scaled.1)
        };

        let (out_w, out_h) = layout.output;
        if layout.scaled == layout.output && layout.offset == (0, 0) {
            return scaled;
        }
        let (ox, oy) = layout.offset;

        let fill = match self.mode {
            FitMode::Pad => self.background.unwrap_or(Rgba8::WHITE),
            _ => Rgba8::TRANSPARENT,
        };
        let mut canvas = pixels::filled(out_w, out_h, fill);
        pixels::draw_over(&mut canvas, &scaled, ox, oy);
        canvas
    }

    fn target(&self, src_w: u32, src_h: u32) -> (Option<u32>, Option<u32>) {
        if self.mode.needs_both_dimensions() {
            (
                Some(self.width.unwrap_or(src_w)),
                Some(self.height.unwrap_or(src_h)),
            )
        } else {
            (self.width, self.height)
        }
    }

    fn layout(&self, src_w: u32, src_h: u32) -> Layout {
        let src = (src_w.max(1), src_h.max(1));
        let (tw, th) = self.target(src.0, src.1);

        let whole = (0, 0, src.0, src.1);
        let at_origin = |size: (u32, u32)| Layout {
            region: whole,
            scaled: size,
            output: size,
            offset: (0, 0),
        };

        match self.mode {
            FitMode::Contain => at_origin(contain_size(src, tw, th)),
            FitMode::ScaleDown => at_origin(scale_down_size(src, tw, th)),
            FitMode::Squeeze => {
                let size = (tw.unwrap_or(src.0), th.unwrap_or(src.1));
                at_origin(size)
            }
            FitMode::Cover => cover_layout(src, tw.unwrap_or(src.0), th.unwrap_or(src.1)),
            FitMode::Crop => {
                let (w, h) = (tw.unwrap_or(src.0), th.unwrap_or(src.1));
                if src.0 <= w && src.1 <= h {
                    Layout {
                        region: whole,
                        scaled: src,
                        output: (w, h),
                        offset: (0, 0),
                    }
                } else {
                    cover_layout(src, w, h)
                }
            }
            FitMode::Pad => {
                let (w, h) = (tw.unwrap_or(src.0), th.unwrap_or(src.1));
                let scaled = contain_size(src, Some(w), Some(h));
                Layout {
                    region: whole,
                    scaled,
                    output: (w, h),
                    offset: (
                        (i64::from(w) - i64::from(scaled.0)) / 2,
                        (i64::from(h) - i64::from(scaled.1)) / 2,
                    ),
                }
            }
        }
    }
}

fn round_px(v: f64) -> u32 {
    (v + 0.5).floor().max(1.0) as u32
}

fn contain_size(src: (u32, u32), tw: Option<u32>, th: Option<u32>) -> (u32, u32) {
    let (sw, sh) = (f64::from(src.0), f64::from(src.1));
    let aspect = sw / sh;
    match (tw, th) {
        (Some(w), Some(h)) => {
            if aspect > f64::from(w) / f64::from(h) {
                (w, round_px(f64::from(w) / aspect))
            } else {
                (round_px(f64::from(h) * aspect), h)
            }
        }
        (Some(w), None) => (w, round_px(f64::from(w) / aspect)),
        (None, Some(h)) => (round_px(f64::from(h) * aspect), h),
        (None, None) => src,
    }
}

fn scale_down_size(src: (u32, u32), tw: Option<u32>, th: Option<u32>) -> (u32, u32) {
    let (sw, sh) = (f64::from(src.0), f64::from(src.1));
    let floor_px = |v: f64| (v.floor() as u32).max(1);
    match (tw, th) {
        (Some(w), Some(h)) => {
            if src.0 <= w && src.1 <= h {
                return src;
            }
            let scale = (f64::from(w) / sw).min(f64::from(h) / sh);
            (floor_px(sw * scale), floor_px(sh * scale))
        }
        (Some(w), None) if src.0 > w => (w, floor_px(sh * f64::from(w) / sw)),
        (None, Some(h)) if src.1 > h => (floor_px(sw * f64::from(h) / sh), h),
        _ => src,
    }
}

/// Crop the centered box-aspect rectangle out of the source, then resize it to the box.
/// Nothing larger than the source or the box is ever allocated.
fn cover_layout(src: (u32, u32), w: u32, h: u32) -> Layout {
    let (sw, sh) = (f64::from(src.0), f64::from(src.1));
    let box_aspect = f64::from(w) / f64::from(h);
    let (rw, rh) = if sw / sh > box_aspect {
        (round_px(sh * box_aspect).min(src.0), src.1)
    } else {
        (src.0, round_px(sw / box_aspect).min(src.1))
    };
    Layout {
        region: ((src.0 - rw) / 2, (src.1 - rh) / 2, rw, rh),
        scaled: (w, h),
        output: (w, h),
        offset: (0, 0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/fit.rs"]
mod tests;
