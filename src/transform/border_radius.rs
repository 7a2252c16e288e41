use image::RgbaImage;

/// A parsed radius: either pixels or a percentage of the shorter image side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderRadiusValue {
    pub magnitude: f32,
    pub is_percent: bool,
}

impl BorderRadiusValue {
    /// Pixel radius for a `width` x `height` raster, clamped to half the shorter side.
    pub fn resolve(self, width: u32, height: u32) -> f32 {
        let min_dim = width.min(height) as f32;
        let px = if self.is_percent {
            self.magnitude / 100.0 * min_dim
        } else {
            self.magnitude
        };
        px.clamp(0.0, min_dim / 2.0)
    }
}

/// Independent per-corner radii as parsed from the request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerRadii {
    pub top_left: BorderRadiusValue,
    pub top_right: BorderRadiusValue,
    pub bottom_right: BorderRadiusValue,
    pub bottom_left: BorderRadiusValue,
}

impl CornerRadii {
    pub fn uniform(v: BorderRadiusValue) -> Self {
        Self {
            top_left: v,
            top_right: v,
            bottom_right: v,
            bottom_left: v,
        }
    }

    /// Resolve into a fresh pixel record; `self` is never modified, so one parsed value can
    /// serve any number of renders.
    pub fn resolve(&self, width: u32, height: u32) -> ResolvedRadii {
        ResolvedRadii {
            top_left: self.top_left.resolve(width, height),
            top_right: self.top_right.resolve(width, height),
            bottom_right: self.bottom_right.resolve(width, height),
            bottom_left: self.bottom_left.resolve(width, height),
        }
    }
}

/// Corner radii in pixels for one concrete raster size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl ResolvedRadii {
    /// Mask alpha for the pixel at `(x, y)`, sampled at the pixel center.
    ///
    /// Outside all corner boxes the mask is opaque. Inside a corner box the alpha is 255 up to
    /// `radius - 1` from the circle center, fades linearly to 0 across the last pixel, and is 0
    /// beyond `radius`.
    pub fn mask_alpha(&self, x: u32, y: u32, width: u32, height: u32) -> u8 {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let w = width as f32;
        let h = height as f32;

        let (radius, cx, cy) = if px < self.top_left && py < self.top_left {
            (self.top_left, self.top_left, self.top_left)
        } else if px >= w - self.top_right && py < self.top_right {
            (self.top_right, w - self.top_right, self.top_right)
        } else if px >= w - self.bottom_right && py >= h - self.bottom_right {
            (
                self.bottom_right,
                w - self.bottom_right,
                h - self.bottom_right,
            )
        } else if px < self.bottom_left && py >= h - self.bottom_left {
            (self.bottom_left, self.bottom_left, h - self.bottom_left)
        } else {
            return 255;
        };

        let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        edge_alpha(distance, radius)
    }
}

fn edge_alpha(distance: f32, radius: f32) -> u8 {
    if distance <= radius - 1.0 {
        255
    } else if distance <= radius {
        let coverage = 1.0 - (distance - (radius - 1.0));
        (coverage * 255.0).round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

/// Apply rounded corners. Masked-out pixels become fully transparent (`[0, 0, 0, 0]`).
pub fn apply_border_radius(img: &RgbaImage, radii: &CornerRadii) -> RgbaImage {
    let (width, height) = img.dimensions();
    let resolved = radii.resolve(width, height);

    let mut out = img.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let mask = resolved.mask_alpha(x, y, width, height);
        match mask {
            255 => {}
            0 => px.0 = [0, 0, 0, 0],
            m => {
                let a = ((u32::from(m) * u32::from(px.0[3]) + 127) / 255) as u8;
                px.0 = if a == 0 {
                    [0, 0, 0, 0]
                } else {
                    [px.0[0], px.0[1], px.0[2], a]
                };
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/border_radius.rs"]
mod tests;
