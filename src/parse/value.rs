use crate::{
    foundation::{
        core::ImageFormat,
        error::{KritiError, KritiResult},
    },
    transform::border_radius::BorderRadiusValue,
};

/// Parse a structural integer (width, height, quality). Empty, non-numeric and out-of-range
/// input are all errors.
pub fn parse_int_in_range(key: &str, value: &str, min: u32, max: u32) -> KritiResult<u32> {
    if value.is_empty() {
        return Err(KritiError::invalid_number(key, "value cannot be empty"));
    }
    let parsed: i64 = value.parse().map_err(|_| {
        KritiError::invalid_number(key, format!("value must be a valid integer: {value}"))
    })?;
    if parsed < i64::from(min) || parsed > i64::from(max) {
        return Err(KritiError::invalid_number(
            key,
            format!("value must be between {min} and {max}, got {parsed}"),
        ));
    }
    Ok(parsed as u32)
}

/// Parse a filter strength. Anything unusable falls back to `default` instead of failing.
pub fn parse_float_or(value: &str, min: f32, max: f32, default: f32) -> f32 {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() && (min..=max).contains(&v) => v,
        _ => default,
    }
}

/// A parsed rotation in degrees, normalized into `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateAngle {
    pub degrees: f32,
    /// `false` when the angle is not a multiple of 45 degrees and resampling will blur.
    pub standard: bool,
}

const STANDARD_ANGLES: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Parse a rotation. Shortcuts (`cw`, `left`, `flip`, ...) win over numeric parsing.
pub fn parse_rotate_angle(value: &str) -> KritiResult<RotateAngle> {
    let v = value.trim().to_ascii_lowercase();
    let shortcut = match v.as_str() {
        "90" | "cw" | "right" => Some(90.0),
        "180" | "flip" => Some(180.0),
        "270" | "-90" | "ccw" | "left" => Some(270.0),
        "0" => Some(0.0),
        _ => None,
    };
    if let Some(degrees) = shortcut {
        return Ok(RotateAngle {
            degrees,
            standard: true,
        });
    }

    let raw: f64 = v
        .parse()
        .ok()
        .filter(|d: &f64| d.is_finite())
        .ok_or_else(|| KritiError::InvalidRotation(value.to_string()))?;
    let mut angle = raw.rem_euclid(360.0);
    if angle >= 360.0 {
        angle = 0.0;
    }

    let standard = STANDARD_ANGLES.iter().any(|s| (angle - s).abs() < 0.1);
    if !standard {
        tracing::warn!(angle, "non-standard rotation angle may result in quality loss");
    }
    Ok(RotateAngle {
        degrees: angle as f32,
        standard,
    })
}

/// Parse an output format name (`jpg`/`jpeg`, `png`, `webp`; case-insensitive).
pub fn parse_format(value: &str) -> KritiResult<ImageFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "png" => Ok(ImageFormat::Png),
        "webp" => Ok(ImageFormat::Webp),
        _ => Err(KritiError::InvalidFormat(value.to_string())),
    }
}

/// Parse `"<n>%"` (0..=50) or `"<n>"` / `"<n>px"` (non-negative).
pub fn parse_border_radius(value: &str) -> KritiResult<BorderRadiusValue> {
    let value = value.trim();
    if value.is_empty() {
        return Err(KritiError::invalid_radius("value cannot be empty"));
    }

    if let Some(pct) = value.strip_suffix('%') {
        return match pct.parse::<f32>() {
            Ok(p) if p.is_finite() && (0.0..=50.0).contains(&p) => Ok(BorderRadiusValue {
                magnitude: p,
                is_percent: true,
            }),
            _ => Err(KritiError::invalid_radius(format!(
                "percentage value must be between 0% and 50%, got {value}"
            ))),
        };
    }

    let px = value.strip_suffix("px").unwrap_or(value);
    match px.parse::<f32>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(BorderRadiusValue {
            magnitude: p,
            is_percent: false,
        }),
        _ => Err(KritiError::invalid_radius(format!(
            "pixel value must be a non-negative number, got {value}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/value.rs"]
mod tests;
