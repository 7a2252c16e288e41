use crate::foundation::{
    core::Rgba8,
    error::{KritiError, KritiResult},
};

const NAMED_COLORS: &[(&str, Rgba8)] = &[
    ("transparent", Rgba8::new(0, 0, 0, 0)),
    ("black", Rgba8::new(0, 0, 0, 255)),
    ("white", Rgba8::new(255, 255, 255, 255)),
    ("red", Rgba8::new(255, 0, 0, 255)),
    ("green", Rgba8::new(0, 128, 0, 255)),
    ("blue", Rgba8::new(0, 0, 255, 255)),
    ("yellow", Rgba8::new(255, 255, 0, 255)),
    ("cyan", Rgba8::new(0, 255, 255, 255)),
    ("magenta", Rgba8::new(255, 0, 255, 255)),
    ("gray", Rgba8::new(128, 128, 128, 255)),
    ("orange", Rgba8::new(255, 165, 0, 255)),
    ("purple", Rgba8::new(128, 0, 128, 255)),
    ("pink", Rgba8::new(255, 192, 203, 255)),
    ("brown", Rgba8::new(165, 42, 42, 255)),
];

/// Parse a CSS-like color token.
///
/// Accepted, in order: `#RGB`, `#RRGGBB`, `#RRGGBBAA`; a small table of named colors;
/// `rgb(..)`/`rgba(..)` with comma or space separators. The token may be percent-encoded
/// (`%23ff0000`).
pub fn parse_color(value: &str) -> KritiResult<Rgba8> {
    let decoded = percent_encoding::percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| KritiError::UnsupportedColorFormat(value.to_string()))?;
    let s = decoded.trim();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| KritiError::UnsupportedColorFormat(s.to_string()));
    }
    if let Some(c) = named_color(s) {
        return Ok(c);
    }
    if s.starts_with("rgb") {
        return parse_rgb_function(s)
            .ok_or_else(|| KritiError::UnsupportedColorFormat(s.to_string()));
    }
    Err(KritiError::UnsupportedColorFormat(s.to_string()))
}

fn named_color(name: &str) -> Option<Rgba8> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba8::new(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
            255,
        )),
        6 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(s: &str) -> Option<Rgba8> {
    let body = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Long digit runs still clamp instead of overflowing.
        Some(p.parse::<u64>().map_or(255, |v| v.min(255) as u8))
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => parse_alpha(p)?,
        None => 255,
    };
    Some(Rgba8::new(r, g, b, a))
}

/// `0.0..=1.0` scales by 255; anything larger is read as an integer `0..=255`.
fn parse_alpha(p: &str) -> Option<u8> {
    let (int_part, frac_part) = match p.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (p, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(int_part) || frac_part.is_some_and(|f| !digits(f)) {
        return None;
    }

    let v: f64 = p.parse().ok()?;
    if v <= 1.0 {
        Some((v * 255.0).round() as u8)
    } else {
        Some(v.min(255.0) as u8)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/color.rs"]
mod tests;
