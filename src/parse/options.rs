use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{ImageFormat, Rgba8},
        error::{KritiError, KritiResult},
    },
    parse::{color::parse_color, value},
};

/// Kind of a pixel operation.
///
/// Declaration order is the execution order: resize first, then geometry, then color
/// adjustments, then blur/sharpen, and the border-radius mask last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationKind {
    Fit,
    Flip,
    Rotate,
    Brightness,
    Contrast,
    Gamma,
    Saturation,
    Blur,
    Sharpen,
    BorderRadius,
}

impl OperationKind {
    /// Option key used in request strings.
    pub fn key(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Flip => "flip",
            Self::Rotate => "rotate",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Gamma => "gamma",
            Self::Saturation => "saturation",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::BorderRadius => "radius",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "fit" => Self::Fit,
            "flip" => Self::Flip,
            "rotate" => Self::Rotate,
            "brightness" => Self::Brightness,
            "contrast" => Self::Contrast,
            "gamma" => Self::Gamma,
            "saturation" => Self::Saturation,
            "blur" => Self::Blur,
            "sharpen" => Self::Sharpen,
            "radius" => Self::BorderRadius,
            _ => return None,
        })
    }
}

/// One requested operation with its raw, not yet interpreted argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    pub kind: OperationKind,
    pub arg: String,
}

/// Operations of a request, at most one per kind, iterated in canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationSet {
    ops: BTreeMap<OperationKind, Operation>,
}

impl OperationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an operation; a later operation of the same kind replaces the earlier one.
    pub fn insert(&mut self, kind: OperationKind, arg: impl Into<String>) {
        self.ops.insert(
            kind,
            Operation {
                kind,
                arg: arg.into(),
            },
        );
    }

    pub fn get(&self, kind: OperationKind) -> Option<&Operation> {
        self.ops.get(&kind)
    }

    pub fn contains(&self, kind: OperationKind) -> bool {
        self.ops.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.values()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Resolved output settings for one transform request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DestinationDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Lossy quality, 1..=100.
    pub quality: u8,
    /// `None` when the request did not set a background.
    pub background: Option<Rgba8>,
}

/// Result of parsing an option string, before the source image is known.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<ImageFormat>,
    pub quality: u8,
    pub background: Option<Rgba8>,
    pub operations: OperationSet,
}

impl Default for ParsedOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            format: None,
            quality: 100,
            background: None,
            operations: OperationSet::new(),
        }
    }
}

impl ParsedOptions {
    /// Backfill unset fields from the source image.
    ///
    /// Sources in a format we cannot write fall back to PNG output.
    pub fn destination(
        &self,
        source_width: u32,
        source_height: u32,
        source_format: Option<ImageFormat>,
    ) -> DestinationDescriptor {
        DestinationDescriptor {
            width: self.width.unwrap_or(source_width),
            height: self.height.unwrap_or(source_height),
            format: self
                .format
                .or(source_format)
                .unwrap_or(ImageFormat::Png),
            quality: self.quality,
            background: self.background,
        }
    }

    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// Parse a comma separated `key=value` option string.
///
/// Parsing is all-or-nothing: the first bad token aborts with its error.
pub fn parse_options(options: &str) -> KritiResult<ParsedOptions> {
    let mut out = ParsedOptions::default();

    for token in options.split(',') {
        let mut parts = token.split('=');
        let (Some(key), Some(val), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(KritiError::MalformedOption(token.to_string()));
        };
        let key = key.trim();
        let val = val.trim();

        match key {
            "width" => out.width = Some(value::parse_int_in_range(key, val, 1, 10_000)?),
            "height" => out.height = Some(value::parse_int_in_range(key, val, 1, 10_000)?),
            "quality" => out.quality = value::parse_int_in_range(key, val, 1, 100)? as u8,
            "format" => out.format = Some(value::parse_format(val)?),
            "background" => out.background = Some(parse_color(val)?),
            _ => {
                let kind = OperationKind::from_key(key)
                    .ok_or_else(|| KritiError::UnknownOption(key.to_string()))?;
                out.operations.insert(kind, val);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/parse/options.rs"]
mod tests;
