use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::foundation::error::{KritiError, KritiResult};

/// Byte and pixel ceilings applied to every source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLimits {
    /// Largest accepted width or height in pixels.
    pub max_dimension: u32,
    /// Largest accepted encoded size in bytes.
    pub max_file_size_bytes: u64,
}

impl SourceLimits {
    pub fn check_bytes(&self, len: u64, what: &str) -> KritiResult<()> {
        if len > self.max_file_size_bytes {
            return Err(KritiError::oversize(format!(
                "'{what}' is {len} bytes, max allowed is {} bytes",
                self.max_file_size_bytes
            )));
        }
        Ok(())
    }

    pub fn check_dimensions(&self, width: u32, height: u32, what: &str) -> KritiResult<()> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(KritiError::oversize(format!(
                "'{what}' is {width}x{height}, max allowed is {max}x{max}",
                max = self.max_dimension
            )));
        }
        Ok(())
    }
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            max_dimension: 8192,
            max_file_size_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Process-wide, read-only settings.
///
/// Every field has a default, so a config file only needs to list what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KritiConfig {
    /// Directory local image paths are resolved against.
    pub images_root: PathBuf,
    /// Directory template names are resolved against.
    pub templates_root: PathBuf,
    /// Font file used by template `Text` nodes.
    pub font_path: PathBuf,
    pub max_image_dimension: u32,
    pub max_file_size_bytes: u64,
    /// Largest template canvas side in pixels.
    pub max_canvas_size: u32,
    /// Route `http://` and `https://` paths to the HTTP source (feature `http`).
    pub enable_http_source: bool,
}

impl Default for KritiConfig {
    fn default() -> Self {
        let limits = SourceLimits::default();
        Self {
            images_root: PathBuf::from("web/static/assets"),
            templates_root: PathBuf::from("web/templates"),
            font_path: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
            max_image_dimension: limits.max_dimension,
            max_file_size_bytes: limits.max_file_size_bytes,
            max_canvas_size: 2048,
            enable_http_source: false,
        }
    }
}

impl KritiConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> KritiResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| KritiError::Other(anyhow::anyhow!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> KritiResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KritiError::Other(anyhow::anyhow!(
                "open config JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn source_limits(&self) -> SourceLimits {
        SourceLimits {
            max_dimension: self.max_image_dimension,
            max_file_size_bytes: self.max_file_size_bytes,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
