//! Where source images come from and where uploads go.

use image::RgbaImage;

use crate::{
    foundation::{
        core::{CancelToken, ImageFormat},
        error::{KritiError, KritiResult},
    },
    raster::codec::Decoded,
};

#[cfg(feature = "http")]
pub mod http;
pub mod local;
pub mod router;

/// A fetched source raster plus the format it was stored in.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub raster: RgbaImage,
    /// `None` when the stored format is not one we can write back.
    pub format: Option<ImageFormat>,
}

impl From<Decoded> for SourceImage {
    fn from(d: Decoded) -> Self {
        Self {
            raster: d.raster,
            format: d.format,
        }
    }
}

/// Storage backend for source images.
///
/// `fetch` fails with [`KritiError::SourceNotFound`] on any I/O or decode failure and with
/// [`KritiError::OversizeSource`] when the encoded bytes or decoded dimensions exceed the
/// configured limits.
pub trait ImageSource: Send + Sync {
    fn fetch(&self, path: &str, cancel: &CancelToken) -> KritiResult<SourceImage>;

    /// Encode `raster` by the format implied by `path`'s extension and persist it.
    fn store(&self, path: &str, raster: &RgbaImage) -> KritiResult<()>;
}

/// Normalize a relative source path to `a/b/c` form.
///
/// Absolute paths and `..` segments are rejected so lookups cannot leave the source root.
pub fn normalize_rel_path(path: &str) -> KritiResult<String> {
    let s = path.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(KritiError::invalid_path("path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(KritiError::invalid_path(format!("'{path}' must be relative")));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(KritiError::invalid_path(format!(
                "'{path}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(KritiError::invalid_path(format!(
            "'{path}' must contain a file name"
        )));
    }
    Ok(out.join("/"))
}

/// `true` for `http://` and `https://` locations.
pub fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(test)]
#[path = "../tests/unit/source/paths.rs"]
mod tests;
