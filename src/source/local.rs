use std::path::PathBuf;

use anyhow::Context;
use image::RgbaImage;

use crate::{
    foundation::{
        config::SourceLimits,
        core::{CancelToken, ImageFormat},
        error::{KritiError, KritiResult},
    },
    raster::codec,
    source::{ImageSource, SourceImage, normalize_rel_path},
};

/// Lossy quality used when persisting JPEG uploads.
const STORE_QUALITY: u8 = 85;

/// Images on the local filesystem under one root directory.
#[derive(Clone, Debug)]
pub struct LocalImageSource {
    root: PathBuf,
    limits: SourceLimits,
}

impl LocalImageSource {
    pub fn new(root: impl Into<PathBuf>, limits: SourceLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    fn resolve(&self, path: &str) -> KritiResult<PathBuf> {
        Ok(self.root.join(normalize_rel_path(path)?))
    }
}

impl ImageSource for LocalImageSource {
    fn fetch(&self, path: &str, cancel: &CancelToken) -> KritiResult<SourceImage> {
        cancel.check()?;
        let full = self.resolve(path)?;

        let meta = std::fs::metadata(&full)
            .map_err(|e| KritiError::source_not_found(format!("'{path}': {e}")))?;
        if !meta.is_file() {
            return Err(KritiError::source_not_found(format!("'{path}' is not a file")));
        }
        self.limits.check_bytes(meta.len(), path)?;

        let bytes = std::fs::read(&full)
            .map_err(|e| KritiError::source_not_found(format!("'{path}': {e}")))?;
        let decoded = codec::decode(&bytes)?;
        let (w, h) = decoded.raster.dimensions();
        self.limits.check_dimensions(w, h, path)?;

        tracing::debug!(path, bytes = bytes.len(), w, h, "fetched local image");
        Ok(decoded.into())
    }

    fn store(&self, path: &str, raster: &RgbaImage) -> KritiResult<()> {
        let rel = normalize_rel_path(path)?;
        let format = ImageFormat::from_extension(&rel)
            .ok_or_else(|| KritiError::InvalidFormat(rel.clone()))?;
        let (w, h) = raster.dimensions();
        self.limits.check_dimensions(w, h, path)?;

        let bytes = codec::encode(raster, format, STORE_QUALITY)?;
        let full = self.root.join(&rel);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory '{}'", parent.display()))?;
        }
        std::fs::write(&full, &bytes)
            .with_context(|| format!("write image to '{}'", full.display()))?;

        if let Err(e) = self.limits.check_bytes(bytes.len() as u64, path) {
            std::fs::remove_file(&full).ok();
            return Err(e);
        }

        tracing::debug!(path = %rel, bytes = bytes.len(), %format, "stored image");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/local.rs"]
mod tests;
