use std::sync::Arc;

use image::RgbaImage;

use crate::{
    foundation::{
        core::CancelToken,
        error::{KritiError, KritiResult},
    },
    source::{ImageSource, SourceImage, is_remote},
};

/// Sends `http(s)://` locations to the remote source and everything else to the default one.
#[derive(Clone)]
pub struct SourceRouter {
    default: Arc<dyn ImageSource>,
    remote: Option<Arc<dyn ImageSource>>,
}

impl SourceRouter {
    pub fn new(default: Arc<dyn ImageSource>) -> Self {
        Self {
            default,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn ImageSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    fn route(&self, path: &str) -> KritiResult<&dyn ImageSource> {
        if !is_remote(path) {
            return Ok(self.default.as_ref());
        }
        self.remote
            .as_deref()
            .ok_or_else(|| KritiError::invalid_path(format!("'{path}': remote sources are disabled")))
    }
}

impl std::fmt::Debug for SourceRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRouter")
            .field("remote_enabled", &self.remote.is_some())
            .finish()
    }
}

impl ImageSource for SourceRouter {
    fn fetch(&self, path: &str, cancel: &CancelToken) -> KritiResult<SourceImage> {
        self.route(path)?.fetch(path, cancel)
    }

    fn store(&self, path: &str, raster: &RgbaImage) -> KritiResult<()> {
        self.route(path)?.store(path, raster)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/router.rs"]
mod tests;
