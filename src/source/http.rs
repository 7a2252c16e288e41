use std::{io::Read, time::Duration};

use image::RgbaImage;

use crate::{
    foundation::{
        config::SourceLimits,
        core::CancelToken,
        error::{KritiError, KritiResult},
    },
    raster::codec,
    source::{ImageSource, SourceImage, is_remote},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only source that downloads images over HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpImageSource {
    client: reqwest::blocking::Client,
    limits: SourceLimits,
}

impl HttpImageSource {
    pub fn new(limits: SourceLimits) -> KritiResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("kriti/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| KritiError::Other(anyhow::anyhow!("build http client: {e}")))?;
        Ok(Self { client, limits })
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, url: &str, cancel: &CancelToken) -> KritiResult<SourceImage> {
        if !is_remote(url) {
            return Err(KritiError::invalid_path(format!("'{url}' is not an http(s) URL")));
        }
        cancel.check()?;

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| KritiError::source_not_found(format!("fetch '{url}': {e}")))?;
        if !resp.status().is_success() {
            return Err(KritiError::source_not_found(format!(
                "fetch '{url}': status {}",
                resp.status()
            )));
        }
        if let Some(len) = resp.content_length() {
            self.limits.check_bytes(len, url)?;
        }

        let bytes = read_limited(resp, self.limits.max_file_size_bytes, url)?;
        self.limits.check_bytes(bytes.len() as u64, url)?;

        let decoded = codec::decode(&bytes)?;
        let (w, h) = decoded.raster.dimensions();
        self.limits.check_dimensions(w, h, url)?;

        tracing::debug!(url, bytes = bytes.len(), w, h, "fetched remote image");
        Ok(decoded.into())
    }

    fn store(&self, path: &str, _raster: &RgbaImage) -> KritiResult<()> {
        Err(KritiError::invalid_path(format!(
            "'{path}': upload is not supported for remote sources"
        )))
    }
}

/// Read at most one byte past `max`, so an unannounced oversize body never lands in memory whole.
fn read_limited(body: impl Read, max: u64, url: &str) -> KritiResult<Vec<u8>> {
    let mut bytes = Vec::new();
    body.take(max.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| KritiError::source_not_found(format!("read '{url}': {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/source/http.rs"]
mod tests;
