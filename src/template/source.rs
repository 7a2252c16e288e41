use std::path::PathBuf;

use crate::{
    foundation::{
        core::CancelToken,
        error::{KritiError, KritiResult},
    },
    source::normalize_rel_path,
};

/// Storage backend for raw template text.
pub trait TemplateSource: Send + Sync {
    /// Raw, not yet substituted template text for `name`.
    fn fetch(&self, name: &str, cancel: &CancelToken) -> KritiResult<String>;
}

/// Templates stored as files under one root directory.
#[derive(Clone, Debug)]
pub struct LocalTemplateSource {
    root: PathBuf,
}

impl LocalTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for LocalTemplateSource {
    fn fetch(&self, name: &str, cancel: &CancelToken) -> KritiResult<String> {
        cancel.check()?;
        let full = self.root.join(normalize_rel_path(name)?);
        let bytes = std::fs::read(&full)
            .map_err(|e| KritiError::source_not_found(format!("template '{name}': {e}")))?;
        tracing::debug!(name, bytes = bytes.len(), "loaded template");
        String::from_utf8(bytes)
            .map_err(|_| KritiError::InvalidTemplate(format!("template '{name}' is not UTF-8")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/source.rs"]
mod tests;
