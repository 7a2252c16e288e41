use std::{collections::BTreeMap, sync::Arc};

use crate::{
    foundation::{
        config::KritiConfig,
        core::{CancelToken, ImageFormat},
        error::{KritiError, KritiResult},
    },
    parse::options::{ParsedOptions, parse_options},
    raster::codec,
    source::{ImageSource, local::LocalImageSource, router::SourceRouter},
    template::{
        compositor::Compositor,
        node::Template,
        source::{LocalTemplateSource, TemplateSource},
        substitute::substitute_variables,
    },
    transform::{chain::build_chain, engine::run_pipeline},
};

/// Encoded output of a transform or template render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// MIME type for `format`.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Entry point: image transforms, template renders, and uploads against configured sources.
///
/// Holds only read-only state, so one instance can serve concurrent requests.
pub struct Kriti {
    config: KritiConfig,
    images: Arc<dyn ImageSource>,
    templates: Arc<dyn TemplateSource>,
    compositor: Compositor,
}

impl Kriti {
    /// Wire the local image and template sources, plus the HTTP source when enabled.
    pub fn new(config: KritiConfig) -> KritiResult<Self> {
        let local = LocalImageSource::new(&config.images_root, config.source_limits());
        #[allow(unused_mut)]
        let mut router = SourceRouter::new(Arc::new(local));

        if config.enable_http_source {
            #[cfg(feature = "http")]
            {
                let remote = crate::source::http::HttpImageSource::new(config.source_limits())?;
                router = router.with_remote(Arc::new(remote));
            }
            #[cfg(not(feature = "http"))]
            tracing::warn!("enable_http_source is set but kriti was built without the `http` feature");
        }

        let templates = LocalTemplateSource::new(&config.templates_root);
        Ok(Self::with_sources(
            config,
            Arc::new(router),
            Arc::new(templates),
        ))
    }

    /// Use caller-provided sources instead of the configured directories.
    pub fn with_sources(
        config: KritiConfig,
        images: Arc<dyn ImageSource>,
        templates: Arc<dyn TemplateSource>,
    ) -> Self {
        let compositor = Compositor::new(&config.font_path, config.max_canvas_size);
        Self {
            config,
            images,
            templates,
            compositor,
        }
    }

    pub fn config(&self) -> &KritiConfig {
        &self.config
    }

    /// Apply a comma separated option string to the image at `path`.
    ///
    /// Options are parsed and interpreted before the source is fetched, so malformed requests
    /// fail without touching storage. A blank option string re-encodes the source unchanged.
    #[tracing::instrument(skip(self, cancel))]
    pub fn transform(
        &self,
        path: &str,
        options: &str,
        cancel: &CancelToken,
    ) -> KritiResult<EncodedImage> {
        let parsed = if options.trim().is_empty() {
            ParsedOptions::default()
        } else {
            parse_options(options)?
        };
        let chain = build_chain(&parsed)?;

        let src = self.images.fetch(path, cancel)?;
        let (src_w, src_h) = src.raster.dimensions();
        let dest = parsed.destination(src_w, src_h, src.format);

        let out = run_pipeline(&src.raster, &chain, &dest)?;
        cancel.check()?;
        let bytes = codec::encode(&out, dest.format, dest.quality)?;

        tracing::debug!(
            width = out.width(),
            height = out.height(),
            format = %dest.format,
            bytes = bytes.len(),
            "transform done"
        );
        Ok(EncodedImage {
            bytes,
            format: dest.format,
            width: out.width(),
            height: out.height(),
        })
    }

    /// Load the template `name`, substitute `vars`, and render it to PNG.
    #[tracing::instrument(skip(self, vars, cancel))]
    pub fn render_template(
        &self,
        name: &str,
        vars: &BTreeMap<String, String>,
        cancel: &CancelToken,
    ) -> KritiResult<EncodedImage> {
        let raw = self.templates.fetch(name, cancel)?;
        self.render_template_text(&raw, vars, cancel)
    }

    /// Render raw template text that did not come from the template source.
    pub fn render_template_text(
        &self,
        raw: &str,
        vars: &BTreeMap<String, String>,
        cancel: &CancelToken,
    ) -> KritiResult<EncodedImage> {
        let template = Template::from_json(&substitute_variables(raw, vars))?;
        let canvas = self
            .compositor
            .render(&template, self.images.as_ref(), cancel)?;
        cancel.check()?;

        let bytes = codec::encode(&canvas, ImageFormat::Png, 100)?;
        Ok(EncodedImage {
            bytes,
            format: ImageFormat::Png,
            width: canvas.width(),
            height: canvas.height(),
        })
    }

    /// Decode `bytes` and store the image at `path` through the image source.
    ///
    /// The stored format follows `path`'s extension, not the uploaded encoding.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn upload(&self, path: &str, bytes: &[u8]) -> KritiResult<()> {
        self.config
            .source_limits()
            .check_bytes(bytes.len() as u64, path)?;
        let decoded = codec::decode(bytes)
            .map_err(|e| KritiError::InvalidFormat(format!("upload '{path}': {e}")))?;
        self.images.store(path, &decoded.raster)
    }
}

impl std::fmt::Debug for Kriti {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kriti")
            .field("config", &self.config)
            .field("compositor", &self.compositor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../tests/unit/service.rs"]
mod tests;
