//! Kriti turns stored images into derived images on request.
//!
//! Two request kinds are supported:
//!
//! - **Transform**: a comma separated option string such as
//!   `width=400,height=300,fit=pad,background=blue` is parsed into a destination descriptor
//!   and an ordered filter chain, which runs over a fetched source image before encoding.
//! - **Template**: a JSON node tree (with `{{name}}` variables substituted first) is drawn
//!   onto a square canvas of image and text layers and encoded as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `&str -> ParsedOptions` (all-or-nothing, see [`parse_options`])
//! 2. **Build**: `ParsedOptions -> Vec<Filter>` in a fixed canonical order
//! 3. **Fetch**: an [`ImageSource`] returns the source raster and its format
//! 4. **Run**: filters apply in order, then the result is composited over the background
//! 5. **Encode**: JPEG, PNG, or WebP bytes
//!
//! Each request is self-contained. Cancellation via [`CancelToken`] is honored before the
//! source fetch and before encode; pixel passes themselves are not interrupted.
#![forbid(unsafe_code)]

pub mod foundation;
pub mod parse;
pub mod raster;
pub mod service;
pub mod source;
pub mod template;
pub mod transform;

pub use foundation::config::{KritiConfig, SourceLimits};
pub use foundation::core::{CancelToken, ImageFormat, Rgba8};
pub use foundation::error::{ErrorCategory, KritiError, KritiResult};
pub use parse::color::parse_color;
pub use parse::options::{
    DestinationDescriptor, Operation, OperationKind, OperationSet, ParsedOptions, parse_options,
};
pub use service::{EncodedImage, Kriti};
pub use source::local::LocalImageSource;
pub use source::router::SourceRouter;
pub use source::{ImageSource, SourceImage, normalize_rel_path};
pub use template::compositor::Compositor;
pub use template::node::{ImageNode, Node, Template, TextNode};
pub use template::source::{LocalTemplateSource, TemplateSource};
pub use template::substitute::substitute_variables;
pub use transform::border_radius::{BorderRadiusValue, CornerRadii};
pub use transform::chain::{Filter, build_chain};
pub use transform::engine::run_pipeline;
pub use transform::fit::{Fit, FitMode};

#[cfg(feature = "http")]
pub use source::http::HttpImageSource;
