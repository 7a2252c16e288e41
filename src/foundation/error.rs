/// Convenience result type used across Kriti.
pub type KritiResult<T> = Result<T, KritiError>;

/// Coarse classification of a [`KritiError`], used by callers to pick a response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad request input; safe to report verbatim.
    Input,
    /// The source image could not be obtained (missing, undecodable, oversize).
    Source,
    /// Encoding or other internal failure.
    Internal,
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KritiError {
    /// An option token is not a single `key=value` pair.
    #[error("malformed option: '{0}'")]
    MalformedOption(String),

    /// An option key is not recognized.
    #[error("unknown option: '{0}'")]
    UnknownOption(String),

    /// A structural numeric value (width, height, quality) is missing or out of range.
    #[error("invalid {key}: {reason}")]
    InvalidNumber {
        /// Option key the value belongs to.
        key: String,
        /// Human readable reason.
        reason: String,
    },

    /// Output format is not one of jpeg, png, webp.
    #[error("invalid format: '{0}' (supported formats: jpeg, jpg, png, webp)")]
    InvalidFormat(String),

    /// Border radius value could not be parsed or is out of range.
    #[error("invalid radius: {0}")]
    InvalidRadius(String),

    /// Rotation angle is neither a shortcut nor a number.
    #[error("invalid rotate value: '{0}'")]
    InvalidRotation(String),

    /// Color token matched none of the supported notations.
    #[error("unsupported color format: '{0}'")]
    UnsupportedColorFormat(String),

    /// Fit mode name is not recognized.
    #[error("invalid fit mode: '{0}' (valid modes: scaledown, contain, cover, crop, pad, squeeze)")]
    InvalidFitMode(String),

    /// A fit operation was requested without width or height.
    #[error("width and/or height must be specified for fit operation")]
    FitRequiresDimensions,

    /// Template canvas size is outside the accepted range.
    #[error("invalid canvas size: {0}")]
    InvalidCanvasSize(String),

    /// Template text could not be parsed into a node tree.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// A source path escapes the configured root or is otherwise unusable.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The source image could not be read or decoded.
    #[error("source image not found: {0}")]
    SourceNotFound(String),

    /// The source image exceeds the configured byte or pixel limits.
    #[error("source image too large: {0}")]
    OversizeSource(String),

    /// The configured font could not be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// The codec rejected the raster.
    #[error("encode error: {0}")]
    Encode(String),

    /// The request was cancelled or its deadline passed.
    #[error("request cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KritiError {
    /// Build a [`KritiError::InvalidNumber`] value.
    pub fn invalid_number(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNumber {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`KritiError::InvalidRadius`] value.
    pub fn invalid_radius(msg: impl Into<String>) -> Self {
        Self::InvalidRadius(msg.into())
    }

    /// Build a [`KritiError::InvalidPath`] value.
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    /// Build a [`KritiError::SourceNotFound`] value.
    pub fn source_not_found(msg: impl Into<String>) -> Self {
        Self::SourceNotFound(msg.into())
    }

    /// Build a [`KritiError::OversizeSource`] value.
    pub fn oversize(msg: impl Into<String>) -> Self {
        Self::OversizeSource(msg.into())
    }

    /// Build a [`KritiError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Classify this error for response mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedOption(_)
            | Self::UnknownOption(_)
            | Self::InvalidNumber { .. }
            | Self::InvalidFormat(_)
            | Self::InvalidRadius(_)
            | Self::InvalidRotation(_)
            | Self::UnsupportedColorFormat(_)
            | Self::InvalidFitMode(_)
            | Self::FitRequiresDimensions
            | Self::InvalidCanvasSize(_)
            | Self::InvalidTemplate(_)
            | Self::InvalidPath(_) => ErrorCategory::Input,
            Self::SourceNotFound(_) | Self::OversizeSource(_) => ErrorCategory::Source,
            Self::Font(_) | Self::Encode(_) | Self::Cancelled | Self::Other(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
