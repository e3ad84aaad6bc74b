use thiserror::Error;

/// Failure reported by a [`TemplateContext`](crate::fields::TemplateContext)
/// while expanding placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Self or cyclic reference, detected by exceeding the expansion depth
    #[error("recursive placeholder expansion in {0:?}")]
    Recursion(String),
    /// A `{REF:...}` placeholder whose search matched no record
    #[error("reference target not found: {{{0}}}")]
    TargetNotFound(String),
    /// A placeholder that could not be parsed
    #[error("malformed placeholder: {{{0}}}")]
    Malformed(String),
}

/// Errors produced by the resolve → encode → render pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// QR version outside 1-40
    #[error("invalid QR version {0}: supported versions are 1-40")]
    InvalidVersion(u32),
    /// Zero pixels per module, or an output side above the raster limit
    #[error("invalid scale: {0} pixels per module")]
    InvalidScale(u32),
    /// The requested key is not present on the record
    #[error("field not found: {0}")]
    FieldNotFound(String),
    /// Propagated from the template context
    #[error("template resolution failed: {0}")]
    TemplateResolution(#[from] TemplateError),
    /// The payload cannot be represented as a QR symbol
    #[error("text cannot be encoded as a QR code: {0}")]
    UnencodableText(String),
    /// Writing the rendered image failed
    #[error("failed to export image: {0}")]
    Export(#[from] image::ImageError),
}

/// Message shown to the user for any failure of the display pipeline.
pub const CANNOT_DISPLAY_MESSAGE: &str = "This field cannot be displayed as a QR code.";

/// Message shown to the user when saving the image fails.
pub const CANNOT_EXPORT_MESSAGE: &str = "The QR code image could not be saved.";

impl Error {
    /// User-facing text for this error.
    ///
    /// Every resolve/encode/render failure collapses to the same notice; the
    /// variant itself stays available for logging and tests.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Export(_) => CANNOT_EXPORT_MESSAGE,
            _ => CANNOT_DISPLAY_MESSAGE,
        }
    }
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;
