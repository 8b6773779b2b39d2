//! Error types for the quote studio

use thiserror::Error;

/// Result type alias for studio operations
pub type Result<T> = std::result::Result<T, Error>;

/// User-visible message for every export failure
pub const EXPORT_FAILED_MESSAGE: &str = "Export failed. Please try again.";

/// Errors that can occur while editing, rendering or exporting a design
#[derive(Error, Debug)]
pub enum Error {
    /// User input rejected at the boundary (e.g. oversized logo)
    #[error("{0}")]
    ValidationError(String),

    /// Nothing to operate on (e.g. no composition mounted for export)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Staging, capture, encoding or delivery failed.
    ///
    /// The display form is the single generic message shown to users; the
    /// cause is kept for logs.
    #[error("Export failed. Please try again.")]
    ExportError { cause: String },

    /// Failed to render content
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// A sub-resource (image reference) could not be loaded or decoded
    #[error("Resource error: {0}")]
    ResourceError(String),

    /// Durable storage could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap any failure as an export failure, keeping its text as the cause.
    pub fn export(cause: impl std::fmt::Display) -> Self {
        Error::ExportError {
            cause: cause.to_string(),
        }
    }

    /// Whether this error should be surfaced to the user.
    ///
    /// `NotFound` is a transient timing issue and stays silent.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Error::NotFound(_))
    }
}
