//! Quotecraft
//!
//! Turns a short quote or scripture into a branded 1080x1080 PNG design.
//!
//! # Features
//!
//! - **Template registry**: eight fixed designs, each a pure function from
//!   [`QuoteData`] to a display-list [`Composition`]
//! - **Auto-match**: a keyword heuristic picks a template from the text
//! - **Export**: off-screen staging, bounded image loading and a 2x
//!   supersampled raster encoded as lossless PNG
//! - **Branding**: a single persisted church logo plus name and handle
//!
//! # Example
//!
//! ```no_run
//! use quotecraft::{Studio, StudioConfig};
//!
//! # async fn run() -> quotecraft::Result<()> {
//! let config = StudioConfig {
//!     store_dir: Some("/tmp/quotecraft".into()),
//!     ..Default::default()
//! };
//! let mut studio = Studio::open(config)?;
//! studio.set_text("Hustle and grow your business");
//! println!("template: {}", studio.template());
//! let outcome = studio.export().await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod export;
pub mod logo_store;
pub mod matcher;
pub mod quote;
pub mod rendering;
pub mod resources;
pub mod studio;
pub mod templates;

pub use export::{ExportOutcome, ExportPipeline, ExportedImage, PreviewTree};
pub use logo_store::LogoStore;
pub use matcher::{explain_match, match_template};
pub use quote::{LogoState, QuoteData};
pub use rendering::{Color, Composition, Screenshot};
pub use studio::Studio;
pub use templates::{Template, TemplateId, TEMPLATES};

/// Configuration for the export pipeline
///
/// The defaults reproduce the reference output: a 1080px design captured at
/// 2x onto white, giving a 2160x2160 PNG.
///
/// # Examples
///
/// ```
/// let cfg = quotecraft::ExportConfig::default();
/// assert_eq!(cfg.canvas_size * cfg.supersample, 2160);
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory exported PNGs are written to
    pub output_dir: PathBuf,
    /// Logical edge length of the staged canvas
    pub canvas_size: u32,
    /// Device pixels per logical pixel in the output
    pub supersample: u32,
    /// Per-image load timeout in milliseconds
    pub image_timeout_ms: u64,
    /// Pause after images load, before capture, in milliseconds
    pub settle_delay_ms: u64,
    /// Colour under the design
    pub background: Color,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            canvas_size: rendering::CANVAS_SIZE,
            supersample: 2,
            image_timeout_ms: 3000,
            settle_delay_ms: 300,
            background: Color::WHITE,
        }
    }
}

/// Configuration for a [`Studio`] session
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Quote length cap in characters
    pub max_chars: usize,
    /// Scale the live preview is mounted at
    pub preview_scale: f32,
    pub default_template: TemplateId,
    /// Initial church name
    pub church_name: String,
    /// Initial church handle
    pub church_handle: String,
    /// Directory bundled assets (e.g. the default logo) are read from
    pub asset_root: PathBuf,
    /// Logo store directory; `None` uses the platform data directory
    pub store_dir: Option<PathBuf>,
    /// Logo used when nothing has been uploaded
    pub default_logo: Option<String>,
    pub export: ExportConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            max_chars: quote::MAX_CHARS,
            preview_scale: 0.42,
            default_template: TemplateId::default(),
            church_name: "Christ Chosen Zion City Ministry".to_string(),
            church_handle: "@churchhandle".to_string(),
            asset_root: PathBuf::from("public"),
            store_dir: None,
            default_logo: Some(logo_store::DEFAULT_LOGO.to_string()),
            export: ExportConfig::default(),
        }
    }
}

impl StudioConfig {
    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(Error::ConfigError("max_chars must be at least 1".into()));
        }
        if !(self.preview_scale.is_finite() && self.preview_scale > 0.0) {
            return Err(Error::ConfigError(format!("invalid preview scale {}", self.preview_scale)));
        }
        if self.export.canvas_size == 0 {
            return Err(Error::ConfigError("canvas_size must be positive".into()));
        }
        Ok(())
    }
}
