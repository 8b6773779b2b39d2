//! Top-level controller owning all editing state.
//!
//! Templates never see the studio; they receive the [`QuoteData`] it builds
//! on each render.

use std::path::Path;
use std::sync::Arc;

use crate::export::{ExportOutcome, ExportPipeline, PreviewTree};
use crate::logo_store::LogoStore;
use crate::matcher::match_template;
use crate::quote::{within_cap, LogoState, QuoteData};
use crate::rendering::Composition;
use crate::resources::{AssetLoader, ResourceLoader};
use crate::templates::{self, TemplateId};
use crate::{Result, StudioConfig};

/// Characters left before the counter turns into a warning
const NEAR_LIMIT: usize = 20;

pub struct Studio {
    config: StudioConfig,
    text: String,
    author: String,
    church_name: String,
    church_handle: String,
    template: TemplateId,
    auto_match: bool,
    logo: LogoState,
    store: LogoStore,
    preview: PreviewTree,
    pipeline: ExportPipeline,
}

impl Studio {
    /// Open a session, loading assets from `config.asset_root`.
    pub fn open(config: StudioConfig) -> Result<Self> {
        let loader = Arc::new(AssetLoader::new(config.asset_root.clone()));
        Self::with_loader(config, loader)
    }

    /// Open a session with a custom image loader.
    pub fn with_loader(config: StudioConfig, loader: Arc<dyn ResourceLoader>) -> Result<Self> {
        config.validate()?;
        let store_dir = match &config.store_dir {
            Some(dir) => dir.clone(),
            None => LogoStore::default_dir()?,
        };
        let store = LogoStore::open(&store_dir, config.default_logo.clone())?;
        let logo = store.load();
        log::debug!("opened studio, store {}, logo {}", store.path().display(), logo_kind(&logo));
        Ok(Self {
            text: String::new(),
            author: String::new(),
            church_name: config.church_name.clone(),
            church_handle: config.church_handle.clone(),
            template: config.default_template,
            auto_match: true,
            logo,
            store,
            preview: PreviewTree::new(),
            pipeline: ExportPipeline::new(config.export.clone(), loader),
            config,
        })
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn auto_match(&self) -> bool {
        self.auto_match
    }

    pub fn logo(&self) -> &LogoState {
        &self.logo
    }

    pub fn preview(&self) -> &PreviewTree {
        &self.preview
    }

    pub fn pipeline(&self) -> &ExportPipeline {
        &self.pipeline
    }

    /// Replace the quote text. Edits past the cap are dropped whole and
    /// `false` is returned.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !within_cap(&text, self.config.max_chars) {
            log::debug!("rejected edit of {} chars", text.chars().count());
            return false;
        }
        self.text = text;
        self.rematch();
        true
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn set_church_name(&mut self, name: impl Into<String>) {
        self.church_name = name.into();
    }

    pub fn set_church_handle(&mut self, handle: impl Into<String>) {
        self.church_handle = handle.into();
    }

    /// Manual selection; turns auto-match off.
    pub fn select_template(&mut self, id: TemplateId) {
        self.template = id;
        self.auto_match = false;
    }

    pub fn set_auto_match(&mut self, on: bool) {
        self.auto_match = on;
        self.rematch();
    }

    fn rematch(&mut self) {
        if self.auto_match && !self.text.trim().is_empty() {
            self.template = match_template(&self.text);
        }
    }

    /// Upload a logo file. `Ok(false)` means the file was ignored.
    pub fn upload_logo(&mut self, file: impl AsRef<Path>) -> Result<bool> {
        match self.store.upload_file(file)? {
            Some(uri) => {
                self.logo = LogoState::Uploaded(uri);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Same as [`Studio::upload_logo`] for bytes already in memory.
    pub fn upload_logo_bytes(&mut self, bytes: &[u8]) -> Result<bool> {
        match self.store.upload_bytes(bytes)? {
            Some(uri) => {
                self.logo = LogoState::Uploaded(uri);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the uploaded logo. The session shows no logo until restart,
    /// when the default is loaded again.
    pub fn remove_logo(&mut self) -> Result<()> {
        self.store.remove()?;
        self.logo = LogoState::None;
        Ok(())
    }

    /// Render this session without a logo; the store is left untouched.
    pub fn clear_session_logo(&mut self) {
        self.logo = LogoState::None;
    }

    pub fn remaining_chars(&self) -> usize {
        self.config.max_chars.saturating_sub(self.text.chars().count())
    }

    pub fn near_char_limit(&self) -> bool {
        self.text.chars().count() > self.config.max_chars.saturating_sub(NEAR_LIMIT)
    }

    /// Snapshot of the current inputs as passed to templates.
    pub fn quote_data(&self) -> QuoteData {
        let opt = |s: &str| Some(s.to_string()).filter(|s| !s.trim().is_empty());
        QuoteData {
            text: self.text.clone(),
            author: opt(&self.author),
            church_name: opt(&self.church_name),
            church_handle: opt(&self.church_handle),
            logo_url: self.logo.url().map(str::to_string),
        }
    }

    /// Render the selected template and mount it as the live preview.
    pub fn render(&mut self) -> &Composition {
        let template = templates::lookup_or_default(self.template);
        let comp = template.render(&self.quote_data()).scaled(self.config.preview_scale);
        self.preview.mount(comp)
    }

    /// Render the current state and export it.
    pub async fn export(&mut self) -> Result<ExportOutcome> {
        self.render();
        self.pipeline.export(&self.preview).await
    }
}

fn logo_kind(logo: &LogoState) -> &'static str {
    match logo {
        LogoState::None => "none",
        LogoState::Default(_) => "default",
        LogoState::Uploaded(_) => "uploaded",
    }
}
