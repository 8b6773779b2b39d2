//! Render/export pipeline.
//!
//! Export locates the mounted preview, stages a full-size copy of it,
//! waits (bounded) for its images, rasterizes at the configured
//! supersample factor and writes a timestamped PNG. Any failure past the
//! locate step surfaces as [`Error::ExportError`]; the staged copy is always
//! torn down.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::join_all;

use crate::rendering::raster::{abbreviate, render_screenshot, Resources};
use crate::rendering::{Composition, Screenshot, CANVAS_ID};
use crate::resources::{decode_image, ResourceLoader};
use crate::{Error, ExportConfig, Result};

/// The live visual tree: compositions mounted under element ids.
#[derive(Debug, Default)]
pub struct PreviewTree {
    nodes: HashMap<String, Composition>,
}

impl PreviewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `comp` under its own id, replacing whatever was there.
    pub fn mount(&mut self, comp: Composition) -> &Composition {
        match self.nodes.entry(comp.id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(comp);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(comp),
        }
    }

    pub fn unmount(&mut self, id: &str) -> Option<Composition> {
        self.nodes.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Composition> {
        self.nodes.get(id)
    }

    /// The composition under the canonical canvas id.
    pub fn locate(&self) -> Result<&Composition> {
        self.get(CANVAS_ID)
            .ok_or_else(|| Error::NotFound(format!("no element '{}' mounted", CANVAS_ID)))
    }
}

/// Off-screen surfaces holding staged copies while they are captured
#[derive(Debug, Default)]
pub struct StagingArea {
    surfaces: Mutex<HashMap<u64, Arc<Composition>>>,
    next_id: AtomicU64,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `comp`; it is detached again when the guard drops.
    pub fn stage(&self, comp: Composition) -> StagingGuard<'_> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let comp = Arc::new(comp);
        self.lock().insert(id, Arc::clone(&comp));
        log::debug!("staged surface {} ({}x{})", id, comp.width, comp.height);
        StagingGuard { area: self, id, comp }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Arc<Composition>>> {
        // a poisoned map is still structurally valid
        self.surfaces.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scope of one staged surface
pub struct StagingGuard<'a> {
    area: &'a StagingArea,
    id: u64,
    comp: Arc<Composition>,
}

impl StagingGuard<'_> {
    pub fn composition(&self) -> &Composition {
        &self.comp
    }

    pub fn shared(&self) -> Arc<Composition> {
        Arc::clone(&self.comp)
    }
}

impl Drop for StagingGuard<'_> {
    fn drop(&mut self) {
        self.area.lock().remove(&self.id);
        log::debug!("removed staged surface {}", self.id);
    }
}

/// A delivered export
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub path: PathBuf,
    pub screenshot: Screenshot,
}

#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Delivered(ExportedImage),
    /// No composition was mounted; nothing happened.
    NothingToExport,
    /// Another export was in flight; this request was ignored.
    AlreadyRunning,
}

pub struct ExportPipeline {
    config: ExportConfig,
    loader: Arc<dyn ResourceLoader>,
    images: Mutex<Resources>,
    staging: StagingArea,
    running: AtomicBool,
}

struct RunningFlag<'a>(&'a AtomicBool);

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExportPipeline {
    pub fn new(config: ExportConfig, loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            config,
            loader,
            images: Mutex::new(Resources::new()),
            staging: StagingArea::new(),
            running: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    /// Export the preview mounted in `tree`.
    pub async fn export(&self, tree: &PreviewTree) -> Result<ExportOutcome> {
        if self.running.swap(true, Ordering::AcqRel) {
            log::info!("export already in progress, ignoring request");
            return Ok(ExportOutcome::AlreadyRunning);
        }
        let _flag = RunningFlag(&self.running);

        let comp = match tree.locate() {
            Ok(c) => c,
            Err(e) => {
                log::debug!("nothing to export: {}", e);
                return Ok(ExportOutcome::NothingToExport);
            }
        };

        match self.capture(comp).await {
            Ok(img) => {
                log::info!("exported {}", img.path.display());
                Ok(ExportOutcome::Delivered(img))
            }
            Err(e) => {
                let e = match e {
                    Error::ExportError { .. } => e,
                    other => Error::export(other),
                };
                if let Error::ExportError { cause } = &e {
                    log::error!("export failed: {}", cause);
                }
                Err(e)
            }
        }
    }

    async fn capture(&self, live: &Composition) -> Result<ExportedImage> {
        let size = self.config.canvas_size;
        let mut staged = live.scaled(1.0);
        staged.width = size;
        staged.height = size;
        let guard = self.staging.stage(staged);

        let sources = guard.composition().image_sources();
        self.load_images(&sources).await;
        if self.config.settle_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        }

        let comp = guard.shared();
        let resources = self.resource_snapshot(&sources);
        let scale = self.config.supersample as f32;
        let background = self.config.background;
        let shot = tokio::task::spawn_blocking(move || render_screenshot(&comp, scale, background, &resources))
            .await
            .map_err(|e| Error::export(format!("raster worker failed: {}", e)))??;
        drop(guard);

        let path = self.deliver(&shot).await?;
        Ok(ExportedImage { path, screenshot: shot })
    }

    // Fetch and decode every source not already cached. Failures and
    // timeouts are logged and the image is simply left out.
    async fn load_images(&self, sources: &[String]) {
        let pending: Vec<&String> = {
            let cache = self.lock_images();
            sources.iter().filter(|s| !cache.contains(s)).collect()
        };
        if pending.is_empty() {
            return;
        }
        let limit = Duration::from_millis(self.config.image_timeout_ms);
        let fetches = pending.iter().map(|src| async move {
            let res = match tokio::time::timeout(limit, self.loader.fetch(src)).await {
                Ok(Ok(bytes)) => decode_image(&bytes),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(Error::ResourceError(format!("timed out after {:?}", limit))),
            };
            (*src, res)
        });
        for (src, res) in join_all(fetches).await {
            match res {
                Ok(img) => self.lock_images().insert(src.clone(), img),
                Err(e) => log::warn!("skipping image {}: {}", abbreviate(src), e),
            }
        }
    }

    // Only images the staged composition references survive.
    fn resource_snapshot(&self, sources: &[String]) -> Resources {
        let mut cache = self.lock_images();
        cache.retain_sources(sources);
        cache.clone()
    }

    /// Number of decoded images currently cached.
    pub fn cached_images(&self) -> usize {
        self.lock_images().len()
    }

    fn lock_images(&self) -> std::sync::MutexGuard<'_, Resources> {
        self.images.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn deliver(&self, shot: &Screenshot) -> Result<PathBuf> {
        let dir = &self.config.output_dir;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::export(format!("cannot create {}: {}", dir.display(), e)))?;
        let path = dir.join(file_name(SystemTime::now()));
        tokio::fs::write(&path, &shot.png_data)
            .await
            .map_err(|e| Error::export(format!("cannot write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// `quote-design-<unix millis>.png`
pub fn file_name(at: SystemTime) -> String {
    let ms = at.duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or(0);
    format!("quote-design-{}.png", ms)
}
