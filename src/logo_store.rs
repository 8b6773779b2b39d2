//! Durable storage for the uploaded church logo.
//!
//! The store is a small JSON key-value file. The only key in use is
//! `churchLogo`, holding the uploaded image as a data URI.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::quote::LogoState;
use crate::resources::{decode_image, encode_data_uri, sniff_image_mime};
use crate::{Error, Result};

/// Storage key of the uploaded logo
pub const LOGO_KEY: &str = "churchLogo";

/// Largest accepted upload in bytes
pub const MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

pub const OVERSIZE_MESSAGE: &str = "Logo file size must be less than 5MB";

/// Bundled logo shown until the user uploads one
pub const DEFAULT_LOGO: &str = "/default-logo.png";

const STORE_FILE: &str = "store.json";

pub struct LogoStore {
    path: PathBuf,
    default_logo: Option<String>,
}

impl LogoStore {
    /// Open (creating if needed) the store directory `dir`.
    pub fn open(dir: impl AsRef<Path>, default_logo: Option<String>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::StorageError(format!("Failed to create store directory: {}", e)))?;
        }
        Ok(Self {
            path: dir.join(STORE_FILE),
            default_logo,
        })
    }

    /// Platform data directory for the store, e.g. `~/.local/share/quotecraft`.
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join("quotecraft"))
            .ok_or_else(|| Error::ConfigError("no data directory available on this platform".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logo state at startup: the stored upload, else the configured default.
    pub fn load(&self) -> LogoState {
        if let Some(uri) = self.read_entries().remove(LOGO_KEY) {
            return LogoState::Uploaded(uri);
        }
        match &self.default_logo {
            Some(d) => LogoState::Default(d.clone()),
            None => LogoState::None,
        }
    }

    /// Accept a logo file from disk.
    ///
    /// Returns `Ok(None)` when the file can't be read or isn't an image we
    /// can decode, which is treated the same as no file being selected.
    pub fn upload_file(&self, file: impl AsRef<Path>) -> Result<Option<String>> {
        let file = file.as_ref();
        let meta = match fs::metadata(file) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("ignoring logo {}: {}", file.display(), e);
                return Ok(None);
            }
        };
        if meta.len() > MAX_LOGO_BYTES {
            return Err(Error::ValidationError(OVERSIZE_MESSAGE.into()));
        }
        match fs::read(file) {
            Ok(bytes) => self.upload_bytes(&bytes),
            Err(e) => {
                log::warn!("ignoring logo {}: {}", file.display(), e);
                Ok(None)
            }
        }
    }

    /// Accept an in-memory logo; same rules as [`LogoStore::upload_file`].
    pub fn upload_bytes(&self, bytes: &[u8]) -> Result<Option<String>> {
        if bytes.len() as u64 > MAX_LOGO_BYTES {
            return Err(Error::ValidationError(OVERSIZE_MESSAGE.into()));
        }
        let Some(mime) = sniff_image_mime(bytes) else {
            log::warn!("ignoring logo upload: not a recognised image");
            return Ok(None);
        };
        // must be drawable by the raster backend, not just look like an image
        if let Err(e) = decode_image(bytes) {
            log::warn!("ignoring {} logo upload: {}", mime, e);
            return Ok(None);
        }
        let uri = encode_data_uri(mime, bytes);
        let mut entries = self.read_entries();
        entries.insert(LOGO_KEY.to_string(), uri.clone());
        self.write_entries(&entries)?;
        log::info!("stored {} logo ({} bytes)", mime, bytes.len());
        Ok(Some(uri))
    }

    /// Forget the uploaded logo. Removing when nothing is stored is a no-op.
    pub fn remove(&self) -> Result<()> {
        let mut entries = self.read_entries();
        if entries.remove(LOGO_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let json = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!("could not read {}: {}", self.path.display(), e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt store {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }

    // Write to a sibling temp file, then rename over the store.
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::StorageError(format!("Failed to write store: {}", e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::StorageError(format!("Failed to replace store: {}", e))
        })
    }
}
