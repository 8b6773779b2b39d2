//! Image references: data URIs, bundled assets and the loader seam used by export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::BoxFuture;
use image::RgbaImage;

use crate::{Error, Result};

/// Fetches the raw bytes behind an image reference.
///
/// The export pipeline awaits every fetch with its own timeout, so
/// implementations are free to be slow or to fail.
pub trait ResourceLoader: Send + Sync {
    fn fetch<'a>(&'a self, src: &'a str) -> BoxFuture<'a, Result<Vec<u8>>>;
}

/// Default loader: inline `data:` URIs, everything else from an asset directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    asset_root: PathBuf,
}

impl AssetLoader {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Map a non-data reference to a file under the asset root.
    /// `/default-logo.png` and `default-logo.png` resolve to the same file.
    pub fn resolve(&self, src: &str) -> PathBuf {
        self.asset_root.join(src.trim_start_matches('/'))
    }
}

impl ResourceLoader for AssetLoader {
    fn fetch<'a>(&'a self, src: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            if is_data_uri(src) {
                return decode_data_uri(src).map(|(_, bytes)| bytes);
            }
            let path = self.resolve(src);
            tokio::fs::read(&path)
                .await
                .map_err(|e| Error::ResourceError(format!("failed to read {}: {}", path.display(), e)))
        })
    }
}

pub fn is_data_uri(src: &str) -> bool {
    src.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}

/// Split a `data:` URI into its MIME type and decoded payload.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    if !is_data_uri(uri) {
        return Err(Error::ResourceError("not a data URI".into()));
    }
    let rest = uri.get(5..).unwrap_or_default();
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::ResourceError("data URI has no payload separator".into()))?;
    let mut parts = meta.split(';');
    let mime = match parts.next() {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => "text/plain".to_string(),
    };
    let is_base64 = parts.any(|p| p.eq_ignore_ascii_case("base64"));
    let bytes = if is_base64 {
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        STANDARD
            .decode(cleaned.as_bytes())
            .map_err(|e| Error::ResourceError(format!("invalid base64 payload: {}", e)))?
    } else {
        payload.as_bytes().to_vec()
    };
    Ok((mime, bytes))
}

/// Encode bytes as a self-contained base64 `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// MIME type of an encoded image, if the bytes look like one.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    Some(format.to_mime_type())
}

/// Decode image bytes into an RGBA8 buffer.
pub fn decode_image(bytes: &[u8]) -> Result<Arc<RgbaImage>> {
    let img = image::load_from_memory(bytes)?;
    Ok(Arc::new(img.to_rgba8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        crate::rendering::raster::encode_png(&img).unwrap()
    }

    #[test]
    fn data_uri_round_trip() {
        let png = tiny_png();
        let uri = encode_data_uri("image/png", &png);
        assert!(uri.starts_with("data:image/png;base64,"));
        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, png);
    }

    #[test]
    fn plain_data_uri_payload() {
        let (mime, bytes) = decode_data_uri("data:,hello").unwrap();
        assert_eq!(mime, "text/plain");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn malformed_data_uris_are_errors() {
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_err());
        assert!(decode_data_uri("/default-logo.png").is_err());
    }

    #[test]
    fn sniff_and_decode() {
        let png = tiny_png();
        assert_eq!(sniff_image_mime(&png), Some("image/png"));
        assert_eq!(sniff_image_mime(b"definitely not an image"), None);
        let img = decode_image(&png).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
    }

    #[test]
    fn resolve_strips_leading_slash() {
        let loader = AssetLoader::new("/srv/public");
        assert_eq!(loader.resolve("/default-logo.png"), PathBuf::from("/srv/public/default-logo.png"));
        assert_eq!(loader.resolve("default-logo.png"), PathBuf::from("/srv/public/default-logo.png"));
    }

    #[tokio::test]
    async fn loader_reads_inline_and_missing_files() {
        let loader = AssetLoader::new(std::env::temp_dir().join("quotecraft-no-such-dir"));
        let uri = encode_data_uri("image/png", &tiny_png());
        assert_eq!(loader.fetch(&uri).await.unwrap(), tiny_png());
        assert!(loader.fetch("/missing.png").await.is_err());
    }
}
