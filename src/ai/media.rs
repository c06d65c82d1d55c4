//! Image payloads for vision requests.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Mime type assumed when the file extension says nothing useful.
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// A base64-encoded image ready to be sent inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), data: STANDARD.encode(bytes) }
    }

    /// Read and encode an image file, deriving the mime type from its extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("Failed to read image {}: {e}", path.display()))?;

        if bytes.is_empty() {
            anyhow::bail!("Image {} is empty", path.display());
        }

        Ok(Self::from_bytes(&bytes, mime_type_for(path)))
    }
}

/// Mime type for an image path based on its extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => DEFAULT_MIME_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(&PathBuf::from("gym.PNG")), "image/png");
        assert_eq!(mime_type_for(&PathBuf::from("gym.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(&PathBuf::from("gym")), "image/jpeg");
        assert_eq!(mime_type_for(&PathBuf::from("gym.webp")), "image/webp");
    }

    #[test]
    fn test_from_bytes_encodes() {
        let payload = ImagePayload::from_bytes(b"hello", "image/png");
        assert_eq!(payload.data, "aGVsbG8=");
        assert_eq!(payload.mime_type, "image/png");
    }

    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("studio.png");
        std::fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let payload = ImagePayload::from_path(&path).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, "iVBORw==");
    }

    #[test]
    fn test_from_path_rejects_missing_and_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ImagePayload::from_path(&temp_dir.path().join("missing.jpg")).is_err());

        let empty = temp_dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(ImagePayload::from_path(&empty).is_err());
    }
}
