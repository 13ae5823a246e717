//! Loading images from disk and saving edited results

use super::data_url::DataUrl;
use super::error::ImageEditError;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest file accepted by the picker (5 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// An image read from disk, ready for display and upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub file_name: String,
    pub size: u64,
    /// `data:<mime>;base64,<payload>` reference used for preview and upload
    pub data_url: String,
}

/// MIME type for a picked file, or `None` when it is not an image
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Read an image file into a data URL.
///
/// The size is checked from metadata before anything is read, so an
/// oversized file is never loaded into memory or encoded.
pub fn load_image_file(path: &Path, max_bytes: u64) -> Result<LoadedImage, ImageEditError> {
    let mime_type = mime_type_for_path(path)
        .ok_or_else(|| ImageEditError::UnsupportedFileType(path.display().to_string()))?;

    let size = fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(ImageEditError::FileTooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(LoadedImage {
        file_name,
        size,
        data_url: DataUrl::from_bytes(mime_type, &bytes).to_string(),
    })
}

/// File name for a downloaded result: `edited-image-<unix millis>.png`
pub fn download_file_name(now: DateTime<Utc>) -> String {
    format!("edited-image-{}.png", now.timestamp_millis())
}

/// Decode the result and write it into `dir`, returning the written path
pub fn save_edited_image(
    dir: &Path,
    image: &DataUrl,
    now: DateTime<Utc>,
) -> Result<PathBuf, ImageEditError> {
    let bytes = image.decode()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(now));
    fs::write(&path, bytes)?;
    tracing::info!("Saved edited image to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&vec![7u8; len]).unwrap();
        path
    }

    #[test]
    fn test_mime_type_for_known_extensions() {
        assert_eq!(mime_type_for_path(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(mime_type_for_path(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_type_for_path(Path::new("a.txt")), None);
        assert_eq!(mime_type_for_path(Path::new("noext")), None);
    }

    #[test]
    fn test_load_small_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "cat.png", 3);
        let image = load_image_file(&path, MAX_UPLOAD_BYTES).unwrap();
        assert_eq!(image.file_name, "cat.png");
        assert_eq!(image.size, 3);
        let parsed = DataUrl::parse(&image.data_url).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.decode().unwrap(), vec![7u8; 3]);
    }

    #[test]
    fn test_load_rejects_six_mib_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "big.png", 6 * 1024 * 1024);
        let err = load_image_file(&path, MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(
            err,
            ImageEditError::FileTooLarge { size, limit }
                if size == 6 * 1024 * 1024 && limit == MAX_UPLOAD_BYTES
        ));
    }

    #[test]
    fn test_load_accepts_exact_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "edge.png", 16);
        assert!(load_image_file(&path, 16).is_ok());
    }

    #[test]
    fn test_load_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "notes.txt", 3);
        assert!(matches!(
            load_image_file(&path, MAX_UPLOAD_BYTES),
            Err(ImageEditError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        assert!(matches!(
            load_image_file(&path, MAX_UPLOAD_BYTES),
            Err(ImageEditError::Io(_))
        ));
    }

    #[test]
    fn test_download_file_name_uses_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(download_file_name(now), "edited-image-1700000000123.png");
    }

    #[test]
    fn test_save_edited_image_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let image = DataUrl::from_bytes("image/png", b"png!");
        let now = Utc.timestamp_millis_opt(42).unwrap();
        let path = save_edited_image(dir.path(), &image, now).unwrap();
        assert_eq!(path.file_name().unwrap(), "edited-image-42.png");
        assert_eq!(fs::read(path).unwrap(), b"png!");
    }
}
