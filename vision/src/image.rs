use std::path::Path;

use base64::Engine as _;

/// Raw image bytes plus the MIME type sent alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Read an image file. The MIME type comes from the extension and
    /// defaults to JPEG.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::new(bytes, mime_for_path(path)))
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_file_and_guesses_mime() {
        let mut file = tempfile::Builder::new().suffix(".PNG").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();
        let image = ImageData::from_path(file.path()).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, b"\x89PNG");
    }

    #[test]
    fn unknown_extension_is_jpeg() {
        assert_eq!(mime_for_path(Path::new("board.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("board")), "image/jpeg");
    }

    #[test]
    fn base64_encoding() {
        assert_eq!(ImageData::new(b"hi".to_vec(), "image/jpeg").to_base64(), "aGk=");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(ImageData::from_path("/no/such/board.jpg").is_err());
    }
}
