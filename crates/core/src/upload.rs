//! Portfolio image upload validation.
//!
//! The format is detected from the file content, never from the client
//! supplied filename, and the stored extension follows the detected format.

use image::ImageFormat;

use crate::error::CoreError;

/// Default upload cap in kilobytes (2 MiB).
pub const DEFAULT_MAX_IMAGE_KB: u64 = 2048;

/// An image format accepted for portfolio uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl UploadImageFormat {
    /// File extension used when storing the upload.
    pub fn extension(self) -> &'static str {
        match self {
            UploadImageFormat::Jpeg => "jpg",
            UploadImageFormat::Png => "png",
            UploadImageFormat::Gif => "gif",
            UploadImageFormat::Webp => "webp",
        }
    }
}

/// Validate an uploaded image and return its detected format.
///
/// Rejects empty uploads, uploads above `max_kb` kilobytes, and content that
/// is not one of the accepted image formats. Errors are attached to the
/// `image` field.
pub fn validate_image(bytes: &[u8], max_kb: u64) -> Result<UploadImageFormat, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::field("image", "Файл изображения пуст"));
    }

    let max_bytes = max_kb.saturating_mul(1024);
    if bytes.len() as u64 > max_bytes {
        return Err(CoreError::field(
            "image",
            format!("Размер изображения не должен превышать {max_kb} КБ"),
        ));
    }

    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => Ok(UploadImageFormat::Jpeg),
        Ok(ImageFormat::Png) => Ok(UploadImageFormat::Png),
        Ok(ImageFormat::Gif) => Ok(UploadImageFormat::Gif),
        Ok(ImageFormat::WebP) => Ok(UploadImageFormat::Webp),
        _ => Err(CoreError::field(
            "image",
            "Файл должен быть изображением (jpeg, png, gif, webp)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";
    const GIF_HEADER: &[u8] = b"GIF89a\x01\0\x01\0";

    #[test]
    fn detects_formats_from_content() {
        assert_eq!(validate_image(PNG_HEADER, 10).unwrap(), UploadImageFormat::Png);
        assert_eq!(validate_image(JPEG_HEADER, 10).unwrap(), UploadImageFormat::Jpeg);
        assert_eq!(validate_image(GIF_HEADER, 10).unwrap(), UploadImageFormat::Gif);
    }

    #[test]
    fn rejects_non_images() {
        let err = validate_image(b"%PDF-1.7 not an image", 10).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields { ref errors, .. } => {
            assert!(errors.contains_key("image"));
        });
    }

    #[test]
    fn rejects_empty_upload() {
        assert!(validate_image(&[], 10).is_err());
    }

    #[test]
    fn enforces_size_cap() {
        let mut big = PNG_HEADER.to_vec();
        big.resize(2 * 1024 + 1, 0);
        assert!(validate_image(&big, 2).is_err());

        big.truncate(2 * 1024);
        assert!(validate_image(&big, 2).is_ok());
    }

    #[test]
    fn extension_follows_format() {
        assert_eq!(UploadImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(UploadImageFormat::Webp.extension(), "webp");
    }
}
