//! Signature upload passthrough.
//!
//! An uploaded signature is checked to be a PNG or JPEG image and handed
//! straight back for display. Nothing is stored.

use log::info;

use crate::domain::errors::ValidationError;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Detect the format from the leading bytes of the file
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Clone)]
pub struct SignatureService {
    max_bytes: usize,
}

impl SignatureService {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Check an upload and return its format; the bytes themselves are
    /// returned to the caller unmodified
    pub fn accept(&self, bytes: &[u8]) -> Result<ImageFormat, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::EmptyUpload);
        }
        if bytes.len() > self.max_bytes {
            return Err(ValidationError::UploadTooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }
        let format = ImageFormat::sniff(bytes).ok_or(ValidationError::UnsupportedImage)?;
        info!("Accepted {} byte signature ({})", bytes.len(), format.content_type());
        Ok(format)
    }
}
