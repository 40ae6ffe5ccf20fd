//! JPEG encoding for image uploads.
//!
//! Every upload uses the same quality, mime type, and filename so the
//! multipart contract with the artwork service stays fixed.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

/// JPEG quality used for every upload.
pub const JPEG_QUALITY: u8 = 80;

/// Mime type of the encoded payload.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Filename sent with the image part.
pub const IMAGE_FILENAME: &str = "image.jpg";

/// Errors from [`encode_image`].
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Width or height is zero.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The JPEG encoder rejected the pixel data.
    #[error("JPEG encoding failed: {0}")]
    Failed(String),
}

/// An encoded image ready to be sent as a multipart file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: &'static str,
}

/// Encode a decoded raster image as JPEG at [`JPEG_QUALITY`].
///
/// Alpha and high bit depths are flattened to 8-bit RGB first since
/// JPEG carries neither. The source image is only borrowed.
pub fn encode_image(image: &DynamicImage) -> Result<ImagePayload, EncodingError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodingError::InvalidDimensions { width, height });
    }

    let rgb = image.to_rgb8();
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodingError::Failed(e.to_string()))?;

    let bytes = buffer.into_inner();
    tracing::debug!(width, height, size = bytes.len(), "Encoded upload image");

    Ok(ImagePayload {
        bytes,
        mime_type: IMAGE_MIME_TYPE,
        filename: IMAGE_FILENAME,
    })
}

/// Decode raw image bytes (camera capture, crop output) into a raster.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, EncodingError> {
    image::load_from_memory(bytes).map_err(|e| EncodingError::Failed(e.to_string()))
}
