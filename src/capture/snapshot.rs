//! Still images in their self-describing data-URI form.

use super::{CameraError, Frame, PixelLayout};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageEncoder};

/// MIME type of every snapshot produced from a live stream.
pub const JPEG_MIME: &str = "image/jpeg";

/// A captured still image, held as `data:<mime>;base64,<payload>`.
///
/// The wizard owns the image exclusively until it is uploaded; cloning is
/// possible but nothing in the submission path needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    data_uri: String,
}

impl CapturedImage {
    /// Wraps an existing data URI without inspecting it.
    ///
    /// Malformed input is only detected when the image is encoded for
    /// upload.
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
        }
    }

    /// Builds a data URI from raw encoded image bytes.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_uri: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        }
    }

    /// JPEG-encodes a raw frame.
    pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Self, CameraError> {
        if !frame.is_valid() {
            return Err(CameraError::CaptureFailed(format!(
                "frame buffer of {} bytes does not match {}x{}",
                frame.pixels().len(),
                frame.width(),
                frame.height()
            )));
        }

        let color = match frame.layout() {
            PixelLayout::Gray => ExtendedColorType::L8,
            PixelLayout::Rgb => ExtendedColorType::Rgb8,
        };

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality)
            .write_image(frame.pixels(), frame.width(), frame.height(), color)
            .map_err(|e| CameraError::EncodeFailed(e.to_string()))?;

        tracing::trace!(
            sequence = frame.sequence(),
            jpeg_bytes = jpeg.len(),
            "Encoded snapshot"
        );

        Ok(Self::from_bytes(JPEG_MIME, &jpeg))
    }

    /// The full `data:` URI.
    #[inline]
    pub fn as_data_uri(&self) -> &str {
        &self.data_uri
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = self
            .data_uri
            .split_once(',')
            .map(|(header, _)| header)
            .unwrap_or("<no header>");
        f.debug_struct("CapturedImage")
            .field("header", &header)
            .field("uri_len", &self.data_uri.len())
            .finish()
    }
}
