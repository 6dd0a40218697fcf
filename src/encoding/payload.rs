//! Upload payloads built from captured snapshots.

use super::{DataUri, EncodeError};
use crate::capture::CapturedImage;

/// A named binary blob ready to be attached to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadPayload {
    filename: String,
    mime: String,
    bytes: Vec<u8>,
}

impl UploadPayload {
    /// Creates a payload from already decoded bytes.
    pub fn new(filename: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// File name sent with the multipart part.
    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Declared content type; may be empty.
    #[inline]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decoded binary content.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decoded length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload has no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for UploadPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadPayload")
            .field("filename", &self.filename)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Converts a captured image into a binary upload payload.
///
/// The MIME type comes from the data-URI header and is left empty when the
/// header is malformed; only a missing separator or undecodable payload is
/// an error.
pub fn to_upload_payload(image: &CapturedImage, filename: &str) -> Result<UploadPayload, EncodeError> {
    let uri = DataUri::parse(image.as_data_uri())?;
    let mime = uri.mime();
    let bytes = uri.decode()?;

    if mime.is_empty() {
        tracing::debug!(header = uri.header(), "Data URI header carries no MIME type");
    }

    tracing::debug!(filename, mime, bytes = bytes.len(), "Prepared upload payload");

    Ok(UploadPayload::new(filename, mime, bytes))
}
