//! Snapshot to upload conversion.
//!
//! Snapshots travel through the wizard as data URIs; this module turns
//! them back into named binary payloads for the multipart upload.

mod data_uri;
mod payload;

pub use data_uri::DataUri;
pub use payload::{to_upload_payload, UploadPayload};

use thiserror::Error;

/// Errors raised while decoding a snapshot.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The data URI has no comma.
    #[error("data URI has no ',' separating header and payload")]
    MissingSeparator,
    /// The payload is not valid base64.
    #[error("data URI payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}
