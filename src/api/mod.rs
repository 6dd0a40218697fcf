//! REST API access.
//!
//! The attendee flow talks to two endpoints:
//!
//! - `POST /attendees` with a multipart body (`name`, optional `email`,
//!   optional `phoneNumber`, binary `image`)
//! - `GET /attendees/{attendeeId}/matches`
//!
//! [`HttpClient`] wraps every call in an authorization interceptor that
//! refreshes an expired session once and retries once.

mod client;
mod session;

pub use client::{HttpClient, USER_AGENT};
pub use session::{LoginCredentials, Session, SessionStore, User};

use crate::encoding::UploadPayload;
use crate::intake::AttendeeIdentity;
use crate::matches::MatchesResponse;
use thiserror::Error;

/// Errors returned by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Still unauthorized after one refresh and retry.
    #[error("request is not authorized")]
    Unauthorized,

    /// The refresh call itself failed; the session was cleared.
    #[error("session refresh failed: {0}")]
    RefreshFailed(String),

    /// Non-success status other than 401.
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Everything the attendee-creation endpoint needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeSubmission {
    /// Validated name and contact.
    pub identity: AttendeeIdentity,
    /// Decoded face photo.
    pub image: UploadPayload,
}

/// Attendee endpoints consumed by the wizard and the match view.
#[allow(async_fn_in_trait)]
pub trait AttendeeApi {
    /// Creates an attendee from an identity and a face photo.
    async fn create_attendee(&self, submission: AttendeeSubmission) -> Result<(), ApiError>;

    /// Fetches grouped matches for a previously created attendee.
    async fn fetch_matches(&self, attendee_id: &str) -> Result<MatchesResponse, ApiError>;
}
