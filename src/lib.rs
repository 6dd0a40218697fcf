//! Spot My Photo attendee client
//!
//! Lets event attendees find photos of themselves: the attendee enters a
//! name and a contact, takes a photo, and the matching service later
//! returns every event photo in which they were recognized.
//!
//! # Architecture
//!
//! ```text
//! intake → capture → encoding → api (POST /attendees)
//!    └──────── wizard drives ────────┘
//!
//! matches ← api (GET /attendees/{id}/matches)
//! ```
//!
//! # Design Principles
//!
//! - **Closed state machine**: wizard steps are an enum; actions from the
//!   wrong step are rejected, never silently applied
//! - **One request in flight**: a wizard refuses to submit while a
//!   submission is outstanding
//! - **Explicit context**: session, client and metrics live in an
//!   [`AppContext`] passed to whoever needs them
//! - **Bounded auth retry**: an expired session is refreshed once and the
//!   request retried once
//!
//! # Example
//!
//! ```no_run
//! use spot_my_photo::{
//!     capture::{CaptureConfig, MediaCapture, MockCamera},
//!     AppContext, FileConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let context = AppContext::init(FileConfig::default())?;
//! let mut camera = MockCamera::new();
//! camera.open(&CaptureConfig::default())?;
//!
//! let mut wizard = context.new_wizard();
//! wizard.get_started()?;
//! wizard.set_name("Sam")?;
//! wizard.set_phone("5551234567")?;
//! wizard.proceed_to_capture()?;
//! wizard.capture(&mut camera)?;
//! wizard.set_consent(true)?;
//! wizard.submit(context.client()).await?;
//!
//! let mut view = context.new_match_view();
//! view.load(context.client(), "attendee-id").await;
//! println!("{}", view.render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod api;
pub mod capture;
pub mod config;
pub mod context;
pub mod encoding;
pub mod intake;
pub mod matches;
pub mod metrics;
pub mod wizard;

// Re-export commonly used types at crate root
pub use api::{ApiError, AttendeeApi, AttendeeSubmission, HttpClient};
pub use capture::{CaptureConfig, CapturedImage, MediaCapture, MockCamera};
pub use config::FileConfig;
pub use context::AppContext;
pub use encoding::{to_upload_payload, UploadPayload};
pub use intake::{validate_identity, AttendeeIdentity, ValidationError};
pub use matches::{MatchResultsView, MatchedEvent, ViewState};
pub use wizard::{SubmissionController, WizardError, WizardStep};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
