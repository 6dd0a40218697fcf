//! Prometheus metrics for client requests.
//!
//! # Metrics Exposed
//!
//! - `spot_my_photo_attendee_submissions_total{outcome}` - Attendee creation requests
//! - `spot_my_photo_match_fetches_total{outcome}` - Match lookups
//! - `spot_my_photo_auth_refreshes_total{outcome}` - Session refreshes after a 401
//!
//! # Example
//!
//! ```no_run
//! use spot_my_photo::metrics::{ClientMetrics, Outcome};
//!
//! let metrics = ClientMetrics::new().expect("Failed to create registry");
//! metrics.record_submission(Outcome::Success);
//! println!("{}", metrics.encode().unwrap());
//! ```

mod collector;

pub use collector::{ClientMetrics, MetricsError, Outcome};
