//! Metrics collection and registry.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Result label attached to every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Call returned `Ok`.
    Success,
    /// Call returned an error.
    Failure,
}

impl Outcome {
    /// Label value.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }

    /// Outcome of a call result.
    pub fn of<T, E>(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Prometheus registry for client-side request accounting.
///
/// Cloning is cheap; clones share the same counters.
#[derive(Clone)]
pub struct ClientMetrics {
    registry: Registry,
    attendee_submissions: IntCounterVec,
    match_fetches: IntCounterVec,
    auth_refreshes: IntCounterVec,
}

impl ClientMetrics {
    /// Creates a new registry with all client metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let attendee_submissions = IntCounterVec::new(
            Opts::new(
                "spot_my_photo_attendee_submissions_total",
                "Attendee creation requests by outcome",
            ),
            &["outcome"],
        )?;
        let match_fetches = IntCounterVec::new(
            Opts::new(
                "spot_my_photo_match_fetches_total",
                "Match lookups by outcome",
            ),
            &["outcome"],
        )?;
        let auth_refreshes = IntCounterVec::new(
            Opts::new(
                "spot_my_photo_auth_refreshes_total",
                "Session refreshes triggered by expired authorization",
            ),
            &["outcome"],
        )?;

        registry.register(Box::new(attendee_submissions.clone()))?;
        registry.register(Box::new(match_fetches.clone()))?;
        registry.register(Box::new(auth_refreshes.clone()))?;

        Ok(Self {
            registry,
            attendee_submissions,
            match_fetches,
            auth_refreshes,
        })
    }

    /// Counts an attendee creation.
    pub fn record_submission(&self, outcome: Outcome) {
        self.attendee_submissions
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Counts a match lookup.
    pub fn record_match_fetch(&self, outcome: Outcome) {
        self.match_fetches.with_label_values(&[outcome.as_str()]).inc();
    }

    /// Counts a session refresh.
    pub fn record_auth_refresh(&self, outcome: Outcome) {
        self.auth_refreshes.with_label_values(&[outcome.as_str()]).inc();
    }

    /// Current value of the submission counter for `outcome`.
    pub fn submissions(&self, outcome: Outcome) -> u64 {
        self.attendee_submissions
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Match lookups with `outcome`.
    pub fn match_fetches(&self, outcome: Outcome) -> u64 {
        self.match_fetches.with_label_values(&[outcome.as_str()]).get()
    }

    /// Session refreshes with `outcome`.
    pub fn auth_refreshes(&self, outcome: Outcome) -> u64 {
        self.auth_refreshes.with_label_values(&[outcome.as_str()]).get()
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        assert!(ClientMetrics::new().is_ok());
    }

    #[test]
    fn test_counters_by_outcome() {
        let metrics = ClientMetrics::new().unwrap();

        metrics.record_submission(Outcome::Success);
        metrics.record_submission(Outcome::Failure);
        metrics.record_submission(Outcome::Failure);

        assert_eq!(metrics.submissions(Outcome::Success), 1);
        assert_eq!(metrics.submissions(Outcome::Failure), 2);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = ClientMetrics::new().unwrap();
        let clone = metrics.clone();

        clone.record_auth_refresh(Outcome::Success);
        assert_eq!(metrics.auth_refreshes(Outcome::Success), 1);
    }

    #[test]
    fn test_metrics_encode() {
        let metrics = ClientMetrics::new().unwrap();
        metrics.record_match_fetch(Outcome::Success);

        let output = metrics.encode().unwrap();
        assert!(output.contains("spot_my_photo_match_fetches_total{outcome=\"success\"} 1"));
    }

    #[test]
    fn test_outcome_of_result() {
        let ok: Result<(), ()> = Ok(());
        let err: Result<(), ()> = Err(());
        assert_eq!(Outcome::of(&ok), Outcome::Success);
        assert_eq!(Outcome::of(&err), Outcome::Failure);
    }
}
