//! Match results view state.
//!
//! Each mount issues a fresh fetch; nothing is cached between mounts.
//! Responses are tied to the mount that requested them through a
//! [`FetchTicket`], so a response arriving after the view was unmounted
//! or re-keyed to another attendee is dropped instead of applied.

use super::{MatchedEvent, MatchesResponse};
use crate::api::{ApiError, AttendeeApi};
use std::fmt;

/// Shown while a fetch is outstanding.
pub const LOADING_MESSAGE: &str = "Loading...";
/// Shown when the fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load matches. Please try again.";
/// Shown when the attendee has no matches.
pub const EMPTY_MESSAGE: &str = "No matches found for this attendee.";

/// What the view currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Fetch outstanding.
    Loading,
    /// Fetch failed; carries the message to show.
    Error(String),
    /// Fetch succeeded with no events.
    Empty,
    /// Fetch succeeded with events.
    Loaded(Vec<MatchedEvent>),
}

/// Proof that a fetch was issued by a particular mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    attendee_id: String,
}

impl FetchTicket {
    /// Attendee the fetch is for.
    pub fn attendee_id(&self) -> &str {
        &self.attendee_id
    }
}

/// Grouped match results for one attendee.
#[derive(Debug)]
pub struct MatchResultsView {
    cdn_base: String,
    attendee_id: Option<String>,
    state: ViewState,
    generation: u64,
    mounted: bool,
}

impl MatchResultsView {
    /// An unmounted view resolving image keys against `cdn_base`.
    pub fn new(cdn_base: impl Into<String>) -> Self {
        Self {
            cdn_base: cdn_base.into().trim_end_matches('/').to_string(),
            attendee_id: None,
            state: ViewState::Loading,
            generation: 0,
            mounted: false,
        }
    }

    /// Mounts the view for `attendee_id` and returns the ticket for the
    /// fetch it must issue.
    ///
    /// Re-mounting, with the same or another id, invalidates any earlier
    /// ticket.
    pub fn mount(&mut self, attendee_id: impl Into<String>) -> FetchTicket {
        let attendee_id = attendee_id.into();
        self.generation += 1;
        self.mounted = true;
        self.state = ViewState::Loading;
        self.attendee_id = Some(attendee_id.clone());

        tracing::debug!(
            attendee_id = %attendee_id,
            generation = self.generation,
            "Match view mounted"
        );

        FetchTicket {
            generation: self.generation,
            attendee_id,
        }
    }

    /// Tears the view down; outstanding fetches will be ignored.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        tracing::debug!("Match view unmounted");
    }

    /// Applies a fetch result. Returns `false` if the ticket is stale.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<MatchesResponse, ApiError>) -> bool {
        if !self.mounted || ticket.generation != self.generation {
            tracing::debug!(
                attendee_id = %ticket.attendee_id,
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale match response"
            );
            return false;
        }

        self.state = match result {
            Ok(response) if response.matched_events.is_empty() => ViewState::Empty,
            Ok(response) => {
                tracing::info!(
                    attendee_id = %ticket.attendee_id,
                    events = response.matched_events.len(),
                    "Matches loaded"
                );
                ViewState::Loaded(response.matched_events)
            }
            Err(e) => {
                tracing::error!(
                    attendee_id = %ticket.attendee_id,
                    error = %e,
                    "Failed to fetch matches"
                );
                ViewState::Error(LOAD_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Mounts for `attendee_id`, fetches once and applies the result.
    pub async fn load<A: AttendeeApi>(&mut self, api: &A, attendee_id: &str) -> &ViewState {
        let ticket = self.mount(attendee_id);
        let result = api.fetch_matches(ticket.attendee_id()).await;
        self.resolve(ticket, result);
        &self.state
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Attendee of the latest mount.
    pub fn attendee_id(&self) -> Option<&str> {
        self.attendee_id.as_deref()
    }

    /// Whether the view is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Public URL of a matched image key.
    pub fn image_url(&self, key: &str) -> String {
        format!("{}/{}", self.cdn_base, key.trim_start_matches('/'))
    }

    /// Text rendering of the current state.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MatchResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ViewState::Loading => writeln!(f, "{LOADING_MESSAGE}"),
            ViewState::Error(message) => writeln!(f, "{message}"),
            ViewState::Empty => writeln!(f, "{EMPTY_MESSAGE}"),
            ViewState::Loaded(events) => {
                for event in events {
                    writeln!(f, "{}", event.event_name)?;
                    for collection in &event.collections {
                        writeln!(f, "  {}", collection.collection_name)?;
                        for (index, key) in collection.images.iter().enumerate() {
                            writeln!(f, "    [{}] {}", index + 1, self.image_url(key))?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AttendeeSubmission;
    use crate::matches::MatchedCollection;
    use std::sync::Mutex;

    /// Serves canned matches and records every lookup.
    #[derive(Default)]
    struct CountingApi {
        requested: Mutex<Vec<String>>,
    }

    impl AttendeeApi for CountingApi {
        async fn create_attendee(&self, _submission: AttendeeSubmission) -> Result<(), ApiError> {
            Ok(())
        }

        async fn fetch_matches(&self, attendee_id: &str) -> Result<MatchesResponse, ApiError> {
            self.requested.lock().unwrap().push(attendee_id.to_string());
            let matched_events = if attendee_id == "att-1" {
                sample_events()
            } else {
                Vec::new()
            };
            Ok(MatchesResponse { matched_events })
        }
    }

    fn sample_events() -> Vec<MatchedEvent> {
        vec![
            MatchedEvent {
                event_name: "Spring Gala".into(),
                collections: vec![
                    MatchedCollection {
                        collection_name: "Arrivals".into(),
                        images: vec!["gala/a1.jpg".into(), "gala/a2.jpg".into()],
                    },
                    MatchedCollection {
                        collection_name: "Dinner".into(),
                        images: vec!["gala/d1.jpg".into()],
                    },
                ],
            },
            MatchedEvent {
                event_name: "Marathon".into(),
                collections: vec![MatchedCollection {
                    collection_name: "Finish Line".into(),
                    images: vec!["run/f1.jpg".into()],
                }],
            },
        ]
    }

    fn view() -> MatchResultsView {
        MatchResultsView::new("https://cdn.example.com/")
    }

    #[test]
    fn test_mount_starts_loading() {
        let mut view = view();
        view.mount("att-1");
        assert_eq!(view.state(), &ViewState::Loading);
        assert_eq!(view.render(), "Loading...\n");
    }

    #[test]
    fn test_empty_response_renders_empty_message_once() {
        let mut view = view();
        let ticket = view.mount("att-1");
        assert!(view.resolve(ticket, Ok(MatchesResponse { matched_events: vec![] })));

        let rendered = view.render();
        assert_eq!(view.state(), &ViewState::Empty);
        assert_eq!(rendered.matches(EMPTY_MESSAGE).count(), 1);
        assert!(!rendered.contains(LOADING_MESSAGE));
        assert!(!rendered.contains(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_error_state() {
        let mut view = view();
        let ticket = view.mount("att-1");
        view.resolve(ticket, Err(ApiError::Unauthorized));

        assert_eq!(view.state(), &ViewState::Error(LOAD_ERROR_MESSAGE.into()));
        assert_eq!(view.render(), format!("{LOAD_ERROR_MESSAGE}\n"));
    }

    #[test]
    fn test_loaded_render_keeps_order() {
        let mut view = view();
        let ticket = view.mount("att-1");
        view.resolve(ticket, Ok(MatchesResponse { matched_events: sample_events() }));

        let rendered = view.render();
        let gala = rendered.find("Spring Gala").unwrap();
        let dinner = rendered.find("Dinner").unwrap();
        let marathon = rendered.find("Marathon").unwrap();
        assert!(gala < dinner && dinner < marathon);
        assert!(rendered.contains("    [2] https://cdn.example.com/gala/a2.jpg"));
    }

    #[test]
    fn test_remount_discards_previous_ticket() {
        let mut view = view();
        let first = view.mount("att-1");
        let second = view.mount("att-2");

        assert!(!view.resolve(first, Ok(MatchesResponse { matched_events: sample_events() })));
        assert_eq!(view.state(), &ViewState::Loading);

        assert!(view.resolve(second, Ok(MatchesResponse { matched_events: vec![] })));
        assert_eq!(view.state(), &ViewState::Empty);
        assert_eq!(view.attendee_id(), Some("att-2"));
    }

    #[tokio::test]
    async fn test_load_refetches_on_every_mount() {
        let api = CountingApi::default();
        let mut view = view();

        let state = view.load(&api, "att-1").await;
        assert!(matches!(state, ViewState::Loaded(events) if events.len() == 2));

        view.load(&api, "att-1").await;
        view.load(&api, "att-2").await;

        assert_eq!(
            *api.requested.lock().unwrap(),
            vec!["att-1".to_string(), "att-1".to_string(), "att-2".to_string()]
        );
        assert_eq!(view.state(), &ViewState::Empty);
        assert_eq!(view.attendee_id(), Some("att-2"));
        assert!(view.is_mounted());
    }

    #[test]
    fn test_unmount_ignores_late_response() {
        let mut view = view();
        let ticket = view.mount("att-1");
        view.unmount();

        assert!(!view.resolve(ticket, Err(ApiError::Unauthorized)));
        assert!(!view.is_mounted());
        assert_eq!(view.state(), &ViewState::Loading);
    }
}
