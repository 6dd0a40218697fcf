//! Match result shapes returned by the matching service.

use serde::{Deserialize, Serialize};

/// Photos of the attendee within one collection of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCollection {
    /// Collection title.
    pub collection_name: String,
    /// Storage keys of the matched images, in service order.
    pub images: Vec<String>,
}

/// One event in which the attendee was recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedEvent {
    /// Event title.
    pub event_name: String,
    /// Collections in server order.
    pub collections: Vec<MatchedCollection>,
}

impl MatchedEvent {
    /// Total matched images across all collections.
    pub fn image_count(&self) -> usize {
        self.collections.iter().map(|c| c.images.len()).sum()
    }
}

/// Body of `GET /attendees/{attendeeId}/matches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    /// Events in server order.
    pub matched_events: Vec<MatchedEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped_response() {
        let body = r#"{
            "matchedEvents": [
                {
                    "eventName": "Spring Gala",
                    "collections": [
                        { "collectionName": "Arrivals", "images": ["gala/a1.jpg", "gala/a2.jpg"] },
                        { "collectionName": "Dinner", "images": ["gala/d1.jpg"] }
                    ]
                }
            ]
        }"#;

        let response: MatchesResponse = serde_json::from_str(body).unwrap();
        let event = &response.matched_events[0];

        assert_eq!(event.event_name, "Spring Gala");
        assert_eq!(event.collections[1].collection_name, "Dinner");
        assert_eq!(event.image_count(), 3);
    }

    #[test]
    fn test_missing_events_field_is_an_error() {
        assert!(serde_json::from_str::<MatchesResponse>("{}").is_err());
    }
}
