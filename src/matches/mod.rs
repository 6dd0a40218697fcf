//! Match lookup results.
//!
//! The matching service groups recognized photos by event and then by
//! collection; this module models that shape and the view that shows it.

mod model;
mod view;

pub use model::{MatchedCollection, MatchedEvent, MatchesResponse};
pub use view::{
    FetchTicket, MatchResultsView, ViewState, EMPTY_MESSAGE, LOADING_MESSAGE, LOAD_ERROR_MESSAGE,
};
