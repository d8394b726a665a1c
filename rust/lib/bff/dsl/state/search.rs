//! Search state — stored at `search/state`.

use flux_derive::state;
use picfeed_client::UserProfile;
use serde::Serialize;

#[state("search/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    /// Raw input text, as typed.
    pub query: String,
    pub results: Vec<UserProfile>,
    pub loading: bool,
    /// Show the results dropdown.
    pub open: bool,
    pub error: Option<String>,
}
