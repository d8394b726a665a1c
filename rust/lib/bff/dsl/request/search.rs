//! Search-as-you-type requests.

use flux_derive::request;

/// The search box text changed.
#[request("search/input")]
pub struct SearchInputReq {
    pub text: String,
}

#[request("search/clear")]
pub struct SearchClearReq;

/// A result was picked: clear and open that profile.
#[request("search/select")]
pub struct SearchSelectReq {
    pub username: String,
}
