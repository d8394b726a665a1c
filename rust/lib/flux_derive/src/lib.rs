//! Attribute macros binding a type to its flux path.
//!
//! - `#[state("feed/posts")]` on a state type
//! - `#[request("post/like")]` on a request type
//!
//! Both emit `pub const PATH: &'static str` on the type and add whatever
//! of the standard derives is missing. States get `Debug, Clone, PartialEq`;
//! requests get `Debug, Clone`. Structs and enums are accepted.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod expand;

use expand::Kind;

/// ```ignore
/// #[state("search/state")]
/// pub struct SearchState {
///     pub query: String,
///     pub results: Vec<UserSummary>,
/// }
/// assert_eq!(SearchState::PATH, "search/state");
/// ```
#[proc_macro_attribute]
pub fn state(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::Item);
    expand::expand(Kind::State, attr.into(), item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// ```ignore
/// #[request("post/like")]
/// pub struct PostLikeReq {
///     pub post_id: u64,
/// }
/// ```
#[proc_macro_attribute]
pub fn request(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::Item);
    expand::expand(Kind::Request, attr.into(), item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
