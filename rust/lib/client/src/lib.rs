//! picfeed backend client.
//!
//! Everything above this crate talks to the backend through the
//! [`SocialApi`] trait. [`HttpApi`] is the production implementation: one
//! reqwest client with a cookie jar, so the session credential set by
//! `/login` rides along on every later call without the caller touching it.
//!
//! # Usage
//!
//! ```ignore
//! use picfeed_client::{HttpApi, LoginRequest, SocialApi};
//!
//! let api = HttpApi::new("http://localhost:8080/api/v1.0")?;
//! api.login(&LoginRequest::new("me@example.com", "secret", true)).await?;
//! let me = api.whoami().await?;
//! ```

mod api;
mod error;
mod http;
pub mod media;
mod model;

pub use api::SocialApi;
pub use error::{ApiError, ErrorClass};
pub use http::HttpApi;
pub use media::MediaResolver;
pub use model::*;

/// Backend used when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api/v1.0";
