//! Request definitions.
//!
//! Each request type is emitted at its `PATH`; the payload is the value
//! itself.

pub mod app;
pub mod auth;
pub mod otp;
pub mod post;
pub mod search;
pub mod settings;
pub mod user;

pub use app::*;
pub use auth::*;
pub use otp::*;
pub use post::*;
pub use search::*;
pub use settings::*;
pub use user::*;
