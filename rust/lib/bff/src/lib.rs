//! picfeed client logic.
//!
//! Structure:
//! - `dsl/state/` — typed states, one per path a shell renders
//! - `dsl/request/` — typed requests, one per path a shell emits
//! - `src/handlers/` — the async handlers behind every request
//! - pure building blocks: [`guard`], [`toggle`], [`otp`], [`validate`], [`display`]
//!
//! ```ignore
//! let flux = Flux::new();
//! let bff = PicfeedBff::new(Arc::new(HttpApi::new(&config.backend_url)?), &config);
//! bff.register(&flux);
//! flux.emit(SessionBootReq::PATH, SessionBootReq).await;
//! ```

// State types — flat access as `crate::state::*`.
#[path = "../dsl/state/mod.rs"]
pub mod state;

// Request types — flat access as `crate::request::*`.
#[path = "../dsl/request/mod.rs"]
pub mod request;

pub mod config;
pub mod display;
pub mod guard;
mod handlers;
pub mod otp;
pub mod toggle;
pub mod validate;

pub use config::{ClientConfig, ConfigError};
pub use handlers::PicfeedBff;
