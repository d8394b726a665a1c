//! Flux — the client state engine behind picfeed.
//!
//! Rust owns every piece of client state: the session, each view's data and
//! the pending notices. A platform shell (web, desktop, mobile, CLI) only
//! renders what it reads and forwards user intents as requests.
//!
//! # Three Primitives
//!
//! - `get(path)` — read state at a path (Arc clone, no data copy)
//! - `emit(path, payload)` — send a request, routed to matching handler(s)
//! - `subscribe(pattern)` — observe state changes under a pattern
//!
//! # Path Addressing
//!
//! State and requests share one `/`-separated namespace:
//! - Global: `session/state`, `app/route`, `notice/state`
//! - Views: `feed/posts`, `search/state`, `settings/form`
//! - Per-entity views: `profile/{username}`, `profile/{username}/posts`
//!
//! # Pattern Matching
//!
//! Subscriptions and handlers accept MQTT-style wildcards:
//! - Exact: `session/state`
//! - One level: `profile/+` matches `profile/alice`, not `profile/alice/posts`
//! - Rest: `profile/#` matches everything under `profile/`
//! - All: `#`
//!
//! # Example
//!
//! ```ignore
//! use picfeed_flux::Flux;
//!
//! let app = Flux::new();
//!
//! app.on("session/boot", |_, _, store| async move {
//!     store.set("session/state", Session::ready_anonymous());
//! });
//!
//! app.subscribe("session/#", |path, _| println!("changed: {path}"));
//!
//! app.emit("session/boot", ()).await;
//! ```

pub mod app;
pub mod router;
pub mod store;
pub mod topic;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
