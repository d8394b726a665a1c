//! State definitions.
//!
//! Each file defines the state types a group of views reads. Types with a
//! fixed address carry `#[state("path")]`; per-entity views (one profile
//! page per username) expose a `path_for` constructor instead.

pub mod app;
pub mod confirm;
pub mod notice;
pub mod otp;
pub mod posts;
pub mod profile;
pub mod search;
pub mod session;
pub mod settings;

pub use app::{AppRoute, View};
pub use confirm::{ConfirmState, PendingAction};
pub use notice::{Notice, NoticeLevel, Notices};
pub use otp::{OtpState, OtpTarget, ResetFlow, ResetStep};
pub use posts::{ComposeState, ListScope, PostList};
pub use profile::{FollowKind, FollowList, FollowRow, ProfilePage, FollowScope};
pub use search::SearchState;
pub use session::{AuthForm, AuthTab, SessionState};
pub use settings::{PasswordForm, SettingsForm};
