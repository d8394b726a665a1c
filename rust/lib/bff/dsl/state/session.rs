//! Session state — stored at `session/state`.

use flux_derive::state;
use picfeed_client::UserProfile;
use serde::Serialize;

/// Who is signed in, and whether we know yet.
///
/// `auth_ready` starts false and flips to true once, when the boot check
/// resolves. Signed-in is derived from `user`, so the two cannot disagree.
#[state("session/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub auth_ready: bool,
    pub user: Option<UserProfile>,
    /// Bumped on every avatar change; appended to avatar URLs as `?v=N`.
    pub avatar_version: u64,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<picfeed_client::UserId> {
        self.user.as_ref().map(|u| u.user_id)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// Login / signup page.
#[state("auth/form")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthForm {
    pub tab: AuthTab,
    pub busy: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}
