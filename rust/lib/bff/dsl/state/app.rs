//! Routing state — stored at `app/route`.

use flux_derive::state;
use serde::Serialize;

/// What the shell should currently show.
#[state("app/route")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRoute {
    /// The path actually being shown (after any redirect).
    pub path: String,
    pub view: View,
    /// Where a redirect came from, kept so login can return there.
    pub from: Option<String>,
}

impl Default for AppRoute {
    fn default() -> Self {
        Self {
            path: "/".into(),
            view: View::Blank,
            from: None,
        }
    }
}

impl AppRoute {
    /// Still waiting on the boot check.
    pub fn is_pending(&self) -> bool {
        self.view == View::Blank
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    /// Render nothing (session not resolved yet).
    Blank,
    Login,
    Register,
    ResetPassword,
    Feed,
    Welcome,
    OwnProfile,
    Settings,
    Saved,
    Liked,
    CreatePost,
    Verify,
    UserProfile { username: String },
    Followers { username: String },
    Following { username: String },
}
