//! Other users' profile pages and follow lists.

use picfeed_client::{UserId, UserProfile};
use serde::Serialize;

/// One user's profile page — stored at `profile/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePage {
    pub username: String,
    pub user: Option<UserProfile>,
    /// The viewer is looking at their own profile.
    pub is_own: bool,
    pub is_following: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfilePage {
    pub fn path_for(username: &str) -> String {
        format!("profile/{username}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowKind {
    Followers,
    Following,
}

impl FollowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FollowKind::Followers => "followers",
            FollowKind::Following => "following",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRow {
    pub user: UserProfile,
    pub is_following: bool,
    /// The row is the viewer: no follow button.
    pub is_self: bool,
}

/// Followers or following of one user — stored at `follows/{username}/{kind}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowList {
    pub username: String,
    pub kind: FollowKind,
    pub rows: Vec<FollowRow>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FollowList {
    pub fn path_for(username: &str, kind: FollowKind) -> String {
        format!("follows/{username}/{}", kind.as_str())
    }

    pub fn row(&self, user_id: UserId) -> Option<&FollowRow> {
        self.rows.iter().find(|r| r.user.user_id == user_id)
    }

    pub fn row_mut(&mut self, user_id: UserId) -> Option<&mut FollowRow> {
        self.rows.iter_mut().find(|r| r.user.user_id == user_id)
    }
}

/// Where a follow toggle was pressed, i.e. which state shows the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowScope {
    Profile { username: String },
    List { username: String, kind: FollowKind },
}

impl FollowScope {
    pub fn path(&self) -> String {
        match self {
            FollowScope::Profile { username } => ProfilePage::path_for(username),
            FollowScope::List { username, kind } => FollowList::path_for(username, *kind),
        }
    }
}
