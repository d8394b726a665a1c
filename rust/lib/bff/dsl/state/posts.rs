//! Post lists and the compose form.

use flux_derive::state;
use picfeed_client::{Post, PostId};
use serde::Serialize;

/// Which post list a request is about. Each scope has its own path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListScope {
    /// `feed/posts`
    Feed,
    /// `saved/posts`
    Saved,
    /// `liked/posts`
    Liked,
    /// `profile/{username}/posts`
    User { username: String },
}

impl ListScope {
    pub fn path(&self) -> String {
        match self {
            ListScope::Feed => "feed/posts".into(),
            ListScope::Saved => "saved/posts".into(),
            ListScope::Liked => "liked/posts".into(),
            ListScope::User { username } => format!("profile/{username}/posts"),
        }
    }

    pub fn user(username: impl Into<String>) -> Self {
        ListScope::User {
            username: username.into(),
        }
    }
}

/// A grid or feed of posts, stored at [`ListScope::path`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostList {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PostList {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn find(&self, post_id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }

    pub fn find_mut(&mut self, post_id: PostId) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.post_id == post_id)
    }
}

/// New-post form — stored at `compose/state`.
#[state("compose/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeState {
    pub busy: bool,
    pub error: Option<String>,
    /// Id of the post created by the last successful submit.
    pub created: Option<PostId>,
}
