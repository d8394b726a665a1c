//! Confirmation modal — stored at `confirm/state`.

use flux_derive::state;
use picfeed_client::{CommentId, PostId};
use serde::Serialize;

use super::posts::ListScope;

/// A destructive action waiting for the user's yes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PendingAction {
    DeletePost { scope: ListScope, post_id: PostId },
    DeleteComment { scope: ListScope, post_id: PostId, comment_id: CommentId },
    DeleteAccount,
}

impl PendingAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::DeletePost { .. } => "Delete this post? This cannot be undone.",
            PendingAction::DeleteComment { .. } => "Delete this comment?",
            PendingAction::DeleteAccount => "Delete your account and all of your posts?",
        }
    }
}

#[state("confirm/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmState {
    pub pending: Option<PendingAction>,
    pub busy: bool,
}
