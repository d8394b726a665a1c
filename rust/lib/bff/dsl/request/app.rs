//! Session lifecycle, navigation and UI plumbing requests.

use flux_derive::request;

use crate::state::PendingAction;

/// One-time check of the existing session. Emit once at startup.
#[request("session/boot")]
pub struct SessionBootReq;

/// Re-fetch the signed-in user.
#[request("session/refresh")]
pub struct SessionRefreshReq;

#[request("app/navigate")]
pub struct NavigateReq {
    pub path: String,
}

impl NavigateReq {
    pub fn to(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[request("notice/dismiss")]
pub struct NoticeDismissReq {
    pub id: u64,
}

/// Ask before a destructive action.
#[request("confirm/open")]
pub struct ConfirmOpenReq {
    pub action: PendingAction,
}

#[request("confirm/accept")]
pub struct ConfirmAcceptReq;

#[request("confirm/cancel")]
pub struct ConfirmCancelReq;
