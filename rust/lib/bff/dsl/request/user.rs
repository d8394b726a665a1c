//! Profile and follow requests.

use flux_derive::request;
use picfeed_client::UserId;

use crate::state::{FollowKind, FollowScope};

#[request("profile/load")]
pub struct ProfileLoadReq {
    pub username: String,
}

#[request("follows/load")]
pub struct FollowsLoadReq {
    pub username: String,
    pub kind: FollowKind,
}

#[request("user/follow-toggle")]
pub struct FollowToggleReq {
    pub user_id: UserId,
    pub scope: FollowScope,
}
