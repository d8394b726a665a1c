//! Post, comment and list requests.

use flux_derive::request;
use picfeed_client::{PostId, Upload};

use crate::state::ListScope;

/// (Re)load a post list.
#[request("posts/load")]
pub struct PostsLoadReq {
    pub scope: ListScope,
}

#[request("post/like")]
pub struct PostLikeReq {
    pub scope: ListScope,
    pub post_id: PostId,
}

#[request("post/save")]
pub struct PostSaveReq {
    pub scope: ListScope,
    pub post_id: PostId,
}

#[request("post/create")]
pub struct PostCreateReq {
    pub image: Option<Upload>,
    pub caption: String,
    pub location: String,
    /// Comma-separated.
    pub tags: String,
    pub is_private: bool,
}

#[request("comment/load")]
pub struct CommentLoadReq {
    pub scope: ListScope,
    pub post_id: PostId,
}

#[request("comment/add")]
pub struct CommentAddReq {
    pub scope: ListScope,
    pub post_id: PostId,
    pub content: String,
}
