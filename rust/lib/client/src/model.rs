//! Wire types. The backend speaks camelCase JSON; optional or absent
//! fields decode to their defaults.

use serde::{Deserialize, Serialize};

pub type UserId = u64;
pub type PostId = u64;
pub type CommentId = u64;

// ── Users ───────────────────────────────────────────────────────────

/// A user as returned by `/profile`, `/search` and the follow lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub profile_image_url: Option<String>,
    #[serde(alias = "isVerified")]
    pub is_account_verified: bool,
    pub followers_count: u64,
    pub following_count: u64,
    pub posts_count: u64,
}

// ── Posts ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub post_id: PostId,
    pub user_id: UserId,
    pub username: String,
    pub user_avatar: Option<String>,
    pub image_url: Option<String>,
    pub caption: String,
    pub location: Option<String>,
    /// Comma-separated, as stored by the backend.
    pub tags: Option<String>,
    pub is_private: bool,
    pub like_count: u64,
    pub save_count: u64,
    pub comment_count: u64,
    pub is_liked_by_current_user: bool,
    pub is_saved_by_current_user: bool,
    pub comments: Vec<Comment>,
    pub created_at: Option<String>,
}

impl Post {
    /// Trimmed, non-empty tags.
    pub fn tag_list(&self) -> Vec<String> {
        split_tags(self.tags.as_deref().unwrap_or_default())
    }
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub comment_id: CommentId,
    pub user_id: UserId,
    pub username: String,
    pub user_avatar: Option<String>,
    pub content: String,
    pub created_at: Option<String>,
}

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub username: String,
    pub bio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub caption: String,
    pub image_url: String,
    pub is_private: bool,
    pub location: String,
    /// Comma-separated.
    pub tags: String,
}

/// A file to send as the multipart `file` part.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadedImage {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FollowBody {
    pub following_user_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct OtpBody<'a> {
    pub otp: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PublicOtpBody<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub content: &'a str,
}
