use crate::error::ApiError;
use crate::model::*;

/// Everything the client can ask of the backend.
///
/// Implemented by [`crate::HttpApi`]; tests substitute an in-memory fake.
#[async_trait::async_trait]
pub trait SocialApi: Send + Sync + 'static {
    // ── Session and auth ────────────────────────────────────────────

    /// `GET /profile`: the signed-in user.
    async fn whoami(&self) -> Result<UserProfile, ApiError>;
    async fn login(&self, req: &LoginRequest) -> Result<(), ApiError>;
    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;

    async fn send_otp(&self) -> Result<(), ApiError>;
    async fn verify_otp(&self, otp: &str) -> Result<(), ApiError>;
    async fn send_otp_public(&self, email: &str) -> Result<(), ApiError>;
    async fn verify_otp_public(&self, email: &str, otp: &str) -> Result<(), ApiError>;

    async fn send_reset_otp(&self, email: &str) -> Result<(), ApiError>;
    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError>;
    async fn change_password(&self, req: &ChangePasswordRequest) -> Result<(), ApiError>;

    // ── Own profile ─────────────────────────────────────────────────

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError>;
    async fn delete_account(&self) -> Result<(), ApiError>;
    async fn upload_avatar(&self, file: Upload) -> Result<(), ApiError>;
    async fn delete_avatar(&self) -> Result<(), ApiError>;

    // ── Posts ───────────────────────────────────────────────────────

    async fn feed(&self) -> Result<Vec<Post>, ApiError>;
    async fn user_posts(&self, user_id: UserId) -> Result<Vec<Post>, ApiError>;
    async fn liked_posts(&self) -> Result<Vec<Post>, ApiError>;
    async fn saved_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// Step one of post creation: returns the stored image reference.
    async fn upload_image(&self, file: Upload) -> Result<String, ApiError>;
    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError>;
    async fn delete_post(&self, post_id: PostId) -> Result<(), ApiError>;

    async fn like(&self, post_id: PostId) -> Result<(), ApiError>;
    async fn unlike(&self, post_id: PostId) -> Result<(), ApiError>;
    async fn save(&self, post_id: PostId) -> Result<(), ApiError>;
    async fn unsave(&self, post_id: PostId) -> Result<(), ApiError>;

    async fn comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError>;
    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment, ApiError>;
    async fn delete_comment(&self, post_id: PostId, comment_id: CommentId) -> Result<(), ApiError>;

    // ── Follows and search ──────────────────────────────────────────

    async fn follow(&self, user_id: UserId) -> Result<(), ApiError>;
    async fn unfollow(&self, user_id: UserId) -> Result<(), ApiError>;
    async fn is_following(&self, user_id: UserId) -> Result<bool, ApiError>;
    async fn followers(&self, user_id: UserId) -> Result<Vec<UserProfile>, ApiError>;
    async fn following(&self, user_id: UserId) -> Result<Vec<UserProfile>, ApiError>;

    async fn search(&self, query: &str) -> Result<Vec<UserProfile>, ApiError>;
}
