use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::model::*;

/// [`SocialApi`] over HTTP.
///
/// Holds a single reqwest client with a cookie store; the session cookie
/// issued by `/login` is replayed automatically and cleared by `/logout`
/// through the backend's `Set-Cookie`.
#[derive(Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        tracing::debug!(%method, path, status, "backend call");
        if resp.status().is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        if !err.is_auth_denied() {
            tracing::warn!(%method, path, status, error = %err, "backend rejected request");
        }
        Err(err)
    }

    /// Send and ignore whatever body comes back.
    async fn call(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(method, path, builder).await.map(drop)
    }

    async fn fetch<R: DeserializeOwned>(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<R, ApiError> {
        let resp = self.send(method, path, builder).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch(Method::GET, path, self.request(Method::GET, path)).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.call(Method::POST, path, self.request(Method::POST, path)).await
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.call(Method::POST, path, self.request(Method::POST, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.call(Method::DELETE, path, self.request(Method::DELETE, path)).await
    }

    fn file_form(file: Upload) -> Result<multipart::Form, ApiError> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| ApiError::Decode(format!("content type {:?}: {e}", file.content_type)))?;
        Ok(multipart::Form::new().part("file", part))
    }
}

#[async_trait::async_trait]
impl SocialApi for HttpApi {
    async fn whoami(&self) -> Result<UserProfile, ApiError> {
        self.get("/profile").await
    }

    async fn login(&self, req: &LoginRequest) -> Result<(), ApiError> {
        self.post_json("/login", req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        self.post_json("/register", req).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post_empty("/logout").await
    }

    async fn send_otp(&self) -> Result<(), ApiError> {
        self.post_empty("/send-otp").await
    }

    async fn verify_otp(&self, otp: &str) -> Result<(), ApiError> {
        self.post_json("/verify-otp", &OtpBody { otp }).await
    }

    async fn send_otp_public(&self, email: &str) -> Result<(), ApiError> {
        let path = "/send-otp-public";
        let req = self.request(Method::POST, path).query(&[("email", email)]);
        self.call(Method::POST, path, req).await
    }

    async fn verify_otp_public(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        self.post_json("/verify-otp-public", &PublicOtpBody { email, otp }).await
    }

    async fn send_reset_otp(&self, email: &str) -> Result<(), ApiError> {
        let path = "/send-reset-otp";
        let req = self.request(Method::POST, path).query(&[("email", email)]);
        self.call(Method::POST, path, req).await
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.post_json("/reset-password", req).await
    }

    async fn change_password(&self, req: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.post_json("/change-password", req).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let path = "/profile";
        self.call(Method::PUT, path, self.request(Method::PUT, path).json(update)).await
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        self.delete("/profile").await
    }

    async fn upload_avatar(&self, file: Upload) -> Result<(), ApiError> {
        let path = "/users/me/avatar";
        let req = self.request(Method::POST, path).multipart(Self::file_form(file)?);
        self.call(Method::POST, path, req).await
    }

    async fn delete_avatar(&self) -> Result<(), ApiError> {
        self.delete("/users/me/avatar").await
    }

    async fn feed(&self) -> Result<Vec<Post>, ApiError> {
        self.get("/posts/feed").await
    }

    async fn user_posts(&self, user_id: UserId) -> Result<Vec<Post>, ApiError> {
        self.get(&format!("/posts/user/{user_id}")).await
    }

    async fn liked_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get("/posts/liked").await
    }

    async fn saved_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get("/posts/saved").await
    }

    async fn upload_image(&self, file: Upload) -> Result<String, ApiError> {
        let path = "/users/avatar/upload";
        let req = self.request(Method::POST, path).multipart(Self::file_form(file)?);
        let uploaded: UploadedImage = self.fetch(Method::POST, path, req).await?;
        Ok(uploaded.image_url)
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        let path = "/posts";
        self.fetch(Method::POST, path, self.request(Method::POST, path).json(post)).await
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), ApiError> {
        self.delete(&format!("/posts/{post_id}")).await
    }

    async fn like(&self, post_id: PostId) -> Result<(), ApiError> {
        self.post_empty(&format!("/posts/{post_id}/like")).await
    }

    async fn unlike(&self, post_id: PostId) -> Result<(), ApiError> {
        self.post_empty(&format!("/posts/{post_id}/unlike")).await
    }

    async fn save(&self, post_id: PostId) -> Result<(), ApiError> {
        self.post_empty(&format!("/posts/{post_id}/save")).await
    }

    async fn unsave(&self, post_id: PostId) -> Result<(), ApiError> {
        self.post_empty(&format!("/posts/{post_id}/unsave")).await
    }

    async fn comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        self.get(&format!("/posts/{post_id}/comments")).await
    }

    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment, ApiError> {
        let path = format!("/posts/{post_id}/comments");
        let req = self.request(Method::POST, &path).json(&CommentBody { content });
        self.fetch(Method::POST, &path, req).await
    }

    async fn delete_comment(&self, post_id: PostId, comment_id: CommentId) -> Result<(), ApiError> {
        self.delete(&format!("/posts/{post_id}/comments/{comment_id}")).await
    }

    async fn follow(&self, user_id: UserId) -> Result<(), ApiError> {
        self.post_json("/follows/follow", &FollowBody { following_user_id: user_id }).await
    }

    async fn unfollow(&self, user_id: UserId) -> Result<(), ApiError> {
        self.post_json("/follows/unfollow", &FollowBody { following_user_id: user_id }).await
    }

    async fn is_following(&self, user_id: UserId) -> Result<bool, ApiError> {
        self.get(&format!("/follows/check/{user_id}")).await
    }

    async fn followers(&self, user_id: UserId) -> Result<Vec<UserProfile>, ApiError> {
        self.get(&format!("/follows/followers/{user_id}")).await
    }

    async fn following(&self, user_id: UserId) -> Result<Vec<UserProfile>, ApiError> {
        self.get(&format!("/follows/following/{user_id}")).await
    }

    async fn search(&self, query: &str) -> Result<Vec<UserProfile>, ApiError> {
        let path = "/search";
        let req = self.request(Method::GET, path).query(&[("q", query)]);
        self.fetch(Method::GET, path, req).await
    }
}
