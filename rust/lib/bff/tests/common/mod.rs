//! In-memory backend for the handler tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use picfeed_bff::request::SessionBootReq;
use picfeed_bff::{ClientConfig, PicfeedBff};
use picfeed_client::*;
use picfeed_flux::Flux;

/// How a faked endpoint fails.
#[derive(Debug, Clone)]
pub enum Fail {
    Unauthorized,
    Business(String),
    Server,
}

impl Fail {
    fn error(&self) -> ApiError {
        match self {
            Fail::Unauthorized => ApiError::Unauthorized,
            Fail::Business(message) => ApiError::Server {
                status: 409,
                message: message.clone(),
            },
            Fail::Server => ApiError::Server {
                status: 500,
                message: "internal".into(),
            },
        }
    }
}

#[derive(Default)]
pub struct Backend {
    /// Whoami result; `None` answers 401.
    pub me: Option<UserProfile>,
    /// Who `/login` signs in.
    pub account: Option<UserProfile>,
    /// Search universe.
    pub users: Vec<UserProfile>,
    pub feed: Vec<Post>,
    pub user_posts: HashMap<UserId, Vec<Post>>,
    pub comments: HashMap<PostId, Vec<Comment>>,
    pub following: HashSet<UserId>,
    pub followers_of: HashMap<UserId, Vec<UserProfile>>,
    pub following_of: HashMap<UserId, Vec<UserProfile>>,
    /// Endpoint name → failure.
    pub fail: HashMap<&'static str, Fail>,
    /// Search query → response delay.
    pub search_delay: HashMap<String, Duration>,
    pub next_comment_id: CommentId,
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeApi {
    pub backend: Mutex<Backend>,
}

impl FakeApi {
    pub fn new(backend: Backend) -> Arc<Self> {
        Arc::new(Self {
            backend: Mutex::new(backend),
        })
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Backend) -> R) -> R {
        f(&mut self.backend.lock().unwrap())
    }

    pub fn fail(&self, endpoint: &'static str, how: Fail) {
        self.with(|b| b.fail.insert(endpoint, how));
    }

    pub fn heal(&self, endpoint: &'static str) {
        self.with(|b| b.fail.remove(endpoint));
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|b| b.calls.clone())
    }

    /// Calls whose log entry starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.with(|b| b.calls.iter().filter(|c| c.starts_with(prefix)).count())
    }

    /// Log the call, then fail it if configured.
    fn hit(&self, endpoint: &'static str, call: String) -> Result<(), ApiError> {
        self.with(|b| {
            b.calls.push(call);
            match b.fail.get(endpoint) {
                Some(how) => Err(how.error()),
                None => Ok(()),
            }
        })
    }
}

#[async_trait]
impl SocialApi for FakeApi {
    async fn whoami(&self) -> Result<UserProfile, ApiError> {
        self.hit("whoami", "whoami".into())?;
        self.with(|b| b.me.clone()).ok_or(ApiError::Unauthorized)
    }

    async fn login(&self, req: &LoginRequest) -> Result<(), ApiError> {
        self.hit("login", format!("login:{}", req.email))?;
        self.with(|b| match b.account.clone() {
            Some(account) if account.email == req.email => {
                b.me = Some(account);
                Ok(())
            }
            _ => Err(ApiError::Unauthorized),
        })
    }

    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        self.hit("register", format!("register:{}", req.email))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.hit("logout", "logout".into())?;
        self.with(|b| b.me = None);
        Ok(())
    }

    async fn send_otp(&self) -> Result<(), ApiError> {
        self.hit("send_otp", "send_otp".into())
    }

    async fn verify_otp(&self, otp: &str) -> Result<(), ApiError> {
        self.hit("verify_otp", format!("verify_otp:{otp}"))
    }

    async fn send_otp_public(&self, email: &str) -> Result<(), ApiError> {
        self.hit("send_otp_public", format!("send_otp_public:{email}"))
    }

    async fn verify_otp_public(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        self.hit("verify_otp_public", format!("verify_otp_public:{email}:{otp}"))
    }

    async fn send_reset_otp(&self, email: &str) -> Result<(), ApiError> {
        self.hit("send_reset_otp", format!("send_reset_otp:{email}"))
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.hit(
            "reset_password",
            format!("reset_password:{}:{}:{}", req.email, req.otp, req.new_password),
        )
    }

    async fn change_password(&self, req: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.hit("change_password", format!("change_password:{}", req.new_password))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.hit("update_profile", format!("update_profile:{}", update.username))?;
        self.with(|b| {
            if let Some(me) = b.me.as_mut() {
                me.name = update.name.clone();
                me.username = update.username.clone();
                me.bio = update.bio.clone();
            }
        });
        Ok(())
    }

    async fn delete_account(&self) -> Result<(), ApiError> {
        self.hit("delete_account", "delete_account".into())?;
        self.with(|b| b.me = None);
        Ok(())
    }

    async fn upload_avatar(&self, file: Upload) -> Result<(), ApiError> {
        self.hit("upload_avatar", format!("upload_avatar:{}", file.file_name))?;
        self.with(|b| {
            if let Some(me) = b.me.as_mut() {
                me.profile_image_url = Some(format!("/uploads/{}", file.file_name));
            }
        });
        Ok(())
    }

    async fn delete_avatar(&self) -> Result<(), ApiError> {
        self.hit("delete_avatar", "delete_avatar".into())?;
        self.with(|b| {
            if let Some(me) = b.me.as_mut() {
                me.profile_image_url = None;
            }
        });
        Ok(())
    }

    async fn feed(&self) -> Result<Vec<Post>, ApiError> {
        self.hit("feed", "feed".into())?;
        Ok(self.with(|b| b.feed.clone()))
    }

    async fn user_posts(&self, user_id: UserId) -> Result<Vec<Post>, ApiError> {
        self.hit("user_posts", format!("user_posts:{user_id}"))?;
        Ok(self.with(|b| b.user_posts.get(&user_id).cloned().unwrap_or_default()))
    }

    async fn liked_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.hit("liked_posts", "liked_posts".into())?;
        Ok(self.with(|b| {
            b.feed
                .iter()
                .filter(|p| p.is_liked_by_current_user)
                .cloned()
                .collect()
        }))
    }

    async fn saved_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.hit("saved_posts", "saved_posts".into())?;
        Ok(self.with(|b| {
            b.feed
                .iter()
                .filter(|p| p.is_saved_by_current_user)
                .cloned()
                .collect()
        }))
    }

    async fn upload_image(&self, file: Upload) -> Result<String, ApiError> {
        self.hit("upload_image", format!("upload_image:{}", file.file_name))?;
        Ok(format!("/uploads/{}", file.file_name))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post, ApiError> {
        self.hit("create_post", format!("create_post:{}", post.image_url))?;
        Ok(self.with(|b| {
            let me = b.me.clone().unwrap_or_default();
            Post {
                post_id: 900 + b.feed.len() as PostId,
                user_id: me.user_id,
                username: me.username,
                image_url: Some(post.image_url.clone()),
                caption: post.caption.clone(),
                tags: Some(post.tags.clone()),
                is_private: post.is_private,
                ..Post::default()
            }
        }))
    }

    async fn delete_post(&self, post_id: PostId) -> Result<(), ApiError> {
        self.hit("delete_post", format!("delete_post:{post_id}"))
    }

    async fn like(&self, post_id: PostId) -> Result<(), ApiError> {
        self.hit("like", format!("like:{post_id}"))
    }

    async fn unlike(&self, post_id: PostId) -> Result<(), ApiError> {
        self.hit("unlike", format!("unlike:{post_id}"))
    }

    async fn save(&self, post_id: PostId) -> Result<(), ApiError> {
        self.hit("save", format!("save:{post_id}"))
    }

    async fn unsave(&self, post_id: PostId) -> Result<(), ApiError> {
        self.hit("unsave", format!("unsave:{post_id}"))
    }

    async fn comments(&self, post_id: PostId) -> Result<Vec<Comment>, ApiError> {
        self.hit("comments", format!("comments:{post_id}"))?;
        Ok(self.with(|b| b.comments.get(&post_id).cloned().unwrap_or_default()))
    }

    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment, ApiError> {
        self.hit("add_comment", format!("add_comment:{post_id}:{content}"))?;
        Ok(self.with(|b| {
            b.next_comment_id += 1;
            let me = b.me.clone().unwrap_or_default();
            Comment {
                comment_id: 500 + b.next_comment_id,
                user_id: me.user_id,
                username: me.username,
                content: content.to_string(),
                ..Comment::default()
            }
        }))
    }

    async fn delete_comment(&self, post_id: PostId, comment_id: CommentId) -> Result<(), ApiError> {
        self.hit("delete_comment", format!("delete_comment:{post_id}:{comment_id}"))
    }

    async fn follow(&self, user_id: UserId) -> Result<(), ApiError> {
        self.hit("follow", format!("follow:{user_id}"))?;
        self.with(|b| b.following.insert(user_id));
        Ok(())
    }

    async fn unfollow(&self, user_id: UserId) -> Result<(), ApiError> {
        self.hit("unfollow", format!("unfollow:{user_id}"))?;
        self.with(|b| b.following.remove(&user_id));
        Ok(())
    }

    async fn is_following(&self, user_id: UserId) -> Result<bool, ApiError> {
        self.hit("is_following", format!("is_following:{user_id}"))?;
        Ok(self.with(|b| b.following.contains(&user_id)))
    }

    async fn followers(&self, user_id: UserId) -> Result<Vec<UserProfile>, ApiError> {
        self.hit("followers", format!("followers:{user_id}"))?;
        Ok(self.with(|b| b.followers_of.get(&user_id).cloned().unwrap_or_default()))
    }

    async fn following(&self, user_id: UserId) -> Result<Vec<UserProfile>, ApiError> {
        self.hit("following", format!("following:{user_id}"))?;
        Ok(self.with(|b| b.following_of.get(&user_id).cloned().unwrap_or_default()))
    }

    async fn search(&self, query: &str) -> Result<Vec<UserProfile>, ApiError> {
        self.hit("search", format!("search:{query}"))?;
        let delay = self.with(|b| b.search_delay.get(query).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let q = query.to_lowercase();
        Ok(self.with(|b| {
            b.users
                .iter()
                .filter(|u| u.username.to_lowercase().contains(&q))
                .cloned()
                .collect()
        }))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn user(id: UserId, username: &str) -> UserProfile {
    UserProfile {
        user_id: id,
        username: username.into(),
        name: username.to_uppercase(),
        email: format!("{username}@example.com"),
        ..UserProfile::default()
    }
}

pub fn post(id: PostId, author: &UserProfile) -> Post {
    Post {
        post_id: id,
        user_id: author.user_id,
        username: author.username.clone(),
        caption: format!("post {id}"),
        ..Post::default()
    }
}

pub fn comment(id: CommentId, author: &UserProfile, content: &str) -> Comment {
    Comment {
        comment_id: id,
        user_id: author.user_id,
        username: author.username.clone(),
        content: content.into(),
        ..Comment::default()
    }
}

/// A registered flux on top of `api`.
pub fn app(api: &Arc<FakeApi>) -> Flux {
    app_with(api, &ClientConfig::default())
}

pub fn app_with(api: &Arc<FakeApi>, config: &ClientConfig) -> Flux {
    let flux = Flux::new();
    let bff = PicfeedBff::new(api.clone(), config);
    bff.register(&flux);
    flux
}

/// A flux whose boot check found `me` signed in.
pub async fn signed_in(api: &Arc<FakeApi>, me: &UserProfile) -> Flux {
    api.with(|b| b.me = Some(me.clone()));
    let flux = app(api);
    flux.emit(SessionBootReq::PATH, SessionBootReq).await;
    flux
}
