//! Post lists, likes/saves, post creation and comments.

use picfeed_client::{split_tags, ApiError, CommentId, NewPost, Post, PostId, Upload};
use picfeed_flux::StateStore;

use super::{notify, report, session, PicfeedBff};
use crate::request::*;
use crate::state::*;
use crate::toggle::{toggle_with_rollback, Toggle, ToggleOutcome};
use crate::validate::{self, ValidationError};

/// The two per-post viewer flags.
#[derive(Debug, Clone, Copy)]
enum PostFlag {
    Like,
    Save,
}

impl PostFlag {
    fn key(self) -> &'static str {
        match self {
            PostFlag::Like => "like",
            PostFlag::Save => "save",
        }
    }

    fn get(self, post: &Post) -> Toggle {
        match self {
            PostFlag::Like => Toggle::new(post.is_liked_by_current_user, post.like_count),
            PostFlag::Save => Toggle::new(post.is_saved_by_current_user, post.save_count),
        }
    }

    fn set(self, post: &mut Post, t: Toggle) {
        match self {
            PostFlag::Like => {
                post.is_liked_by_current_user = t.active;
                post.like_count = t.count;
            }
            PostFlag::Save => {
                post.is_saved_by_current_user = t.active;
                post.save_count = t.count;
            }
        }
    }
}

impl PicfeedBff {
    // ========================================================================
    // Lists
    // ========================================================================

    pub(super) async fn handle_posts_load(&self, req: &PostsLoadReq, store: &StateStore) {
        self.load_posts(&req.scope, store).await;
    }

    /// Fetch one post list. Posts already shown stay visible while loading.
    pub(super) async fn load_posts(&self, scope: &ListScope, store: &StateStore) {
        let path = scope.path();
        if store
            .update(&path, |l: &mut PostList| {
                l.loading = true;
                l.error = None;
            })
            .is_none()
        {
            store.set(&path, PostList::loading());
        }

        let result = match scope {
            ListScope::Feed => self.api.feed().await,
            ListScope::Saved => self.api.saved_posts().await,
            ListScope::Liked => self.api.liked_posts().await,
            ListScope::User { username } => match self.resolve_user(username, store).await {
                Ok(Some(user)) => self.api.user_posts(user.user_id).await,
                Ok(None) => {
                    store.set(
                        &path,
                        PostList {
                            error: Some("User not found".into()),
                            ..PostList::default()
                        },
                    );
                    return;
                }
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(posts) => {
                tracing::debug!(%path, count = posts.len(), "posts loaded");
                store.set(
                    &path,
                    PostList {
                        posts,
                        ..PostList::default()
                    },
                );
            }
            Err(e) => {
                let message = report(store, &e, "Failed to load posts");
                store.update(&path, |l: &mut PostList| {
                    l.loading = false;
                    l.error = Some(message);
                });
            }
        }
    }

    // ========================================================================
    // Like / save
    // ========================================================================

    pub(super) async fn handle_like(&self, req: &PostLikeReq, store: &StateStore) {
        self.toggle_post(&req.scope, req.post_id, PostFlag::Like, store).await;
    }

    pub(super) async fn handle_save(&self, req: &PostSaveReq, store: &StateStore) {
        self.toggle_post(&req.scope, req.post_id, PostFlag::Save, store).await;
    }

    async fn toggle_post(&self, scope: &ListScope, post_id: PostId, flag: PostFlag, store: &StateStore) {
        let path = scope.path();
        let Some(_claim) = self.begin(format!("{}:{path}:{post_id}", flag.key())) else {
            return;
        };

        let outcome = toggle_with_rollback(
            || {
                store
                    .read::<PostList>(&path)
                    .and_then(|l| l.find(post_id).map(|p| flag.get(p)))
            },
            |t| {
                store.update(&path, |l: &mut PostList| {
                    if let Some(p) = l.find_mut(post_id) {
                        flag.set(p, t);
                    }
                });
            },
            || async {
                match flag {
                    PostFlag::Like => self.api.like(post_id).await,
                    PostFlag::Save => self.api.save(post_id).await,
                }
            },
            || async {
                match flag {
                    PostFlag::Like => self.api.unlike(post_id).await,
                    PostFlag::Save => self.api.unsave(post_id).await,
                }
            },
        )
        .await;

        match outcome {
            ToggleOutcome::Applied(t) => {
                tracing::debug!(post_id, flag = flag.key(), active = t.active, "toggled");
            }
            ToggleOutcome::RolledBack { error, .. } => {
                let fallback = match flag {
                    PostFlag::Like => "Could not update like",
                    PostFlag::Save => "Could not update saved posts",
                };
                report(store, &error, fallback);
            }
            ToggleOutcome::Missing => tracing::debug!(%path, post_id, "post not in list"),
        }
    }

    // ========================================================================
    // Create / delete
    // ========================================================================

    pub(super) async fn handle_post_create(&self, req: &PostCreateReq, store: &StateStore) {
        let checked = req
            .image
            .clone()
            .ok_or(ValidationError::ImageRequired)
            .and_then(|image| validate::caption(&req.caption).map(|()| image));
        let image = match checked {
            Ok(image) => image,
            Err(e) => {
                store.set(
                    ComposeState::PATH,
                    ComposeState {
                        error: Some(e.to_string()),
                        ..ComposeState::default()
                    },
                );
                return;
            }
        };

        store.set(
            ComposeState::PATH,
            ComposeState {
                busy: true,
                ..ComposeState::default()
            },
        );

        match self.publish(image, req).await {
            Ok(post) => {
                tracing::info!(post_id = post.post_id, "post created");
                let post_id = post.post_id;
                store.update("feed/posts", |l: &mut PostList| l.posts.insert(0, post));
                store.set(
                    ComposeState::PATH,
                    ComposeState {
                        created: Some(post_id),
                        ..ComposeState::default()
                    },
                );
                notify(store, NoticeLevel::Success, "Post created successfully!");
            }
            Err(e) => {
                let message = report(store, &e, "Failed to create post");
                store.set(
                    ComposeState::PATH,
                    ComposeState {
                        error: Some(message),
                        ..ComposeState::default()
                    },
                );
            }
        }
    }

    /// Upload the image, then create the record pointing at it.
    async fn publish(&self, image: Upload, req: &PostCreateReq) -> Result<Post, ApiError> {
        let image_url = self.api.upload_image(image).await?;
        let post = NewPost {
            caption: req.caption.trim().to_string(),
            image_url,
            is_private: req.is_private,
            location: req.location.trim().to_string(),
            tags: split_tags(&req.tags).join(","),
        };
        self.api.create_post(&post).await
    }

    pub(super) async fn delete_post(&self, scope: &ListScope, post_id: PostId, store: &StateStore) {
        let path = scope.path();
        let owner = store
            .read::<PostList>(&path)
            .and_then(|l| l.find(post_id).map(|p| p.user_id));
        if owner.is_none() || owner != session(store).user_id() {
            notify(store, NoticeLevel::Error, ValidationError::NotOwner.to_string());
            return;
        }

        match self.api.delete_post(post_id).await {
            Ok(()) => {
                tracing::info!(post_id, "post deleted");
                store.update(&path, |l: &mut PostList| l.posts.retain(|p| p.post_id != post_id));
                notify(store, NoticeLevel::Success, "Post deleted");
            }
            Err(e) => {
                report(store, &e, "Failed to delete post");
            }
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    pub(super) async fn handle_comment_load(&self, req: &CommentLoadReq, store: &StateStore) {
        match self.api.comments(req.post_id).await {
            Ok(comments) => {
                store.update(&req.scope.path(), |l: &mut PostList| {
                    if let Some(p) = l.find_mut(req.post_id) {
                        p.comments = comments;
                    }
                });
            }
            Err(e) => {
                report(store, &e, "Failed to load comments");
            }
        }
    }

    pub(super) async fn handle_comment_add(&self, req: &CommentAddReq, store: &StateStore) {
        let content = req.content.trim();
        if let Err(e) = validate::required(content, "Comment") {
            notify(store, NoticeLevel::Error, e.to_string());
            return;
        }

        match self.api.add_comment(req.post_id, content).await {
            Ok(comment) => {
                tracing::debug!(post_id = req.post_id, comment_id = comment.comment_id, "comment added");
                store.update(&req.scope.path(), |l: &mut PostList| {
                    if let Some(p) = l.find_mut(req.post_id) {
                        p.comments.insert(0, comment);
                        p.comment_count += 1;
                    }
                });
            }
            Err(e) => {
                report(store, &e, "Failed to add comment");
            }
        }
    }

    pub(super) async fn delete_comment(
        &self,
        scope: &ListScope,
        post_id: PostId,
        comment_id: CommentId,
        store: &StateStore,
    ) {
        let path = scope.path();
        let owner = store.read::<PostList>(&path).and_then(|l| {
            l.find(post_id)
                .and_then(|p| p.comments.iter().find(|c| c.comment_id == comment_id))
                .map(|c| c.user_id)
        });
        if owner.is_none() || owner != session(store).user_id() {
            notify(store, NoticeLevel::Error, ValidationError::NotOwner.to_string());
            return;
        }

        match self.api.delete_comment(post_id, comment_id).await {
            Ok(()) => {
                store.update(&path, |l: &mut PostList| {
                    if let Some(p) = l.find_mut(post_id) {
                        p.comments.retain(|c| c.comment_id != comment_id);
                        p.comment_count = p.comment_count.saturating_sub(1);
                    }
                });
            }
            Err(e) => {
                report(store, &e, "Failed to delete comment");
            }
        }
    }
}
