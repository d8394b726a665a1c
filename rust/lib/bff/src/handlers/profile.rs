//! Other-user profiles, follower/following lists and follow toggles.

use std::sync::Arc;

use picfeed_client::{ApiError, UserId, UserProfile};
use picfeed_flux::StateStore;
use tokio::task::JoinSet;

use super::{notify, report, session, PicfeedBff};
use crate::request::*;
use crate::state::*;
use crate::toggle::{toggle_with_rollback, Toggle, ToggleOutcome};
use crate::validate::ValidationError;

impl PicfeedBff {
    /// Look a user up by exact username.
    ///
    /// The viewer and already-loaded profile pages answer locally; anything
    /// else goes through search.
    pub(super) async fn resolve_user(
        &self,
        username: &str,
        store: &StateStore,
    ) -> Result<Option<UserProfile>, ApiError> {
        if let Some(me) = session(store).user.filter(|u| u.username == username) {
            return Ok(Some(me));
        }
        if let Some(user) = store
            .read::<ProfilePage>(&ProfilePage::path_for(username))
            .and_then(|p| p.user)
        {
            return Ok(Some(user));
        }
        let found = self.api.search(username).await?;
        Ok(found.into_iter().find(|u| u.username == username))
    }

    pub(super) async fn handle_profile_load(&self, req: &ProfileLoadReq, store: &StateStore) {
        let username = req.username.trim();
        let path = ProfilePage::path_for(username);
        store.set(
            &path,
            ProfilePage {
                username: username.to_string(),
                loading: true,
                ..ProfilePage::default()
            },
        );

        let failed = |error: String| ProfilePage {
            username: username.to_string(),
            error: Some(error),
            ..ProfilePage::default()
        };

        let user = match self.api.search(username).await {
            Ok(found) => found.into_iter().find(|u| u.username == username),
            Err(e) => {
                let message = report(store, &e, "Failed to load user profile");
                store.set(&path, failed(message));
                return;
            }
        };
        let Some(user) = user else {
            store.set(&path, failed("User not found".into()));
            return;
        };

        let is_own = session(store).user_id() == Some(user.user_id);
        let is_following = if is_own {
            false
        } else {
            self.api.is_following(user.user_id).await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, user_id = user.user_id, "follow check failed");
                false
            })
        };

        tracing::debug!(%username, is_own, is_following, "profile loaded");
        store.set(
            &path,
            ProfilePage {
                username: username.to_string(),
                user: Some(user),
                is_own,
                is_following,
                loading: false,
                error: None,
            },
        );

        self.load_posts(&ListScope::user(username), store).await;
    }

    pub(super) async fn handle_follows_load(&self, req: &FollowsLoadReq, store: &StateStore) {
        let username = req.username.trim();
        let path = FollowList::path_for(username, req.kind);
        let list = |rows: Vec<FollowRow>, loading: bool, error: Option<String>| FollowList {
            username: username.to_string(),
            kind: req.kind,
            rows,
            loading,
            error,
        };
        store.set(&path, list(Vec::new(), true, None));

        let fallback = match req.kind {
            FollowKind::Followers => "Failed to load followers",
            FollowKind::Following => "Failed to load following",
        };
        let user = match self.resolve_user(username, store).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                store.set(&path, list(Vec::new(), false, Some("User not found".into())));
                return;
            }
            Err(e) => {
                let message = report(store, &e, fallback);
                store.set(&path, list(Vec::new(), false, Some(message)));
                return;
            }
        };

        let users = match req.kind {
            FollowKind::Followers => self.api.followers(user.user_id).await,
            FollowKind::Following => self.api.following(user.user_id).await,
        };
        let users = match users {
            Ok(users) => users,
            Err(e) => {
                let message = report(store, &e, fallback);
                store.set(&path, list(Vec::new(), false, Some(message)));
                return;
            }
        };

        let rows = self.follow_rows(users, session(store).user_id()).await;
        tracing::debug!(%path, count = rows.len(), "follow list loaded");
        store.set(&path, list(rows, false, None));
    }

    /// One follow check per row, run concurrently. The viewer's own row is
    /// skipped and a failed check reads as not following.
    async fn follow_rows(&self, users: Vec<UserProfile>, me: Option<UserId>) -> Vec<FollowRow> {
        let mut checks = JoinSet::new();
        for (i, user) in users.iter().enumerate() {
            if Some(user.user_id) == me {
                continue;
            }
            let api = Arc::clone(&self.api);
            let id = user.user_id;
            checks.spawn(async move { (i, api.is_following(id).await) });
        }

        let mut following = vec![false; users.len()];
        while let Some(joined) = checks.join_next().await {
            match joined {
                Ok((i, Ok(flag))) => following[i] = flag,
                Ok((i, Err(e))) => tracing::debug!(error = %e, row = i, "follow check failed"),
                Err(e) => tracing::warn!(error = %e, "follow check task failed"),
            }
        }

        users
            .into_iter()
            .zip(following)
            .map(|(user, is_following)| FollowRow {
                is_self: Some(user.user_id) == me,
                user,
                is_following,
            })
            .collect()
    }

    pub(super) async fn handle_follow_toggle(&self, req: &FollowToggleReq, store: &StateStore) {
        if session(store).user_id() == Some(req.user_id) {
            notify(store, NoticeLevel::Error, ValidationError::SelfFollow.to_string());
            return;
        }
        let path = req.scope.path();
        let Some(_claim) = self.begin(format!("follow:{path}:{}", req.user_id)) else {
            return;
        };
        let user_id = req.user_id;

        let outcome = match &req.scope {
            FollowScope::Profile { .. } => {
                toggle_with_rollback(
                    || {
                        store.read::<ProfilePage>(&path).and_then(|p| {
                            p.user
                                .filter(|u| u.user_id == user_id)
                                .map(|u| Toggle::new(p.is_following, u.followers_count))
                        })
                    },
                    |t| {
                        store.update(&path, |p: &mut ProfilePage| {
                            p.is_following = t.active;
                            if let Some(u) = p.user.as_mut() {
                                u.followers_count = t.count;
                            }
                        });
                    },
                    || self.api.follow(user_id),
                    || self.api.unfollow(user_id),
                )
                .await
            }
            FollowScope::List { .. } => {
                toggle_with_rollback(
                    || {
                        let list = store.read::<FollowList>(&path)?;
                        let row = list.row(user_id)?;
                        Some(Toggle::new(row.is_following, row.user.followers_count))
                    },
                    |t| {
                        store.update(&path, |l: &mut FollowList| {
                            if let Some(r) = l.row_mut(user_id) {
                                r.is_following = t.active;
                                r.user.followers_count = t.count;
                            }
                        });
                    },
                    || self.api.follow(user_id),
                    || self.api.unfollow(user_id),
                )
                .await
            }
        };

        match outcome {
            ToggleOutcome::Applied(t) => tracing::debug!(user_id, following = t.active, "follow toggled"),
            ToggleOutcome::RolledBack { error, .. } => {
                report(store, &error, "Could not update follow");
            }
            ToggleOutcome::Missing => tracing::debug!(%path, user_id, "user not shown"),
        }
    }
}
