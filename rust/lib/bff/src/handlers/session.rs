//! Session, authentication and navigation handlers.

use std::sync::atomic::Ordering;

use picfeed_client::{LoginRequest, RegisterRequest};
use picfeed_flux::StateStore;

use super::{navigate, notify, report, reroute, session, PicfeedBff};
use crate::guard::{HOME_PATH, LOGIN_PATH};
use crate::request::*;
use crate::state::*;
use crate::validate;

/// Per-view states dropped on logout.
const VIEW_PATHS: [&str; 8] = [
    "feed/posts",
    "saved/posts",
    "liked/posts",
    ComposeState::PATH,
    SettingsForm::PATH,
    PasswordForm::PATH,
    OtpState::PATH,
    ConfirmState::PATH,
];

/// Per-view state trees dropped on logout.
const VIEW_PREFIXES: [&str; 2] = ["profile", "follows"];

impl PicfeedBff {
    pub(super) async fn handle_boot(&self, _req: &SessionBootReq, store: &StateStore) {
        if self.booted.swap(true, Ordering::SeqCst) {
            tracing::debug!("session already booted");
            return;
        }

        let user = match self.api.whoami().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "session restored");
                Some(user)
            }
            Err(e) => {
                report(store, &e, "Unable to fetch user data");
                None
            }
        };
        store.update(SessionState::PATH, |s: &mut SessionState| {
            s.user = user;
            s.auth_ready = true;
        });

        reroute(store);
    }

    pub(super) async fn handle_refresh(&self, _req: &SessionRefreshReq, store: &StateStore) {
        self.refresh_user(store).await;
    }

    pub(super) async fn handle_login(&self, req: &LoginReq, store: &StateStore) {
        set_form(store, |f| {
            f.busy = true;
            f.error = None;
        });

        let login = LoginRequest::new(req.email.trim(), req.password.clone(), req.remember_me);
        if let Err(e) = self.api.login(&login).await {
            let message = e.user_message("Wrong email or password");
            tracing::debug!(error = %e, "login refused");
            notify(store, NoticeLevel::Error, message.clone());
            set_form(store, |f| {
                f.busy = false;
                f.error = Some(message);
            });
            return;
        }

        let user = match self.api.whoami().await {
            Ok(user) => user,
            Err(e) => {
                let message = report(store, &e, "Unable to fetch user data");
                set_form(store, |f| {
                    f.busy = false;
                    f.error = Some(message);
                });
                return;
            }
        };

        tracing::info!(username = %user.username, "logged in");
        store.update(SessionState::PATH, |s: &mut SessionState| {
            s.user = Some(user);
            s.auth_ready = true;
        });
        store.set(AuthForm::PATH, AuthForm::default());

        let from = store
            .read::<AppRoute>(AppRoute::PATH)
            .and_then(|r| r.from)
            .unwrap_or_else(|| HOME_PATH.to_string());
        navigate(store, &from);
    }

    pub(super) async fn handle_register(&self, req: &RegisterReq, store: &StateStore) {
        if let Err(e) = validate::registration(&req.name, &req.email, &req.password, req.accepted_terms) {
            set_form(store, |f| f.error = Some(e.to_string()));
            return;
        }
        set_form(store, |f| {
            f.busy = true;
            f.error = None;
        });

        let body = RegisterRequest {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            password: req.password.clone(),
        };
        match self.api.register(&body).await {
            Ok(()) => {
                tracing::info!(email = %body.email, "registered");
                notify(store, NoticeLevel::Success, "User registered successfully.");
                store.set(
                    AuthForm::PATH,
                    AuthForm {
                        tab: AuthTab::Login,
                        ..AuthForm::default()
                    },
                );
            }
            Err(e) => {
                let message = report(store, &e, "Something went wrong, please try again");
                set_form(store, |f| {
                    f.busy = false;
                    f.error = Some(message);
                });
            }
        }
    }

    pub(super) async fn handle_logout(&self, _req: &LogoutReq, store: &StateStore) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!(error = %e, "logout failed");
            notify(store, NoticeLevel::Error, e.user_message("Logout failed"));
            return;
        }
        tracing::info!(username = session(store).username().unwrap_or(""), "logged out");
        self.clear_session(store);
        navigate(store, LOGIN_PATH);
    }

    pub(super) async fn handle_auth_tab(&self, req: &AuthTabReq, store: &StateStore) {
        store.set(
            AuthForm::PATH,
            AuthForm {
                tab: req.tab,
                ..AuthForm::default()
            },
        );
    }

    pub(super) async fn handle_navigate(&self, req: &NavigateReq, store: &StateStore) {
        navigate(store, &req.path);
    }

    pub(super) async fn handle_notice_dismiss(&self, req: &NoticeDismissReq, store: &StateStore) {
        let removed = store
            .update(Notices::PATH, |n: &mut Notices| n.dismiss(req.id))
            .unwrap_or(false);
        if !removed {
            tracing::debug!(id = req.id, "no such notice");
        }
    }

    /// Signed out locally: the user goes, `auth_ready` stays, every
    /// per-view state is dropped and pending searches are abandoned.
    pub(super) fn clear_session(&self, store: &StateStore) {
        self.search_generation.fetch_add(1, Ordering::SeqCst);

        store.update(SessionState::PATH, |s: &mut SessionState| s.user = None);
        for path in VIEW_PATHS {
            store.remove(path);
        }
        for prefix in VIEW_PREFIXES {
            for (path, _) in store.scan(prefix) {
                store.remove(&path);
            }
        }
        store.set(SearchState::PATH, SearchState::default());
        store.set(ConfirmState::PATH, ConfirmState::default());
        store.set(ResetFlow::PATH, ResetFlow::default());
        store.set(AuthForm::PATH, AuthForm::default());
    }
}

fn set_form(store: &StateStore, f: impl FnOnce(&mut AuthForm)) {
    if store.update(AuthForm::PATH, f).is_none() {
        tracing::debug!("auth form not seeded");
    }
}
