//! Handler implementations and Flux wiring.
//!
//! Every request path is bound in [`PicfeedBff::register`]: the payload is
//! downcast to its request type and handed to a `handle_*` method together
//! with the store.

mod confirm;
mod otp;
mod posts;
mod profile;
mod search;
mod session;
mod settings;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use picfeed_client::{ApiError, ErrorClass, SocialApi, UserProfile};
use picfeed_flux::{Flux, Payload, StateStore};

use crate::config::ClientConfig;
use crate::guard::{self, GuardContext};
use crate::request::*;
use crate::state::*;

/// Binds `$req::PATH` to `bff.$method(&req, &store)`.
macro_rules! route {
    ($bff:expr, $flux:expr, $req:ty => $method:ident) => {{
        let bff = Arc::clone($bff);
        $flux.on(<$req>::PATH, move |path: String, payload: Payload, store: Arc<StateStore>| {
            let bff = Arc::clone(&bff);
            async move {
                match payload.downcast_ref::<$req>() {
                    Some(req) => bff.$method(req, &store).await,
                    None => tracing::warn!(%path, expected = stringify!($req), "payload type mismatch"),
                }
            }
        });
    }};
}

/// Backend context shared by every handler.
pub struct PicfeedBff {
    api: Arc<dyn SocialApi>,
    search_debounce: Duration,
    search_min_chars: usize,
    /// Bumped on every search input; a debounced query only fires if it is
    /// still the latest.
    search_generation: AtomicU64,
    booted: AtomicBool,
    /// Toggle keys with a request on the wire.
    in_flight: Mutex<HashSet<String>>,
}

impl PicfeedBff {
    pub fn new(api: Arc<dyn SocialApi>, config: &ClientConfig) -> Arc<Self> {
        Arc::new(Self {
            api,
            search_debounce: config.search_debounce(),
            search_min_chars: config.search_min_chars,
            search_generation: AtomicU64::new(0),
            booted: AtomicBool::new(false),
            in_flight: Mutex::new(HashSet::new()),
        })
    }

    /// Seed the always-present states and register every handler.
    pub fn register(self: &Arc<Self>, flux: &Flux) {
        let store = flux.store();
        seed(store, SessionState::PATH, SessionState::default);
        seed(store, AppRoute::PATH, AppRoute::default);
        seed(store, AuthForm::PATH, AuthForm::default);
        seed(store, Notices::PATH, Notices::default);
        seed(store, SearchState::PATH, SearchState::default);
        seed(store, ConfirmState::PATH, ConfirmState::default);
        seed(store, ResetFlow::PATH, ResetFlow::default);

        // Session and navigation
        route!(self, flux, SessionBootReq => handle_boot);
        route!(self, flux, SessionRefreshReq => handle_refresh);
        route!(self, flux, LoginReq => handle_login);
        route!(self, flux, RegisterReq => handle_register);
        route!(self, flux, LogoutReq => handle_logout);
        route!(self, flux, AuthTabReq => handle_auth_tab);
        route!(self, flux, NavigateReq => handle_navigate);
        route!(self, flux, NoticeDismissReq => handle_notice_dismiss);

        // Posts and comments
        route!(self, flux, PostsLoadReq => handle_posts_load);
        route!(self, flux, PostLikeReq => handle_like);
        route!(self, flux, PostSaveReq => handle_save);
        route!(self, flux, PostCreateReq => handle_post_create);
        route!(self, flux, CommentLoadReq => handle_comment_load);
        route!(self, flux, CommentAddReq => handle_comment_add);

        // Profiles and follows
        route!(self, flux, ProfileLoadReq => handle_profile_load);
        route!(self, flux, FollowsLoadReq => handle_follows_load);
        route!(self, flux, FollowToggleReq => handle_follow_toggle);

        // Search
        route!(self, flux, SearchInputReq => handle_search_input);
        route!(self, flux, SearchClearReq => handle_search_clear);
        route!(self, flux, SearchSelectReq => handle_search_select);

        // Verification and password reset
        route!(self, flux, OtpStartReq => handle_otp_start);
        route!(self, flux, OtpTypeReq => handle_otp_type);
        route!(self, flux, OtpBackspaceReq => handle_otp_backspace);
        route!(self, flux, OtpPasteReq => handle_otp_paste);
        route!(self, flux, OtpVerifyReq => handle_otp_verify);
        route!(self, flux, OtpResendReq => handle_otp_resend);
        route!(self, flux, ResetStartReq => handle_reset_start);
        route!(self, flux, ResetSendEmailReq => handle_reset_send_email);
        route!(self, flux, ResetVerifyOtpReq => handle_reset_verify_otp);
        route!(self, flux, ResetSubmitReq => handle_reset_submit);
        route!(self, flux, ResetResendReq => handle_reset_resend);

        // Settings
        route!(self, flux, SettingsLoadReq => handle_settings_load);
        route!(self, flux, SettingsSaveReq => handle_settings_save);
        route!(self, flux, ChangePasswordReq => handle_change_password);
        route!(self, flux, AvatarUploadReq => handle_avatar_upload);
        route!(self, flux, AvatarDeleteReq => handle_avatar_delete);

        // Confirmations
        route!(self, flux, ConfirmOpenReq => handle_confirm_open);
        route!(self, flux, ConfirmAcceptReq => handle_confirm_accept);
        route!(self, flux, ConfirmCancelReq => handle_confirm_cancel);

        tracing::debug!("picfeed handlers registered");
    }

    /// Claim `key` for one in-flight request. `None` while it is taken.
    fn begin(&self, key: String) -> Option<InFlight<'_>> {
        let mut keys = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            tracing::debug!(%key, "request already in flight");
            return None;
        }
        Some(InFlight {
            keys: &self.in_flight,
            key,
        })
    }

    /// Re-fetch the current user into the session. Failures leave the
    /// session untouched.
    async fn refresh_user(&self, store: &StateStore) -> Option<UserProfile> {
        match self.api.whoami().await {
            Ok(user) => {
                store.update(SessionState::PATH, |s: &mut SessionState| s.user = Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                report(store, &e, "Unable to fetch user data");
                None
            }
        }
    }
}

struct InFlight<'a> {
    keys: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

// ============================================================================
// Store helpers
// ============================================================================

fn seed<T: std::any::Any + Send + Sync>(store: &StateStore, path: &str, init: fn() -> T) {
    if !store.contains(path) {
        store.set(path, init());
    }
}

fn session(store: &StateStore) -> SessionState {
    store.read(SessionState::PATH).unwrap_or_default()
}

fn guard_context(store: &StateStore) -> GuardContext {
    let session = session(store);
    GuardContext {
        auth_ready: session.auth_ready,
        logged_in: session.is_logged_in(),
        reset_started: store
            .read::<ResetFlow>(ResetFlow::PATH)
            .is_some_and(|r| r.started),
        public_verify: store
            .read::<OtpState>(OtpState::PATH)
            .is_some_and(|o| o.email.is_some()),
    }
}

/// Resolve `path` through the guards and publish the result.
fn navigate(store: &StateStore, path: &str) -> AppRoute {
    let route = guard::resolve(path, guard_context(store));
    tracing::debug!(requested = path, path = %route.path, view = ?route.view, "navigate");
    store.set(AppRoute::PATH, route.clone());
    route
}

/// Re-run the guards for the current route after the session changed.
fn reroute(store: &StateStore) {
    let current = store.read::<AppRoute>(AppRoute::PATH).unwrap_or_default();
    let route = guard::resolve(&current.path, guard_context(store));
    // Staying on the same page keeps the page it was redirected from.
    let from = if route.path == current.path {
        route.from.clone().or(current.from)
    } else {
        route.from.clone()
    };
    store.set(AppRoute::PATH, AppRoute { from, ..route });
}

fn notify(store: &StateStore, level: NoticeLevel, message: impl Into<String>) {
    let message = message.into();
    let pushed = store
        .update(Notices::PATH, |n: &mut Notices| {
            n.push(level, message.clone());
        })
        .is_some();
    if !pushed {
        let mut notices = Notices::default();
        notices.push(level, message);
        store.set(Notices::PATH, notices);
    }
}

/// Surface a failed call. Auth-denied stays silent; business errors show
/// the backend's message, anything else `fallback`.
fn report(store: &StateStore, error: &ApiError, fallback: &str) -> String {
    let message = error.user_message(fallback);
    match error.class() {
        ErrorClass::AuthDenied => tracing::debug!(%error, "request denied"),
        ErrorClass::Business => {
            tracing::debug!(%error, "request refused");
            notify(store, NoticeLevel::Error, message.clone());
        }
        ErrorClass::Unexpected => {
            tracing::warn!(%error, "request failed");
            notify(store, NoticeLevel::Error, message.clone());
        }
    }
    message
}
