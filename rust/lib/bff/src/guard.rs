//! Route guards and the route table.
//!
//! Everything here is pure: the navigation handler feeds in the session
//! facts and writes whatever [`resolve`] returns to `app/route`.

use crate::state::{AppRoute, View};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not resolved: render nothing yet.
    Pending,
    Render,
    Redirect { to: String, from: Option<String> },
}

/// Pages that need a signed-in user.
pub fn guard_private(auth_ready: bool, logged_in: bool, requested: &str) -> GuardDecision {
    if !auth_ready {
        GuardDecision::Pending
    } else if logged_in {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect {
            to: LOGIN_PATH.into(),
            from: Some(requested.to_string()),
        }
    }
}

/// Pages only for visitors (login, register, reset).
pub fn guard_public_only(auth_ready: bool, logged_in: bool) -> GuardDecision {
    if !auth_ready {
        GuardDecision::Pending
    } else if logged_in {
        GuardDecision::Redirect {
            to: HOME_PATH.into(),
            from: None,
        }
    } else {
        GuardDecision::Render
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Private,
    PublicOnly,
}

/// Look a path up in the route table. `None` for unknown paths.
pub fn classify(path: &str) -> Option<(Access, View)> {
    use Access::*;

    let fixed = match path {
        "/login" => Some((PublicOnly, View::Login)),
        "/register" => Some((PublicOnly, View::Register)),
        "/reset-password" => Some((PublicOnly, View::ResetPassword)),
        "/" => Some((Private, View::Feed)),
        "/welcome" => Some((Private, View::Welcome)),
        "/profile" => Some((Private, View::OwnProfile)),
        "/settings" => Some((Private, View::Settings)),
        "/saved" => Some((Private, View::Saved)),
        "/liked" => Some((Private, View::Liked)),
        "/create" => Some((Private, View::CreatePost)),
        "/verify" => Some((Private, View::Verify)),
        _ => None,
    };
    if fixed.is_some() {
        return fixed;
    }

    let rest = path.strip_prefix("/user/")?;
    let mut levels = rest.split('/');
    let username = levels.next().filter(|u| !u.is_empty())?.to_string();
    let view = match (levels.next(), levels.next()) {
        (None, _) => View::UserProfile { username },
        (Some("followers"), None) => View::Followers { username },
        (Some("following"), None) => View::Following { username },
        _ => return None,
    };
    Some((Private, view))
}

/// Session facts the guards look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardContext {
    pub auth_ready: bool,
    pub logged_in: bool,
    /// The password-reset flow was entered from the login page.
    pub reset_started: bool,
    /// An email-carrying verification was started (right after signup).
    pub public_verify: bool,
}

/// Decide what `requested` shows, following redirects.
pub fn resolve(requested: &str, ctx: GuardContext) -> AppRoute {
    resolve_hop(&normalize(requested), ctx, 0)
}

fn resolve_hop(path: &str, ctx: GuardContext, hops: usize) -> AppRoute {
    // Every redirect lands on `/` or `/login`, which resolve in one more hop.
    if hops > 3 {
        return AppRoute {
            path: path.to_string(),
            view: View::Blank,
            from: None,
        };
    }

    let Some((access, view)) = classify(path) else {
        return resolve_hop(HOME_PATH, ctx, hops + 1);
    };

    let decision = match access {
        Access::Private if view == View::Verify && ctx.public_verify && ctx.auth_ready => {
            GuardDecision::Render
        }
        Access::Private => guard_private(ctx.auth_ready, ctx.logged_in, path),
        Access::PublicOnly => guard_public_only(ctx.auth_ready, ctx.logged_in),
    };

    match decision {
        GuardDecision::Pending => AppRoute {
            path: path.to_string(),
            view: View::Blank,
            from: None,
        },
        GuardDecision::Render if view == View::ResetPassword && !ctx.reset_started => {
            resolve_hop(LOGIN_PATH, ctx, hops + 1)
        }
        GuardDecision::Render => AppRoute {
            path: path.to_string(),
            view,
            from: None,
        },
        GuardDecision::Redirect { to, from } => {
            let mut route = resolve_hop(&to, ctx, hops + 1);
            route.from = from;
            route
        }
    }
}

/// Drop any query or fragment and a trailing slash.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
