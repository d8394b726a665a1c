//! Authentication requests.

use flux_derive::request;

use crate::state::AuthTab;

#[request("auth/login")]
pub struct LoginReq {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[request("auth/register")]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
    pub accepted_terms: bool,
}

#[request("auth/logout")]
pub struct LogoutReq;

/// Switch the login page between its login and signup tabs.
#[request("auth/tab")]
pub struct AuthTabReq {
    pub tab: AuthTab,
}
