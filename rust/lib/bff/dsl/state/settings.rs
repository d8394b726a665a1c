//! Settings page states.

use flux_derive::state;
use serde::Serialize;

/// Profile edit form — stored at `settings/form`.
#[state("settings/form")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub saving: bool,
    pub saved: bool,
    pub uploading_avatar: bool,
    pub error: Option<String>,
}

/// Change-password form — stored at `settings/password`.
#[state("settings/password")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    pub busy: bool,
    pub done: bool,
    pub error: Option<String>,
}
