//! Own-profile and account requests.

use flux_derive::request;
use picfeed_client::Upload;

/// Fill the edit form from the session user.
#[request("settings/load")]
pub struct SettingsLoadReq;

#[request("settings/save")]
pub struct SettingsSaveReq {
    pub name: String,
    pub username: String,
    pub bio: String,
}

#[request("settings/change-password")]
pub struct ChangePasswordReq {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[request("avatar/upload")]
pub struct AvatarUploadReq {
    pub file: Upload,
}

#[request("avatar/delete")]
pub struct AvatarDeleteReq;
