mod common;

use common::*;
use picfeed_bff::request::*;
use picfeed_bff::state::*;
use picfeed_client::{Upload, UserProfile};
use picfeed_flux::Flux;

fn ana() -> UserProfile {
    UserProfile {
        bio: "hi".into(),
        ..user(1, "ana")
    }
}

async fn loaded(api: &std::sync::Arc<FakeApi>) -> Flux {
    let flux = signed_in(api, &ana()).await;
    flux.emit(SettingsLoadReq::PATH, SettingsLoadReq).await;
    flux
}

fn form(flux: &Flux) -> SettingsForm {
    flux.read(SettingsForm::PATH).unwrap()
}

fn session(flux: &Flux) -> SessionState {
    flux.read(SessionState::PATH).unwrap()
}

fn last_notice(flux: &Flux) -> String {
    flux.read::<Notices>(Notices::PATH)
        .unwrap()
        .last()
        .map(|n| n.message.clone())
        .unwrap_or_default()
}

fn upload(content_type: &str, len: usize) -> Upload {
    Upload {
        file_name: "me.png".into(),
        content_type: content_type.into(),
        bytes: vec![0; len],
    }
}

// ========================================================================
// Profile form
// ========================================================================

#[tokio::test]
async fn load_fills_from_the_session() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;

    let f = form(&flux);
    assert_eq!(f.username, "ana");
    assert_eq!(f.name, "ANA");
    assert_eq!(f.bio, "hi");
}

#[tokio::test]
async fn save_updates_and_refreshes_the_session() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;

    let req = SettingsSaveReq {
        name: "Ana Lima".into(),
        username: "analima".into(),
        bio: " photos ".into(),
    };
    flux.emit(SettingsSaveReq::PATH, req).await;

    let f = form(&flux);
    assert!(f.saved);
    assert!(!f.saving);
    assert_eq!(last_notice(&flux), "Profile updated successfully!");
    let me = session(&flux).user.unwrap();
    assert_eq!(me.username, "analima");
    assert_eq!(me.bio, "photos");
    assert_eq!(api.count("whoami"), 2);
}

#[tokio::test]
async fn save_failure_uses_the_fallback() {
    let api = FakeApi::new(Backend::default());
    api.fail("update_profile", Fail::Server);
    let flux = loaded(&api).await;

    let req = SettingsSaveReq {
        name: "Ana".into(),
        username: "ana".into(),
        bio: String::new(),
    };
    flux.emit(SettingsSaveReq::PATH, req).await;

    assert_eq!(form(&flux).error.as_deref(), Some("Failed to update profile"));
    assert!(!form(&flux).saved);
}

#[tokio::test]
async fn blank_username_is_rejected() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;

    let req = SettingsSaveReq {
        name: "Ana".into(),
        username: "  ".into(),
        bio: String::new(),
    };
    flux.emit(SettingsSaveReq::PATH, req).await;

    assert_eq!(form(&flux).error.as_deref(), Some("Username is required"));
    assert_eq!(api.count("update_profile"), 0);
}

// ========================================================================
// Password
// ========================================================================

#[tokio::test]
async fn password_change_checks_locally_first() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;

    let req = ChangePasswordReq {
        current_password: "old".into(),
        new_password: "new".into(),
        confirm_password: "typo".into(),
    };
    flux.emit(ChangePasswordReq::PATH, req).await;

    let pw: PasswordForm = flux.read(PasswordForm::PATH).unwrap();
    assert_eq!(pw.error.as_deref(), Some("New passwords do not match"));
    assert_eq!(api.count("change_password"), 0);

    let req = ChangePasswordReq {
        current_password: "old".into(),
        new_password: "new".into(),
        confirm_password: "new".into(),
    };
    flux.emit(ChangePasswordReq::PATH, req).await;

    let pw: PasswordForm = flux.read(PasswordForm::PATH).unwrap();
    assert!(pw.done);
    assert!(pw.error.is_none());
    assert_eq!(api.count("change_password:new"), 1);
}

#[tokio::test]
async fn wrong_current_password_shows_backend_message() {
    let api = FakeApi::new(Backend::default());
    api.fail("change_password", Fail::Business("Current password is incorrect".into()));
    let flux = loaded(&api).await;

    let req = ChangePasswordReq {
        current_password: "old".into(),
        new_password: "new".into(),
        confirm_password: "new".into(),
    };
    flux.emit(ChangePasswordReq::PATH, req).await;

    let pw: PasswordForm = flux.read(PasswordForm::PATH).unwrap();
    assert!(!pw.done);
    assert_eq!(pw.error.as_deref(), Some("Current password is incorrect"));
}

// ========================================================================
// Avatar
// ========================================================================

#[tokio::test]
async fn avatar_upload_bumps_the_version() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;
    assert_eq!(session(&flux).avatar_version, 0);

    flux.emit(AvatarUploadReq::PATH, AvatarUploadReq { file: upload("image/png", 1024) }).await;

    let s = session(&flux);
    assert_eq!(s.avatar_version, 1);
    assert_eq!(s.user.unwrap().profile_image_url.as_deref(), Some("/uploads/me.png"));
    assert!(!form(&flux).uploading_avatar);

    flux.emit(AvatarDeleteReq::PATH, AvatarDeleteReq).await;
    let s = session(&flux);
    assert_eq!(s.avatar_version, 2);
    assert!(s.user.unwrap().profile_image_url.is_none());
}

#[tokio::test]
async fn avatar_type_and_size_are_checked_locally() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;

    flux.emit(AvatarUploadReq::PATH, AvatarUploadReq { file: upload("image/gif", 10) }).await;
    assert_eq!(last_notice(&flux), "Only JPEG, PNG and WebP images are allowed");

    let too_big = upload("image/jpeg", 5 * 1024 * 1024 + 1);
    flux.emit(AvatarUploadReq::PATH, AvatarUploadReq { file: too_big }).await;
    assert_eq!(last_notice(&flux), "Image must be 5 MB or smaller");

    assert_eq!(api.count("upload_avatar"), 0);
    assert_eq!(session(&flux).avatar_version, 0);
}

// ========================================================================
// Account
// ========================================================================

#[tokio::test]
async fn account_deletion_needs_confirmation_then_logs_out() {
    let api = FakeApi::new(Backend::default());
    let flux = loaded(&api).await;

    flux.emit(
        ConfirmOpenReq::PATH,
        ConfirmOpenReq {
            action: PendingAction::DeleteAccount,
        },
    )
    .await;
    assert_eq!(api.count("delete_account"), 0);

    flux.emit(ConfirmAcceptReq::PATH, ConfirmAcceptReq).await;

    assert_eq!(api.count("delete_account"), 1);
    assert!(session(&flux).user.is_none());
    assert!(!flux.contains(SettingsForm::PATH));
    let route: AppRoute = flux.read(AppRoute::PATH).unwrap();
    assert_eq!(route.path, "/login");
}
