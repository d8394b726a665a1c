//! Own profile: edit form, password change, avatar and account deletion.

use picfeed_client::{ChangePasswordRequest, ProfileUpdate};
use picfeed_flux::StateStore;

use super::{navigate, notify, report, session, PicfeedBff};
use crate::guard::LOGIN_PATH;
use crate::request::*;
use crate::state::*;
use crate::validate;

impl PicfeedBff {
    pub(super) async fn handle_settings_load(&self, _req: &SettingsLoadReq, store: &StateStore) {
        let form = match session(store).user {
            Some(user) => SettingsForm {
                name: user.name,
                username: user.username,
                bio: user.bio,
                ..SettingsForm::default()
            },
            None => SettingsForm {
                error: Some("Failed to load user profile".into()),
                ..SettingsForm::default()
            },
        };
        store.set(SettingsForm::PATH, form);
        store.set(PasswordForm::PATH, PasswordForm::default());
    }

    pub(super) async fn handle_settings_save(&self, req: &SettingsSaveReq, store: &StateStore) {
        let update = ProfileUpdate {
            name: req.name.trim().to_string(),
            username: req.username.trim().to_string(),
            bio: req.bio.trim().to_string(),
        };
        let checked = validate::required(&update.name, "Name")
            .and_then(|()| validate::required(&update.username, "Username"));
        if let Err(e) = checked {
            set_form(store, |f| f.error = Some(e.to_string()));
            return;
        }

        set_form(store, |f| {
            f.name = update.name.clone();
            f.username = update.username.clone();
            f.bio = update.bio.clone();
            f.saving = true;
            f.saved = false;
            f.error = None;
        });

        match self.api.update_profile(&update).await {
            Ok(()) => {
                tracing::info!(username = %update.username, "profile updated");
                set_form(store, |f| {
                    f.saving = false;
                    f.saved = true;
                });
                notify(store, NoticeLevel::Success, "Profile updated successfully!");
                self.refresh_user(store).await;
            }
            Err(e) => {
                let message = report(store, &e, "Failed to update profile");
                set_form(store, |f| {
                    f.saving = false;
                    f.error = Some(message);
                });
            }
        }
    }

    pub(super) async fn handle_change_password(&self, req: &ChangePasswordReq, store: &StateStore) {
        if let Err(e) = validate::password_change(&req.current_password, &req.new_password, &req.confirm_password) {
            store.set(
                PasswordForm::PATH,
                PasswordForm {
                    error: Some(e.to_string()),
                    ..PasswordForm::default()
                },
            );
            return;
        }
        store.set(
            PasswordForm::PATH,
            PasswordForm {
                busy: true,
                ..PasswordForm::default()
            },
        );

        let body = ChangePasswordRequest {
            current_password: req.current_password.clone(),
            new_password: req.new_password.clone(),
        };
        let form = match self.api.change_password(&body).await {
            Ok(()) => {
                tracing::info!("password changed");
                notify(store, NoticeLevel::Success, "Password changed successfully");
                PasswordForm {
                    done: true,
                    ..PasswordForm::default()
                }
            }
            Err(e) => PasswordForm {
                error: Some(report(store, &e, "Failed to change password")),
                ..PasswordForm::default()
            },
        };
        store.set(PasswordForm::PATH, form);
    }

    // ========================================================================
    // Avatar
    // ========================================================================

    pub(super) async fn handle_avatar_upload(&self, req: &AvatarUploadReq, store: &StateStore) {
        if let Err(e) = validate::avatar(&req.file) {
            notify(store, NoticeLevel::Error, e.to_string());
            set_form(store, |f| f.error = Some(e.to_string()));
            return;
        }

        set_form(store, |f| f.uploading_avatar = true);
        let result = self.api.upload_avatar(req.file.clone()).await;
        set_form(store, |f| f.uploading_avatar = false);

        match result {
            Ok(()) => {
                tracing::info!(file = %req.file.file_name, "avatar uploaded");
                self.avatar_changed(store).await;
                notify(store, NoticeLevel::Success, "Profile picture updated");
            }
            Err(e) => {
                report(store, &e, "Failed to upload profile picture");
            }
        }
    }

    pub(super) async fn handle_avatar_delete(&self, _req: &AvatarDeleteReq, store: &StateStore) {
        match self.api.delete_avatar().await {
            Ok(()) => {
                tracing::info!("avatar removed");
                self.avatar_changed(store).await;
                notify(store, NoticeLevel::Success, "Profile picture removed");
            }
            Err(e) => {
                report(store, &e, "Failed to remove profile picture");
            }
        }
    }

    /// New avatar bytes behind a possibly unchanged URL: refresh the user and
    /// bump the version used for cache-busting.
    async fn avatar_changed(&self, store: &StateStore) {
        self.refresh_user(store).await;
        store.update(SessionState::PATH, |s: &mut SessionState| s.avatar_version += 1);
    }

    // ========================================================================
    // Account
    // ========================================================================

    pub(super) async fn delete_account(&self, store: &StateStore) {
        match self.api.delete_account().await {
            Ok(()) => {
                tracing::info!(username = session(store).username().unwrap_or(""), "account deleted");
                self.clear_session(store);
                notify(store, NoticeLevel::Info, "Your account has been deleted");
                navigate(store, LOGIN_PATH);
            }
            Err(e) => {
                report(store, &e, "Failed to delete account");
            }
        }
    }
}

fn set_form(store: &StateStore, f: impl FnOnce(&mut SettingsForm)) {
    if store.update(SettingsForm::PATH, f).is_none() {
        tracing::debug!("settings form not loaded");
    }
}
