//! Email verification and password reset.

use picfeed_client::ResetPasswordRequest;
use picfeed_flux::StateStore;

use super::{navigate, notify, report, PicfeedBff};
use crate::guard::{HOME_PATH, LOGIN_PATH};
use crate::otp::OtpBoxes;
use crate::request::*;
use crate::state::*;
use crate::validate;

impl PicfeedBff {
    // ========================================================================
    // Box editing (shared by both flows)
    // ========================================================================

    pub(super) async fn handle_otp_type(&self, req: &OtpTypeReq, store: &StateStore) {
        edit_boxes(store, req.target, |b| match b.type_char(req.index, req.ch) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "otp input refused");
                false
            }
        });
    }

    pub(super) async fn handle_otp_backspace(&self, req: &OtpBackspaceReq, store: &StateStore) {
        edit_boxes(store, req.target, |b| b.backspace(req.index).is_ok());
    }

    pub(super) async fn handle_otp_paste(&self, req: &OtpPasteReq, store: &StateStore) {
        edit_boxes(store, req.target, |b| b.paste(&req.text));
    }

    // ========================================================================
    // Verification
    // ========================================================================

    pub(super) async fn handle_otp_start(&self, req: &OtpStartReq, store: &StateStore) {
        let email = req
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        store.set(
            OtpState::PATH,
            OtpState {
                email,
                ..OtpState::default()
            },
        );
    }

    pub(super) async fn handle_otp_verify(&self, _req: &OtpVerifyReq, store: &StateStore) {
        let Some(state) = store.read::<OtpState>(OtpState::PATH) else {
            tracing::debug!("otp verify without a started flow");
            return;
        };
        if state.busy {
            tracing::debug!("otp verify already in flight");
            return;
        }
        let code = match state.boxes.code() {
            Ok(code) => code,
            Err(e) => {
                store.update(OtpState::PATH, |s: &mut OtpState| s.error = Some(e.to_string()));
                return;
            }
        };

        store.update(OtpState::PATH, |s: &mut OtpState| {
            s.busy = true;
            s.error = None;
        });
        let result = match state.email.as_deref() {
            Some(email) => self.api.verify_otp_public(email, &code).await,
            None => self.api.verify_otp(&code).await,
        };

        match result {
            Ok(()) => {
                tracing::info!("email verified");
                store.update(OtpState::PATH, |s: &mut OtpState| {
                    s.busy = false;
                    s.verified = true;
                });
                notify(store, NoticeLevel::Success, "Verification successful");
                if self.refresh_user(store).await.is_some() {
                    store.update(SessionState::PATH, |s: &mut SessionState| s.auth_ready = true);
                }
                navigate(store, HOME_PATH);
            }
            Err(e) => {
                let message = e.user_message("Invalid or expired code");
                tracing::debug!(error = %e, "otp rejected");
                notify(store, NoticeLevel::Error, message.clone());
                store.update(OtpState::PATH, |s: &mut OtpState| {
                    s.busy = false;
                    s.error = Some(message);
                });
            }
        }
    }

    pub(super) async fn handle_otp_resend(&self, _req: &OtpResendReq, store: &StateStore) {
        let email = store.read::<OtpState>(OtpState::PATH).and_then(|s| s.email);
        let result = match email.as_deref() {
            Some(email) => self.api.send_otp_public(email).await,
            None => self.api.send_otp().await,
        };
        match result {
            Ok(()) => {
                store.update(OtpState::PATH, |s: &mut OtpState| {
                    s.boxes.clear();
                    s.error = None;
                });
                notify(store, NoticeLevel::Info, "A new code has been sent");
            }
            Err(e) => {
                report(store, &e, "Unable to resend code");
            }
        }
    }

    // ========================================================================
    // Password reset
    // ========================================================================

    pub(super) async fn handle_reset_start(&self, _req: &ResetStartReq, store: &StateStore) {
        store.set(
            ResetFlow::PATH,
            ResetFlow {
                started: true,
                ..ResetFlow::default()
            },
        );
        navigate(store, "/reset-password");
    }

    pub(super) async fn handle_reset_send_email(&self, req: &ResetSendEmailReq, store: &StateStore) {
        let email = req.email.trim().to_string();
        if let Err(e) = validate::required(&email, "Email") {
            set_reset(store, |r| r.error = Some(e.to_string()));
            return;
        }
        set_reset(store, |r| {
            r.busy = true;
            r.error = None;
        });

        match self.api.send_reset_otp(&email).await {
            Ok(()) => {
                tracing::info!(%email, "reset code sent");
                notify(store, NoticeLevel::Success, "Email sent successfully!");
                set_reset(store, |r| {
                    r.busy = false;
                    r.step = ResetStep::EnterOtp;
                    r.email = email;
                    r.boxes = OtpBoxes::new();
                });
            }
            Err(e) => {
                let message = reset_failure(store, &e);
                set_reset(store, |r| {
                    r.busy = false;
                    r.error = Some(message);
                });
            }
        }
    }

    pub(super) async fn handle_reset_verify_otp(&self, _req: &ResetVerifyOtpReq, store: &StateStore) {
        set_reset(store, |r| {
            if r.step != ResetStep::EnterOtp {
                tracing::debug!(step = ?r.step, "reset code check out of order");
                return;
            }
            match r.boxes.code() {
                Ok(_) => {
                    r.step = ResetStep::NewPassword;
                    r.error = None;
                }
                Err(e) => r.error = Some(e.to_string()),
            }
        });
    }

    pub(super) async fn handle_reset_submit(&self, req: &ResetSubmitReq, store: &StateStore) {
        let Some(flow) = store.read::<ResetFlow>(ResetFlow::PATH) else {
            return;
        };
        if flow.step != ResetStep::NewPassword {
            tracing::debug!(step = ?flow.step, "reset submit out of order");
            return;
        }
        if let Err(e) = validate::required(&req.new_password, "New password") {
            set_reset(store, |r| r.error = Some(e.to_string()));
            return;
        }
        let otp = match flow.boxes.code() {
            Ok(code) => code,
            Err(e) => {
                set_reset(store, |r| {
                    r.step = ResetStep::EnterOtp;
                    r.error = Some(e.to_string());
                });
                return;
            }
        };

        set_reset(store, |r| {
            r.busy = true;
            r.error = None;
        });
        let body = ResetPasswordRequest {
            email: flow.email.clone(),
            otp,
            new_password: req.new_password.clone(),
        };
        match self.api.reset_password(&body).await {
            Ok(()) => {
                tracing::info!(email = %flow.email, "password reset");
                notify(store, NoticeLevel::Success, "Password reset successful!");
                store.set(
                    ResetFlow::PATH,
                    ResetFlow {
                        step: ResetStep::Done,
                        ..ResetFlow::default()
                    },
                );
                navigate(store, LOGIN_PATH);
            }
            Err(e) => {
                let message = reset_failure(store, &e);
                set_reset(store, |r| {
                    r.busy = false;
                    r.error = Some(message);
                });
            }
        }
    }

    pub(super) async fn handle_reset_resend(&self, _req: &ResetResendReq, store: &StateStore) {
        let Some(flow) = store.read::<ResetFlow>(ResetFlow::PATH) else {
            return;
        };
        if flow.email.is_empty() {
            tracing::debug!("reset resend before an email was sent");
            return;
        }
        match self.api.send_reset_otp(&flow.email).await {
            Ok(()) => {
                set_reset(store, |r| {
                    r.boxes.clear();
                    r.step = ResetStep::EnterOtp;
                    r.error = None;
                });
                notify(store, NoticeLevel::Info, "A new code has been sent");
            }
            Err(e) => {
                reset_failure(store, &e);
            }
        }
    }
}

/// Apply `edit` to the boxes of `target`. Writes (and notifies) only when
/// `edit` reports a change.
fn edit_boxes(store: &StateStore, target: OtpTarget, edit: impl FnOnce(&mut OtpBoxes) -> bool) {
    match target {
        OtpTarget::Verify => {
            let Some(mut state) = store.read::<OtpState>(OtpState::PATH) else {
                return;
            };
            if edit(&mut state.boxes) {
                state.error = None;
                store.set(OtpState::PATH, state);
            }
        }
        OtpTarget::Reset => {
            let Some(mut flow) = store.read::<ResetFlow>(ResetFlow::PATH) else {
                return;
            };
            if edit(&mut flow.boxes) {
                flow.error = None;
                store.set(ResetFlow::PATH, flow);
            }
        }
    }
}

fn set_reset(store: &StateStore, f: impl FnOnce(&mut ResetFlow)) {
    if store.update(ResetFlow::PATH, f).is_none() {
        tracing::debug!("reset flow not seeded");
    }
}

/// Reset errors always surface; auth-denied included, since nobody is
/// signed in during a reset.
fn reset_failure(store: &StateStore, error: &picfeed_client::ApiError) -> String {
    let message = error.user_message("Something went wrong, please try again");
    tracing::debug!(%error, "reset step failed");
    notify(store, NoticeLevel::Error, message.clone());
    message
}
