mod common;

use common::*;
use picfeed_bff::request::*;
use picfeed_bff::state::*;
use picfeed_flux::Flux;

fn otp(flux: &Flux) -> OtpState {
    flux.read(OtpState::PATH).unwrap()
}

fn reset(flux: &Flux) -> ResetFlow {
    flux.read(ResetFlow::PATH).unwrap()
}

fn shown(digits: &[Option<char>]) -> String {
    digits.iter().map(|d| d.unwrap_or('_')).collect()
}

async fn paste(flux: &Flux, target: OtpTarget, text: &str) {
    flux.emit(
        OtpPasteReq::PATH,
        OtpPasteReq {
            target,
            text: text.into(),
        },
    )
    .await;
}

// ========================================================================
// Box editing
// ========================================================================

#[tokio::test]
async fn paste_fills_every_box_and_focuses_the_last() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;

    paste(&flux, OtpTarget::Verify, "123456").await;

    let s = otp(&flux);
    assert_eq!(shown(&s.boxes.digits), "123456");
    assert_eq!(s.boxes.focus, 5);
}

#[tokio::test]
async fn typing_and_backspace_move_focus() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;

    for (index, ch) in [(0, '7'), (1, 'x'), (1, '3')] {
        flux.emit(OtpTypeReq::PATH, OtpTypeReq { target: OtpTarget::Verify, index, ch }).await;
    }
    assert_eq!(shown(&otp(&flux).boxes.digits), "73____");
    assert_eq!(otp(&flux).boxes.focus, 2);

    flux.emit(
        OtpBackspaceReq::PATH,
        OtpBackspaceReq {
            target: OtpTarget::Verify,
            index: 2,
        },
    )
    .await;
    assert_eq!(otp(&flux).boxes.focus, 1);
    assert_eq!(shown(&otp(&flux).boxes.digits), "73____");
}

// ========================================================================
// Verification
// ========================================================================

#[tokio::test]
async fn incomplete_code_sends_nothing() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;
    paste(&flux, OtpTarget::Verify, "123").await;

    flux.emit(OtpVerifyReq::PATH, OtpVerifyReq).await;

    assert_eq!(otp(&flux).error.as_deref(), Some("Please enter the complete 6-digit code"));
    assert_eq!(api.count("verify"), 0);
}

#[tokio::test]
async fn signed_in_verification() {
    let ana = user(1, "ana");
    let api = FakeApi::new(Backend::default());
    let flux = signed_in(&api, &ana).await;
    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;
    paste(&flux, OtpTarget::Verify, "654321").await;

    flux.emit(OtpVerifyReq::PATH, OtpVerifyReq).await;

    assert!(api.calls().contains(&"verify_otp:654321".to_string()));
    assert!(otp(&flux).verified);
    let route: AppRoute = flux.read(AppRoute::PATH).unwrap();
    assert_eq!(route.path, "/");
}

#[tokio::test]
async fn public_verification_signs_in() {
    let ana = user(1, "ana");
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(SessionBootReq::PATH, SessionBootReq).await;
    flux.emit(
        OtpStartReq::PATH,
        OtpStartReq {
            email: Some(" ana@example.com ".into()),
        },
    )
    .await;
    paste(&flux, OtpTarget::Verify, "111222").await;

    // The backend signs the session in on a successful check.
    api.with(|b| b.me = Some(ana.clone()));
    flux.emit(OtpVerifyReq::PATH, OtpVerifyReq).await;

    assert!(api.calls().contains(&"verify_otp_public:ana@example.com:111222".to_string()));
    let session: SessionState = flux.read(SessionState::PATH).unwrap();
    assert_eq!(session.user_id(), Some(1));
    let route: AppRoute = flux.read(AppRoute::PATH).unwrap();
    assert_eq!(route.view, View::Feed);
}

#[tokio::test]
async fn verify_page_opens_for_signed_out_email_flow() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(SessionBootReq::PATH, SessionBootReq).await;

    flux.emit(NavigateReq::PATH, NavigateReq::to("/verify")).await;
    let route: AppRoute = flux.read(AppRoute::PATH).unwrap();
    assert_eq!(route.view, View::Login);

    flux.emit(
        OtpStartReq::PATH,
        OtpStartReq {
            email: Some("ana@example.com".into()),
        },
    )
    .await;
    flux.emit(NavigateReq::PATH, NavigateReq::to("/verify")).await;

    let route: AppRoute = flux.read(AppRoute::PATH).unwrap();
    assert_eq!(route.path, "/verify");
    assert_eq!(route.view, View::Verify);
}

#[tokio::test]
async fn second_submit_while_checking_is_ignored() {
    let api = FakeApi::new(Backend::default());
    let flux = signed_in(&api, &user(1, "ana")).await;
    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;
    paste(&flux, OtpTarget::Verify, "123456").await;
    let mut checking = otp(&flux);
    checking.busy = true;
    flux.store().set(OtpState::PATH, checking);

    flux.emit(OtpVerifyReq::PATH, OtpVerifyReq).await;

    assert_eq!(api.count("verify_otp"), 0);
    assert!(otp(&flux).busy);
    assert!(!otp(&flux).verified);
}

#[tokio::test]
async fn rejected_code_keeps_the_boxes() {
    let api = FakeApi::new(Backend::default());
    api.fail("verify_otp", Fail::Business("Invalid or expired code".into()));
    let flux = signed_in(&api, &user(1, "ana")).await;
    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;
    paste(&flux, OtpTarget::Verify, "000000").await;

    flux.emit(OtpVerifyReq::PATH, OtpVerifyReq).await;

    let s = otp(&flux);
    assert!(!s.busy);
    assert!(!s.verified);
    assert_eq!(s.error.as_deref(), Some("Invalid or expired code"));
    assert!(s.boxes.is_complete());
}

#[tokio::test]
async fn resend_uses_the_matching_variant() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);

    flux.emit(OtpStartReq::PATH, OtpStartReq { email: None }).await;
    flux.emit(OtpResendReq::PATH, OtpResendReq).await;
    flux.emit(
        OtpStartReq::PATH,
        OtpStartReq {
            email: Some("bo@example.com".into()),
        },
    )
    .await;
    flux.emit(OtpResendReq::PATH, OtpResendReq).await;

    assert_eq!(api.calls(), vec!["send_otp", "send_otp_public:bo@example.com"]);
}

// ========================================================================
// Password reset
// ========================================================================

#[tokio::test]
async fn full_reset_flow() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(SessionBootReq::PATH, SessionBootReq).await;
    flux.emit(ResetStartReq::PATH, ResetStartReq).await;
    assert!(reset(&flux).started);

    flux.emit(
        ResetSendEmailReq::PATH,
        ResetSendEmailReq {
            email: "ana@example.com".into(),
        },
    )
    .await;
    assert_eq!(reset(&flux).step, ResetStep::EnterOtp);

    // Incomplete code stays on the code step.
    paste(&flux, OtpTarget::Reset, "12").await;
    flux.emit(ResetVerifyOtpReq::PATH, ResetVerifyOtpReq).await;
    assert_eq!(reset(&flux).step, ResetStep::EnterOtp);
    assert!(reset(&flux).error.is_some());

    paste(&flux, OtpTarget::Reset, "987654").await;
    flux.emit(ResetVerifyOtpReq::PATH, ResetVerifyOtpReq).await;
    assert_eq!(reset(&flux).step, ResetStep::NewPassword);

    flux.emit(
        ResetSubmitReq::PATH,
        ResetSubmitReq {
            new_password: "s3cret!".into(),
        },
    )
    .await;

    assert!(api
        .calls()
        .contains(&"reset_password:ana@example.com:987654:s3cret!".to_string()));
    let flow = reset(&flux);
    assert!(!flow.started);
    assert_eq!(flow.step, ResetStep::Done);
    let route: AppRoute = flux.read(AppRoute::PATH).unwrap();
    assert_eq!(route.path, "/login");
    let notices: Notices = flux.read(Notices::PATH).unwrap();
    assert_eq!(
        notices.messages(),
        vec!["Email sent successfully!", "Password reset successful!"]
    );
}

#[tokio::test]
async fn failed_reset_email_stays_on_first_step() {
    let api = FakeApi::new(Backend::default());
    api.fail("send_reset_otp", Fail::Server);
    let flux = app(&api);
    flux.emit(ResetStartReq::PATH, ResetStartReq).await;

    flux.emit(
        ResetSendEmailReq::PATH,
        ResetSendEmailReq {
            email: "ana@example.com".into(),
        },
    )
    .await;

    let flow = reset(&flux);
    assert_eq!(flow.step, ResetStep::EnterEmail);
    assert_eq!(flow.error.as_deref(), Some("Something went wrong, please try again"));
}

#[tokio::test]
async fn submit_before_the_code_step_is_ignored() {
    let api = FakeApi::new(Backend::default());
    let flux = app(&api);
    flux.emit(ResetStartReq::PATH, ResetStartReq).await;

    flux.emit(
        ResetSubmitReq::PATH,
        ResetSubmitReq {
            new_password: "x".into(),
        },
    )
    .await;

    assert_eq!(api.count("reset_password"), 0);
}
