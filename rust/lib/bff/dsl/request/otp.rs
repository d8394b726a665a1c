//! Code entry, verification and password reset requests.

use flux_derive::request;

use crate::state::OtpTarget;

/// Open the verification page. `email` selects the signed-out variant.
#[request("otp/start")]
pub struct OtpStartReq {
    pub email: Option<String>,
}

#[request("otp/type")]
pub struct OtpTypeReq {
    pub target: OtpTarget,
    pub index: usize,
    pub ch: char,
}

#[request("otp/backspace")]
pub struct OtpBackspaceReq {
    pub target: OtpTarget,
    pub index: usize,
}

#[request("otp/paste")]
pub struct OtpPasteReq {
    pub target: OtpTarget,
    pub text: String,
}

/// Submit the verification code.
#[request("otp/verify")]
pub struct OtpVerifyReq;

#[request("otp/resend")]
pub struct OtpResendReq;

/// "Forgot password?" pressed on the login page.
#[request("reset/start")]
pub struct ResetStartReq;

#[request("reset/send-email")]
pub struct ResetSendEmailReq {
    pub email: String,
}

/// Accept the entered reset code and move on to the new password.
#[request("reset/verify-otp")]
pub struct ResetVerifyOtpReq;

#[request("reset/submit")]
pub struct ResetSubmitReq {
    pub new_password: String,
}

#[request("reset/resend")]
pub struct ResetResendReq;
