//! Code-entry flows: email verification and password reset.

use flux_derive::state;
use serde::Serialize;

use crate::otp::OtpBoxes;

/// Which code-entry state an edit request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OtpTarget {
    Verify,
    Reset,
}

/// Email verification page — stored at `otp/state`.
#[state("otp/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpState {
    pub boxes: OtpBoxes,
    /// Present for the signed-out variant (verify right after signup).
    pub email: Option<String>,
    pub busy: bool,
    pub error: Option<String>,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResetStep {
    #[default]
    EnterEmail,
    EnterOtp,
    NewPassword,
    Done,
}

/// Forgot-password flow — stored at `reset/state`.
#[state("reset/state")]
#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetFlow {
    /// Entered from the login page; guards the reset route.
    pub started: bool,
    pub step: ResetStep,
    pub email: String,
    pub boxes: OtpBoxes,
    pub busy: bool,
    pub error: Option<String>,
}
