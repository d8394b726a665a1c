/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401: no valid session cookie.
    #[error("not signed in")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

/// How a failure should surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Not signed in. Usually silent; the guards take over.
    AuthDenied,
    /// The backend rejected the request and said why.
    Business,
    /// Server fault, transport failure or an unreadable response.
    Unexpected,
}

impl ApiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Unauthorized => ErrorClass::AuthDenied,
            ApiError::Server { status, .. } if (400..500).contains(status) => ErrorClass::Business,
            _ => ErrorClass::Unexpected,
        }
    }

    pub fn is_auth_denied(&self) -> bool {
        self.class() == ErrorClass::AuthDenied
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// The backend's explanation for business errors, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. }
                if self.class() == ErrorClass::Business && !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Build from a non-success status and its raw body. Prefers the
    /// `message` field of a JSON body; falls back to the body text.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        ApiError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_auth_denied() {
        let err = ApiError::from_status(401, r#"{"message":"expired"}"#);
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(err.is_auth_denied());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn four_xx_is_business_with_backend_message() {
        let err = ApiError::from_status(409, r#"{"message":"Username already taken"}"#);
        assert_eq!(err.class(), ErrorClass::Business);
        assert_eq!(err.user_message("Failed to update profile"), "Username already taken");
    }

    #[test]
    fn plain_text_body_becomes_message() {
        let err = ApiError::from_status(400, "  Invalid OTP \n");
        assert_eq!(err.user_message("x"), "Invalid OTP");
    }

    #[test]
    fn five_xx_is_unexpected_and_uses_fallback() {
        let err = ApiError::from_status(500, r#"{"message":"NullPointerException"}"#);
        assert_eq!(err.class(), ErrorClass::Unexpected);
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
    }

    #[test]
    fn empty_business_message_uses_fallback() {
        let err = ApiError::from_status(404, "");
        assert_eq!(err.class(), ErrorClass::Business);
        assert_eq!(err.user_message("Not found"), "Not found");
    }

    #[test]
    fn decode_is_unexpected() {
        let err = ApiError::Decode("bad json".into());
        assert_eq!(err.class(), ErrorClass::Unexpected);
        assert_eq!(err.status(), None);
    }
}
