//! Local form checks. Anything failing here never reaches the backend.

use picfeed_client::Upload;

pub const CAPTION_MAX_CHARS: usize = 2200;
pub const AVATAR_MAX_BYTES: usize = 5 * 1024 * 1024;
pub const AVATAR_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Blank(&'static str),

    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,

    #[error("Please select an image")]
    ImageRequired,

    #[error("Caption must be at most 2200 characters ({0} given)")]
    CaptionTooLong(usize),

    #[error("Only JPEG, PNG and WebP images are allowed")]
    UnsupportedImageType(String),

    #[error("Image must be 5 MB or smaller")]
    ImageTooLarge(usize),

    #[error("New passwords do not match")]
    PasswordMismatch,

    #[error("New password must differ from the current one")]
    PasswordUnchanged,

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("You can only delete your own content")]
    NotOwner,
}

pub fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank(field))
    } else {
        Ok(())
    }
}

pub fn registration(name: &str, email: &str, password: &str, accepted_terms: bool) -> Result<(), ValidationError> {
    if !accepted_terms {
        return Err(ValidationError::TermsNotAccepted);
    }
    required(name, "Name")?;
    required(email, "Email")?;
    required(password, "Password")
}

pub fn caption(caption: &str) -> Result<(), ValidationError> {
    let len = caption.chars().count();
    if len > CAPTION_MAX_CHARS {
        return Err(ValidationError::CaptionTooLong(len));
    }
    Ok(())
}

pub fn avatar(file: &Upload) -> Result<(), ValidationError> {
    let content_type = file.content_type.trim().to_ascii_lowercase();
    if !AVATAR_TYPES.contains(&content_type.as_str()) {
        return Err(ValidationError::UnsupportedImageType(file.content_type.clone()));
    }
    if file.bytes.len() > AVATAR_MAX_BYTES {
        return Err(ValidationError::ImageTooLarge(file.bytes.len()));
    }
    Ok(())
}

pub fn password_change(current: &str, new: &str, confirm: &str) -> Result<(), ValidationError> {
    if current.is_empty() {
        return Err(ValidationError::Blank("Current password"));
    }
    if new.is_empty() {
        return Err(ValidationError::Blank("New password"));
    }
    if new != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if new == current {
        return Err(ValidationError::PasswordUnchanged);
    }
    Ok(())
}
