//! Turning backend media references into loadable URLs.
//!
//! Image and avatar references come back as origin-relative paths
//! (`/uploads/avatars/7.png`). They resolve against the backend origin,
//! the base URL minus its `/api/v1.0` suffix.

pub const AVATAR_PLACEHOLDER: &str = "assets/img/avatarfallback.png";
pub const IMAGE_PLACEHOLDER: &str = "assets/img/imagefallback.jpg";

const API_SUFFIX: &str = "/api/v1.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    origin: String,
}

impl MediaResolver {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_base_url(base_url: &str) -> Self {
        Self::new(origin_of(base_url))
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn avatar(&self, reference: Option<&str>) -> String {
        self.resolve(reference, AVATAR_PLACEHOLDER)
    }

    pub fn image(&self, reference: Option<&str>) -> String {
        self.resolve(reference, IMAGE_PLACEHOLDER)
    }

    /// Avatar URL carrying a `v` query parameter so a fresh upload is not
    /// served from cache. Placeholders are returned unversioned.
    pub fn avatar_versioned(&self, reference: Option<&str>, version: u64) -> String {
        let url = self.avatar(reference);
        if url == AVATAR_PLACEHOLDER || version == 0 {
            return url;
        }
        let sep = if url.contains('?') { '&' } else { '?' };
        format!("{url}{sep}v={version}")
    }

    fn resolve(&self, reference: Option<&str>, placeholder: &str) -> String {
        let Some(r) = reference.map(str::trim).filter(|r| !r.is_empty()) else {
            return placeholder.to_string();
        };
        if r.starts_with("http://") || r.starts_with("https://") {
            return r.to_string();
        }
        if r.starts_with('/') {
            format!("{}{r}", self.origin)
        } else {
            format!("{}/{r}", self.origin)
        }
    }
}

/// `http://host:8080/api/v1.0` → `http://host:8080`.
pub fn origin_of(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed
        .strip_suffix(API_SUFFIX)
        .unwrap_or(trimmed)
        .to_string()
}
