//! Post domain entity
//!
//! A post is immutable once created: the client only appends newly created
//! posts, replaces the whole feed on a fresh fetch, or removes deleted
//! ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque server-assigned post identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single status update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author: String,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The viewer's own posts plus identity, as returned by the profile fetch
#[derive(Debug, Clone)]
pub struct Profile {
    pub username: String,
    pub posts: Vec<Post>,
}

/// Maximum status text length accepted client-side
pub const MAX_TEXT_CHARS: usize = 500;

/// Maximum image size accepted client-side
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image encodings accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
        }
    }
}

/// An image attachment staged for upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// What the user has composed but not yet submitted
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub text: Option<String>,
    pub image: Option<ImageUpload>,
}

impl PostDraft {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Client-side checks that must pass before any network call.
    ///
    /// At least one of text/image must be present; whitespace-only text
    /// does not count.
    pub fn validate(&self) -> Result<(), String> {
        let has_text = self
            .text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false);
        if !has_text && self.image.is_none() {
            return Err("Please provide either a status message or an image".to_string());
        }
        if let Some(text) = &self.text {
            if text.chars().count() > MAX_TEXT_CHARS {
                return Err("Status must be less than 500 characters".to_string());
            }
        }
        if let Some(image) = &self.image {
            if image.bytes.is_empty() {
                return Err("Image file is empty".to_string());
            }
            if image.bytes.len() > MAX_IMAGE_BYTES {
                return Err("Image must be less than 5MB".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(len: usize) -> ImageUpload {
        ImageUpload {
            bytes: vec![0u8; len],
            format: ImageFormat::Png,
        }
    }

    #[test]
    fn empty_draft_is_rejected() {
        let result = PostDraft::default().validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("status message or an image"));
    }

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        let result = PostDraft::text("   \n\t").validate();
        assert!(result.is_err());
    }

    #[test]
    fn text_only_draft_is_valid() {
        assert!(PostDraft::text("hello #world").validate().is_ok());
    }

    #[test]
    fn image_only_draft_is_valid() {
        let draft = PostDraft::default().with_image(image(1024));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn text_at_limit_is_valid() {
        let draft = PostDraft::text("a".repeat(MAX_TEXT_CHARS));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn text_over_limit_is_rejected() {
        let result = PostDraft::text("a".repeat(MAX_TEXT_CHARS + 1)).validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("500 characters"));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let draft = PostDraft::default().with_image(image(MAX_IMAGE_BYTES + 1));
        let result = draft.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("5MB"));
    }

    #[test]
    fn empty_image_is_rejected() {
        let draft = PostDraft::default().with_image(image(0));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn content_types_match_formats() {
        assert_eq!(ImageFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.content_type(), "image/png");
        assert_eq!(ImageFormat::Gif.content_type(), "image/gif");
        assert_eq!(ImageFormat::Webp.content_type(), "image/webp");
    }
}
