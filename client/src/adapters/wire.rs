//! Wire formats shared by the REST and push adapters
//!
//! The external service speaks a compact JSON shape; these DTOs mirror it
//! exactly and convert into domain entities at the adapter boundary.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::{Post, PostId, Profile};

/// Event name carried by push frames announcing a new post
pub const EVENT_POST_CREATED: &str = "postCreated";

/// One feed item:
/// `{"_id", "user": {"username"}, "post": {"text", "imageUrl"}, "createdAt"}`
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: FeedUser,
    pub post: FeedPostBody,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedUser {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedPostBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl From<FeedItem> for Post {
    fn from(item: FeedItem) -> Self {
        Post {
            id: PostId(item.id),
            author: item.user.username,
            // Image-only posts travel with an empty status string.
            text: item.post.text.filter(|t| !t.is_empty()),
            image_url: item.post.image_url,
            created_at: item.created_at,
        }
    }
}

/// Profile response:
/// `{"username", "posts": [{"_id", "text", "imageUrl", "createdAt"}]}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub posts: Vec<ProfilePost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<ProfileResponse> for Profile {
    fn from(r: ProfileResponse) -> Self {
        let username = r.username;
        let posts = r
            .posts
            .into_iter()
            .map(|p| Post {
                id: PostId(p.id),
                author: username.clone(),
                text: p.text.filter(|t| !t.is_empty()),
                image_url: p.image_url,
                created_at: p.created_at,
            })
            .collect();
        Profile { username, posts }
    }
}

/// Envelope for push frames: `{"event": "...", "data": {...}}`
#[derive(Debug, Deserialize)]
pub struct PushEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}
