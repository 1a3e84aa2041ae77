//! Status API port
//!
//! The REST surface of the external status service. The application
//! services depend on this trait; the reqwest adapter implements it. The
//! credential is attached per call, never stored in the client.

use async_trait::async_trait;

use crate::domain::entities::{Post, PostId, Profile};
use crate::error::ApiError;

#[async_trait]
pub trait StatusApi: Send + Sync {
    /// One-time historical fetch seeding the feed.
    async fn fetch_feed(&self, token: &str) -> Result<Vec<Post>, ApiError>;

    /// The viewer's own posts plus username.
    async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError>;

    /// Submit a new post. The image, if any, must already be uploaded;
    /// only its durable URL travels here.
    async fn create_post(
        &self,
        token: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Post, ApiError>;

    /// Delete an owned post. Ownership is enforced server-side.
    async fn delete_post(&self, token: &str, id: &PostId) -> Result<(), ApiError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    /// Create an account; returns a bearer token on success.
    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<String, ApiError>;
}
