//! Object storage port
//!
//! Images are uploaded to an external object store before post creation;
//! the store returns the durable public URL the post will reference.

use async_trait::async_trait;

use crate::domain::entities::ImageUpload;
use crate::error::StorageError;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload the image bytes, returning their public URL.
    async fn upload_image(&self, image: &ImageUpload) -> Result<String, StorageError>;
}
