//! Domain entities
//!
//! Pure domain models; wire DTOs live with the adapters and convert into
//! these at the boundary.

pub mod feed;
pub mod post;
pub mod session;

pub use feed::{FeedPhase, FeedState};
pub use post::{
    ImageFormat, ImageUpload, Post, PostDraft, PostId, Profile, MAX_IMAGE_BYTES, MAX_TEXT_CHARS,
};
pub use session::{Credentials, Registration, Session};
