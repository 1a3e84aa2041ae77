//! Application layer
//!
//! Services orchestrating the domain over the ports.

pub mod auth;
pub mod feed_sync;

pub use auth::AuthService;
pub use feed_sync::FeedSynchronizer;
