//! Pulse client
//!
//! A native client for the Pulse status-sharing service: it
//! authenticates, seeds a feed from the REST API, keeps the feed live
//! over a push channel, and publishes new posts. Hexagonal (ports &
//! adapters) layout: pure domain entities and port traits, application
//! services orchestrating them, and adapters for the real REST,
//! websocket, and filesystem collaborators.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;

#[cfg(test)]
pub mod test_utils;


pub use config::Config;
pub use error::{ApiError, AppError, ChannelError, SessionError, StorageError};
