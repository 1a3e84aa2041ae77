//! Adapters layer
//!
//! Implementations of port traits for the real external collaborators.

pub mod http;
pub mod session_file;
pub mod wire;
pub mod ws;

pub use http::{HttpObjectStorage, HttpStatusApi};
pub use session_file::FileSessionStore;
pub use ws::{ReconnectConfig, WsLiveUpdates};
