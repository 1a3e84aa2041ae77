//! Websocket adapter for the live-update channel

pub mod live;

pub use live::{ReconnectConfig, WsLiveUpdates};
