//! Domain ports (traits)
//!
//! Port traits define what the application layer requires from the
//! outside world. Adapters provide concrete implementations.

pub mod api;
pub mod live;
pub mod session;
pub mod storage;

pub use api::StatusApi;
pub use live::{LiveEvent, LiveSubscription, LiveUpdates};
pub use session::SessionStore;
pub use storage::ObjectStorage;
