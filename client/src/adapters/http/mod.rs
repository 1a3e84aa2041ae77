//! HTTP adapters for the REST API and the object store

pub mod api;
pub mod storage;

pub use api::HttpStatusApi;
pub use storage::HttpObjectStorage;
