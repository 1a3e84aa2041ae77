//! Unified error types for the Pulse client
//!
//! One error enum per layer:
//! - `ApiError`: REST API client errors
//! - `StorageError`: object-storage upload errors
//! - `ChannelError`: live-update channel errors
//! - `SessionError`: session store errors
//! - `AppError`: application layer errors, surfaced to the user as inline
//!   messages via [`AppError::user_message`]

use thiserror::Error;

/// REST API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized - invalid or expired token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// HTTP status of the response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// Object storage upload errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upload rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Live-update channel errors
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Connection failed after {attempts} attempts: {message}")]
    Connect { attempts: u32, message: String },

    #[error("Channel closed")]
    Closed,

    #[error("Malformed push frame: {0}")]
    Deserialization(String),
}

/// Session store errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session data: {0}")]
    Corrupt(String),
}

/// Application layer errors
///
/// Every variant is recoverable at the point of occurrence; none is fatal
/// to the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// No credential is stored; the caller must send the user to login.
    #[error("Not logged in")]
    AuthRequired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Feed fetch failed: {0}")]
    FetchFailed(#[source] ApiError),

    #[error("Post creation failed: {0}")]
    PostFailed(#[source] ApiError),

    #[error("Post deletion failed: {0}")]
    DeleteFailed(#[source] ApiError),

    #[error("Image upload failed: {0}")]
    UploadFailed(#[source] StorageError),

    #[error("Login failed: {0}")]
    LoginFailed(#[source] ApiError),

    #[error("Registration failed: {0}")]
    RegisterFailed(#[source] ApiError),

    #[error("Live channel error: {0}")]
    Channel(#[source] ChannelError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";

impl AppError {
    /// The inline message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthRequired => "You are not authorized. Please login.".to_string(),
            AppError::Validation(message) => message.clone(),
            AppError::FetchFailed(ApiError::Request(_)) => NETWORK_MESSAGE.to_string(),
            AppError::FetchFailed(_) => "Failed to load posts. Please try again.".to_string(),
            AppError::PostFailed(ApiError::Request(_)) => NETWORK_MESSAGE.to_string(),
            AppError::PostFailed(_) => "Failed to post. Please try again.".to_string(),
            AppError::DeleteFailed(ApiError::Request(_)) => NETWORK_MESSAGE.to_string(),
            AppError::DeleteFailed(_) => "Failed to delete post. Please try again.".to_string(),
            AppError::UploadFailed(StorageError::Request(_)) => NETWORK_MESSAGE.to_string(),
            AppError::UploadFailed(_) => "Failed to post. Please try again.".to_string(),
            AppError::LoginFailed(e) => login_message(e),
            AppError::RegisterFailed(e) => register_message(e),
            AppError::Channel(_) => "Live updates are unavailable right now.".to_string(),
            AppError::Session(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

/// Fixed status-code table for login failures, with a generic fallback for
/// unmapped codes.
fn login_message(error: &ApiError) -> String {
    let status = match error {
        ApiError::Request(_) => return NETWORK_MESSAGE.to_string(),
        ApiError::Unauthorized => 401,
        ApiError::Api { status, .. } => *status,
        ApiError::Deserialization(_) => 0,
    };
    match status {
        404 => "User not found. Please check your credentials.",
        401 => "Invalid credentials. Please try again.",
        500 => "Server error. Please try again later.",
        _ => "An unexpected error occurred. Please try again.",
    }
    .to_string()
}

/// Registration failures carry the server's own message when there is one.
fn register_message(error: &ApiError) -> String {
    match error {
        ApiError::Request(_) => NETWORK_MESSAGE.to_string(),
        ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => "Registration failed. Please try again later.".to_string(),
    }
}
