use std::env;
use std::path::PathBuf;

/// Runtime configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the status REST API
    pub api_url: String,
    /// Websocket URL of the push channel
    pub socket_url: String,
    /// Base URL of the image object store
    pub storage_url: String,
    /// Where the session token lives on disk
    pub session_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: env::var("PULSE_API_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            socket_url: env::var("PULSE_SOCKET_URL")
                .unwrap_or_else(|_| "ws://localhost:4000/live".to_string()),
            storage_url: env::var("PULSE_STORAGE_URL")
                .unwrap_or_else(|_| "http://localhost:4100".to_string()),
            session_path: env::var("PULSE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_path()),
        }
    }
}

/// `~/.pulse/session.json`, falling back to the working directory when no
/// home directory is available.
fn default_session_path() -> PathBuf {
    let base = home::home_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(".pulse").join("session.json")
}
