//! File-backed session store
//!
//! The native analog of the browser session cookie: one small JSON file
//! holding the bearer token, created on login and removed on logout.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::entities::Session;
use crate::domain::ports::SessionStore;
use crate::error::SessionError;

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e)),
        };
        let session =
            serde_json::from_str(&data).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        Ok(Some(session))
    }

    fn store(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data =
            serde_json::to_string(session).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}
