//! Session store port
//!
//! The single authoritative read/write surface for the bearer credential.
//! Components never touch token storage directly; everything goes through
//! this trait.

use crate::domain::entities::Session;
use crate::error::SessionError;

pub trait SessionStore: Send + Sync {
    /// The currently stored session, if any.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Persist a new session, replacing any existing one.
    fn store(&self, session: &Session) -> Result<(), SessionError>;

    /// Destroy the stored session. A no-op when none exists.
    fn clear(&self) -> Result<(), SessionError>;
}
