//! Authentication service
//!
//! Login, registration, and logout against the external auth endpoints,
//! with client-side validation running before any network call. The
//! session store is the single writer of the bearer credential.

use std::sync::Arc;

use crate::domain::entities::{Credentials, Registration, Session};
use crate::domain::ports::{SessionStore, StatusApi};
use crate::error::AppError;

pub struct AuthService<A, S>
where
    A: StatusApi,
    S: SessionStore,
{
    api: Arc<A>,
    session: Arc<S>,
}

impl<A, S> AuthService<A, S>
where
    A: StatusApi,
    S: SessionStore,
{
    pub fn new(api: Arc<A>, session: Arc<S>) -> Self {
        Self { api, session }
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        credentials.validate().map_err(AppError::Validation)?;

        let token = self
            .api
            .login(&credentials.username, &credentials.password)
            .await
            .map_err(AppError::LoginFailed)?;

        let session = Session::new(token);
        self.session.store(&session)?;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(session)
    }

    /// Create an account and start a session with the returned token.
    pub async fn register(&self, registration: &Registration) -> Result<Session, AppError> {
        registration.validate().map_err(AppError::Validation)?;

        let token = self
            .api
            .register(
                &registration.username,
                &registration.password,
                &registration.confirm_password,
            )
            .await
            .map_err(AppError::RegisterFailed)?;

        let session = Session::new(token);
        self.session.store(&session)?;
        tracing::info!(username = %registration.username, "registered");
        Ok(session)
    }

    /// Destroy the stored session. Safe to call when not logged in.
    pub fn logout(&self) -> Result<(), AppError> {
        self.session.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The stored session, if any.
    pub fn current_session(&self) -> Result<Option<Session>, AppError> {
        Ok(self.session.load()?)
    }
}
