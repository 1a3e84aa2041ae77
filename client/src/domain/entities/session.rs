//! Session and credential entities
//!
//! A session is the opaque bearer token proving an authenticated user. It
//! is created on login/registration success, destroyed on logout, and only
//! ever read by feed operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Login form data
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both fields must be present before the login request goes out.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Enter your username or email".to_string());
        }
        if self.password.is_empty() {
            return Err("Enter your password".to_string());
        }
        Ok(())
    }
}

/// Usernames: 3-30 chars, letters/numbers/underscores/dashes only
const USERNAME_PATTERN: &str = "^[a-zA-Z0-9_-]{3,30}$";

/// Registration form data
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// Client-side account rules, checked before any network call.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.chars().count() < 3 {
            return Err("Username must be at least 3 characters".to_string());
        }
        if self.username.chars().count() > 30 {
            return Err("Username must be less than 30 characters".to_string());
        }
        let pattern = regex::Regex::new(USERNAME_PATTERN).expect("username pattern is valid");
        if !pattern.is_match(&self.username) {
            return Err("Can contain only letters, numbers, underscores, and dashes".to_string());
        }
        if self.password.chars().count() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        let has_letter = self.password.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = self.password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err("Password must contain at least one letter and one number".to_string());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}
