//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::{
    Credentials, ImageFormat, ImageUpload, Post, PostId, Registration, Session,
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// A post with the given id, authored by "alice" at a fixed instant.
pub fn test_post(id: &str) -> Post {
    Post {
        id: PostId(id.to_string()),
        author: "alice".to_string(),
        text: Some(format!("post {}", id)),
        image_url: None,
        created_at: base_time(),
    }
}

/// A post created the given number of minutes after the fixed base
/// instant, so ordering tests can construct arrival orders precisely.
pub fn test_post_at(id: &str, minutes: i64) -> Post {
    Post {
        created_at: base_time() + Duration::minutes(minutes),
        ..test_post(id)
    }
}

/// A stored session for the test viewer.
pub fn test_session() -> Session {
    Session::new("tok-alice")
}

/// Valid login credentials matching `test_session`.
pub fn test_credentials() -> Credentials {
    Credentials {
        username: "alice".to_string(),
        password: "passw0rd".to_string(),
    }
}

/// A valid registration.
pub fn test_registration() -> Registration {
    Registration {
        username: "new_user".to_string(),
        password: "passw0rd".to_string(),
        confirm_password: "passw0rd".to_string(),
    }
}

/// A small valid PNG attachment.
pub fn test_image() -> ImageUpload {
    ImageUpload {
        bytes: vec![0u8; 16],
        format: ImageFormat::Png,
    }
}
