//! Mock implementations of port traits
//!
//! In-memory implementations configurable per test. The API and storage
//! mocks count every network-facing call so tests can assert that
//! validation and auth short-circuits never touch the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::domain::entities::{ImageUpload, Post, PostId, Profile, Session};
use crate::domain::ports::{
    LiveEvent, LiveSubscription, LiveUpdates, ObjectStorage, SessionStore, StatusApi,
};
use crate::error::{ApiError, ChannelError, SessionError, StorageError};

/// The username the API mock treats as the logged-in viewer
pub const VIEWER: &str = "alice";

// ============================================================================
// In-Memory Status API
// ============================================================================

#[derive(Default)]
pub struct InMemoryStatusApi {
    posts: RwLock<Vec<Post>>,
    users: RwLock<HashMap<String, String>>,
    failure: Option<(u16, String)>,
    fail_next_fetch: AtomicBool,
    next_id: AtomicUsize,
    fetch_calls: AtomicUsize,
    profile_calls: AtomicUsize,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
}

impl InMemoryStatusApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that rejects every call with the given status.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Default::default()
        }
    }

    /// Pre-populate the feed with a post.
    pub fn with_post(self, post: Post) -> Self {
        {
            self.posts.write().unwrap().push(post);
        }
        self
    }

    /// Pre-register an account.
    pub fn with_user(self, username: &str, password: &str) -> Self {
        {
            self.users
                .write()
                .unwrap()
                .insert(username.to_string(), password.to_string());
        }
        self
    }

    /// Make only the next feed fetch fail.
    pub fn fail_next_fetch(&self) {
        self.fail_next_fetch.store(true, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match &self.failure {
            Some((401, _)) => Err(ApiError::Unauthorized),
            Some((status, message)) => Err(ApiError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_token(&self, token: &str) -> Result<(), ApiError> {
        if token.is_empty() {
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }
}

#[async_trait]
impl StatusApi for InMemoryStatusApi {
    async fn fetch_feed(&self, token: &str) -> Result<Vec<Post>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.check_token(token)?;
        if self.fail_next_fetch.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 503,
                message: "temporarily unavailable".to_string(),
            });
        }
        Ok(self.posts.read().unwrap().clone())
    }

    async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.check_token(token)?;
        let posts = self
            .posts
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.author == VIEWER)
            .cloned()
            .collect();
        Ok(Profile {
            username: VIEWER.to_string(),
            posts,
        })
    }

    async fn create_post(
        &self,
        token: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Post, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.check_token(token)?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let post = Post {
            id: PostId(format!("created-{}", n)),
            author: VIEWER.to_string(),
            text: (!text.is_empty()).then(|| text.to_string()),
            image_url: image_url.map(|u| u.to_string()),
            created_at: Utc::now(),
        };
        self.posts.write().unwrap().push(post.clone());
        Ok(post)
    }

    async fn delete_post(&self, token: &str, id: &PostId) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.check_token(token)?;
        let mut posts = self.posts.write().unwrap();
        match posts.iter().position(|p| &p.id == id) {
            Some(at) => {
                posts.remove(at);
                Ok(())
            }
            None => Err(ApiError::Api {
                status: 404,
                message: "Post not found".to_string(),
            }),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let users = self.users.read().unwrap();
        match users.get(username) {
            None => Err(ApiError::Api {
                status: 404,
                message: "User not found".to_string(),
            }),
            Some(stored) if stored != password => Err(ApiError::Unauthorized),
            Some(_) => Ok(format!("tok-{}", username)),
        }
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        _confirm_password: &str,
    ) -> Result<String, ApiError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut users = self.users.write().unwrap();
        if users.contains_key(username) {
            return Err(ApiError::Api {
                status: 409,
                message: "Username is already taken".to_string(),
            });
        }
        users.insert(username.to_string(), password.to_string());
        Ok(format!("tok-{}", username))
    }
}

// ============================================================================
// In-Memory Object Storage
// ============================================================================

#[derive(Default)]
pub struct InMemoryObjectStorage {
    fail: bool,
    upload_calls: AtomicUsize,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose uploads always fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload_image(&self, image: &ImageUpload) -> Result<String, StorageError> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(StorageError::Rejected {
                status: 500,
                message: "upload failed".to_string(),
            });
        }
        Ok(format!(
            "https://storage.test/{}.{}",
            n,
            image.format.extension()
        ))
    }
}

// ============================================================================
// Scripted Live Updates
// ============================================================================

/// Live-update mock backed by a broadcast channel: tests push events in
/// and every open subscription receives them.
pub struct ScriptedLiveUpdates {
    tx: broadcast::Sender<LiveEvent>,
    torn_down: Arc<AtomicUsize>,
}

impl Default for ScriptedLiveUpdates {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedLiveUpdates {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            tx,
            torn_down: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Push an event to every open subscription.
    pub fn emit(&self, event: LiveEvent) {
        let _ = self.tx.send(event);
    }

    /// How many subscriptions have completed teardown.
    pub fn teardown_count(&self) -> usize {
        self.torn_down.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiveUpdates for ScriptedLiveUpdates {
    async fn subscribe(&self) -> Result<LiveSubscription, ChannelError> {
        let mut source = self.tx.subscribe();
        let (events_tx, events_rx) = mpsc::channel(64);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let torn_down = self.torn_down.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    event = source.recv() => match event {
                        Ok(event) => {
                            if events_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                }
            }
            torn_down.fetch_add(1, Ordering::SeqCst);
        });

        Ok(LiveSubscription::new(events_rx, shutdown_tx))
    }
}

// ============================================================================
// In-Memory Session Store
// ============================================================================

#[derive(Default)]
pub struct InMemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a stored session.
    pub fn with_session(self, session: Session) -> Self {
        {
            *self.session.lock().unwrap() = Some(session);
        }
        self
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.lock().unwrap().clone())
    }

    fn store(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
