//! Feed synchronizer
//!
//! Owns the feed for the current viewer: seeds it with the historical
//! fetch, folds live push events into it, and applies post creation and
//! deletion. All mutation goes through `&mut self` from one cooperative
//! event loop, so there are no concurrent writers.

use std::sync::Arc;

use crate::domain::entities::{FeedPhase, FeedState, Post, PostDraft, PostId, Profile, Session};
use crate::domain::ports::{
    LiveEvent, LiveSubscription, LiveUpdates, ObjectStorage, SessionStore, StatusApi,
};
use crate::error::AppError;

pub struct FeedSynchronizer<A, L, O, S>
where
    A: StatusApi,
    L: LiveUpdates,
    O: ObjectStorage,
    S: SessionStore,
{
    api: Arc<A>,
    live: Arc<L>,
    storage: Arc<O>,
    session: Arc<S>,
    state: FeedState,
    phase: FeedPhase,
}

impl<A, L, O, S> FeedSynchronizer<A, L, O, S>
where
    A: StatusApi,
    L: LiveUpdates,
    O: ObjectStorage,
    S: SessionStore,
{
    pub fn new(api: Arc<A>, live: Arc<L>, storage: Arc<O>, session: Arc<S>) -> Self {
        Self {
            api,
            live,
            storage,
            session,
            state: FeedState::new(),
            phase: FeedPhase::Unauthenticated,
        }
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// The merged feed, newest first.
    pub fn posts(&self) -> &[Post] {
        self.state.posts()
    }

    /// Seed the feed from the historical fetch; read it back through
    /// [`posts`](Self::posts).
    ///
    /// Requires a stored session; without one the caller must send the
    /// user to login, and no request is made. Always full-replace: posts
    /// accumulated from live updates are discarded in favor of the fresh
    /// response. On failure the feed is left empty in the error phase.
    pub async fn initialize(&mut self) -> Result<(), AppError> {
        let session = match self.session.load()? {
            Some(session) => session,
            None => {
                self.phase = FeedPhase::Unauthenticated;
                return Err(AppError::AuthRequired);
            }
        };

        self.phase = FeedPhase::Loading;
        match self.api.fetch_feed(&session.token).await {
            Ok(posts) => {
                self.state.replace_all(posts);
                self.phase = FeedPhase::Synced;
                tracing::debug!(posts = self.state.len(), "feed synced");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "historical fetch failed");
                self.state.clear();
                self.phase = FeedPhase::Error;
                Err(AppError::FetchFailed(e))
            }
        }
    }

    /// Manual retry out of the error phase.
    pub async fn retry(&mut self) -> Result<(), AppError> {
        self.initialize().await
    }

    /// Open the live push channel. The caller pumps events from the
    /// returned subscription into [`apply`](Self::apply), and must tear
    /// the subscription down once the feed view goes away.
    pub async fn subscribe_to_live_updates(&self) -> Result<LiveSubscription, AppError> {
        self.live.subscribe().await.map_err(AppError::Channel)
    }

    /// Fold one pushed event into the feed.
    ///
    /// Returns true when the event changed the state; a duplicate post id
    /// is absorbed silently, which is what de-duplicates the push echo of
    /// a post we created ourselves.
    pub fn apply(&mut self, event: LiveEvent) -> bool {
        match event {
            LiveEvent::PostCreated(post) => {
                let inserted = self.state.insert(post);
                if !inserted {
                    tracing::debug!("duplicate postCreated event ignored");
                }
                inserted
            }
        }
    }

    /// Validate, upload the image if any, submit, and insert the created
    /// post into the feed right away rather than waiting for the push
    /// echo (which may race or be missed).
    pub async fn create_post(&mut self, draft: PostDraft) -> Result<Post, AppError> {
        draft.validate().map_err(AppError::Validation)?;
        let session = self.require_session()?;

        let image_url = match &draft.image {
            Some(image) => Some(
                self.storage
                    .upload_image(image)
                    .await
                    .map_err(AppError::UploadFailed)?,
            ),
            None => None,
        };

        let text = draft.text.as_deref().unwrap_or("");
        let post = self
            .api
            .create_post(&session.token, text, image_url.as_deref())
            .await
            .map_err(AppError::PostFailed)?;

        self.state.insert(post.clone());
        tracing::info!(id = %post.id, "post created");
        Ok(post)
    }

    /// Remove a post. The local entry is only dropped once the server
    /// confirms the delete; on failure the feed is left untouched.
    pub async fn delete_post(&mut self, id: &PostId) -> Result<(), AppError> {
        let session = self.require_session()?;
        self.api
            .delete_post(&session.token, id)
            .await
            .map_err(AppError::DeleteFailed)?;
        self.state.remove(id);
        Ok(())
    }

    /// The viewer's own posts.
    pub async fn fetch_profile(&self) -> Result<Profile, AppError> {
        let session = self.require_session()?;
        self.api
            .fetch_profile(&session.token)
            .await
            .map_err(AppError::FetchFailed)
    }

    fn require_session(&self) -> Result<Session, AppError> {
        match self.session.load()? {
            Some(session) => Ok(session),
            None => Err(AppError::AuthRequired),
        }
    }
}
