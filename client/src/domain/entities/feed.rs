//! Feed state
//!
//! The ordered, de-duplicated sequence of posts the viewer sees. A
//! historical fetch replaces it wholesale, live events insert into it,
//! deletes remove from it. Two invariants hold at all times:
//!
//! - no two entries share a `PostId`
//! - entries are ordered newest-first by `created_at`
//!
//! Live pushes normally arrive newest-last, so an insert is usually a
//! prepend; an out-of-order arrival is placed by timestamp instead of
//! breaking the ordering.

use std::collections::HashSet;

use crate::domain::entities::{Post, PostId};

/// Lifecycle of a feed session
///
/// `Unauthenticated` is terminal until a credential appears; `Error`
/// allows a manual retry back through `Loading`; `Synced` absorbs any
/// number of live updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Unauthenticated,
    Loading,
    Synced,
    Error,
}

impl std::fmt::Display for FeedPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedPhase::Unauthenticated => write!(f, "unauthenticated"),
            FeedPhase::Loading => write!(f, "loading"),
            FeedPhase::Synced => write!(f, "synced"),
            FeedPhase::Error => write!(f, "error"),
        }
    }
}

/// The in-memory feed for the current viewer
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    posts: Vec<Post>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire feed with a freshly fetched set of posts.
    ///
    /// The input may arrive in any order (the historical endpoint serves
    /// oldest-first); it is normalized to newest-first and de-duplicated,
    /// keeping the first occurrence of each id.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        let mut seen = HashSet::new();
        let mut posts: Vec<Post> = posts
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.posts = posts;
    }

    /// Insert a single post, preserving both invariants.
    ///
    /// Returns false when a post with the same id is already present; the
    /// insert is then a no-op, which is what absorbs the push echo of an
    /// optimistically inserted post.
    pub fn insert(&mut self, post: Post) -> bool {
        if self.contains(&post.id) {
            return false;
        }
        let at = self
            .posts
            .partition_point(|p| p.created_at > post.created_at);
        self.posts.insert(at, post);
        true
    }

    /// Remove the entry with the given id, returning it if present.
    pub fn remove(&mut self, id: &PostId) -> Option<Post> {
        let at = self.posts.iter().position(|p| &p.id == id)?;
        Some(self.posts.remove(at))
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.iter().any(|p| &p.id == id)
    }

    /// The posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn clear(&mut self) {
        self.posts.clear();
    }
}
