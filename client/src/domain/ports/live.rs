//! Live-update channel port
//!
//! A persistent push connection delivering feed events without polling.
//! `subscribe` hands back a subscription whose events the caller pumps
//! into the synchronizer; dropping or tearing down the subscription
//! releases the underlying channel.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::entities::Post;
use crate::error::ChannelError;

/// Events delivered over the push channel
#[derive(Debug, Clone)]
pub enum LiveEvent {
    /// A post was created somewhere in the network, possibly by us.
    PostCreated(Post),
}

#[async_trait]
pub trait LiveUpdates: Send + Sync {
    /// Open the push channel.
    async fn subscribe(&self) -> Result<LiveSubscription, ChannelError>;
}

/// Handle on an open push subscription
///
/// Teardown is exactly-once: the first call releases the channel, any
/// later call is a no-op. Dropping the handle tears it down as well.
#[derive(Debug)]
pub struct LiveSubscription {
    events: mpsc::Receiver<LiveEvent>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl LiveSubscription {
    pub fn new(events: mpsc::Receiver<LiveEvent>, shutdown: oneshot::Sender<()>) -> Self {
        Self {
            events,
            shutdown: Some(shutdown),
        }
    }

    /// Next pushed event; `None` once the channel has closed or the
    /// subscription was torn down.
    pub async fn next_event(&mut self) -> Option<LiveEvent> {
        self.events.recv().await
    }

    /// Release the subscription. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }

    /// Whether teardown has run yet.
    pub fn is_active(&self) -> bool {
        self.shutdown.is_some()
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        self.teardown();
    }
}
