//! Websocket adapter for the live-update channel
//!
//! Connects to the push endpoint and forwards `postCreated` frames as
//! feed events. Real-time channels drop routinely, so the read loop
//! reconnects with bounded exponential backoff; once the attempts are
//! exhausted the event stream ends and the subscriber sees the channel
//! close.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::adapters::wire::{FeedItem, PushEnvelope, EVENT_POST_CREATED};
use crate::domain::ports::{LiveEvent, LiveSubscription, LiveUpdates};
use crate::error::ChannelError;

/// Reconnection policy for the push channel
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Consecutive failed connects tolerated before giving up
    pub max_attempts: u32,
    /// Backoff before the first reconnect
    pub initial_backoff: Duration,
    /// Backoff cap
    pub max_backoff: Duration,
    /// Exponential growth factor
    pub multiplier: f64,
    /// Add random jitter to each delay (±30%)
    pub jitter: bool,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl ReconnectConfig {
    /// Delay before the given (1-based) attempt.
    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self.multiplier.powi(attempt.saturating_sub(1) as i32);
        let base = self.initial_backoff.as_millis() as f64 * exp;
        let capped = base.min(self.max_backoff.as_millis() as f64);
        let millis = if self.jitter {
            let factor = 1.0 + rand::thread_rng().gen_range(-0.3..0.3);
            capped * factor
        } else {
            capped
        };
        Duration::from_millis(millis as u64)
    }
}

/// Live updates over a websocket connection
pub struct WsLiveUpdates {
    url: String,
    reconnect: ReconnectConfig,
}

impl WsLiveUpdates {
    pub fn new(url: String) -> Self {
        Self {
            url,
            reconnect: ReconnectConfig::default(),
        }
    }

    pub fn with_reconnect(url: String, reconnect: ReconnectConfig) -> Self {
        Self { url, reconnect }
    }
}

#[async_trait]
impl LiveUpdates for WsLiveUpdates {
    async fn subscribe(&self) -> Result<LiveSubscription, ChannelError> {
        let (events_tx, events_rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(run_channel(
            self.url.clone(),
            self.reconnect.clone(),
            events_tx,
            shutdown_rx,
        ));

        Ok(LiveSubscription::new(events_rx, shutdown_tx))
    }
}

/// Connect/read loop for one subscription. Exits on teardown, when the
/// subscriber goes away, or when reconnection attempts are exhausted.
async fn run_channel(
    url: String,
    reconnect: ReconnectConfig,
    events: mpsc::Sender<LiveEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut attempt: u32 = 0;

    loop {
        let mut stream = tokio::select! {
            _ = &mut shutdown => return,
            connected = connect_async(url.as_str()) => match connected {
                Ok((stream, _)) => stream,
                Err(e) => {
                    attempt += 1;
                    if attempt >= reconnect.max_attempts {
                        tracing::warn!(error = %e, attempts = attempt, "giving up on push channel");
                        return;
                    }
                    let delay = reconnect.backoff(attempt);
                    tracing::debug!(error = %e, ?delay, "push channel connect failed, backing off");
                    tokio::select! {
                        _ = &mut shutdown => return,
                        _ = tokio::time::sleep(delay) => continue,
                    }
                }
            },
        };

        attempt = 0;
        tracing::debug!("push channel connected");

        loop {
            tokio::select! {
                _ = &mut shutdown => return,
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(event) = parse_frame(&text) {
                            if events.send(event).await.is_err() {
                                // Subscriber is gone.
                                return;
                            }
                        }
                    }
                    Some(Ok(_)) => {} // pings and binary frames
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "push channel read error, reconnecting");
                        break;
                    }
                    None => {
                        tracing::debug!("push channel closed by server, reconnecting");
                        break;
                    }
                },
            }
        }
    }
}

/// Decode one text frame into a feed event. Unknown or malformed frames
/// are dropped rather than killing the channel.
fn parse_frame(text: &str) -> Option<LiveEvent> {
    let envelope: PushEnvelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(error = %e, "unparseable push frame");
            return None;
        }
    };

    if envelope.event != EVENT_POST_CREATED {
        tracing::debug!(event = %envelope.event, "ignoring unknown push event");
        return None;
    }

    match serde_json::from_value::<FeedItem>(envelope.data) {
        Ok(item) => Some(LiveEvent::PostCreated(item.into())),
        Err(e) => {
            tracing::debug!(error = %e, "malformed postCreated payload");
            None
        }
    }
}
