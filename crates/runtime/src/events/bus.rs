//! Broadcast-based match event bus.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::types::MatchEvent;

/// Sink for post-action snapshots.
///
/// Called once per completed action, after the match lock is released.
/// Delivery is best-effort; implementations must not fail the action.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, event: MatchEvent);
}

/// In-process publisher over a tokio broadcast channel.
///
/// Transports subscribe and forward events to their clients. Lagging
/// receivers lose the oldest events.
#[derive(Clone)]
pub struct MatchEventBus {
    sender: broadcast::Sender<MatchEvent>,
}

impl MatchEventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MatchEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for MatchEventBus {
    async fn publish(&self, event: MatchEvent) {
        let match_id = event.match_id.clone();
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for match {}", match_id);
        }
    }
}
