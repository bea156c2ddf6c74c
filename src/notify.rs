//! Publish notifications over the external fanout channel
//!
//! Every save of a published article re-notifies subscribers — including
//! saves where the article was already published. That is deliberate
//! product behavior, not an idempotence bug.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::article::{Article, ArticleStatus};

/// Topic the subscribe fanout listens on
pub const SUBSCRIBE_TOPIC: &str = "subscribe";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification channel error: {0}")]
    Channel(String),
}

/// Fire-and-forget fanout channel. Delivery guarantees beyond
/// at-most-once are the messaging collaborator's responsibility.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), NotifyError>;
}

/// Emits a notification when a save leaves an article published.
pub struct PublishNotifier {
    channel: Arc<dyn NotificationChannel>,
    topic: String,
}

impl PublishNotifier {
    pub fn new(channel: Arc<dyn NotificationChannel>) -> Self {
        Self {
            channel,
            topic: SUBSCRIBE_TOPIC.to_string(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Publish the article id if the just-saved article is published.
    ///
    /// Called after the save has committed; a dispatch failure is logged
    /// and swallowed — it never rolls back or fails the save.
    pub async fn notify_if_published(&self, article: &Article) {
        if article.status != ArticleStatus::Published {
            return;
        }
        let payload = match serde_json::to_vec(&article.id) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(article_id = article.id, %error, "failed to encode publish notification");
                return;
            }
        };
        if let Err(error) = self.channel.publish(&self.topic, payload).await {
            warn!(article_id = article.id, %error, "publish notification dispatch failed");
        }
    }
}

/// In-memory channel recording published messages, for tests and
/// self-contained engines.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    messages: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for MemoryChannel {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }
}
