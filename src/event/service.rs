use std::collections::HashMap;
use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::{RwLock, broadcast};

use super::Subject;
use super::model::{Notification, NotificationStream};

const CHANNEL_CAPACITY: usize = 64;

#[async_trait]
pub trait EventService {
    /// Best-effort fan-out; a subject with no subscribers drops the payload.
    async fn publish(&self, subject: &Subject, noti: Notification);

    async fn subscribe(&self, subject: &Subject) -> Subscription;
}

#[derive(Clone, Default)]
pub struct BroadcastEventService {
    channels: Arc<RwLock<HashMap<Subject, broadcast::Sender<Notification>>>>,
}

impl BroadcastEventService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventService for BroadcastEventService {
    async fn publish(&self, subject: &Subject, noti: Notification) {
        let sender = self.channels.read().await.get(subject).cloned();

        if let Some(sender) = sender {
            if sender.send(noti).is_err() {
                debug!("no active subscribers for {subject:?}");
            }
        }
    }

    async fn subscribe(&self, subject: &Subject) -> Subscription {
        let mut channels = self.channels.write().await;
        let sender = channels
            .entry(subject.clone())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);

        Subscription {
            subject: subject.clone(),
            receiver: sender.subscribe(),
        }
    }
}

/// Cancellation handle for one notification stream; dropping it releases the
/// subscription.
pub struct Subscription {
    subject: Subject,
    receiver: broadcast::Receiver<Notification>,
}

impl Subscription {
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Next notification, or `None` once the channel closes.
    pub async fn next(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.recv().await {
                Ok(noti) => return Some(noti),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("subscriber lagged, skipped {skipped} notifications");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    pub fn into_stream(mut self) -> NotificationStream {
        Box::pin(stream! {
            while let Some(noti) = self.next().await {
                yield noti;
            }
        })
    }

    /// Explicit release, for call sites where a bare drop would read as an
    /// accident.
    pub fn close(self) {}
}
