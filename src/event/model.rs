use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::message::{self, model::MessageDto};

/// Push payloads delivered to a user's notification stream. Consumers treat
/// these as hints to re-fetch; the store stays the ordering authority.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    NewMessage { message: MessageDto },
    MessagesSeen { ids: Vec<message::Id> },
    ScheduleAccepted { id: message::Id },
}

pub type NotificationStream = Pin<Box<dyn Stream<Item = Notification> + Send>>;
