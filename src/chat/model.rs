use crate::event::model::Notification;
use crate::event::service::Subscription;
use crate::message::model::MessageDto;
use crate::user::{self, model::User};

/// One entry of the conversation list: the counterpart, the latest message,
/// and how many of their messages are still unread.
#[derive(Clone, Debug)]
pub struct Conversation {
    counterpart: User,
    last_message: MessageDto,
    unread_count: usize,
}

impl Conversation {
    pub fn new(counterpart: User, last_message: MessageDto, unread_count: usize) -> Self {
        Self {
            counterpart,
            last_message,
            unread_count,
        }
    }

    pub const fn counterpart(&self) -> &User {
        &self.counterpart
    }

    pub const fn last_message(&self) -> &MessageDto {
        &self.last_message
    }

    pub const fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// One-line preview of the latest message.
    pub fn preview(&self) -> &str {
        self.last_message.content.preview()
    }
}

/// An open two-party thread: its messages at load time plus the single live
/// subscription tied to it. Dropping the session releases the subscription.
pub struct ThreadSession {
    counterpart: user::Id,
    messages: Vec<MessageDto>,
    events: Subscription,
}

impl ThreadSession {
    pub fn new(counterpart: user::Id, messages: Vec<MessageDto>, events: Subscription) -> Self {
        Self {
            counterpart,
            messages,
            events,
        }
    }

    pub const fn counterpart(&self) -> &user::Id {
        &self.counterpart
    }

    pub fn messages(&self) -> &[MessageDto] {
        &self.messages
    }

    pub async fn next_event(&mut self) -> Option<Notification> {
        self.events.next().await
    }

    /// Close the thread and release its subscription.
    pub fn close(self) {}
}
