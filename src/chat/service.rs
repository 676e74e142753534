use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use log::error;

use crate::ai::{self, model::SnippetPreview};
use crate::event::{self, Subject, model::Notification};
use crate::message::{
    self,
    model::{Content, Message, MessageDto, thread_order},
};
use crate::schedule::model::{ScheduleDetails, ScheduleDraft};
use crate::user::{self, model::User};

use super::model::{Conversation, ThreadSession};

const SNIPPET_PREVIEW_MAX_WORDS: usize = 200;

#[async_trait]
pub trait ChatService {
    /// The full thread with `counterpart`, ascending by server timestamp;
    /// in-flight messages sort last.
    async fn load_thread(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
    ) -> super::Result<Vec<MessageDto>>;

    /// Load the thread and attach its one live subscription.
    async fn open_thread(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
    ) -> super::Result<ThreadSession>;

    async fn send_text(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
        text: &str,
    ) -> super::Result<MessageDto>;

    async fn send_schedule(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
        draft: ScheduleDraft,
    ) -> super::Result<MessageDto>;

    /// Pending to accepted, by the non-proposing member only. Accepting an
    /// already accepted proposal returns it unchanged.
    async fn accept_schedule(
        &self,
        auth_id: &user::Id,
        id: &message::Id,
    ) -> super::Result<MessageDto>;

    /// Marks every unread counterpart message in the snapshot as read, in
    /// one atomic batch. Best effort: failures are logged, never surfaced,
    /// and a second run over the same snapshot is a no-op.
    async fn mark_read(&self, auth_id: &user::Id, messages: &[MessageDto]);

    async fn list_conversations(&self, auth_id: &user::Id) -> super::Result<Vec<Conversation>>;

    /// Rich preview for a snippet shared in chat, gateway-backed.
    async fn snippet_preview(&self, snippet: &str, context: &str)
    -> super::Result<SnippetPreview>;
}

pub struct ChatServiceImpl {
    repo: message::Repository,
    user_service: user::Service,
    event_service: event::Service,
    gateway: ai::Gateway,
}

impl ChatServiceImpl {
    pub fn new(
        repo: message::Repository,
        user_service: user::Service,
        event_service: event::Service,
        gateway: ai::Gateway,
    ) -> Self {
        Self {
            repo,
            user_service,
            event_service,
            gateway,
        }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn load_thread(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
    ) -> super::Result<Vec<MessageDto>> {
        // containment query plus an in-memory counterpart filter: same thread
        // contents as the exact-pair query, without needing composite
        // query support from the store
        let mut messages = self.repo.find_by_member(auth_id, auth_id).await?;
        messages.retain(|m| m.members.contains(counterpart));
        messages.sort_by(thread_order);

        Ok(messages)
    }

    async fn open_thread(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
    ) -> super::Result<ThreadSession> {
        let messages = self.load_thread(auth_id, counterpart).await?;
        let events = self
            .event_service
            .subscribe(&Subject::Notifications(auth_id.clone()))
            .await;

        Ok(ThreadSession::new(counterpart.clone(), messages, events))
    }

    async fn send_text(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
        text: &str,
    ) -> super::Result<MessageDto> {
        let text = text.trim();
        if text.is_empty() {
            return Err(message::Error::EmptyText.into());
        }

        let message = Message::text(auth_id.clone(), counterpart.clone(), text)?;
        self.deliver(auth_id, message).await
    }

    async fn send_schedule(
        &self,
        auth_id: &user::Id,
        counterpart: &user::Id,
        draft: ScheduleDraft,
    ) -> super::Result<MessageDto> {
        let details = ScheduleDetails::propose(auth_id.clone(), draft);
        let message = Message::schedule(auth_id.clone(), counterpart.clone(), details)?;
        self.deliver(auth_id, message).await
    }

    async fn accept_schedule(
        &self,
        auth_id: &user::Id,
        id: &message::Id,
    ) -> super::Result<MessageDto> {
        let mut message = self.repo.find_by_id(auth_id, id).await?;
        if !message.members.contains(auth_id) {
            return Err(super::Error::NotMember);
        }
        let Some(details) = message.content.as_schedule() else {
            return Err(super::Error::NotSchedule);
        };

        let mut details = details.clone();
        if !details.accept(auth_id)? {
            // double accept, keep it a no-op
            return Ok(message);
        }

        let content = Content::Schedule(details);
        self.repo.update_content(auth_id, id, &content).await?;
        message.content = content;

        if let Some(proposer) = message.members.counterpart(auth_id) {
            self.event_service
                .publish(
                    &Subject::Notifications(proposer.clone()),
                    Notification::ScheduleAccepted { id: id.clone() },
                )
                .await;
        }

        Ok(message)
    }

    async fn mark_read(&self, auth_id: &user::Id, messages: &[MessageDto]) {
        let unread = messages
            .iter()
            .filter(|m| m.sender_id != *auth_id && !m.is_read)
            .map(|m| m.id.clone())
            .collect::<Vec<_>>();

        if unread.is_empty() {
            return;
        }

        // background task, chat stays usable when receipts fail
        if let Err(e) = self.repo.mark_read(auth_id, &unread).await {
            error!("failed to mark messages as read: {e}");
            return;
        }

        if let Some(counterpart) = messages
            .iter()
            .find_map(|m| m.members.counterpart(auth_id))
        {
            self.event_service
                .publish(
                    &Subject::Notifications(counterpart.clone()),
                    Notification::MessagesSeen { ids: unread },
                )
                .await;
        }
    }

    async fn list_conversations(&self, auth_id: &user::Id) -> super::Result<Vec<Conversation>> {
        let messages = self.repo.find_by_member(auth_id, auth_id).await?;
        let profiles = self.user_service.find_all(auth_id).await?;

        Ok(aggregate(auth_id, messages, &profiles))
    }

    async fn snippet_preview(
        &self,
        snippet: &str,
        context: &str,
    ) -> super::Result<SnippetPreview> {
        let mut preview = self
            .gateway
            .generate_snippet_preview(snippet, context)
            .await?;
        preview.rich_preview = cap_words(&preview.rich_preview, SNIPPET_PREVIEW_MAX_WORDS);

        Ok(preview)
    }
}

impl ChatServiceImpl {
    async fn deliver(&self, auth_id: &user::Id, message: Message) -> super::Result<MessageDto> {
        let dto = match self.repo.insert(auth_id, &message).await {
            Ok(dto) => dto,
            Err(message::Error::_Store(source)) => {
                return Err(super::Error::NotDelivered {
                    payload: Box::new(message),
                    source,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(counterpart) = dto.members.counterpart(auth_id) {
            self.event_service
                .publish(
                    &Subject::Notifications(counterpart.clone()),
                    Notification::NewMessage {
                        message: dto.clone(),
                    },
                )
                .await;
        }

        Ok(dto)
    }
}

/// One conversation per counterpart: the latest message wins, unread counts
/// the counterpart's unseen messages. Counterparts without a resolvable
/// profile are dropped, and an in-flight message only becomes the latest
/// when it is the only one.
fn aggregate(auth_id: &user::Id, mut messages: Vec<MessageDto>, profiles: &[User]) -> Vec<Conversation> {
    let by_id = profiles
        .iter()
        .map(|user| (user.id(), user))
        .collect::<HashMap<_, _>>();

    // newest first, so the first message seen per counterpart is the latest;
    // unresolved timestamps count as earliest here
    messages.sort_by(|a, b| b.timestamp.unwrap_or(0).cmp(&a.timestamp.unwrap_or(0)));

    let mut unread: HashMap<&user::Id, usize> = HashMap::new();
    for message in &messages {
        if let Some(counterpart) = message.members.counterpart(auth_id) {
            if message.sender_id == *counterpart && !message.is_read {
                *unread.entry(counterpart).or_default() += 1;
            }
        }
    }

    let mut seen: HashSet<user::Id> = HashSet::new();
    let mut conversations = Vec::new();

    for message in &messages {
        let Some(counterpart) = message.members.counterpart(auth_id) else {
            continue;
        };
        if seen.contains(counterpart) {
            continue;
        }
        let Some(profile) = by_id.get(counterpart) else {
            continue;
        };

        seen.insert(counterpart.clone());
        conversations.push(Conversation::new(
            (*profile).clone(),
            message.clone(),
            unread.get(counterpart).copied().unwrap_or(0),
        ));
    }

    conversations
}

fn cap_words(text: &str, max: usize) -> String {
    let words = text.split_whitespace().collect::<Vec<_>>();
    if words.len() <= max {
        text.to_owned()
    } else {
        words[..max].join(" ")
    }
}
