use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schedule::model::ScheduleDetails;
use crate::user;

use super::Id;

/// Canonical two-member thread key. The pair is kept sorted so the same two
/// users produce the same value no matter who queries or sends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Members([user::Id; 2]);

impl Members {
    pub fn new(a: user::Id, b: user::Id) -> super::Result<Self> {
        if a == b {
            return Err(super::Error::InvalidMembers);
        }

        let mut pair = [a, b];
        pair.sort();
        Ok(Self(pair))
    }

    pub fn contains(&self, id: &user::Id) -> bool {
        self.0.iter().any(|member| member == id)
    }

    /// The member that is not `me`, when `me` is part of the pair.
    pub fn counterpart(&self, me: &user::Id) -> Option<&user::Id> {
        if !self.contains(me) {
            return None;
        }
        self.0.iter().find(|member| *member != me)
    }

    pub fn as_slice(&self) -> &[user::Id] {
        &self.0
    }

    /// Distinct and sorted; raw documents are revalidated with this.
    pub fn is_canonical(&self) -> bool {
        self.0[0] < self.0[1]
    }
}

/// Message payload: plain text, a schedule proposal, or an unrecognized
/// shape kept as-is and rendered as nothing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Content {
    Schedule(ScheduleDetails),
    Text(String),
    Unknown(Value),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub const fn as_schedule(&self) -> Option<&ScheduleDetails> {
        match self {
            Self::Schedule(details) => Some(details),
            _ => None,
        }
    }

    /// One-line preview for conversation lists.
    pub fn preview(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Schedule(_) => "📅 Meeting Request",
            Self::Unknown(_) => "...",
        }
    }
}

/// A persisted chat message. Id and timestamp are store metadata: both are
/// `None` until the store has acknowledged the write, and neither is part of
/// the serialized body.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(skip)]
    id: Option<Id>,
    sender_id: user::Id,
    members: Members,
    content: Content,
    #[serde(skip)]
    timestamp: Option<i64>,
    is_read: bool,
}

impl Message {
    pub fn text(sender: user::Id, recipient: user::Id, text: &str) -> super::Result<Self> {
        Self::new(sender, recipient, Content::text(text))
    }

    pub fn schedule(
        sender: user::Id,
        recipient: user::Id,
        details: ScheduleDetails,
    ) -> super::Result<Self> {
        Self::new(sender, recipient, Content::Schedule(details))
    }

    fn new(sender: user::Id, recipient: user::Id, content: Content) -> super::Result<Self> {
        Ok(Self {
            id: None,
            members: Members::new(sender.clone(), recipient)?,
            sender_id: sender,
            content,
            timestamp: None,
            is_read: false,
        })
    }

    pub const fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub const fn sender_id(&self) -> &user::Id {
        &self.sender_id
    }

    pub const fn members(&self) -> &Members {
        &self.members
    }

    pub const fn content(&self) -> &Content {
        &self.content
    }

    pub const fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn with_id(self, id: Id) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn with_timestamp(self, timestamp: i64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..self
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: Id,
    pub sender_id: user::Id,
    pub members: Members,
    pub content: Content,
    /// `None` while the server timestamp has not resolved yet.
    pub timestamp: Option<i64>,
    pub is_read: bool,
}

impl TryFrom<Message> for MessageDto {
    type Error = super::Error;

    fn try_from(message: Message) -> super::Result<Self> {
        Ok(Self {
            id: message.id.ok_or(super::Error::IdNotPresent)?,
            sender_id: message.sender_id,
            members: message.members,
            content: message.content,
            timestamp: message.timestamp,
            is_read: message.is_read,
        })
    }
}

/// Thread order: ascending by server timestamp, messages still in flight
/// sort last.
pub fn thread_order(a: &MessageDto, b: &MessageDto) -> Ordering {
    match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
