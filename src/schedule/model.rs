use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user;

use super::Status;

/// Discriminator for the schedule payload inside message content.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Kind {
    #[serde(rename = "schedule")]
    Schedule,
}

/// A meeting proposal carried inline in a message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetails {
    #[serde(rename = "type")]
    kind: Kind,
    proposer_id: user::Id,
    date: DateTime<Utc>,
    title: String,
    meet_link: MeetLink,
    status: Status,
}

impl ScheduleDetails {
    pub fn propose(proposer_id: user::Id, draft: ScheduleDraft) -> Self {
        Self {
            kind: Kind::Schedule,
            proposer_id,
            date: draft.date,
            title: draft.title,
            meet_link: MeetLink::generate(),
            status: Status::Pending,
        }
    }

    pub const fn proposer_id(&self) -> &user::Id {
        &self.proposer_id
    }

    pub const fn date(&self) -> &DateTime<Utc> {
        &self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn meet_link(&self) -> &MeetLink {
        &self.meet_link
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    /// Applies the accept transition. `Ok(false)` when the proposal is
    /// already accepted, which is a safe no-op (double accepts race).
    pub fn accept(&mut self, actor: &user::Id) -> super::Result<bool> {
        if actor == &self.proposer_id {
            return Err(super::Error::ProposerCannotAccept);
        }
        if self.status == Status::Accepted {
            return Ok(false);
        }

        self.status = Status::Accepted;
        Ok(true)
    }

    /// True when `self` is exactly `current` moved from pending to accepted,
    /// every other field untouched.
    pub fn is_accept_of(&self, current: &Self) -> bool {
        current.status == Status::Pending
            && self.status == Status::Accepted
            && self.proposer_id == current.proposer_id
            && self.date == current.date
            && self.title == current.title
            && self.meet_link == current.meet_link
    }
}

/// Caller-supplied part of a proposal; proposer, link and status are filled
/// in by [`ScheduleDetails::propose`].
#[derive(Clone, Debug, Deserialize)]
pub struct ScheduleDraft {
    pub title: String,
    pub date: DateTime<Utc>,
}

impl ScheduleDraft {
    pub fn new(title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            date,
        }
    }
}

/// Opaque generated URI for the proposed meeting.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetLink(String);

impl MeetLink {
    pub fn generate() -> Self {
        Self(format!("https://meet.devswap.dev/{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
