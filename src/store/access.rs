use log::warn;
use serde_json::Value;

use crate::message::{
    self,
    model::{Content, Message},
};
use crate::schedule::Status;
use crate::user;

use super::Id;
use super::model::{Document, Patch};

/// Store-side authorization, the counterpart of the original deployment's
/// database security rules. Client code is untrusted, so these checks must
/// hold even when a service-level guard was bypassed.
pub trait AccessPolicy: Send + Sync {
    fn can_create(&self, actor: &user::Id, collection: &str, body: &Value) -> bool;

    fn can_put(&self, actor: &user::Id, collection: &str, id: &Id, body: &Value) -> bool;

    fn can_read(&self, actor: &user::Id, collection: &str, doc: &Document) -> bool;

    fn can_update(&self, actor: &user::Id, collection: &str, doc: &Document, patch: &Patch)
    -> bool;
}

/// Rules for the core collections.
///
/// - `messages`: only members read; only the sender creates; `isRead` is set
///   by the non-sender; `content` may only move a pending proposal to
///   accepted, by the non-proposer; everything else is immutable.
/// - `users`: any authenticated user reads; only the owner writes.
pub struct Rules;

impl AccessPolicy for Rules {
    fn can_create(&self, actor: &user::Id, collection: &str, body: &Value) -> bool {
        match collection {
            message::repository::COLLECTION => {
                let Ok(msg) = serde_json::from_value::<Message>(body.clone()) else {
                    warn!("rejecting malformed message document");
                    return false;
                };
                message_create_allowed(actor, &msg)
            }
            // profile documents are caller-keyed and go through put
            _ => false,
        }
    }

    fn can_put(&self, actor: &user::Id, collection: &str, id: &Id, body: &Value) -> bool {
        match collection {
            user::repository::COLLECTION => Id::from(actor) == *id && owns_profile_body(actor, body),
            _ => false,
        }
    }

    fn can_read(&self, actor: &user::Id, collection: &str, doc: &Document) -> bool {
        match collection {
            message::repository::COLLECTION => serde_json::from_value::<Message>(doc.body().clone())
                .map(|msg| msg.members().contains(actor))
                .unwrap_or(false),
            user::repository::COLLECTION => true,
            _ => false,
        }
    }

    fn can_update(
        &self,
        actor: &user::Id,
        collection: &str,
        doc: &Document,
        patch: &Patch,
    ) -> bool {
        match collection {
            message::repository::COLLECTION => {
                let Ok(current) = serde_json::from_value::<Message>(doc.body().clone()) else {
                    return false;
                };
                if !current.members().contains(actor) {
                    return false;
                }
                patch
                    .fields()
                    .all(|(field, value)| message_field_update_allowed(actor, &current, field, value))
            }
            user::repository::COLLECTION => Id::from(actor) == *doc.id(),
            _ => false,
        }
    }
}

fn message_create_allowed(actor: &user::Id, msg: &Message) -> bool {
    if msg.sender_id() != actor || !msg.members().contains(actor) || !msg.members().is_canonical() {
        return false;
    }

    match msg.content() {
        Content::Text(text) => !text.trim().is_empty(),
        Content::Schedule(details) => {
            details.proposer_id() == actor && details.status() == Status::Pending
        }
        Content::Unknown(_) => false,
    }
}

fn message_field_update_allowed(
    actor: &user::Id,
    current: &Message,
    field: &str,
    value: &Value,
) -> bool {
    match field {
        "isRead" => value == &Value::Bool(true) && current.sender_id() != actor,
        "content" => {
            let Ok(Content::Schedule(next)) = serde_json::from_value::<Content>(value.clone())
            else {
                return false;
            };
            let Content::Schedule(cur) = current.content() else {
                return false;
            };
            actor != cur.proposer_id() && next.is_accept_of(cur)
        }
        // senderId, members and the server timestamp are immutable
        _ => false,
    }
}

fn owns_profile_body(actor: &user::Id, body: &Value) -> bool {
    body.get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| id == actor.as_str())
}
