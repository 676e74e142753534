use async_trait::async_trait;
use serde_json::json;

use crate::store::{
    self,
    model::{Document, Filter, Patch},
};
use crate::user;

use super::Id;
use super::model::{Content, Members, Message, MessageDto};

pub const COLLECTION: &str = "messages";

#[async_trait]
pub trait MessageRepository {
    async fn insert(&self, actor: &user::Id, message: &Message) -> super::Result<MessageDto>;

    async fn find_by_id(&self, actor: &user::Id, id: &Id) -> super::Result<MessageDto>;

    /// Every message the given user is a member of (containment query).
    async fn find_by_member(&self, actor: &user::Id, member: &user::Id)
    -> super::Result<Vec<MessageDto>>;

    /// The full thread for a canonical pair (exact equality query).
    async fn find_by_members(
        &self,
        actor: &user::Id,
        members: &Members,
    ) -> super::Result<Vec<MessageDto>>;

    async fn update_content(
        &self,
        actor: &user::Id,
        id: &Id,
        content: &Content,
    ) -> super::Result<()>;

    /// One atomic batch setting `isRead` on every given message.
    async fn mark_read(&self, actor: &user::Id, ids: &[Id]) -> super::Result<()>;
}

pub struct StoreMessageRepository {
    store: store::Store,
}

impl StoreMessageRepository {
    pub fn new(store: store::Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for StoreMessageRepository {
    async fn insert(&self, actor: &user::Id, message: &Message) -> super::Result<MessageDto> {
        let body = serde_json::to_value(message)?;
        let created = self.store.create(actor, COLLECTION, body).await?;

        message
            .clone()
            .with_id(created.id().clone())
            .with_timestamp(created.timestamp())
            .try_into()
    }

    async fn find_by_id(&self, actor: &user::Id, id: &Id) -> super::Result<MessageDto> {
        let doc = self
            .store
            .get(actor, COLLECTION, id)
            .await?
            .ok_or_else(|| super::Error::NotFound(id.clone()))?;

        to_dto(doc)
    }

    async fn find_by_member(
        &self,
        actor: &user::Id,
        member: &user::Id,
    ) -> super::Result<Vec<MessageDto>> {
        let filter = Filter::Contains("members", json!(member));
        let docs = self.store.find(actor, COLLECTION, &filter).await?;

        docs.into_iter().map(to_dto).collect()
    }

    async fn find_by_members(
        &self,
        actor: &user::Id,
        members: &Members,
    ) -> super::Result<Vec<MessageDto>> {
        let filter = Filter::Eq("members", serde_json::to_value(members)?);
        let docs = self.store.find(actor, COLLECTION, &filter).await?;

        docs.into_iter().map(to_dto).collect()
    }

    async fn update_content(
        &self,
        actor: &user::Id,
        id: &Id,
        content: &Content,
    ) -> super::Result<()> {
        let patch = Patch::default().set("content", serde_json::to_value(content)?);
        self.store.update(actor, COLLECTION, id, &patch).await?;
        Ok(())
    }

    async fn mark_read(&self, actor: &user::Id, ids: &[Id]) -> super::Result<()> {
        let updates = ids
            .iter()
            .map(|id| (id.clone(), Patch::default().set("isRead", json!(true))))
            .collect::<Vec<_>>();

        self.store.update_batch(actor, COLLECTION, &updates).await?;
        Ok(())
    }
}

fn to_dto(doc: Document) -> super::Result<MessageDto> {
    let message = serde_json::from_value::<Message>(doc.body().clone())?;

    message
        .with_id(doc.id().clone())
        .with_timestamp(doc.created_at())
        .try_into()
}
