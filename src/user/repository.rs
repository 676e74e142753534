use async_trait::async_trait;

use crate::store::{
    self,
    model::{Filter, Patch},
};

use super::Id;
use super::model::User;

pub const COLLECTION: &str = "users";

#[async_trait]
pub trait UserRepository {
    async fn upsert(&self, actor: &Id, user: &User) -> super::Result<()>;

    async fn find_by_id(&self, actor: &Id, id: &Id) -> super::Result<User>;

    async fn find_all(&self, actor: &Id) -> super::Result<Vec<User>>;

    /// Rewrites both skill lists of the profile in one update.
    async fn update_skills(&self, actor: &Id, user: &User) -> super::Result<()>;
}

pub struct StoreUserRepository {
    store: store::Store,
}

impl StoreUserRepository {
    pub fn new(store: store::Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn upsert(&self, actor: &Id, user: &User) -> super::Result<()> {
        let body = serde_json::to_value(user)?;
        self.store
            .put(actor, COLLECTION, &store::Id::from(user.id()), body)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, actor: &Id, id: &Id) -> super::Result<User> {
        let doc = self
            .store
            .get(actor, COLLECTION, &store::Id::from(id))
            .await?
            .ok_or_else(|| super::Error::NotFound(id.clone()))?;

        Ok(serde_json::from_value(doc.body().clone())?)
    }

    async fn find_all(&self, actor: &Id) -> super::Result<Vec<User>> {
        let docs = self.store.find(actor, COLLECTION, &Filter::All).await?;

        docs.into_iter()
            .map(|doc| serde_json::from_value(doc.body().clone()).map_err(super::Error::from))
            .collect()
    }

    async fn update_skills(&self, actor: &Id, user: &User) -> super::Result<()> {
        let patch = Patch::default()
            .set("skillsToTeach", serde_json::to_value(user.skills_to_teach())?)
            .set("skillsToLearn", serde_json::to_value(user.skills_to_learn())?);

        self.store
            .update(actor, COLLECTION, &store::Id::from(user.id()), &patch)
            .await?;
        Ok(())
    }
}
