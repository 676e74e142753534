use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::user;

use super::access::AccessPolicy;
use super::client::DocumentStore;
use super::model::{Created, Document, Filter, Patch};
use super::{Error, Id};

/// In-process reference implementation of the document store.
///
/// Timestamps are assigned under the write path and are strictly increasing
/// even when the wall clock steps backwards, so thread order never depends on
/// caller clocks.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<Id, Stored>>>,
    policy: Arc<dyn AccessPolicy>,
    clock: AtomicI64,
}

struct Stored {
    created_at: i64,
    body: Value,
}

impl MemoryStore {
    pub fn new(policy: Arc<dyn AccessPolicy>) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            policy,
            clock: AtomicI64::new(0),
        }
    }

    fn now(&self) -> i64 {
        let wall = chrono::Utc::now().timestamp_millis();
        let mut prev = self.clock.load(Ordering::SeqCst);
        loop {
            let next = wall.max(prev + 1);
            match self
                .clock
                .compare_exchange(prev, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        actor: &user::Id,
        collection: &str,
        body: Value,
    ) -> super::Result<Created> {
        if !self.policy.can_create(actor, collection, &body) {
            return Err(Error::permission_denied(collection, "create"));
        }

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();

        let id = Id::random();
        let timestamp = self.now();
        docs.insert(
            id.clone(),
            Stored {
                created_at: timestamp,
                body,
            },
        );

        Ok(Created::new(id, timestamp))
    }

    async fn put(
        &self,
        actor: &user::Id,
        collection: &str,
        id: &Id,
        body: Value,
    ) -> super::Result<Created> {
        if !self.policy.can_put(actor, collection, id, &body) {
            return Err(Error::permission_denied(collection, "put"));
        }

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();

        let created_at = docs
            .get(id)
            .map(|existing| existing.created_at)
            .unwrap_or_else(|| self.now());
        docs.insert(id.clone(), Stored { created_at, body });

        Ok(Created::new(id.clone(), created_at))
    }

    async fn get(
        &self,
        actor: &user::Id,
        collection: &str,
        id: &Id,
    ) -> super::Result<Option<Document>> {
        let collections = self.collections.read().await;
        let Some(stored) = collections.get(collection).and_then(|docs| docs.get(id)) else {
            return Ok(None);
        };

        let doc = Document::new(id.clone(), stored.created_at, stored.body.clone());
        if !self.policy.can_read(actor, collection, &doc) {
            return Err(Error::permission_denied(collection, "read"));
        }

        Ok(Some(doc))
    }

    async fn find(
        &self,
        actor: &user::Id,
        collection: &str,
        filter: &Filter,
    ) -> super::Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut result = Vec::new();
        for (id, stored) in docs {
            if !filter.matches(&stored.body) {
                continue;
            }
            let doc = Document::new(id.clone(), stored.created_at, stored.body.clone());
            if !self.policy.can_read(actor, collection, &doc) {
                // a query touching documents the actor cannot see fails whole
                return Err(Error::permission_denied(collection, "read"));
            }
            result.push(doc);
        }

        result.sort_by_key(Document::created_at);
        Ok(result)
    }

    async fn update(
        &self,
        actor: &user::Id,
        collection: &str,
        id: &Id,
        patch: &Patch,
    ) -> super::Result<()> {
        let mut collections = self.collections.write().await;
        let stored = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        let doc = Document::new(id.clone(), stored.created_at, stored.body.clone());
        if !self.policy.can_update(actor, collection, &doc, patch) {
            return Err(Error::permission_denied(collection, "update"));
        }

        patch.apply(&mut stored.body);
        Ok(())
    }

    async fn update_batch(
        &self,
        actor: &user::Id,
        collection: &str,
        updates: &[(Id, Patch)],
    ) -> super::Result<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_owned()).or_default();

        // validate everything first so the batch lands atomically
        for (id, patch) in updates {
            let stored = docs.get(id).ok_or_else(|| Error::NotFound(id.clone()))?;
            let doc = Document::new(id.clone(), stored.created_at, stored.body.clone());
            if !self.policy.can_update(actor, collection, &doc, patch) {
                return Err(Error::permission_denied(collection, "update"));
            }
        }

        for (id, patch) in updates {
            if let Some(stored) = docs.get_mut(id) {
                patch.apply(&mut stored.body);
            }
        }

        Ok(())
    }
}
