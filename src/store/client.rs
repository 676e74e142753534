use async_trait::async_trait;
use serde_json::Value;

use crate::user;

use super::Id;
use super::model::{Created, Document, Filter, Patch};

/// Abstract collection-scoped document database.
///
/// Implementations assign ids and creation timestamps on create and are the
/// single source of truth for ordering. Every operation authorizes the acting
/// user against the configured access policy; a denial is reported as
/// [`super::Error::PermissionDenied`], distinct from not-found and from
/// transport failures.
#[async_trait]
pub trait DocumentStore {
    async fn create(
        &self,
        actor: &user::Id,
        collection: &str,
        body: Value,
    ) -> super::Result<Created>;

    /// Caller-keyed upsert, for documents whose identity is external to the
    /// store (profile documents are keyed by the auth id).
    async fn put(
        &self,
        actor: &user::Id,
        collection: &str,
        id: &Id,
        body: Value,
    ) -> super::Result<Created>;

    async fn get(
        &self,
        actor: &user::Id,
        collection: &str,
        id: &Id,
    ) -> super::Result<Option<Document>>;

    async fn find(
        &self,
        actor: &user::Id,
        collection: &str,
        filter: &Filter,
    ) -> super::Result<Vec<Document>>;

    /// Single-document update. The policy sees the current document before
    /// the patch lands.
    async fn update(
        &self,
        actor: &user::Id,
        collection: &str,
        id: &Id,
        patch: &Patch,
    ) -> super::Result<()>;

    /// Multi-document update: all patches land or none do.
    async fn update_batch(
        &self,
        actor: &user::Id,
        collection: &str,
        updates: &[(Id, Patch)],
    ) -> super::Result<()>;
}
