use std::sync::Arc;

use crate::store;

pub mod model;
pub mod repository;

type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::MessageRepository + Send + Sync>;

/// Store-assigned message identifier.
pub type Id = store::Id;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("message not found: {0:?}")]
    NotFound(Id),
    #[error("message text is empty")]
    EmptyText,
    #[error("members must be two distinct users")]
    InvalidMembers,
    #[error("message id not present")]
    IdNotPresent,

    #[error(transparent)]
    _ParseJson(#[from] serde_json::Error),
    #[error(transparent)]
    _Store(#[from] store::Error),
}
