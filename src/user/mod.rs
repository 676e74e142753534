use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ai, store};

pub mod model;
pub mod repository;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn repository::UserRepository + Send + Sync>;
pub type Service = Arc<dyn service::UserService + Send + Sync>;

/// Opaque stable identifier assigned by the authentication provider.
#[derive(Clone, Debug, Deserialize, Serialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("user not found: {0:?}")]
    NotFound(Id),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("skill name is empty")]
    EmptySkillName,
    #[error("skill is not on the profile: {0}")]
    UnknownSkill(String),

    #[error(transparent)]
    _Ai(#[from] ai::Error),
    #[error(transparent)]
    _ParseJson(#[from] serde_json::Error),
    #[error(transparent)]
    _Store(#[from] store::Error),
}
