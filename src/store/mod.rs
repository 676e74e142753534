use std::fmt::Display;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user;

pub mod access;
pub mod client;
pub mod memory;
pub mod model;

type Result<T> = std::result::Result<T, Error>;
pub type Store = Arc<dyn client::DocumentStore + Send + Sync>;

/// Store-assigned document identifier.
#[derive(Clone, Debug, Deserialize, Serialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
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

impl From<&user::Id> for Id {
    fn from(id: &user::Id) -> Self {
        Self(id.as_str().to_owned())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("permission denied: {op} on {collection}")]
    PermissionDenied {
        collection: String,
        op: &'static str,
    },
    #[error("document not found: {0}")]
    NotFound(Id),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    pub fn permission_denied(collection: &str, op: &'static str) -> Self {
        Self::PermissionDenied {
            collection: collection.to_owned(),
            op,
        }
    }

    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
