use std::sync::Arc;

use crate::{ai, user};

pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn service::MatchService + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The candidate roster could not be fetched. Distinct from an empty
    /// match list, which is a valid result and not an error.
    #[error("candidate roster unavailable")]
    RosterUnavailable(#[source] Box<user::Error>),

    #[error(transparent)]
    _Ai(#[from] ai::Error),
    #[error(transparent)]
    _User(#[from] user::Error),
}
