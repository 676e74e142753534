use std::sync::Arc;

use crate::message::model::Message;
use crate::{ai, message, schedule, store, user};

pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn service::ChatService + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("user is not a member of the thread")]
    NotMember,
    #[error("message is not a schedule proposal")]
    NotSchedule,
    /// The store rejected the send. The attempted payload rides along for
    /// diagnostics and manual retry.
    #[error("message was not delivered")]
    NotDelivered {
        payload: Box<Message>,
        #[source]
        source: store::Error,
    },

    #[error(transparent)]
    _Message(#[from] message::Error),
    #[error(transparent)]
    _Schedule(#[from] schedule::Error),
    #[error(transparent)]
    _User(#[from] user::Error),
    #[error(transparent)]
    _Ai(#[from] ai::Error),
}
