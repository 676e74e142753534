use std::sync::Arc;

use crate::user;

pub mod model;
pub mod service;

pub type Service = Arc<dyn service::EventService + Send + Sync>;

/// Routing key for notifications: one stream per user.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Subject {
    Notifications(user::Id),
}
