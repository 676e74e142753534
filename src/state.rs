use std::sync::Arc;

use log::info;

use crate::chat::{self, service::ChatServiceImpl};
use crate::event::{self, service::BroadcastEventService};
use crate::matching::{self, service::MatchServiceImpl};
use crate::message::{self, repository::StoreMessageRepository};
use crate::store::{self, access::Rules, memory::MemoryStore};
use crate::user::{self, repository::StoreUserRepository, service::UserServiceImpl};
use crate::{ai, settings};

/// Service handles for one running instance. The store client is constructed
/// here, once, and passed into every component; nothing reaches for global
/// state.
#[derive(Clone)]
pub struct AppState {
    pub store: store::Store,
    pub user_service: user::Service,
    pub chat_service: chat::Service,
    pub match_service: matching::Service,
    pub event_service: event::Service,
}

impl AppState {
    pub fn init(config: &settings::Config, gateway: ai::Gateway) -> Self {
        info!("initializing app state ({})", config.env.as_str());

        let store: store::Store = Arc::new(MemoryStore::new(Arc::new(Rules)));
        Self::with_store(store, gateway)
    }

    /// Wire services over an externally constructed store client.
    pub fn with_store(store: store::Store, gateway: ai::Gateway) -> Self {
        let event_service: event::Service = Arc::new(BroadcastEventService::new());

        let user_repo: user::Repository = Arc::new(StoreUserRepository::new(store.clone()));
        let user_service: user::Service =
            Arc::new(UserServiceImpl::new(user_repo, gateway.clone()));

        let message_repo: message::Repository =
            Arc::new(StoreMessageRepository::new(store.clone()));
        let chat_service: chat::Service = Arc::new(ChatServiceImpl::new(
            message_repo,
            user_service.clone(),
            event_service.clone(),
            gateway.clone(),
        ));

        let match_service: matching::Service =
            Arc::new(MatchServiceImpl::new(user_service.clone(), gateway));

        Self {
            store,
            user_service,
            chat_service,
            match_service,
            event_service,
        }
    }
}
