//! Builders wiring the user service to the configured repository.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use crate::domain::ports::UserRepository;
use crate::domain::UserService;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn state_for<R>(repo: R) -> HttpState
where
    R: UserRepository + 'static,
{
    let service = Arc::new(UserService::new(Arc::new(repo)));
    HttpState::new(service.clone(), service)
}

/// Build handler state backed by PostgreSQL when a pool is configured,
/// otherwise by a process-local repository.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("persisting users in PostgreSQL");
            state_for(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            state_for(InMemoryUserRepository::new())
        }
    };
    web::Data::new(state)
}
