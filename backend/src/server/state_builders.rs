//! Builders for HTTP state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use users_api::domain::ports::UserRepository;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::memory::InMemoryUserRepository;
use users_api::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Pick the user repository: Diesel when a pool is configured, otherwise an
/// in-memory store.
fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user repository");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Build the shared HTTP state handed to every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_user_repository(config)))
}
