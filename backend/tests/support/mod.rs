//! Shared helpers for integration tests.
//!
//! Integration tests compile as separate crates, so each suite pulls in only
//! the helpers it uses.
#![allow(dead_code)]

pub mod embedded_postgres;

use actix_web::web;

use users_service::inbound::http::health::HealthState;
use users_service::inbound::http::state::HttpState;

/// Health state that already reports ready.
pub fn ready_health_state() -> web::Data<HealthState> {
    let state = web::Data::new(HealthState::new());
    state.mark_ready();
    state
}

/// Wrap handler state for `App::app_data`.
pub fn http_state(state: HttpState) -> web::Data<HttpState> {
    web::Data::new(state)
}
