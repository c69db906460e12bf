//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::ports::{ConnectivityProbe, FixtureConnectivityProbe, FixtureUserRepository};
use crate::domain::{HealthService, UserService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{json_config, query_config};

/// State backed by a fresh in-memory repository and the given probe.
pub fn state_with_probe(probe: Arc<dyn ConnectivityProbe>) -> HttpState {
    let service = Arc::new(UserService::new(Arc::new(FixtureUserRepository::default())));
    HttpState::new(service.clone(), service, HealthService::new(probe))
}

/// State backed by a fresh in-memory repository and an always-up probe.
pub fn in_memory_state() -> HttpState {
    state_with_probe(Arc::new(FixtureConnectivityProbe))
}

/// App with the users scope mounted the same way the server mounts it,
/// minus authentication.
pub fn users_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .service(web::scope("/api/v1").service(crate::inbound::http::users_scope()))
}
