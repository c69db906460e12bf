//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::middleware::Condition;
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use users_api::ApiDoc;
use users_api::Trace;
use users_api::domain::ports::TokenVerifier;
use users_api::domain::{HealthService, UserService};
use users_api::inbound::http::auth::BearerAuth;
use users_api::inbound::http::health::health;
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::{json_config, query_config, users_scope};
use users_api::outbound::persistence::{DbPool, DieselConnectivityProbe, DieselUserRepository};

/// Wire the Diesel adapters into the HTTP state.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let repository = Arc::new(DieselUserRepository::new(pool.clone()));
    let users = Arc::new(UserService::new(repository));
    let health_service =
        HealthService::new(Arc::new(DieselConnectivityProbe::new(pool.clone())));
    HttpState::new(users.clone(), users, health_service)
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    verifier: Arc<dyn TokenVerifier>,
    require_auth: bool,
    swagger: bool,
}

/// Any origin, method, and header; preflights are answered before the bearer
/// gate runs.
fn cors() -> Cors {
    Cors::permissive()
}

fn configure(cfg: &mut web::ServiceConfig, deps: &AppDependencies) {
    let users = users_scope().wrap(Condition::new(
        deps.require_auth,
        BearerAuth::new(deps.verifier.clone()),
    ));

    cfg.app_data(deps.http_state.clone())
        .app_data(json_config())
        .app_data(query_config())
        .service(web::scope("/api/v1").service(health).service(users));

    if deps.swagger {
        cfg.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }
}

/// Construct an Actix HTTP server from prepared state and configuration.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener. Actix handles
/// SIGINT/SIGTERM and drains in-flight requests for the configured grace
/// period before the future resolves.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        shutdown_timeout,
        swagger,
        require_auth,
        verifier,
    } = config;
    let deps = AppDependencies {
        http_state: web::Data::new(http_state),
        verifier,
        require_auth,
        swagger,
    };

    let server = HttpServer::new(move || {
        let deps = deps.clone();
        App::new()
            .wrap(cors())
            .wrap(Trace)
            .configure(move |cfg| configure(cfg, &deps))
    })
    .shutdown_timeout(shutdown_timeout.as_secs())
    .bind(bind_addr)?
    .run();

    Ok(server)
}
