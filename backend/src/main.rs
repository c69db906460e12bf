//! Users API entry-point: loads settings, prepares storage, serves HTTP.

mod server;

use color_eyre::eyre::WrapErr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use users_api::outbound::persistence::{DbPool, apply_schema};
use users_api::settings::{AppSettings, LogFormat, LoggingSettings};

use server::{ServerConfig, build_http_state, create_server};

fn init_tracing(logging: &LoggingSettings) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(logging.level()))
        .wrap_err("invalid log filter")?;
    let builder = fmt().with_env_filter(filter);
    let result = match logging.format()? {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    init_tracing(&settings.logging)?;

    if settings.auth.uses_default_secret() {
        warn!("JWT_SECRET is unset; using the built-in development secret");
    }

    let pool = DbPool::connect(settings.database.pool_config()?)
        .await
        .wrap_err("failed to connect to database")?;
    apply_schema(&pool)
        .await
        .wrap_err("failed to apply database schema")?;
    info!(
        max_open_conns = settings.database.max_open_conns(),
        max_idle_conns = settings.database.max_idle_conns(),
        "database schema ready"
    );

    let config = ServerConfig::from_settings(&settings)?;
    info!(
        addr = %config.bind_addr(),
        auth_required = settings.auth.required,
        "starting HTTP server"
    );
    let server = create_server(build_http_state(&pool), config)
        .wrap_err("failed to bind HTTP listener")?;
    server.await.wrap_err("HTTP server failed")?;

    drop(pool);
    info!("server stopped; database pool closed");
    Ok(())
}
