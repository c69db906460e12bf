//! HTTP listener settings (`SERVER_*`).

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::SettingsError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Debug mounts developer tooling such as Swagger UI; release does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    Debug,
    Release,
}

impl ServerMode {
    pub fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// `debug` or `release`.
    pub mode: Option<String>,
    /// Grace period for in-flight requests on shutdown.
    #[ortho_config(default = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    pub shutdown_timeout_secs: u64,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port` for `HttpServer::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    /// Parsed server mode; absent means debug.
    ///
    /// # Errors
    ///
    /// Rejects anything other than `debug` or `release` (case-insensitive).
    pub fn mode(&self) -> Result<ServerMode, SettingsError> {
        match self.mode.as_deref().map(str::trim) {
            None => Ok(ServerMode::Debug),
            Some(raw) if raw.eq_ignore_ascii_case("debug") => Ok(ServerMode::Debug),
            Some(raw) if raw.eq_ignore_ascii_case("release") => Ok(ServerMode::Release),
            Some(raw) => Err(SettingsError::invalid(
                "SERVER_MODE",
                format!("expected `debug` or `release`, got `{raw}`"),
            )),
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
