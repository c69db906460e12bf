//! HTTP server configuration object and helpers.

use std::sync::Arc;
use std::time::Duration;

use users_api::domain::ports::TokenVerifier;
use users_api::outbound::token::JwtTokenVerifier;
use users_api::settings::{AppSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) shutdown_timeout: Duration,
    pub(crate) swagger: bool,
    pub(crate) require_auth: bool,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
}

impl ServerConfig {
    /// Construct a configuration with authentication and Swagger UI off.
    #[must_use]
    pub fn new(bind_addr: impl Into<String>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            shutdown_timeout: Duration::from_secs(30),
            swagger: false,
            require_auth: false,
            verifier,
        }
    }

    /// Derive the server configuration from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the server mode is not recognised.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        let verifier = JwtTokenVerifier::new(
            settings.auth.secret().as_bytes(),
            settings.auth.expiration(),
        );
        Ok(Self::new(settings.server.bind_addr(), Arc::new(verifier))
            .with_shutdown_timeout(settings.server.shutdown_timeout())
            .with_swagger(settings.server.mode()?.is_debug())
            .with_auth_required(settings.auth.required))
    }

    /// Grace period granted to in-flight requests on shutdown.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Mount Swagger UI at `/docs`.
    #[must_use]
    pub fn with_swagger(mut self, enabled: bool) -> Self {
        self.swagger = enabled;
        self
    }

    /// Gate the users routes behind bearer authentication.
    #[must_use]
    pub fn with_auth_required(mut self, required: bool) -> Self {
        self.require_auth = required;
        self
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
}
