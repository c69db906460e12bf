//! Bearer token settings (`JWT_*`).

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::{SettingsError, load_group};

const DEFAULT_SECRET: &str = "your-secret-key";
const DEFAULT_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// Shared secret and token policy.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JWT")]
pub struct AuthSettings {
    /// HMAC secret shared with token issuers.
    pub secret: Option<String>,
    /// Lifetime of tokens minted by `issue-token`.
    #[ortho_config(default = DEFAULT_EXPIRATION_SECS)]
    pub expiration_secs: u64,
    /// Require a bearer token on the users routes.
    #[ortho_config(default = false)]
    pub required: bool,
}

impl AuthSettings {
    /// Load only the `JWT_*` group, for tooling that needs nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a value cannot be parsed.
    pub fn from_env() -> Result<Self, SettingsError> {
        load_group("auth")
    }

    pub fn secret(&self) -> &str {
        self.secret.as_deref().unwrap_or(DEFAULT_SECRET)
    }

    /// True when the built-in development secret is in effect.
    pub fn uses_default_secret(&self) -> bool {
        self.secret() == DEFAULT_SECRET
    }

    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }
}
