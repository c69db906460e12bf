//! Environment-sourced configuration.
//!
//! Each group is an OrthoConfig struct with its own prefix, so `DB_HOST`
//! fills [`DatabaseSettings::host`] and so on. Optional fields fall back to
//! documented defaults through accessor methods; values that parse but make no
//! sense (an unknown server mode, say) are rejected by [`AppSettings::load`].

mod auth;
mod database;
mod logging;
mod server;

use std::ffi::OsString;

use ortho_config::OrthoConfig;

pub use auth::AuthSettings;
pub use database::DatabaseSettings;
pub use logging::{LogFormat, LoggingSettings};
pub use server::{ServerMode, ServerSettings};

/// Program name handed to OrthoConfig in place of real CLI arguments.
const PROGRAM_NAME: &str = "users-api";

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A settings group failed to load from its sources.
    #[error("failed to load {group} settings: {message}")]
    Load {
        group: &'static str,
        message: String,
    },
    /// A value loaded but is not acceptable.
    #[error("invalid value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

pub(crate) fn load_group<T: OrthoConfig>(group: &'static str) -> Result<T, SettingsError> {
    T::load_from_iter([OsString::from(PROGRAM_NAME)]).map_err(|err| SettingsError::Load {
        group,
        message: err.to_string(),
    })
}

/// Every settings group, loaded and checked together.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

impl AppSettings {
    /// Load all groups from the environment and validate cross-field rules.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for unparsable or unacceptable values.
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Self {
            server: load_group("server")?,
            database: load_group("database")?,
            auth: load_group("auth")?,
            logging: load_group("logging")?,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        self.server.mode()?;
        self.logging.format()?;
        self.database.connection_url()?;
        Ok(())
    }
}
