//! Log output settings (`LOG_*`).

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::SettingsError;

const DEFAULT_LEVEL: &str = "info";

/// Formatter selected for `tracing-subscriber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOG")]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[ortho_config(default = String::from(DEFAULT_LEVEL))]
    pub level: String,
    /// `json` or `text`.
    pub format: Option<String>,
}

impl LoggingSettings {
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Parsed formatter; absent means JSON.
    ///
    /// # Errors
    ///
    /// Rejects anything other than `json` or `text` (case-insensitive).
    pub fn format(&self) -> Result<LogFormat, SettingsError> {
        match self.format.as_deref().map(str::trim) {
            None => Ok(LogFormat::Json),
            Some(raw) if raw.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
            Some(raw) if raw.eq_ignore_ascii_case("text") => Ok(LogFormat::Text),
            Some(raw) => Err(SettingsError::invalid(
                "LOG_FORMAT",
                format!("expected `json` or `text`, got `{raw}`"),
            )),
        }
    }
}
