//! HMAC-signed JWT implementation of the `TokenVerifier` port.
//!
//! Accepts HS256, HS384, and HS512 under a single shared secret. Only the
//! signature and, when present, `exp` are checked; other claims are ignored.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{TokenError, TokenVerifier};

/// Registered claims carried by issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signing failed while minting a token.
#[derive(Debug, thiserror::Error)]
#[error("failed to sign token: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

/// Verifies (and, for tooling, issues) HMAC JWTs.
#[derive(Clone)]
pub struct JwtTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl JwtTokenVerifier {
    /// Build a verifier for `secret`; issued tokens expire after `lifetime`.
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims::<&str>(&[]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime,
        }
    }

    /// Mint an HS256 token for `subject`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenIssueError`] if signing fails.
    pub fn issue(&self, subject: &str) -> Result<String, TokenIssueError> {
        let now = Utc::now().timestamp();
        let lifetime = i64::try_from(self.lifetime.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: subject.to_owned(),
            iat: now,
            exp: now.saturating_add(lifetime),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Token lifetime applied by [`Self::issue`].
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<(), TokenError> {
        decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)
            .map(|_| ())
            .map_err(|err| {
                debug!(error = %err, "bearer token rejected");
                TokenError::invalid(err.to_string())
            })
    }
}
