//! Pooled PostgreSQL connections for the Diesel adapters.
//!
//! [`DbPool`] is an owned, cheaply clonable handle over a bb8 pool of
//! `AsyncPgConnection`s. `main` opens it once, hands clones to each adapter,
//! and drops the last clone after the HTTP server stops, which closes every
//! connection.

use std::time::Duration;

use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, info};

const DEFAULT_MAX_SIZE: u32 = 25;
const DEFAULT_MAX_LIFETIME: Duration = Duration::from_secs(5 * 60);
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// The pool could not be built, could not lend a connection, or the store did
/// not answer the liveness query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },
    #[error("failed to ping database: {message}")]
    Probe { message: String },
}

impl PoolError {
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn probe(message: impl Into<String>) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }

    /// Driver-level detail without the variant prefix.
    pub fn message(&self) -> &str {
        let (Self::Build { message } | Self::Checkout { message } | Self::Probe { message }) =
            self;
        message
    }
}

/// Sizing and timing knobs for [`DbPool`].
///
/// ```
/// use std::time::Duration;
/// use users_api::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://app@localhost/users")
///     .with_max_size(8)
///     .with_min_idle(Some(20))
///     .with_max_lifetime(None);
/// assert_eq!(config.effective_min_idle(), Some(8));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    max_lifetime: Option<Duration>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// 25 connections, none kept warm, recycled after five minutes, 30s
    /// checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: None,
            max_lifetime: Some(DEFAULT_MAX_LIFETIME),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Pool size cap; zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// `None` keeps connections until they fail.
    pub fn with_max_lifetime(mut self, max_lifetime: Option<Duration>) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Warm connections actually requested from bb8, never above the cap.
    pub fn effective_min_idle(&self) -> Option<u32> {
        self.min_idle.map(|idle| idle.min(self.max_size))
    }
}

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool without touching the network beyond what bb8 does for
    /// `min_idle`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when bb8 rejects the configuration or cannot open
    /// the initial idle connections.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.effective_min_idle())
            .max_lifetime(config.max_lifetime)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Build the pool and require one successful ping.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] or [`PoolError::Probe`]; callers treat both as
    /// fatal at startup.
    pub async fn connect(config: PoolConfig) -> Result<Self, PoolError> {
        let max_size = config.max_size();
        let pool = Self::new(config).await?;
        pool.ping().await?;
        info!(max_size, "database connection established");
        Ok(pool)
    }

    /// Borrow a connection for one logical operation.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when none frees up within the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }

    /// Round-trip `SELECT 1`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Probe`] for checkout or query failure alike.
    pub async fn ping(&self) -> Result<(), PoolError> {
        let mut conn = self
            .get()
            .await
            .map_err(|err| PoolError::probe(err.message()))?;
        match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => Ok(()),
            Err(err) => {
                debug!(error = %err, "database ping failed");
                Err(PoolError::probe(err.to_string()))
            }
        }
    }
}
