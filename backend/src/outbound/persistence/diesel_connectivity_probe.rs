//! `ConnectivityProbe` adapter that pings PostgreSQL through the pool.

use async_trait::async_trait;

use crate::domain::ports::{ConnectivityError, ConnectivityProbe};

use super::pool::DbPool;

/// Pings the store with `SELECT 1` on a pooled connection.
#[derive(Clone)]
pub struct DieselConnectivityProbe {
    pool: DbPool,
}

impl DieselConnectivityProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectivityProbe for DieselConnectivityProbe {
    async fn ping(&self) -> Result<(), ConnectivityError> {
        self.pool
            .ping()
            .await
            .map_err(|err| ConnectivityError::unreachable(err.message()))
    }
}
