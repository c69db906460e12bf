//! Driven port for checking that the backing store answers.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Raised when the store cannot be reached.
    pub enum ConnectivityError {
        Unreachable { message: String } => "database unreachable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Run a trivial round trip against the store.
    async fn ping(&self) -> Result<(), ConnectivityError>;
}

/// Probe that always succeeds. Used when no store is wired, e.g. in HTTP
/// tests backed by the in-memory repository.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConnectivityProbe;

#[async_trait]
impl ConnectivityProbe for FixtureConnectivityProbe {
    async fn ping(&self) -> Result<(), ConnectivityError> {
        Ok(())
    }
}
