//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::HealthService;
use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub health: HealthService,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::domain::ports::{FixtureConnectivityProbe, FixtureUserRepository};
    /// use users_api::domain::{HealthService, UserService};
    /// use users_api::inbound::http::state::HttpState;
    ///
    /// let service = Arc::new(UserService::new(Arc::new(FixtureUserRepository::default())));
    /// let health = HealthService::new(Arc::new(FixtureConnectivityProbe));
    /// let _state = HttpState::new(service.clone(), service, health);
    /// ```
    pub fn new(
        users: Arc<dyn UsersQuery>,
        users_command: Arc<dyn UsersCommand>,
        health: HealthService,
    ) -> Self {
        Self {
            users,
            users_command,
            health,
        }
    }
}
