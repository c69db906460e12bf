//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod connectivity_probe;
mod token_verifier;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use connectivity_probe::MockConnectivityProbe;
pub use connectivity_probe::{ConnectivityError, ConnectivityProbe, FixtureConnectivityProbe};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{TokenError, TokenVerifier};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{CreateUserInput, UpdateUserInput, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
