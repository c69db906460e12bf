//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Owned pool**: the `DbPool` handle is created at startup and cloned into
//!   each adapter; dropping the last clone closes every connection.
//!
//! # Example
//!
//! ```ignore
//! use users_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/crud_demo")).await?;
//! apply_schema(&pool).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_connectivity_probe;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_setup;

pub use diesel_connectivity_probe::DieselConnectivityProbe;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use schema_setup::{SCHEMA_STEPS, SchemaError, SchemaStep, apply_schema};
