//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the DDL in `schema_setup.rs` exactly.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key from a `SERIAL` sequence.
        id -> Int4,
        /// Display name, 2 to 100 characters.
        name -> Varchar,
        /// Unique contact email.
        email -> Varchar,
        /// Age in years, constrained to 1..=150.
        age -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (refreshed by trigger).
        updated_at -> Timestamptz,
    }
}
