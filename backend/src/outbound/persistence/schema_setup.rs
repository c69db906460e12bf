//! Idempotent schema application for the users table.
//!
//! Every statement is safe to re-run. The only visible effect of a second run
//! is that the `updated_at` trigger is dropped and recreated.

use diesel_async::SimpleAsyncConnection;
use tracing::{debug, info};

use super::pool::DbPool;

/// Failure while applying the schema. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No connection could be checked out.
    #[error("schema setup could not acquire a connection: {message}")]
    Connection { message: String },
    /// One DDL step was rejected.
    #[error("schema step `{step}` failed: {message}")]
    Statement { step: &'static str, message: String },
}

/// One named DDL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStep {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Ordered DDL applied by [`apply_schema`].
pub const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        name: "create users table",
        sql: r"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(255) UNIQUE NOT NULL,
    age INTEGER NOT NULL CHECK (age BETWEEN 1 AND 150),
    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP
);",
    },
    SchemaStep {
        name: "create updated_at function",
        sql: r"
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = CURRENT_TIMESTAMP;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;",
    },
    SchemaStep {
        name: "create updated_at trigger",
        sql: r"
DROP TRIGGER IF EXISTS update_users_updated_at ON users;
CREATE TRIGGER update_users_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW
    EXECUTE FUNCTION update_updated_at_column();",
    },
    SchemaStep {
        name: "create email index",
        sql: "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);",
    },
];

/// Apply [`SCHEMA_STEPS`] in order on one pooled connection.
///
/// # Errors
///
/// Stops at the first failing step and reports it by name.
pub async fn apply_schema(pool: &DbPool) -> Result<(), SchemaError> {
    info!("applying database schema");
    let mut conn = pool.get().await.map_err(|err| SchemaError::Connection {
        message: err.message().to_owned(),
    })?;

    for step in SCHEMA_STEPS {
        debug!(step = step.name, "running schema step");
        conn.batch_execute(step.sql)
            .await
            .map_err(|err| SchemaError::Statement {
                step: step.name,
                message: err.to_string(),
            })?;
    }

    info!(steps = SCHEMA_STEPS.len(), "database schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn table_creation_is_guarded() {
        let table = SCHEMA_STEPS.first().expect("first step");
        assert!(table.sql.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(table.sql.contains("email VARCHAR(255) UNIQUE NOT NULL"));
        assert!(table.sql.contains("CHECK (age BETWEEN 1 AND 150)"));
    }

    #[rstest]
    fn trigger_is_recreated_after_its_function() {
        let names: Vec<&str> = SCHEMA_STEPS.iter().map(|step| step.name).collect();
        let function = names
            .iter()
            .position(|name| *name == "create updated_at function")
            .expect("function step");
        let trigger = names
            .iter()
            .position(|name| *name == "create updated_at trigger")
            .expect("trigger step");
        assert!(function < trigger);

        let trigger_sql = SCHEMA_STEPS[trigger].sql;
        assert!(trigger_sql.contains("DROP TRIGGER IF EXISTS update_users_updated_at"));
    }

    #[rstest]
    fn every_step_is_rerunnable() {
        for step in SCHEMA_STEPS {
            let sql = step.sql;
            let guarded = sql.contains("IF NOT EXISTS")
                || sql.contains("OR REPLACE")
                || sql.contains("DROP TRIGGER IF EXISTS");
            assert!(guarded, "step `{}` is not idempotent", step.name);
        }
    }

    #[rstest]
    fn statement_error_names_the_step() {
        let err = SchemaError::Statement {
            step: "create email index",
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "schema step `create email index` failed: permission denied"
        );
    }
}
